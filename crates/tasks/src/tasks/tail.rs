use std::fs::File;
use std::io::{BufRead, BufReader};

use taskkit_args::{ArgsError, TaskArgs};
use taskkit_coll::RotatingBuffer;

use crate::error::TaskError;
use crate::io::TaskIo;
use crate::task::Task;

/// Number of lines kept when neither `--lines` nor the config says otherwise.
pub const DEFAULT_TAIL_LINES: usize = 10;

/// Upper bound for `--lines`; every kept line costs a slot up front.
pub const MAX_TAIL_LINES: usize = 1_000_000;

const EXPECTED_ARGS: [&str; 3] = ["--lines", "--file", "--format"];
const FORMATS: [&str; 2] = ["text", "json"];

/// Prints the last lines of a file or of stdin.
///
/// Lines go through a [`RotatingBuffer`] sized by `--lines`, so memory use
/// stays bounded however long the input is.
#[derive(Debug)]
pub struct TailTask {
    default_lines: usize,
}

impl TailTask {
    pub fn new(default_lines: usize) -> Self {
        Self { default_lines }
    }
}

impl Default for TailTask {
    fn default() -> Self {
        Self::new(DEFAULT_TAIL_LINES)
    }
}

impl Task for TailTask {
    fn name(&self) -> &str {
        "tail"
    }

    fn help(&self) -> &str {
        "tail [--lines=N] [--file=<path>] [--format=text|json]"
    }

    fn description(&self) -> &str {
        "Print the last N lines of a file (or stdin)."
    }

    fn handle(&self, io: &mut TaskIo, args: &[String]) -> Result<i32, TaskError> {
        let args = TaskArgs::parse(args);
        args.validate_expected_args(&EXPECTED_ARGS)?;

        let lines = args.usize_value("--lines", self.default_lines)?;
        if lines > MAX_TAIL_LINES {
            return Err(ArgsError::OutOfRange {
                name: "--lines".into(),
                value: lines.to_string(),
                max: MAX_TAIL_LINES.to_string(),
            }
            .into());
        }
        let format = args.verify_string_value("--format", &FORMATS, "text")?;
        let mut buffer = RotatingBuffer::new(lines)?;

        let read = match args.file_value("--file") {
            Some(path) => {
                tracing::debug!(path = %path.display(), lines, "tailing file");
                collect_lines(BufReader::new(File::open(&path)?), &mut buffer)?
            }
            None => {
                tracing::debug!(lines, "tailing stdin");
                collect_lines(io.stdin(), &mut buffer)?
            }
        };
        tracing::debug!(read, kept = read.min(lines), "input consumed");

        if format == "json" {
            io.println(serde_json::to_string(&buffer)?)?;
        } else {
            for line in buffer.export(None).into_iter().flatten() {
                io.println(line)?;
            }
        }
        Ok(0)
    }
}

/// Feed every line of `reader` into `buffer`; returns the number of lines read.
fn collect_lines<R: BufRead>(reader: R, buffer: &mut RotatingBuffer<String>) -> std::io::Result<usize> {
    let mut count = 0;
    for line in reader.lines() {
        buffer.add(line?);
        count += 1;
    }
    Ok(count)
}
