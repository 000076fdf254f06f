//! Task input/output streams.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use chrono::Local;

/// Prefix format for [`TaskIo::info`], e.g. `[2024/03/01 14:05:09.042 +0100]`.
pub const TIMESTAMP_FORMAT: &str = "[%Y/%m/%d %H:%M:%S%.3f %z]";

/// The streams a task reads from and writes to.
pub struct TaskIo {
    stdin: Box<dyn BufRead>,
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl TaskIo {
    pub fn new(
        stdin: impl BufRead + 'static,
        stdout: impl Write + 'static,
        stderr: impl Write + 'static,
    ) -> Self {
        Self {
            stdin: Box::new(stdin),
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
        }
    }

    /// Streams of the current process.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }

    pub fn stdin(&mut self) -> &mut dyn BufRead {
        &mut *self.stdin
    }

    pub fn stdout(&mut self) -> &mut dyn Write {
        &mut *self.stdout
    }

    pub fn stderr(&mut self) -> &mut dyn Write {
        &mut *self.stderr
    }

    /// Write `message` to stdout prefixed with a local timestamp.
    pub fn info(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.stdout, "{} {message}", timestamp())
    }

    /// Write a raw line to stdout.
    pub fn println(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.stdout, "{line}")
    }

    /// Write a raw line to stderr.
    pub fn eprintln(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.stderr, "{line}")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
