use taskkit_args::TaskArgs;

use crate::error::TaskError;
use crate::io::TaskIo;
use crate::task::Task;

const EXPECTED_ARGS: [&str; 2] = ["--file", "--key"];

/// Prints the entries of a properties file.
#[derive(Debug, Default)]
pub struct PropsTask;

impl Task for PropsTask {
    fn name(&self) -> &str {
        "props"
    }

    fn help(&self) -> &str {
        "props --file=<path> [--key=<name>]"
    }

    fn description(&self) -> &str {
        "Print the entries of a properties file, or the value of one key."
    }

    fn handle(&self, io: &mut TaskIo, args: &[String]) -> Result<i32, TaskError> {
        let args = TaskArgs::parse(args);
        args.validate_expected_args(&EXPECTED_ARGS)?;
        args.required_string_value("--file")?;

        let props = args.props_value("--file")?;

        match args.string_value("--key").filter(|k| !k.is_empty()) {
            Some(key) => match props.get(key) {
                Some(value) => io.println(format_args!("{key}={value}"))?,
                None => {
                    io.eprintln(format_args!("no such property: {key}"))?;
                    return Ok(1);
                }
            },
            None => {
                for (key, value) in props.iter() {
                    io.println(format_args!("{key}={value}"))?;
                }
            }
        }
        Ok(0)
    }
}
