use taskkit_args::TaskArgs;

use crate::error::TaskError;
use crate::io::TaskIo;
use crate::task::Task;

/// Prints the arguments as parsed. Accepts any arguments.
#[derive(Debug, Default)]
pub struct ArgsTask;

impl Task for ArgsTask {
    fn name(&self) -> &str {
        "args"
    }

    fn help(&self) -> &str {
        "args [name=value | name]..."
    }

    fn description(&self) -> &str {
        "Show how the given arguments are parsed."
    }

    fn handle(&self, io: &mut TaskIo, args: &[String]) -> Result<i32, TaskError> {
        let parsed = TaskArgs::parse(args);
        io.info(format_args!("parsed {} argument(s)", parsed.names().count()))?;

        for (name, value) in parsed.iter() {
            match value {
                Some(value) => io.println(format_args!("{name}={value}"))?,
                None => io.println(name)?,
            }
        }
        Ok(0)
    }
}
