use crate::error::TaskError;
use crate::io::TaskIo;

/// A named unit of work run by a [`TaskRunner`](crate::TaskRunner).
pub trait Task {
    /// Name used to select the task on the command line.
    fn name(&self) -> &str;

    /// One-line usage, e.g. `tail [--lines=N]`.
    fn help(&self) -> &str;

    /// Short description shown in the task list.
    fn description(&self) -> &str;

    /// Run the task with the arguments following its name.
    ///
    /// The returned value is the process exit code.
    fn handle(&self, io: &mut TaskIo, args: &[String]) -> Result<i32, TaskError>;
}
