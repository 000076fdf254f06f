use std::io::{self, Write};

use taskkit_args::ArgsError;
use taskkit_coll::ListBuilder;

use crate::error::TaskError;
use crate::io::TaskIo;
use crate::task::Task;

/// Dispatches the command line to a registered task.
///
/// `argv` excludes the program name. The first element selects the task:
/// - nothing, `help`, `--help` or `-h`: print the task list
/// - `help <task>`: print that task's usage
/// - `<task> [args...]`: run it with the remaining arguments
pub struct TaskRunner {
    program: String,
    tasks: ListBuilder<Box<dyn Task>>,
}

impl TaskRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            tasks: ListBuilder::new(),
        }
    }

    /// Register a task. A later task with the same name is never selected.
    pub fn with_task(mut self, task: impl Task + 'static) -> Self {
        self.tasks.push(Box::new(task));
        self
    }

    pub fn task(&self, name: &str) -> Option<&dyn Task> {
        self.tasks
            .iter()
            .find(|t| t.name() == name)
            .map(|t| &**t)
    }

    /// Run and return the process exit code. Failures are reported on the
    /// task's stderr and yield `1`.
    pub fn run(&self, io: &mut TaskIo, argv: &[String]) -> i32 {
        let code = match self.dispatch(io, argv) {
            Ok(code) => code,
            Err(err) => {
                tracing::warn!(error = %err, "task failed");
                // Nowhere left to report a failing stderr.
                let _ = self.report(io, &err);
                1
            }
        };
        let _ = io.flush();
        code
    }

    fn dispatch(&self, io: &mut TaskIo, argv: &[String]) -> Result<i32, TaskError> {
        let Some((first, rest)) = argv.split_first() else {
            self.write_usage(io.stdout())?;
            return Ok(0);
        };

        match first.as_str() {
            "help" | "--help" | "-h" => {
                match rest.first() {
                    Some(name) => {
                        let task = self.find(name)?;
                        io.println(format_args!("usage: {} {}", self.program, task.help()))?;
                        io.println("")?;
                        io.println(task.description())?;
                    }
                    None => self.write_usage(io.stdout())?,
                }
                Ok(0)
            }
            name => {
                let task = self.find(name)?;
                tracing::debug!(task = name, args = rest.len(), "dispatching task");
                let code = task.handle(io, rest)?;
                tracing::debug!(task = name, code, "task finished");
                Ok(code)
            }
        }
    }

    fn find(&self, name: &str) -> Result<&dyn Task, TaskError> {
        self.task(name)
            .ok_or_else(|| TaskError::UnknownTask(name.to_owned()))
    }

    fn report(&self, io: &mut TaskIo, err: &TaskError) -> io::Result<()> {
        io.eprintln(format_args!("error: {err}"))?;
        match err {
            TaskError::UnknownTask(_) => self.write_usage(io.stderr()),
            TaskError::Args(ArgsError::Unrecognized {
                suggestion: Some(suggestion),
                ..
            }) => io.eprintln(format_args!("did you mean {suggestion}?")),
            _ => Ok(()),
        }
    }

    fn write_usage(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "usage: {} <task> [name=value | name]...", self.program)?;
        writeln!(out)?;
        writeln!(out, "tasks:")?;

        let width = self.tasks.iter().map(|t| t.name().len()).max().unwrap_or(0);
        for task in &self.tasks {
            writeln!(out, "  {:<width$}  {}", task.name(), task.description())?;
        }

        writeln!(out)?;
        writeln!(out, "run '{} help <task>' for task usage", self.program)
    }
}
