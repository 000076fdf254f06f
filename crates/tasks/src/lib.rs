//! Task dispatch.
//!
//! A [`TaskRunner`] holds named [`Task`]s and runs the one named by the
//! first command-line argument, passing it the remaining `name=value`
//! arguments and a [`TaskIo`] for its output.

pub mod error;
pub mod io;
pub mod runner;
pub mod task;
pub mod tasks;

pub use error::TaskError;
pub use io::TaskIo;
pub use runner::TaskRunner;
pub use task::Task;
