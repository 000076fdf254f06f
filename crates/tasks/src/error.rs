//! Error types for task dispatch and the built-in tasks.

use taskkit_args::ArgsError;
use taskkit_coll::BufferError;

/// Errors produced while dispatching or running a task.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("unknown task: {0}")]
    UnknownTask(String),

    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
