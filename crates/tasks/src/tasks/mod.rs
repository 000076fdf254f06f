//! Built-in tasks.

mod args;
mod props;
mod tail;

pub use args::ArgsTask;
pub use props::PropsTask;
pub use tail::{DEFAULT_TAIL_LINES, MAX_TAIL_LINES, TailTask};
