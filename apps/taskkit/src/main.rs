//! taskkit entry point.

mod config;

use taskkit_tasks::{TaskIo, TaskRunner};
use taskkit_tasks::tasks::{ArgsTask, PropsTask, TailTask};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = config::Config::load()?;

    // Logs go to stderr so task output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        tail_lines = config.tail_lines,
        "starting taskkit"
    );

    let runner = TaskRunner::new("taskkit")
        .with_task(TailTask::new(config.tail_lines))
        .with_task(PropsTask)
        .with_task(ArgsTask);

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let code = runner.run(&mut TaskIo::stdio(), &argv);

    std::process::exit(code);
}
