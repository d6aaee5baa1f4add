//! Entry point for the `record-i18n` command line.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use record_i18n::cli::{
    CliError,
    Invocation,
    run,
};
use record_i18n::config::ConfigManager;
use tracing_subscriber::EnvFilter;

/// Loads settings from the working directory and runs the command.
async fn execute(invocation: Invocation) -> Result<String, CliError> {
    let config_manager = ConfigManager::load(&std::env::current_dir()?)?;

    run(invocation, &config_manager).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let invocation = Invocation::parse();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();

    match execute(invocation).await {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(error) = writeln!(stdout, "{output}") {
                tracing::error!("Failed to write output: {error}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}
