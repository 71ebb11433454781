//! Logging initialization and colour control.

use anyhow::Result;
use colored::control as color_control;
use is_terminal::IsTerminal;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;
use crate::output::OutputFormat;

/// Pick the log level for the given flags. JSON output drops to errors only unless
/// `--verbose` was given.
pub fn log_level(cli: &Cli) -> Level {
    if cli.verbose {
        Level::DEBUG
    } else if cli.quiet || is_machine_output(cli) {
        Level::ERROR
    } else {
        Level::WARN
    }
}

fn is_machine_output(cli: &Cli) -> bool {
    cli.command.format() == Some(OutputFormat::Json)
}

/// Initialize the logging subsystem based on CLI flags.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Colours only make sense on an interactive terminal
    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    let piped = !std::io::stdout().is_terminal();
    if cli.no_color || env_no_color || piped || is_machine_output(cli) {
        color_control::set_override(false);
    }
    Ok(())
}
