use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{CliMode, parse_cli_mode, run_agenda_mode, run_export_mode};
mod tui;
use tui::run_tui;

use daybook::storage::config::Config;

fn main() -> Result<()> {
    setup_logging();

    let cli_mode = match parse_cli_mode() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", cli::usage());
            return Ok(());
        }
    };

    let config = match Config::load_or_create() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    };

    match cli_mode {
        CliMode::Export { format, month } => run_export_mode(&config, format, month),
        CliMode::AgendaDate(date) => run_agenda_mode(&config, date),
        CliMode::Default { sample } => Ok(run_tui(config, sample)?),
    }
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "daybook.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("daybook started");
}
