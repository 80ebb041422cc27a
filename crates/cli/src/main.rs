//! Admin console - command-line shell for the admin backend

mod commands;
mod config;
mod logging;

use admin_console_client::{FileTokenStore, TokenStore};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use config::ConsoleConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "admin-console")]
#[command(about = "Manage users, workshops and skills on the admin backend")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Configuration file (TOML or YAML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// State directory for the session file and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = config::resolve_data_dir(cli.data_dir);
    logging::init_logging(cli.log_level.into(), &data_dir, cli.no_file_log)?;

    let settings = ConsoleConfig::load(cli.config.as_deref())?;
    let session_path = settings.session_path(&data_dir);
    debug!(base_url = %settings.base_url, session = %session_path.display(), "Loaded configuration");

    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(session_path));
    let client = settings.build_client(store)?;

    if let Err(e) = cli.command.execute(&client).await {
        error!("Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
