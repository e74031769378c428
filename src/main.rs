use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use clap::{ArgAction, Parser, ValueEnum};
use colored::*;
use miette::{Context, IntoDiagnostic, Result};
use tracing::Level;

use appendkv::{
    api::StorageEngine,
    config::{Config, StorageErrorPolicy},
    shell, DEFAULT_LOG_FILE,
};

/// Persistent key-value store driven by SET/GET/EXIT commands on stdin.
#[derive(Parser, Debug)]
#[command(name = "appendkv", version, about, long_about = None)]
struct Cli {
    /// Path to the append-only data file
    #[arg(short, long, env = "APPENDKV_DATA_FILE", default_value = DEFAULT_LOG_FILE)]
    data_file: PathBuf,

    /// What to do when a write cannot be persisted
    #[arg(long, value_enum, default_value_t = OnStorageError::Continue)]
    on_storage_error: OnStorageError,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnStorageError {
    /// Drop the failed write and keep reading commands
    Continue,
    /// Stop and exit with an error
    Exit,
}

impl From<OnStorageError> for StorageErrorPolicy {
    fn from(value: OnStorageError) -> Self {
        match value {
            OnStorageError::Continue => StorageErrorPolicy::Continue,
            OnStorageError::Exit => StorageErrorPolicy::Exit,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = Config::default()
        .with_data_file(cli.data_file)
        .with_storage_error_policy(cli.on_storage_error.into());

    let mut engine = StorageEngine::with_config(&config)
        .into_diagnostic()
        .wrap_err_with(|| format!("could not open store at {:?}", config.data_file()))?;

    let interactive = io::stderr().is_terminal();
    if interactive {
        let stats = engine.recovery();
        info(&format!(
            "{} keys loaded from {:?} ({} records replayed)",
            engine.len(),
            engine.path(),
            stats.replayed
        ));
        if stats.skipped > 0 {
            warn(&format!("skipped {} malformed log lines", stats.skipped));
        }
    }

    shell::run(
        &mut engine,
        io::stdin().lock(),
        io::stdout().lock(),
        config.storage_error_policy(),
    )
    .into_diagnostic()
    .wrap_err("command loop stopped")?;

    Ok(())
}

/// Log events go to stderr; stdout carries only protocol output.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn warn(msg: &str) {
    eprintln!("{} {}", "⚠".bright_yellow().bold(), msg.yellow());
}

fn info(msg: &str) {
    eprintln!("{} {}", "➤".bright_cyan().bold(), msg.cyan());
}
