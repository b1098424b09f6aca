use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slidemenu_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "slidemenu")]
#[command(author, version, about = "Swipe-to-reveal message rows in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive demo
    Run,
    /// Replay a JSON gesture script headlessly and print the frame trace
    Replay {
        /// Path to the gesture script
        script: PathBuf,
        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write the defaults to the config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    let interactive = matches!(cli.command, None | Some(Commands::Run));
    init_logging(&config, interactive)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config),
        Some(Commands::Replay { script, json }) => commands::replay::run(&config, &script, json),
        Some(Commands::Config { init }) => commands::config::run(&config, init),
    }
}

/// Install the tracing subscriber
///
/// The interactive demo owns the terminal, so its log lines go to a file
/// instead of stderr.
fn init_logging(config: &AppConfig, interactive: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if interactive {
        let log_path = AppConfig::log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&log_path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
