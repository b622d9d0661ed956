use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use snapdeck_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "snapdeck")]
#[command(author, version, about = "Section-by-section scroll-snap presentations in the terminal")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Deck to present (shorthand for `run <deck>`)
    deck: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Present a deck
    Run {
        /// Path to the deck TOML file
        deck: PathBuf,
    },
    /// Validate a deck and print its timeline summary
    Check {
        /// Path to the deck TOML file
        deck: PathBuf,
    },
    /// Show the configuration file location
    Config {
        /// Write the default configuration if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let tui = match cli.command {
        Some(Commands::Run { .. }) => true,
        None => cli.deck.is_some(),
        _ => false,
    };
    init_logging(&config, tui)?;

    match cli.command {
        Some(Commands::Run { deck }) => commands::run::run(config, &deck).await,
        Some(Commands::Check { deck }) => commands::check::run(&config, &deck),
        Some(Commands::Config { init }) => commands::config::run(&config, init),
        None => match cli.deck {
            Some(deck) => commands::run::run(config, &deck).await,
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        },
    }
}

/// Install the tracing subscriber.
///
/// While the terminal UI owns the screen, log lines go to the configured log
/// file instead of stderr.
fn init_logging(config: &AppConfig, tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let (file_layer, stderr_layer) = if tui {
        let path = &config.general.log_file;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::options().create(true).append(true).open(path)?;
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        (Some(layer), None)
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}
