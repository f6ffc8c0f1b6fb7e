use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trendwatch::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "trendwatch",
    version,
    about = "Search interest trend dashboard: fetch interest over time and chart it",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the config file
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single fetch and chart cycle
    Fetch {
        /// Comma-separated keywords
        #[arg(short, long)]
        keywords: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,

        /// SVG output path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Prompt for keywords and dates, chart them, repeat (default)
    Interactive,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env();
            config
        }
        None => Config::from_env()?,
    };
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    config.validate().context("Invalid configuration")?;

    setup_tracing(&config.logging.level, &config.logging.format, cli.verbose)?;

    tracing::info!("trendwatch starting");

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Fetch {
            keywords,
            start,
            end,
            output,
        } => {
            tracing::info!(
                keywords = ?keywords,
                start = ?start,
                end = ?end,
                output = ?output,
                "Starting fetch command"
            );
            commands::fetch(&config, keywords, start, end, output).await?;
        }

        Commands::Interactive => {
            tracing::info!("Starting interactive session");
            commands::interactive(&config).await?;
        }
    }

    tracing::info!("trendwatch finished");
    Ok(())
}

fn setup_tracing(level: &str, format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("trendwatch=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("trendwatch={level},warn"))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}
