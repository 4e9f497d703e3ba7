//! DirectionalScalper - Main Entry Point
//!
//! Loads the configuration, selects a strategy and runs the polling loop
//! against the configured futures exchange.

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use directional_scalper::config::load_config;
use directional_scalper::exchange::Exchange;
use directional_scalper::strategy::{load_strategy, StrategyKind};
use directional_scalper::Bot;

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file name, looked up as given and then under ./config/
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Strategy to run (hedge, long, short, blackjack, scalein, violent)
    #[arg(short, long)]
    strategy: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Run a single polling tick and exit
    #[arg(long)]
    once: bool,
}

/// Map a configured level name to a filter, defaulting to info
fn level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" | "warning" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

fn init_logging(level: &str) -> Result<()> {
    // RUST_LOG directives refine the chosen level, e.g. `reqwest=warn`
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // The config decides the log level, so logging starts once it is read
    let config = load_config(&args.config);
    let level = args
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.logger.level.clone()))
        .unwrap_or_else(|| "info".to_string());
    init_logging(&level)?;

    let config = config
        .inspect_err(|e| error!("{}", e))
        .with_context(|| format!("Failed to load configuration {}", args.config))?;
    info!("Configuration file: {}", args.config);

    let kind: StrategyKind = args
        .strategy
        .parse()
        .inspect_err(|e| error!("{}", e))
        .context("Invalid --strategy")?;

    let timeout = Duration::from_secs(config.bot.request_timeout_seconds);
    let exchange = Exchange::new(&config.exchange, timeout)?;
    let strategy = load_strategy(kind);
    let mut bot = Bot::new(exchange, strategy, config.bot.clone())?;

    if args.once {
        bot.startup().await;
        bot.tick().await;
    } else {
        bot.run().await?;
    }

    info!("Shutting down");
    Ok(())
}
