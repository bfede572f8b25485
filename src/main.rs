//! PayPilot main entry point

use anyhow::Context;
use clap::Parser;
use paypilot_api::start_server;
use paypilot_config::{Config, ConfigError};
use paypilot_core::SourceRef;
use paypilot_mock::MockBackend;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "paypilot")]
#[command(author = "PayPilot Contributors")]
#[command(version = "0.1.0")]
#[command(about = "PayPilot marketing site and payments analytics dashboard", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, missing) = match Config::load(args.config.clone()) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => {
            eprintln!("{}", e.to_details());
            return Err(e).with_context(|| format!("Failed to load configuration from {}", args.config.display()));
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    if missing {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    } else {
        log::info!("Config loaded from {}", args.config.display());
    }
    log::info!(
        "Simulated backend: {} transactions, {}ms latency, failure rate {}",
        config.simulation.transaction_count,
        config.simulation.latency_ms,
        config.simulation.failure_rate
    );

    let source: SourceRef = Arc::new(MockBackend::new(&config.simulation));

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, source))
}
