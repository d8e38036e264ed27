// In app/src/main.rs

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracker::Tracker;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Technical-indicator signal tracker for a Binance spot pair.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serves `GET /track` over HTTP.
    Serve,

    /// Runs a single evaluation and prints the report as JSON.
    Check {
        /// Also send the alert if any signal fired.
        #[arg(long)]
        notify: bool,
    },

    /// Evaluates on a fixed interval, alerting on every cycle with signals.
    Watch {
        /// Seconds between evaluations; defaults to `market.poll_interval_secs`.
        #[arg(long)]
        every: Option<u64>,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = app_config::load_settings().context("failed to load settings")?;

    // --- Tracing Setup ---
    let level = tracing::Level::from_str(&settings.app.log_level).unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("hyper_util", tracing::Level::WARN)
            .with_target("reqwest", tracing::Level::WARN)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::info!(
        environment = %settings.app.environment,
        symbol = %settings.market.symbol,
        interval = %settings.market.interval,
        "Starting signal tracker"
    );

    // --- Component Instantiation ---
    let source = Arc::new(api_client::new(&settings.binance)?);
    let notifier = notifier::from_settings(&settings.telegram)?;
    tracing::info!(transport = notifier.name(), "Notifier ready.");
    let tracker = Arc::new(Tracker::new(&settings, source, notifier)?);

    match cli.command {
        Commands::Serve => {
            web_server::run(settings.server.clone(), tracker).await?;
        }
        Commands::Check { notify } => {
            handle_check(&tracker, notify).await?;
        }
        Commands::Watch { every } => {
            let secs = every.unwrap_or(settings.market.poll_interval_secs).max(1);
            handle_watch(&tracker, Duration::from_secs(secs)).await;
        }
    }

    tracing::info!("Signal tracker has finished.");
    Ok(())
}

// --- "Check" Subcommand Logic ---

async fn handle_check(tracker: &Tracker, notify: bool) -> Result<()> {
    if !notify {
        let report = tracker.evaluate().await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let outcome = tracker.track().await?;
    println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    // Wait for delivery so the process does not exit mid-request.
    if let Some(alert) = outcome.alert {
        alert.await?;
    }
    Ok(())
}

// --- "Watch" Subcommand Logic ---

/// Runs one cycle per tick until Ctrl-C. A failed cycle is logged and the
/// loop carries on with the next tick.
async fn handle_watch(tracker: &Tracker, period: Duration) {
    tracing::info!(period_secs = period.as_secs(), "Watching for signals.");
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = tracker.track().await {
                    tracing::error!(error = %e, "Evaluation cycle failed.");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received.");
                break;
            }
        }
    }
}
