//! MarketPulse CLI — session and predict commands.
//!
//! Commands:
//! - `session` — classify the current instant for an exchange and print the
//!   session state with countdown labels
//! - `predict` — run the signal engine over a quote supplied on the command
//!   line and print the recommendation merged with the session state
//!
//! Output is JSON on stdout; logs go to stderr (RUST_LOG controls the
//! filter) so the payload stays pipeable.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use marketpulse_core::config::MarketConfig;
use marketpulse_core::domain::{PredictionResult, Quote, SessionState};
use marketpulse_core::session::SessionScheduler;
use marketpulse_core::signal::SignalEngine;

#[derive(Parser)]
#[command(
    name = "marketpulse",
    about = "MarketPulse CLI — market sessions and trading signals"
)]
struct Cli {
    /// TOML file overriding the built-in exchange table.
    #[arg(long, global = true)]
    market_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the session state and countdowns for an exchange.
    Session {
        /// Exchange id (NSE or BSE with the default config).
        #[arg(long, default_value = "NSE")]
        exchange: String,
    },
    /// Derive a trading signal for a quote.
    Predict {
        /// Stock symbol.
        #[arg(long)]
        symbol: String,

        /// Current price (must be positive).
        #[arg(long)]
        price: f64,

        /// Absolute day change.
        #[arg(long, default_value_t = 0.0)]
        day_change: f64,

        /// Day change in percent.
        #[arg(long, default_value_t = 0.0)]
        day_change_percent: f64,

        /// Traded volume.
        #[arg(long, default_value_t = 0)]
        volume: u64,

        /// 52-week high. Defaults to the current price.
        #[arg(long)]
        high_52w: Option<f64>,

        /// 52-week low. Defaults to the current price.
        #[arg(long)]
        low_52w: Option<f64>,

        /// Exchange whose session state is attached to the response.
        #[arg(long, default_value = "NSE")]
        exchange: String,
    },
}

#[derive(Serialize)]
struct SessionReport {
    #[serde(flatten)]
    state: SessionState,
    time_until_open: String,
    time_until_close: String,
}

#[derive(Serialize)]
struct PredictionReport {
    #[serde(flatten)]
    prediction: PredictionResult,
    session: SessionReport,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.market_config.as_deref())?;
    let scheduler = SessionScheduler::new(config);

    match cli.command {
        Commands::Session { exchange } => {
            let report = session_report(&scheduler, &exchange);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Predict {
            symbol,
            price,
            day_change,
            day_change_percent,
            volume,
            high_52w,
            low_52w,
            exchange,
        } => {
            let quote = Quote {
                symbol,
                current_price: price,
                day_change,
                day_change_percent,
                volume,
                high_52w: high_52w.unwrap_or(price),
                low_52w: low_52w.unwrap_or(price),
            };

            let engine = SignalEngine::new();
            let prediction = engine
                .predict(&quote)
                .context("prediction rejected the quote")?;

            let report = PredictionReport {
                prediction,
                session: session_report(&scheduler, &exchange),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<MarketConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read market config {}", path.display()))?;
            MarketConfig::from_toml_str(&text)
                .with_context(|| format!("invalid market config {}", path.display()))
        }
        None => Ok(MarketConfig::default()),
    }
}

fn session_report(scheduler: &SessionScheduler, exchange: &str) -> SessionReport {
    SessionReport {
        state: scheduler.session_state(exchange),
        time_until_open: scheduler.time_until_open(exchange),
        time_until_close: scheduler.time_until_close(exchange),
    }
}
