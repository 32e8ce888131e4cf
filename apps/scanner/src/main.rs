//! peerscout - P2P fiat rate scanner
//!
//! Polls the P2P quote venue for the best tradable price of an asset across
//! a set of fiat currencies, normalizes everything into a reference currency,
//! and alerts when a configured threshold is crossed.

mod render;

use clap::Parser;
use peerscout_core::{CryptoAsset, Fiat, FixedPoint, TradeDirection};
use peerscout_engine::{EngineConfig, QuoteEngine, Scheduler};
use peerscout_venue::{BinanceP2p, OpenErApi, QuoteVenue, RateSource};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// P2P rate scanner CLI
#[derive(Parser, Debug)]
#[command(name = "peerscout")]
#[command(about = "P2P fiat quote scanner and alert bot", long_about = None)]
struct Args {
    /// Asset amount per quote
    #[arg(short, long, default_value_t = 100.0)]
    amount: f64,

    /// Alert when the reference-currency value crosses this threshold
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Trade direction: buy or sell
    #[arg(short, long, default_value = "sell")]
    direction: String,

    /// Asset to trade: USDT, USDC, BTC, ETH
    #[arg(long, default_value = "USDT")]
    asset: String,

    /// Fiat currencies to scan, comma separated (defaults to the full set)
    #[arg(short, long, value_delimiter = ',')]
    fiats: Vec<String>,

    /// Auto-refresh interval in seconds
    #[arg(short, long, default_value_t = 60)]
    interval: u64,

    /// Fetch once and exit instead of auto-refreshing
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn parse_direction(s: &str) -> TradeDirection {
    match s.to_lowercase().as_str() {
        "buy" => TradeDirection::Buy,
        _ => TradeDirection::Sell,
    }
}

fn build_config(args: &Args) -> EngineConfig {
    let mut config = EngineConfig::default();

    if !args.fiats.is_empty() {
        let fiats: Vec<Fiat> = args
            .fiats
            .iter()
            .filter_map(|s| {
                let parsed = Fiat::parse(s);
                if parsed.is_none() {
                    warn!(fiat = s.as_str(), "unknown fiat code, skipping");
                }
                parsed
            })
            .collect();
        if !fiats.is_empty() {
            config.fiats = fiats;
        }
    }

    match CryptoAsset::parse(&args.asset) {
        Some(asset) => config.asset = asset,
        None => warn!(asset = args.asset.as_str(), "unknown asset, using USDT"),
    }

    config
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = build_config(&args);
    let reference = config.reference;
    info!(
        fiats = config.fiats.len(),
        asset = %config.asset,
        reference = %reference,
        "starting peerscout"
    );

    let venue: Arc<dyn QuoteVenue> = Arc::new(BinanceP2p::new()?);
    let rates: Arc<dyn RateSource> = Arc::new(OpenErApi::new()?);
    let engine = Arc::new(QuoteEngine::new(config, venue, rates));

    engine.set_amount(FixedPoint::from_f64(args.amount))?;
    engine.set_direction(parse_direction(&args.direction));
    if let Some(threshold) = args.threshold {
        engine.set_threshold(FixedPoint::from_f64(threshold))?;
    }

    if args.once {
        let report = engine.fetch_once().await;
        println!("{}", render::results(&report.offers, reference));
        for alert in &report.alerts {
            println!("{}", render::alert(alert, reference));
        }
        return Ok(());
    }

    let (scheduler, mut reports) = Scheduler::new(Arc::clone(&engine));
    scheduler.start(Duration::from_secs(args.interval))?;
    info!("auto-refresh running, ctrl-c to stop");

    loop {
        tokio::select! {
            report = reports.recv() => {
                let Some(report) = report else { break };
                println!("{}", render::results(&report.offers, reference));
                for alert in &report.alerts {
                    println!("{}", render::alert(alert, reference));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                scheduler.stop();
                break;
            }
        }
    }

    Ok(())
}
