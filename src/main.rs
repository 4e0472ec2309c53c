//! Cardfeed - headless driver for the catalog feed
//!
//! Drives the pagination and enrichment engine from the command line:
//! fetches pages, walks the viewport trigger over each new last item, and
//! logs progress. Rendering is left to downstream consumers.

use anyhow::Result;
use cardfeed::client::HttpCatalogClient;
use cardfeed::feed::{FeedController, FeedEvent, LoadState};
use cardfeed::viewport::{SentinelObserver, ViewportTrigger};
use cardfeed::FeedConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardfeed")]
#[command(version)]
#[command(about = "Incremental pagination and enrichment engine for a remote card catalog")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CARDFEED_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and enrich pages until end-of-data, the cap, or a page limit
    Fetch {
        /// Catalog API base URL (overrides configuration)
        #[arg(long)]
        base_url: Option<String>,

        /// Stop after this many pages
        #[arg(long)]
        pages: Option<u32>,

        /// Keep loading past the item cap without stopping
        #[arg(long)]
        past_cap: bool,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("cardfeed={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config: FeedConfig = if let Some(config_path) = cli.config {
        let content = std::fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        FeedConfig::default()
    };

    match cli.command {
        Commands::Fetch {
            base_url,
            pages,
            past_cap,
        } => {
            let config = FeedConfig {
                base_url: base_url.unwrap_or(config.base_url),
                ..config
            };
            run_fetch(config, pages, past_cap).await;
        }
        Commands::Config { default } => {
            let config = if default { FeedConfig::default() } else { config };
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Observer that only logs; there is no real viewport here, visibility is
/// simulated by the driver loop right after each render point.
#[derive(Default)]
struct LogObserver;

impl SentinelObserver for LogObserver {
    fn observe(&mut self, sentinel_id: &str) {
        tracing::debug!("Observing sentinel {}", sentinel_id);
    }

    fn disconnect(&mut self) {
        tracing::debug!("Sentinel observation disconnected");
    }
}

async fn run_fetch(config: FeedConfig, pages: Option<u32>, past_cap: bool) {
    tracing::info!("Fetching catalog feed from {}", config.base_url);

    let client = Arc::new(HttpCatalogClient::new(config.base_url.clone()));
    let controller = FeedController::new(client, config);
    let state = controller.state();

    let (signal_tx, mut signals) = mpsc::channel(8);
    let mut trigger = ViewportTrigger::new(LogObserver, state.clone(), signal_tx);

    controller.start().await;

    let mut fetched_pages = 1u32;
    loop {
        let (load, count, last_id) = {
            let state = state.read().await;
            (
                state.load.clone(),
                state.accumulator.len(),
                state
                    .accumulator
                    .items()
                    .last()
                    .map(|item| item.identifier.clone()),
            )
        };

        match load {
            LoadState::Idle => {
                if let Some(limit) = pages {
                    if fetched_pages >= limit {
                        tracing::info!("Page limit reached; {} items fetched", count);
                        break;
                    }
                }
                let Some(sentinel) = last_id else {
                    tracing::info!("Catalog is empty");
                    break;
                };

                // simulate the sentinel scrolling into view
                trigger.attach(&sentinel);
                if !trigger.sentinel_entered(&sentinel).await {
                    break;
                }
                if let Some(event) = signals.recv().await {
                    controller.handle_event(event).await;
                    fetched_pages += 1;
                }
            }
            LoadState::Capped => {
                if past_cap {
                    tracing::info!("Item cap reached; continuing past it");
                    controller.handle_event(FeedEvent::ContinuePastCap).await;
                    fetched_pages += 1;
                } else {
                    tracing::info!("Item cap reached; stopping");
                    controller.handle_event(FeedEvent::StopAtCap).await;
                }
            }
            LoadState::Error(message) => {
                tracing::error!("{}", message);
                break;
            }
            LoadState::Stopped => {
                tracing::info!("Feed stopped with {} items", count);
                break;
            }
            LoadState::LoadingInitial | LoadState::LoadingMore => {
                // handle_event drives loads to completion before returning
            }
        }
    }

    let state = state.read().await;
    tracing::info!(
        "Done: {} items accumulated, cursor at {}",
        state.accumulator.len(),
        state.accumulator.cursor()
    );
}
