//! FolioTrack - Personal Investment Portfolio Tracker
//!
//! Client-side library for a portfolio tracker: a market-quote
//! acquisition layer (cache, rate limiter, synthetic fallback, live
//! provider), polling consumers, and a typed client for the tracker's
//! REST backend.

pub mod api;
pub mod config;
pub mod error;
pub mod market;
pub mod poller;
pub mod state;

pub use config::{AppConfig, MarketConfig};
pub use error::{AppError, Result};
pub use market::{MarketDataService, StockQuote};
pub use state::AppState;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for binaries and integration harnesses.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foliotrack=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
