//! Market data acquisition layer
//!
//! Everything between a UI consumer and the third-party quote provider:
//!
//! ```text
//! Consumer --> MarketDataService --> QuoteCache (fresh hit: return)
//!                     |
//!                     +--> RateLimiter --> QuoteProvider (live fetch)
//!                     |                        |
//!                     +--> demo::generate <----+ (denied / failed)
//! ```
//!
//! The service caches every result, live or synthetic, so repeated polls
//! inside the TTL never touch the provider.

pub mod cache;
pub mod demo;
pub mod provider;
pub mod rate_limit;
pub mod service;
pub mod types;

pub use cache::QuoteCache;
pub use provider::{AlphaVantageProvider, QuoteProvider};
pub use rate_limit::RateLimiter;
pub use service::MarketDataService;
pub use types::{
    format_currency, format_percent, MarketStatus, SeriesInterval, StockQuote, SymbolMatch,
    TimeSeriesPoint,
};
