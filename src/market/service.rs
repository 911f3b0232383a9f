//! Market Data Service
//!
//! Orchestrates quote acquisition: cache, then rate limiter, then the
//! live provider, degrading to synthetic data whenever live data cannot
//! be had. Quote lookups never fail; auxiliary operations keep their own
//! failure policies (see the per-method docs).

use crate::config::MarketConfig;
use crate::error::Result;
use crate::market::cache::QuoteCache;
use crate::market::demo;
use crate::market::provider::QuoteProvider;
use crate::market::rate_limit::RateLimiter;
use crate::market::types::{MarketStatus, SeriesInterval, StockQuote, SymbolMatch, TimeSeriesPoint};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Market data service shared by all quote consumers.
///
/// One instance per process: the cache and the rate limiter it owns are
/// the only state consumers share.
pub struct MarketDataService {
    provider: Arc<dyn QuoteProvider>,
    cache: QuoteCache,
    limiter: RateLimiter,
    batch_delay: Duration,
}

impl MarketDataService {
    pub fn new(provider: Arc<dyn QuoteProvider>, config: &MarketConfig) -> Self {
        Self {
            provider,
            cache: QuoteCache::new(config.cache_ttl),
            limiter: RateLimiter::new(config.min_call_interval),
            batch_delay: config.batch_delay,
        }
    }

    /// Get a quote for `symbol`. Always resolves: cache first, then the
    /// live provider when the call budget allows, otherwise (and on any
    /// provider failure, unknown tickers included) a synthetic quote.
    /// Every result, live or synthetic, is cached.
    pub async fn get_quote(&self, symbol: &str) -> StockQuote {
        let symbol = symbol.trim().to_uppercase();

        if let Some(cached) = self.cache.get(&symbol) {
            debug!(%symbol, demo = cached.is_demo, "serving cached quote");
            return cached;
        }

        if let Err(wait) = self.limiter.try_acquire() {
            warn!(
                %symbol,
                wait_ms = wait.as_millis() as u64,
                "call budget exhausted, serving synthetic quote"
            );
            return self.demo_fallback(&symbol);
        }

        match self.provider.global_quote(&symbol).await {
            Ok(quote) => {
                info!(%symbol, price = quote.price, provider = self.provider.name(), "fetched live quote");
                self.cache.insert(&symbol, quote.clone());
                quote
            }
            Err(err) => {
                warn!(%symbol, error = %err, "provider fetch failed, serving synthetic quote");
                self.demo_fallback(&symbol)
            }
        }
    }

    /// Get quotes for several symbols, serialized with a fixed delay
    /// between provider-bound calls so one batch cannot starve the shared
    /// call budget.
    pub async fn get_multiple_quotes<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<StockQuote> {
        let mut quotes = Vec::with_capacity(symbols.len());

        for (index, symbol) in symbols.iter().enumerate() {
            if index > 0 && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
            quotes.push(self.get_quote(symbol.as_ref()).await);
        }

        quotes
    }

    /// Get a historical series. Unlike quotes, failures here surface to
    /// the caller: charts can show an error state, and an unknown ticker
    /// is a caller mistake worth reporting.
    pub async fn get_time_series(
        &self,
        symbol: &str,
        interval: SeriesInterval,
    ) -> Result<Vec<TimeSeriesPoint>> {
        let symbol = symbol.trim().to_uppercase();
        let points = self.provider.time_series(&symbol, interval).await?;
        info!(%symbol, points = points.len(), ?interval, "fetched time series");
        Ok(points)
    }

    /// Get market venue status. Resolves to an empty list on any failure.
    pub async fn get_market_status(&self) -> Vec<MarketStatus> {
        match self.provider.market_status().await {
            Ok(markets) => markets,
            Err(err) => {
                warn!(error = %err, "market status fetch failed");
                vec![]
            }
        }
    }

    /// Search tickers by keywords. Resolves to an empty list on any
    /// failure.
    pub async fn search_symbols(&self, keywords: &str) -> Vec<SymbolMatch> {
        match self.provider.search_symbols(keywords).await {
            Ok(matches) => matches,
            Err(err) => {
                warn!(error = %err, "symbol search failed");
                vec![]
            }
        }
    }

    /// Number of symbols currently cached, for diagnostics.
    pub fn cached_symbols(&self) -> usize {
        self.cache.len()
    }

    fn demo_fallback(&self, symbol: &str) -> StockQuote {
        let quote = demo::generate(symbol);
        self.cache.insert(symbol, quote.clone());
        quote
    }
}
