//! Polling consumers
//!
//! Each UI surface owns one background polling task: fetch immediately on
//! start, publish on a watch channel, sleep, repeat. Tasks are cancelled
//! through their [`PollHandle`], which also aborts on drop so a consumer
//! going away can never leave a timer running. Pollers share nothing with
//! each other beyond the service's cache and rate limiter.

use crate::market::{MarketDataService, StockQuote};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Refresh cadence for a single-ticker price card.
pub const SINGLE_QUOTE_REFRESH: Duration = Duration::from_secs(30);

/// Refresh cadence for a portfolio-holding card.
pub const HOLDING_REFRESH: Duration = Duration::from_secs(60);

/// Refresh cadence for the market overview panel.
pub const OVERVIEW_REFRESH: Duration = Duration::from_secs(300);

/// Spacing between symbols inside one overview refresh.
pub const OVERVIEW_STAGGER: Duration = Duration::from_secs(1);

/// Owning handle for a polling task. Stopping is synchronous; an
/// in-flight request is dropped at its next await point.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Cancel the polling task. No further fetches are issued.
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Poll a single symbol every `every`, publishing each quote.
///
/// The receiver starts at `None` and observes `Some(quote)` after the
/// first fetch. The task ends when the handle is stopped/dropped or all
/// receivers are gone.
pub fn watch_quote(
    service: Arc<MarketDataService>,
    symbol: impl Into<String>,
    every: Duration,
) -> (PollHandle, watch::Receiver<Option<StockQuote>>) {
    let symbol = symbol.into();
    let (tx, rx) = watch::channel(None);

    let task = tokio::spawn(async move {
        loop {
            let quote = service.get_quote(&symbol).await;
            if tx.send(Some(quote)).is_err() {
                debug!(%symbol, "all quote watchers gone, stopping poll");
                break;
            }
            tokio::time::sleep(every).await;
        }
    });

    (PollHandle { task }, rx)
}

/// Poll a batch of symbols every `every`, staggering consecutive symbols
/// by `stagger` inside each cycle to smooth provider load. Publishes the
/// whole batch once per cycle, in input order.
pub fn watch_quotes(
    service: Arc<MarketDataService>,
    symbols: Vec<String>,
    every: Duration,
    stagger: Duration,
) -> (PollHandle, watch::Receiver<Vec<StockQuote>>) {
    let (tx, rx) = watch::channel(Vec::new());

    let task = tokio::spawn(async move {
        loop {
            let mut batch = Vec::with_capacity(symbols.len());
            for (index, symbol) in symbols.iter().enumerate() {
                if index > 0 && !stagger.is_zero() {
                    tokio::time::sleep(stagger).await;
                }
                batch.push(service.get_quote(symbol).await);
            }

            if tx.send(batch).is_err() {
                debug!("all batch watchers gone, stopping poll");
                break;
            }
            tokio::time::sleep(every).await;
        }
    });

    (PollHandle { task }, rx)
}
