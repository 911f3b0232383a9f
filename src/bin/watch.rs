//! Terminal quote watcher
//!
//! Polls a handful of tickers through the full quote layer and prints
//! each refresh, marking synthetic rows with a DEMO tag. Ctrl-C exits.
//!
//! Usage: `folio-watch [SYMBOL...]` (defaults to a small index basket).

use anyhow::Result;
use foliotrack::market::{format_currency, format_percent};
use foliotrack::poller;
use foliotrack::{AppConfig, AppState};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    foliotrack::init_tracing();

    let mut symbols: Vec<String> = std::env::args().skip(1).collect();
    if symbols.is_empty() {
        symbols = vec!["SPY".into(), "QQQ".into(), "AAPL".into()];
    }

    let config = AppConfig::from_env()?;
    let state = AppState::new(config)?;

    tracing::info!(?symbols, "starting quote watch");

    let (handle, mut rx) = poller::watch_quotes(
        state.market.clone(),
        symbols,
        Duration::from_secs(60),
        poller::OVERVIEW_STAGGER,
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let batch = rx.borrow().clone();
                println!("{:<8} {:>12} {:>12} {:>10}  ", "SYMBOL", "PRICE", "CHANGE", "PCT");
                for quote in &batch {
                    println!(
                        "{:<8} {:>12} {:>12} {:>10}{}",
                        quote.symbol,
                        format_currency(quote.price),
                        format_currency(quote.change),
                        format_percent(quote.change_percent),
                        if quote.is_demo { "  [DEMO]" } else { "" },
                    );
                }
                println!();
            }
        }
    }

    handle.stop();
    tracing::info!("quote watch stopped");
    Ok(())
}
