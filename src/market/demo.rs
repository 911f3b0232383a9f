//! Synthetic quote generator
//!
//! Produces a plausible quote for any symbol when live data is
//! unavailable. Output is random but anchored to realistic base prices
//! for well-known tickers.

use crate::market::types::StockQuote;
use chrono_tz::America::New_York;
use rand::Rng;

/// Reference prices for commonly held tickers. Unknown symbols get a
/// random base in the 100-300 range.
const BASE_PRICES: &[(&str, f64)] = &[
    ("AAPL", 175.0),
    ("MSFT", 340.0),
    ("GOOGL", 130.0),
    ("AMZN", 145.0),
    ("TSLA", 250.0),
    ("NVDA", 450.0),
    ("META", 325.0),
    ("SPY", 445.0),
    ("QQQ", 370.0),
    ("DIA", 340.0),
    ("IWM", 200.0),
    ("VTI", 240.0),
    ("VOO", 420.0),
];

/// Generate a synthetic quote for `symbol`.
///
/// The quote carries `is_demo = true` and satisfies
/// `price == previous_close + change` after 2-decimal rounding.
/// `last_updated` is today's trading date in the market timezone.
pub fn generate(symbol: &str) -> StockQuote {
    let mut rng = rand::thread_rng();

    let symbol = symbol.to_uppercase();
    let base_price = base_price_for(&symbol)
        .unwrap_or_else(|| 100.0 + rng.gen_range(0.0..200.0));

    let change_percent = rng.gen_range(-3.0..3.0);
    let change = round2(base_price * change_percent / 100.0);
    let price = round2(base_price + change);

    StockQuote {
        price,
        change,
        change_percent: round2(change_percent),
        volume: rng.gen_range(0..10_000_000) + 1_000_000,
        high: round2(price + rng.gen_range(0.0..5.0)),
        low: round2(price - rng.gen_range(0.0..5.0)),
        open: round2(price + rng.gen_range(-1.0..1.0)),
        // Derived from the rounded fields so the invariant holds exactly
        previous_close: round2(price - change),
        last_updated: chrono::Utc::now().with_timezone(&New_York).date_naive(),
        is_demo: true,
        symbol,
    }
}

fn base_price_for(symbol: &str) -> Option<f64> {
    BASE_PRICES
        .iter()
        .find(|(known, _)| *known == symbol)
        .map(|(_, price)| *price)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_uppercased_and_flagged() {
        let quote = generate("aapl");
        assert_eq!(quote.symbol, "AAPL");
        assert!(quote.is_demo);
    }

    #[test]
    fn test_close_plus_change_equals_price() {
        for _ in 0..200 {
            let quote = generate("MSFT");
            let reconstructed = round2(quote.previous_close + quote.change);
            assert!(
                (reconstructed - round2(quote.price)).abs() < 1e-9,
                "previous_close {} + change {} != price {}",
                quote.previous_close,
                quote.change,
                quote.price
            );
        }
    }

    #[test]
    fn test_known_symbol_stays_near_base() {
        for _ in 0..100 {
            let quote = generate("AAPL");
            // +/-3% around the 175 base, with a little rounding slack
            assert!(quote.price >= 175.0 * 0.97 - 0.01);
            assert!(quote.price <= 175.0 * 1.03 + 0.01);
            assert!(quote.change_percent >= -3.0 && quote.change_percent <= 3.0);
        }
    }

    #[test]
    fn test_unknown_symbol_in_random_band() {
        for _ in 0..100 {
            let quote = generate("ZZZZ");
            // base in [100, 300) shifted by at most 3%
            assert!(quote.price >= 100.0 * 0.97 - 0.01);
            assert!(quote.price < 300.0 * 1.03 + 0.01);
        }
    }

    #[test]
    fn test_volume_floor() {
        for _ in 0..100 {
            let quote = generate("SPY");
            assert!(quote.volume >= 1_000_000);
            assert!(quote.volume < 11_000_000);
        }
    }

    #[test]
    fn test_range_fields_bracket_price() {
        for _ in 0..100 {
            let quote = generate("QQQ");
            assert!(quote.high >= quote.price - 0.01);
            assert!(quote.low <= quote.price + 0.01);
            assert!((quote.open - quote.price).abs() <= 1.01);
        }
    }
}
