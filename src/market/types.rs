//! Common market data types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A point-in-time quote for a single ticker.
///
/// `is_demo` marks quotes synthesized locally when live data was
/// unavailable; it defaults to `false` when absent so consumers can
/// treat any quote without the flag as real.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub previous_close: f64,
    pub last_updated: NaiveDate,
    #[serde(default)]
    pub is_demo: bool,
}

/// One candle of a historical time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Time series granularity supported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesInterval {
    Daily,
    Weekly,
    Monthly,
}

impl SeriesInterval {
    /// Provider `function` discriminator for this interval.
    pub fn function(&self) -> &'static str {
        match self {
            SeriesInterval::Daily => "TIME_SERIES_DAILY",
            SeriesInterval::Weekly => "TIME_SERIES_WEEKLY",
            SeriesInterval::Monthly => "TIME_SERIES_MONTHLY",
        }
    }
}

/// Open/close status of one market venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketStatus {
    #[serde(default, alias = "market_type")]
    pub market: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub local_open: String,
    #[serde(default)]
    pub local_close: String,
    #[serde(default)]
    pub current_status: String,
    #[serde(default)]
    pub notes: String,
}

/// One result row from a symbol search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolMatch {
    #[serde(rename = "1. symbol")]
    pub symbol: String,
    #[serde(rename = "2. name")]
    pub name: String,
    #[serde(default, rename = "3. type")]
    pub kind: String,
    #[serde(default, rename = "4. region")]
    pub region: String,
    #[serde(default, rename = "8. currency")]
    pub currency: String,
    #[serde(default, rename = "9. matchScore")]
    pub match_score: String,
}

/// Format a dollar amount for display, e.g. `$1,234.56` without the
/// thousands separator: `$1234.56` / `-$1234.56`.
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

/// Format a percentage with an explicit sign, e.g. `+1.25%`.
pub fn format_percent(percent: f64) -> String {
    if percent >= 0.0 {
        format!("+{:.2}%", percent)
    } else {
        format!("{:.2}%", percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_demo_defaults_to_false() {
        let json = r#"{
            "symbol": "AAPL",
            "price": 175.0,
            "change": 1.0,
            "changePercent": 0.57,
            "volume": 1000,
            "high": 176.0,
            "low": 174.0,
            "open": 174.5,
            "previousClose": 174.0,
            "lastUpdated": "2024-03-01"
        }"#;
        let quote: StockQuote = serde_json::from_str(json).unwrap();
        assert!(!quote.is_demo);
        assert_eq!(quote.symbol, "AAPL");
    }

    #[test]
    fn test_interval_functions() {
        assert_eq!(SeriesInterval::Daily.function(), "TIME_SERIES_DAILY");
        assert_eq!(SeriesInterval::Weekly.function(), "TIME_SERIES_WEEKLY");
        assert_eq!(SeriesInterval::Monthly.function(), "TIME_SERIES_MONTHLY");
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(format_currency(1234.5), "$1234.50");
        assert_eq!(format_currency(-12.3), "-$12.30");
        assert_eq!(format_percent(1.254), "+1.25%");
        assert_eq!(format_percent(-0.99), "-0.99%");
    }
}
