//! Quote provider adapters
//!
//! The provider sits behind an object-safe trait so the service layer and
//! tests can swap implementations. The bundled implementation targets an
//! Alpha Vantage style query endpoint: one URL, a `function` discriminator,
//! and JSON payloads that report errors through sentinel fields rather
//! than HTTP status codes.

use crate::config::MarketConfig;
use crate::error::{AppError, Result};
use crate::market::types::{MarketStatus, SeriesInterval, StockQuote, SymbolMatch, TimeSeriesPoint};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;

/// Most recent points returned from a time series request.
const MAX_SERIES_POINTS: usize = 100;

/// Upstream market-data provider contract.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable provider name, for logs.
    fn name(&self) -> &'static str;

    /// Fetch the latest quote for a single symbol.
    async fn global_quote(&self, symbol: &str) -> Result<StockQuote>;

    /// Fetch a historical series for a symbol at the given granularity.
    async fn time_series(&self, symbol: &str, interval: SeriesInterval)
        -> Result<Vec<TimeSeriesPoint>>;

    /// Fetch open/close status for all covered market venues.
    async fn market_status(&self) -> Result<Vec<MarketStatus>>;

    /// Search tickers by free-text keywords.
    async fn search_symbols(&self, keywords: &str) -> Result<Vec<SymbolMatch>>;
}

/// Alpha Vantage style provider implementation.
pub struct AlphaVantageProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(config: &MarketConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.request_timeout)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Issue a query and decode the JSON body. Transport failures and
    /// timeouts surface as `AppError::Http`.
    async fn query(&self, params: &[(&str, &str)]) -> Result<Value> {
        let query: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();
        let url = format!("{}?{}&apikey={}", self.base_url, query.join("&"), self.api_key);

        let response = self.client.get(&url).send().await?;
        let payload: Value = response.json().await?;
        Ok(payload)
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        "alphavantage"
    }

    async fn global_quote(&self, symbol: &str) -> Result<StockQuote> {
        let payload = self
            .query(&[("function", "GLOBAL_QUOTE"), ("symbol", symbol)])
            .await?;

        check_sentinels(&payload)?;
        parse_global_quote(&payload)
    }

    async fn time_series(
        &self,
        symbol: &str,
        interval: SeriesInterval,
    ) -> Result<Vec<TimeSeriesPoint>> {
        let payload = self
            .query(&[("function", interval.function()), ("symbol", symbol)])
            .await?;

        check_sentinels(&payload)?;
        parse_time_series(&payload)
    }

    async fn market_status(&self) -> Result<Vec<MarketStatus>> {
        let payload = self.query(&[("function", "MARKET_STATUS")]).await?;

        match payload.get("markets") {
            Some(markets) => Ok(serde_json::from_value(markets.clone())?),
            None => Ok(vec![]),
        }
    }

    async fn search_symbols(&self, keywords: &str) -> Result<Vec<SymbolMatch>> {
        let payload = self
            .query(&[("function", "SYMBOL_SEARCH"), ("keywords", keywords)])
            .await?;

        match payload.get("bestMatches") {
            Some(matches) => Ok(serde_json::from_value(matches.clone())?),
            None => Ok(vec![]),
        }
    }
}

/// Reject payloads that carry an error sentinel instead of data.
///
/// `Error Message` means the symbol is unknown; `Note` means the
/// provider-side request budget is exhausted.
fn check_sentinels(payload: &Value) -> Result<()> {
    if let Some(message) = payload.get("Error Message").and_then(Value::as_str) {
        return Err(AppError::InvalidSymbol(message.to_string()));
    }
    if let Some(note) = payload.get("Note").and_then(Value::as_str) {
        return Err(AppError::ProviderLimit(note.to_string()));
    }
    Ok(())
}

/// Parse a `GLOBAL_QUOTE` payload into a quote with `is_demo = false`.
fn parse_global_quote(payload: &Value) -> Result<StockQuote> {
    let quote = payload
        .get("Global Quote")
        .and_then(Value::as_object)
        .filter(|fields| !fields.is_empty())
        .ok_or_else(|| AppError::Provider("empty quote payload".to_string()))?;

    let percent_raw = str_field(quote, "10. change percent")?;
    let percent_trimmed = percent_raw.trim_end_matches('%');

    Ok(StockQuote {
        symbol: str_field(quote, "01. symbol")?.to_uppercase(),
        price: parse_f64("05. price", str_field(quote, "05. price")?)?,
        change: parse_f64("09. change", str_field(quote, "09. change")?)?,
        change_percent: parse_f64("10. change percent", percent_trimmed)?,
        volume: parse_u64("06. volume", str_field(quote, "06. volume")?)?,
        high: parse_f64("03. high", str_field(quote, "03. high")?)?,
        low: parse_f64("04. low", str_field(quote, "04. low")?)?,
        open: parse_f64("02. open", str_field(quote, "02. open")?)?,
        previous_close: parse_f64(
            "08. previous close",
            str_field(quote, "08. previous close")?,
        )?,
        last_updated: parse_date(
            "07. latest trading day",
            str_field(quote, "07. latest trading day")?,
        )?,
        is_demo: false,
    })
}

/// Parse a `TIME_SERIES_*` payload. The series lives under a key whose
/// exact name varies by granularity, so it is located by substring. The
/// most recent `MAX_SERIES_POINTS` candles are returned oldest-first.
fn parse_time_series(payload: &Value) -> Result<Vec<TimeSeriesPoint>> {
    let root = payload
        .as_object()
        .ok_or_else(|| AppError::Provider("malformed time series payload".to_string()))?;

    let series = root
        .iter()
        .find(|(key, _)| key.contains("Time Series"))
        .and_then(|(_, value)| value.as_object())
        .ok_or_else(|| AppError::Provider("no time series data found".to_string()))?;

    let mut points = Vec::with_capacity(series.len());
    for (date, candle) in series {
        let candle = candle
            .as_object()
            .ok_or_else(|| AppError::Provider(format!("malformed candle for {}", date)))?;

        points.push(TimeSeriesPoint {
            date: parse_date("series date", date)?,
            open: parse_f64("1. open", str_field(candle, "1. open")?)?,
            high: parse_f64("2. high", str_field(candle, "2. high")?)?,
            low: parse_f64("3. low", str_field(candle, "3. low")?)?,
            close: parse_f64("4. close", str_field(candle, "4. close")?)?,
            volume: parse_u64("5. volume", str_field(candle, "5. volume")?)?,
        });
    }

    // Keep the most recent window, oldest first
    points.sort_by(|a, b| b.date.cmp(&a.date));
    points.truncate(MAX_SERIES_POINTS);
    points.reverse();
    Ok(points)
}

fn str_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    key: &str,
) -> Result<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Provider(format!("missing field '{}'", key)))
}

fn parse_f64(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Provider(format!("invalid number in '{}': {}", field, raw)))
}

fn parse_u64(field: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Provider(format!("invalid integer in '{}': {}", field, raw)))
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Provider(format!("invalid date in '{}': {}", field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_quote_payload() -> Value {
        json!({
            "Global Quote": {
                "01. symbol": "AAPL",
                "02. open": "151.00",
                "03. high": "152.40",
                "04. low": "149.80",
                "05. price": "150.25",
                "06. volume": "58234120",
                "07. latest trading day": "2024-03-01",
                "08. previous close": "151.75",
                "09. change": "-1.50",
                "10. change percent": "-0.99%"
            }
        })
    }

    #[test]
    fn test_parse_global_quote() {
        let quote = parse_global_quote(&sample_quote_payload()).unwrap();

        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, 150.25);
        assert_eq!(quote.change, -1.50);
        assert_eq!(quote.change_percent, -0.99);
        assert_eq!(quote.volume, 58_234_120);
        assert_eq!(quote.previous_close, 151.75);
        assert_eq!(
            quote.last_updated,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(!quote.is_demo);
    }

    #[test]
    fn test_error_message_sentinel() {
        let payload = json!({"Error Message": "Invalid API call for symbol BADSYM"});
        let result = check_sentinels(&payload);
        assert!(matches!(result, Err(AppError::InvalidSymbol(_))));
    }

    #[test]
    fn test_note_sentinel() {
        let payload = json!({"Note": "Thank you for using our API, call frequency exceeded"});
        let result = check_sentinels(&payload);
        assert!(matches!(result, Err(AppError::ProviderLimit(_))));
    }

    #[test]
    fn test_empty_quote_object_rejected() {
        let payload = json!({"Global Quote": {}});
        let result = parse_global_quote(&payload);
        assert!(matches!(result, Err(AppError::Provider(_))));
    }

    #[test]
    fn test_missing_quote_object_rejected() {
        let payload = json!({"unrelated": true});
        assert!(parse_global_quote(&payload).is_err());
    }

    #[test]
    fn test_parse_time_series_sorted_ascending() {
        let payload = json!({
            "Meta Data": {"2. Symbol": "AAPL"},
            "Time Series (Daily)": {
                "2024-03-01": {
                    "1. open": "151.00", "2. high": "152.40", "3. low": "149.80",
                    "4. close": "150.25", "5. volume": "58234120"
                },
                "2024-02-29": {
                    "1. open": "150.00", "2. high": "151.90", "3. low": "149.20",
                    "4. close": "151.75", "5. volume": "40123456"
                },
                "2024-02-28": {
                    "1. open": "149.10", "2. high": "150.70", "3. low": "148.50",
                    "4. close": "149.95", "5. volume": "39001234"
                }
            }
        });

        let points = parse_time_series(&payload).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        assert_eq!(points[2].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(points[2].close, 150.25);
    }

    #[test]
    fn test_time_series_missing_key() {
        let payload = json!({"Meta Data": {}});
        let result = parse_time_series(&payload);
        assert!(matches!(result, Err(AppError::Provider(_))));
    }

    #[test]
    fn test_percent_without_suffix_still_parses() {
        let mut payload = sample_quote_payload();
        payload["Global Quote"]["10. change percent"] = json!("-0.99");
        let quote = parse_global_quote(&payload).unwrap();
        assert_eq!(quote.change_percent, -0.99);
    }
}
