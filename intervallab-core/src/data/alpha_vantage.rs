//! Alpha Vantage intraday provider.
//!
//! Fetches 5-minute bars from the `TIME_SERIES_INTRADAY` endpoint. One
//! request per call, no retries. The provider reports most failures inside
//! a 200 response, so the JSON envelope is classified separately from the
//! transport in [`parse_envelope`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::provider::{DataError, IntradayProvider, IntradaySeries, RawBar};
use crate::config::ProviderConfig;
use crate::domain::Ticker;

const INTRADAY_FUNCTION: &str = "TIME_SERIES_INTRADAY";

const ERROR_KEY: &str = "Error Message";
const NOTE_KEY: &str = "Note";
const INFORMATION_KEY: &str = "Information";

const NOTE_MESSAGE: &str = "API call frequency limit reached. Please try again later.";
const INFORMATION_MESSAGE: &str =
    "API rate limit exceeded. Please wait before making another request.";

/// The per-bar record as the provider names its fields.
///
/// Missing fields, nulls and other non-scalar values become empty strings,
/// which the aggregator treats as missing values. Numbers are kept as text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BarFields {
    #[serde(rename = "1. open", deserialize_with = "scalar_text")]
    open: String,
    #[serde(rename = "2. high", deserialize_with = "scalar_text")]
    high: String,
    #[serde(rename = "3. low", deserialize_with = "scalar_text")]
    low: String,
    #[serde(rename = "4. close", deserialize_with = "scalar_text")]
    close: String,
    #[serde(rename = "5. volume", deserialize_with = "scalar_text")]
    volume: String,
}

fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Alpha Vantage data provider.
pub struct AlphaVantageProvider {
    client: reqwest::blocking::Client,
    config: ProviderConfig,
}

impl AlphaVantageProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DataError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Query parameters for one intraday request.
    fn query_params<'a>(&'a self, symbol: &'a str) -> [(&'static str, &'a str); 5] {
        [
            ("function", INTRADAY_FUNCTION),
            ("symbol", symbol),
            ("interval", &self.config.interval),
            ("outputsize", &self.config.output_size),
            ("apikey", &self.config.api_key),
        ]
    }

    /// Execute the request and decode the body, mapping transport-level
    /// failures (including non-2xx and non-JSON bodies) to `Network`.
    fn request(&self, symbol: &str) -> Result<Value, DataError> {
        log::info!(
            "requesting {} {} bars for {symbol}",
            self.config.output_size,
            self.config.interval
        );

        let resp = self
            .client
            .get(&self.config.base_url)
            .query(&self.query_params(symbol))
            .send()
            .map_err(|e| {
                log::warn!("request for {symbol} failed: {e}");
                DataError::Network(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            log::warn!("HTTP {status} for {symbol}");
            return Err(DataError::Network(format!("HTTP {status} for {symbol}")));
        }

        resp.json::<Value>().map_err(|e| {
            DataError::Network(format!("invalid JSON response for {symbol}: {e}"))
        })
    }
}

impl IntradayProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "alpha_vantage"
    }

    fn fetch(&self, ticker: &Ticker) -> Result<IntradaySeries, DataError> {
        let body = self.request(ticker.as_str())?;
        let series = parse_envelope(ticker.as_str(), &self.config.series_key(), body)?;
        log::debug!("received {} bars for {ticker}", series.len());
        Ok(series)
    }
}

/// Classify a decoded response body.
///
/// Checked in order: error message, throttling notes, missing series key.
/// Anything else is a success and the series is returned unsorted.
pub fn parse_envelope(
    symbol: &str,
    series_key: &str,
    body: Value,
) -> Result<IntradaySeries, DataError> {
    let Value::Object(mut envelope) = body else {
        return Err(DataError::ResponseFormat(format!(
            "expected a JSON object for {symbol}"
        )));
    };

    if let Some(msg) = envelope.get(ERROR_KEY) {
        return Err(DataError::Api(text(msg)));
    }
    if let Some(note) = envelope.get(NOTE_KEY) {
        log::debug!("provider note: {}", text(note));
        return Err(DataError::RateLimited(NOTE_MESSAGE.into()));
    }
    if let Some(info) = envelope.get(INFORMATION_KEY) {
        log::debug!("provider information: {}", text(info));
        return Err(DataError::RateLimited(INFORMATION_MESSAGE.into()));
    }

    let Some(series) = envelope.remove(series_key) else {
        return Err(DataError::NoData {
            symbol: symbol.to_string(),
        });
    };

    let Value::Object(entries) = series else {
        return Err(DataError::ResponseFormat(format!(
            "'{series_key}' is not an object"
        )));
    };

    let mut bars = Vec::with_capacity(entries.len());
    for (timestamp, fields) in entries {
        let fields: BarFields = serde_json::from_value(fields).map_err(|e| {
            DataError::ResponseFormat(format!("bad bar at {timestamp}: {e}"))
        })?;
        bars.push(RawBar {
            timestamp,
            open: fields.open,
            high: fields.high,
            low: fields.low,
            close: fields.close,
            volume: fields.volume,
        });
    }

    Ok(IntradaySeries {
        symbol: symbol.to_string(),
        bars,
    })
}

fn text(value: &Value) -> String {
    value
        .as_str()
        .map(str::to_owned)
        .unwrap_or_else(|| value.to_string())
}
