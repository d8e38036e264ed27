// In crates/api-client/src/lib.rs

use std::time::Duration;

use app_config::BinanceSettings;
use async_trait::async_trait;
use core_types::{Series, Symbol};
use serde_json::Value;

pub mod error;
pub mod normalizer;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use normalizer::normalize_klines;
pub use types::*;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A source of price history for one evaluation cycle.
///
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches the latest `limit` bars, oldest first.
    async fn fetch_series(&self, symbol: &Symbol, interval: &str, limit: u16) -> Result<Series>;
}

impl ApiClient {
    /// Constructs a new ApiClient from BinanceSettings.
    pub fn new(settings: &BinanceSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(ApiClient {
            http_client,
            api_key: settings.api_key.clone(),
            base_url: settings.rest_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches raw kline (candlestick) rows.
    ///
    /// This corresponds to the `GET /api/v3/klines` endpoint.
    ///
    /// # Arguments
    ///
    /// * `symbol`: The symbol to fetch klines for.
    /// * `interval`: The kline interval (e.g., "1m", "5m", "1h").
    /// * `limit`: Number of klines to return (max 1000).
    pub async fn get_klines(&self, symbol: &Symbol, interval: &str, limit: u16) -> Result<Vec<RawKline>> {
        let url = format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.base_url, symbol.0, interval, limit
        );

        let mut request = self.http_client.get(&url);
        if !self.api_key.is_empty() {
            request = request.header("X-MBX-APIKEY", &self.api_key);
        }

        let response_body = request
            .send()
            .await
            .map_err(Error::RequestFailed)?
            .text()
            .await
            .map_err(Error::RequestFailed)?;

        parse_klines_body(&response_body)
    }
}

/// Deserializes a klines response body, surfacing Binance error objects.
pub fn parse_klines_body(body: &str) -> Result<Vec<RawKline>> {
    serde_json::from_str::<Vec<RawKline>>(body).map_err(|e| {
        // If deserialization fails, it might be a Binance error object.
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            if let Some(code) = value.get("code").and_then(Value::as_i64) {
                let msg = value.get("msg").and_then(Value::as_str).unwrap_or("").to_string();
                return Error::ApiError { code, msg };
            }
        }
        Error::DeserializationFailed(e)
    })
}

#[async_trait]
impl MarketDataSource for ApiClient {
    async fn fetch_series(&self, symbol: &Symbol, interval: &str, limit: u16) -> Result<Series> {
        let raw_klines = self.get_klines(symbol, interval, limit).await?;
        tracing::debug!(symbol = %symbol, interval, count = raw_klines.len(), "Received klines.");
        normalize_klines(raw_klines)
    }
}

pub fn new(settings: &BinanceSettings) -> Result<ApiClient> {
    ApiClient::new(settings)
}
