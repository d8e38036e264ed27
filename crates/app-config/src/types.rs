// In crates/app-config/src/types.rs

use serde::Deserialize;

use core_types::Symbol;
use indicators::IndicatorSettings;
use signals::RuleSettings;

use crate::error::{Error, Result};

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    pub server: ServerSettings,
    /// Settings for the Binance API.
    #[serde(default)]
    pub binance: BinanceSettings,
    /// The asset pair being tracked.
    pub market: MarketSettings,
    #[serde(default)]
    pub telegram: TelegramSettings,
    /// Indicator set; the reference set when the table is omitted.
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub rules: RuleSettings,
}

impl Settings {
    /// Cross-field checks serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.market.limit == 0 || self.market.limit > MAX_KLINE_LIMIT {
            return Err(Error::Invalid(format!(
                "market.limit must be between 1 and {}, got {}",
                MAX_KLINE_LIMIT, self.market.limit
            )));
        }
        if self.telegram.enabled && (self.telegram.bot_token.is_empty() || self.telegram.chat_id.is_empty()) {
            return Err(Error::Invalid(
                "telegram.enabled requires telegram.bot_token and telegram.chat_id".into(),
            ));
        }
        Ok(())
    }
}

/// Binance caps `/api/v3/klines` at 1000 rows per request.
const MAX_KLINE_LIMIT: u16 = 1000;

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BinanceSettings {
    /// Optional API key; the klines endpoint is public.
    #[serde(default)]
    pub api_key: String,
    /// The REST API base URL for Binance.
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,
}

impl Default for BinanceSettings {
    fn default() -> Self {
        Self { api_key: String::new(), rest_base_url: default_rest_base_url() }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketSettings {
    /// Exchange symbol, e.g. "BTCUSDT".
    pub symbol: String,
    /// Kline interval, e.g. "1h".
    #[serde(default = "default_interval")]
    pub interval: String,
    /// Number of bars fetched per evaluation.
    #[serde(default = "default_limit")]
    pub limit: u16,
    /// Display name used in alert messages.
    #[serde(default = "default_asset_name")]
    pub asset_name: String,
    /// Seconds between evaluations in `watch` mode.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl MarketSettings {
    pub fn symbol(&self) -> Symbol {
        Symbol(self.symbol.clone())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct TelegramSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default = "default_telegram_base_url")]
    pub api_base_url: String,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            bot_token: String::new(),
            chat_id: String::new(),
            api_base_url: default_telegram_base_url(),
        }
    }
}

/// Helper functions for serde defaults
fn default_rest_base_url() -> String { "https://api.binance.com".into() }
fn default_interval() -> String { "1h".into() }
fn default_limit() -> u16 { 100 }
fn default_asset_name() -> String { "Bitcoin".into() }
fn default_poll_interval_secs() -> u64 { 300 }
fn default_telegram_base_url() -> String { "https://api.telegram.org".into() }
