// In crates/app-config/src/lib.rs

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, BinanceSettings, MarketSettings, ServerSettings, Settings, TelegramSettings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let builder = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::with_name("config/base"))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        // 3. Load settings from environment variables (e.g., `APP_TELEGRAM__BOT_TOKEN=...`).
        .add_source(self::environment());

    build(builder)
}

/// Environment variables prefixed `APP_`, with `__` separating nested keys.
fn environment() -> Environment {
    Environment::with_prefix("APP").prefix_separator("_").separator("__")
}

/// Loads settings from an in-memory TOML document, without files or environment.
pub fn load_settings_from_str(toml: &str) -> Result<Settings> {
    build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<Settings> {
    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicators::MacdParams;

    const MINIMAL: &str = r#"
        [app]
        environment = "test"
        log_level = "debug"

        [server]
        host = "127.0.0.1"
        port = 8000

        [market]
        symbol = "BTCUSDT"
    "#;

    #[test]
    fn minimal_file_gets_reference_defaults() {
        let settings = load_settings_from_str(MINIMAL).unwrap();

        assert_eq!(settings.market.interval, "1h");
        assert_eq!(settings.market.limit, 100);
        assert_eq!(settings.market.asset_name, "Bitcoin");
        assert_eq!(settings.binance.rest_base_url, "https://api.binance.com");
        assert!(!settings.telegram.enabled);
        assert_eq!(settings.indicators.sma_periods, vec![10, 50]);
        assert_eq!(settings.indicators.rsi_period, Some(14));
        assert_eq!(settings.indicators.macd, Some(MacdParams { fast: 12, slow: 26, signal: 9 }));
        assert_eq!(settings.rules.rsi_oversold, 30.0);
        assert_eq!(settings.rules.rsi_overbought, 70.0);
    }

    #[test]
    fn explicit_indicator_table_only_enables_what_it_lists() {
        let toml = format!(
            "{MINIMAL}\n[indicators]\nema_periods = [9, 21]\nmomentum_period = 10\n\n[rules]\nrsi_oversold = 40.0\nrsi_overbought = 60.0\n"
        );
        let settings = load_settings_from_str(&toml).unwrap();

        assert!(settings.indicators.sma_periods.is_empty());
        assert_eq!(settings.indicators.ema_periods, vec![9, 21]);
        assert_eq!(settings.indicators.rsi_period, None);
        assert_eq!(settings.indicators.momentum_period, Some(10));
        assert_eq!(settings.rules.rsi_oversold, 40.0);
        assert_eq!(settings.rules.stochastic_overbought, 80.0);
    }

    #[test]
    fn enabled_telegram_needs_credentials() {
        let toml = format!("{MINIMAL}\n[telegram]\nenabled = true\n");
        assert!(matches!(load_settings_from_str(&toml), Err(Error::Invalid(_))));
    }

    #[test]
    fn secrets_come_from_single_underscore_prefixed_variables() {
        let vars: config::Map<String, String> = [
            ("APP_TELEGRAM__ENABLED", "true"),
            ("APP_TELEGRAM__BOT_TOKEN", "123:abc"),
            ("APP_TELEGRAM__CHAT_ID", "42"),
            ("APP_BINANCE__API_KEY", "key"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let builder = Config::builder()
            .add_source(File::from_str(MINIMAL, FileFormat::Toml))
            .add_source(environment().source(Some(vars)));
        let settings = build(builder).unwrap();

        assert!(settings.telegram.enabled);
        assert_eq!(settings.telegram.bot_token, "123:abc");
        assert_eq!(settings.telegram.chat_id, "42");
        assert_eq!(settings.binance.api_key, "key");
    }

    #[test]
    fn limit_must_be_within_exchange_bounds() {
        let toml = MINIMAL.replace("symbol = \"BTCUSDT\"", "symbol = \"BTCUSDT\"\nlimit = 0");
        assert!(matches!(load_settings_from_str(&toml), Err(Error::Invalid(_))));
    }
}
