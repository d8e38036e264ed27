// In crates/indicators/src/types.rs

use serde::{Deserialize, Serialize};

/// Which indicators to compute, and with what parameters.
///
/// When the `[indicators]` table is absent the reference set is used (see
/// `Default`). When it is present, only the indicators listed in it are
/// computed: every field defaults to "not configured".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IndicatorSettings {
    #[serde(default)]
    pub sma_periods: Vec<usize>,
    #[serde(default)]
    pub ema_periods: Vec<usize>,
    #[serde(default)]
    pub rsi_period: Option<usize>,
    #[serde(default)]
    pub macd: Option<MacdParams>,
    #[serde(default)]
    pub bollinger: Option<BollingerParams>,
    #[serde(default)]
    pub momentum_period: Option<usize>,
    /// Stochastic oscillator over the close price.
    #[serde(default)]
    pub stochastic_period: Option<usize>,
    /// Stochastic oscillator over RSI(`rsi_period`).
    #[serde(default)]
    pub stoch_rsi_period: Option<usize>,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            sma_periods: vec![10, 50],
            ema_periods: Vec::new(),
            rsi_period: Some(14),
            macd: Some(MacdParams::default()),
            bollinger: None,
            momentum_period: None,
            stochastic_period: None,
            stoch_rsi_period: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self { fast: 12, slow: 26, signal: 9 }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct BollingerParams {
    pub period: usize,
    /// Band width in standard deviations.
    pub k: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self { period: 20, k: 2.0 }
    }
}
