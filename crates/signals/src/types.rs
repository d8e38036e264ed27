// In crates/signals/src/types.rs

use serde::{Deserialize, Serialize};

/// Thresholds for the oscillator rules. Crossover rules have no parameters.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct RuleSettings {
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,
    #[serde(default = "default_stochastic_oversold")]
    pub stochastic_oversold: f64,
    #[serde(default = "default_stochastic_overbought")]
    pub stochastic_overbought: f64,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            rsi_oversold: default_rsi_oversold(),
            rsi_overbought: default_rsi_overbought(),
            stochastic_oversold: default_stochastic_oversold(),
            stochastic_overbought: default_stochastic_overbought(),
        }
    }
}

// Helper functions for serde defaults
fn default_rsi_oversold() -> f64 { 30.0 }
fn default_rsi_overbought() -> f64 { 70.0 }
fn default_stochastic_oversold() -> f64 { 20.0 }
fn default_stochastic_overbought() -> f64 { 80.0 }
