// In crates/core-types/src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A trading pair symbol as the exchange spells it (e.g. "BTCUSDT").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One OHLCV sample for a fixed time interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Open time of the interval, epoch milliseconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// The direction a rule points in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => f.write_str("BUY"),
            Direction::Sell => f.write_str("SELL"),
        }
    }
}

/// The rule that produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalReason {
    SmaCrossover,
    EmaCrossover,
    RsiOversold,
    RsiOverbought,
    MacdTrend,
    BollingerBreakout,
    Momentum,
    Stochastic,
    StochRsi,
}

impl SignalReason {
    /// Stable machine code, e.g. `SMA_CROSSOVER`.
    pub fn code(&self) -> &'static str {
        match self {
            SignalReason::SmaCrossover => "SMA_CROSSOVER",
            SignalReason::EmaCrossover => "EMA_CROSSOVER",
            SignalReason::RsiOversold => "RSI_OVERSOLD",
            SignalReason::RsiOverbought => "RSI_OVERBOUGHT",
            SignalReason::MacdTrend => "MACD_TREND",
            SignalReason::BollingerBreakout => "BOLLINGER_BREAKOUT",
            SignalReason::Momentum => "MOMENTUM",
            SignalReason::Stochastic => "STOCHASTIC",
            SignalReason::StochRsi => "STOCH_RSI",
        }
    }

    /// Human-readable description used in alert messages.
    pub fn description(&self) -> &'static str {
        match self {
            SignalReason::SmaCrossover => "SMA Crossover",
            SignalReason::EmaCrossover => "EMA Crossover",
            SignalReason::RsiOversold => "RSI Oversold",
            SignalReason::RsiOverbought => "RSI Overbought",
            SignalReason::MacdTrend => "MACD Trend",
            SignalReason::BollingerBreakout => "Bollinger Breakout",
            SignalReason::Momentum => "Momentum",
            SignalReason::Stochastic => "Stochastic",
            SignalReason::StochRsi => "Stoch RSI",
        }
    }
}

/// A discrete directional label emitted by one rule.
///
/// Signals are derived per evaluation and never persisted. The `Display`
/// form (`"BUY: SMA Crossover"`) is the label exposed to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signal {
    pub direction: Direction,
    pub reason: SignalReason,
}

impl Signal {
    pub fn buy(reason: SignalReason) -> Self {
        Self { direction: Direction::Buy, reason }
    }

    pub fn sell(reason: SignalReason) -> Self {
        Self { direction: Direction::Sell, reason }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.direction, self.reason.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_label_reads_like_an_alert_line() {
        assert_eq!(Signal::buy(SignalReason::SmaCrossover).label(), "BUY: SMA Crossover");
        assert_eq!(Signal::sell(SignalReason::RsiOverbought).label(), "SELL: RSI Overbought");
    }

    #[test]
    fn signal_serializes_with_screaming_codes() {
        let json = serde_json::to_value(Signal::sell(SignalReason::StochRsi)).unwrap();
        assert_eq!(json["direction"], "SELL");
        assert_eq!(json["reason"], SignalReason::StochRsi.code());
    }
}
