// In crates/signals/src/evaluator.rs

use crate::error::{Error, Result};
use crate::types::RuleSettings;
use core_types::{Signal, SignalReason};
use indicators::IndicatorRow;

/// Evaluates the fixed rule table against the latest indicator row.
///
/// Stateless: the same row always yields the same list, in rule order.
/// Every rule is independent, so contradictory signals from different rules
/// may appear together. A rule whose inputs are undefined emits nothing.
#[derive(Debug, Clone)]
pub struct SignalEvaluator {
    rules: RuleSettings,
}

impl SignalEvaluator {
    pub fn new(rules: RuleSettings) -> Result<Self> {
        check_thresholds("RSI", rules.rsi_oversold, rules.rsi_overbought)?;
        check_thresholds("Stochastic", rules.stochastic_oversold, rules.stochastic_overbought)?;
        Ok(Self { rules })
    }

    pub fn evaluate(&self, row: &IndicatorRow) -> Vec<Signal> {
        let mut signals = Vec::new();

        // 1. SMA crossover (shortest vs longest configured period)
        if let Some((short, long)) = crossover_pair(&row.sma) {
            compare(&mut signals, short, long, SignalReason::SmaCrossover);
        }

        // 2. EMA crossover
        if let Some((short, long)) = crossover_pair(&row.ema) {
            compare(&mut signals, short, long, SignalReason::EmaCrossover);
        }

        // 3. RSI
        if let Some(rsi) = row.rsi {
            if rsi < self.rules.rsi_oversold {
                signals.push(Signal::buy(SignalReason::RsiOversold));
            } else if rsi > self.rules.rsi_overbought {
                signals.push(Signal::sell(SignalReason::RsiOverbought));
            }
        }

        // 4. MACD vs its signal line
        if let Some(point) = row.macd {
            compare(&mut signals, point.macd, point.signal, SignalReason::MacdTrend);
        }

        // 5. Close outside the Bollinger bands
        if let Some(bands) = row.bollinger {
            if row.close < bands.lower {
                signals.push(Signal::buy(SignalReason::BollingerBreakout));
            } else if row.close > bands.upper {
                signals.push(Signal::sell(SignalReason::BollingerBreakout));
            }
        }

        // 6. Momentum sign
        if let Some(momentum) = row.momentum {
            compare(&mut signals, momentum, 0.0, SignalReason::Momentum);
        }

        // 7./8. Price and RSI stochastics share one threshold pair
        for (value, reason) in [
            (row.stochastic, SignalReason::Stochastic),
            (row.stoch_rsi, SignalReason::StochRsi),
        ] {
            if let Some(value) = value {
                if value < self.rules.stochastic_oversold {
                    signals.push(Signal::buy(reason));
                } else if value > self.rules.stochastic_overbought {
                    signals.push(Signal::sell(reason));
                }
            }
        }

        signals
    }
}

fn check_thresholds(rule: &'static str, oversold: f64, overbought: f64) -> Result<()> {
    if oversold < overbought {
        Ok(())
    } else {
        Err(Error::InvertedThresholds { rule, oversold, overbought })
    }
}

/// Values of the shortest and longest configured periods, if both are defined
/// and distinct periods exist.
fn crossover_pair(values: &[(usize, Option<f64>)]) -> Option<(f64, f64)> {
    let short = values.iter().min_by_key(|(period, _)| *period)?;
    let long = values.iter().max_by_key(|(period, _)| *period)?;
    if short.0 == long.0 {
        return None;
    }
    Some((short.1?, long.1?))
}

/// BUY when `fast` is above `slow`, SELL when below, nothing when equal.
fn compare(signals: &mut Vec<Signal>, fast: f64, slow: f64, reason: SignalReason) {
    if fast > slow {
        signals.push(Signal::buy(reason));
    } else if fast < slow {
        signals.push(Signal::sell(reason));
    }
}
