// In crates/indicators/src/oscillators.rs

use ta::indicators::FastStochastic;
use ta::Next;

/// Value reported by [`stochastic`] when the window is flat (max == min).
pub const FLAT_STOCHASTIC: f64 = 50.0;

/// Relative Strength Index using a rolling simple mean of gains and losses.
///
/// The window covers the `period` price deltas ending at `i`, so the first
/// defined position is `i = period`.
pub fn rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    for i in period..values.len() {
        let mut gain = 0.0;
        let mut loss = 0.0;
        for j in (i + 1 - period)..=i {
            let delta = values[j] - values[j - 1];
            if delta > 0.0 {
                gain += delta;
            } else {
                loss -= delta;
            }
        }
        out[i] = from_averages(gain / period as f64, loss / period as f64);
    }
    out
}

/// RSI from average gain/loss. No losses means RSI 100; a flat window
/// (no gains, no losses) has no defined RSI.
fn from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 { None } else { Some(100.0) }
    } else {
        let rs = avg_gain / avg_loss;
        Some(100.0 - 100.0 / (1.0 + rs))
    }
}

/// `x[i] - x[i - period]`; undefined for `i < period`.
pub fn momentum(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    for i in period..values.len() {
        out[i] = Some(values[i] - values[i - period]);
    }
    out
}

/// Stochastic oscillator: where the latest value sits inside the trailing
/// `period`-value range, scaled to 0..=100.
///
/// A window containing any undefined value is undefined. A flat window
/// reports [`FLAT_STOCHASTIC`].
pub fn stochastic(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    for i in (period - 1)..values.len() {
        let window: Option<Vec<f64>> = values[i + 1 - period..=i].iter().copied().collect();
        let Some(window) = window else {
            continue;
        };

        let (lo, hi) = window
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let current = window[window.len() - 1];

        out[i] = Some(if hi > lo {
            100.0 * (current - lo) / (hi - lo)
        } else {
            FLAT_STOCHASTIC
        });
    }
    out
}

/// Stochastic oscillator over the close prices. Same policy as
/// [`stochastic`]: undefined before the first full window, 50 when flat.
pub fn price_stochastic(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let Ok(mut indicator) = FastStochastic::new(period) else {
        return vec![None; values.len()];
    };

    values
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let value = indicator.next(x);
            (i + 1 >= period).then_some(value)
        })
        .collect()
}

/// Stochastic oscillator over RSI(`rsi_period`).
pub fn stoch_rsi(values: &[f64], rsi_period: usize, stoch_period: usize) -> Vec<Option<f64>> {
    stochastic(&rsi(values, rsi_period), stoch_period)
}
