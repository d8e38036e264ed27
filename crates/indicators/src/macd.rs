// In crates/indicators/src/macd.rs

use crate::moving_average::ema_values;

/// MACD line and its signal line, aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// MACD = EMA(fast) - EMA(slow); signal = EMA(signal) of the MACD line.
///
/// Both EMAs are seeded with the first close, so every position is defined.
/// A zero period leaves the whole output undefined.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    if fast == 0 || slow == 0 || signal == 0 {
        let undefined = vec![None; values.len()];
        return MacdSeries { macd: undefined.clone(), signal: undefined };
    }

    let fast_ema = ema_values(values, fast);
    let slow_ema = ema_values(values, slow);
    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema_values(&line, signal);

    MacdSeries {
        macd: line.into_iter().map(Some).collect(),
        signal: signal_line.into_iter().map(Some).collect(),
    }
}
