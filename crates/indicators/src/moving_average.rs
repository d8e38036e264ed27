// In crates/indicators/src/moving_average.rs

use ta::indicators::{ExponentialMovingAverage, SimpleMovingAverage};
use ta::Next;

/// Simple moving average.
///
/// The value at `i` is the mean of the `period` values ending at `i`;
/// positions `i < period - 1` are `None`.
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let Ok(mut indicator) = SimpleMovingAverage::new(period) else {
        return vec![None; values.len()];
    };

    values
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            // `ta` averages the partial window during warm-up.
            let value = indicator.next(x);
            (i + 1 >= period).then_some(value)
        })
        .collect()
}

/// Exponential moving average with `α = 2 / (period + 1)`.
///
/// Seeded with the first observation, so unlike [`sma`] every position
/// is defined.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }
    ema_values(values, period).into_iter().map(Some).collect()
}

/// The EMA recurrence over a fully defined input. A zero period yields an
/// empty vector.
pub(crate) fn ema_values(values: &[f64], period: usize) -> Vec<f64> {
    let Ok(mut indicator) = ExponentialMovingAverage::new(period) else {
        return Vec::new();
    };
    values.iter().map(|&x| indicator.next(x)).collect()
}
