// In crates/indicators/src/bollinger.rs

use ta::indicators::BollingerBands;
use ta::Next;

/// Bollinger bands aligned with the input; all three bands share one warm-up.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// SMA(period) ± k·σ, with σ the rolling population standard deviation (ddof = 0).
///
/// Positions before the first full window are `None`.
pub fn bollinger(values: &[f64], period: usize, k: f64) -> BollingerSeries {
    let mut out = BollingerSeries {
        upper: vec![None; values.len()],
        middle: vec![None; values.len()],
        lower: vec![None; values.len()],
    };
    let Ok(mut bands) = BollingerBands::new(period, k) else {
        return out;
    };

    for (i, &x) in values.iter().enumerate() {
        let point = bands.next(x);
        if i + 1 < period {
            continue;
        }
        out.upper[i] = Some(point.upper);
        out.middle[i] = Some(point.average);
        out.lower[i] = Some(point.lower);
    }
    out
}
