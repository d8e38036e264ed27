// In crates/core-types/src/series.rs

use crate::error::{Error, Result};
use crate::types::Bar;

/// An ordered, validated sequence of bars, oldest first.
///
/// A `Series` can only be built through [`Series::new`], so every instance
/// upholds the bar invariants: strictly increasing timestamps, finite and
/// non-negative OHLCV values, and a positive close.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Validates `bars` and wraps them in a `Series`.
    pub fn new(bars: Vec<Bar>) -> Result<Self> {
        let mut previous: Option<i64> = None;

        for (index, bar) in bars.iter().enumerate() {
            if let Some(previous) = previous {
                if bar.timestamp <= previous {
                    return Err(Error::NonIncreasingTimestamp {
                        index,
                        previous,
                        current: bar.timestamp,
                    });
                }
            }
            previous = Some(bar.timestamp);

            let fields = [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
                ("volume", bar.volume),
            ];
            for (field, value) in fields {
                if !value.is_finite() {
                    return Err(Error::NonFiniteValue { index, field });
                }
                if value < 0.0 {
                    return Err(Error::NegativeValue { index, field, value });
                }
            }

            if bar.close <= 0.0 {
                return Err(Error::NonPositiveClose { index, close: bar.close });
            }
        }

        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// The close column, aligned index-for-index with the bars.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
