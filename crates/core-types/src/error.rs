// In crates/core-types/src/error.rs

use thiserror::Error;

/// Violations of the `Bar` invariants found while building a `Series`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("bar {index}: timestamp {current} is not after the previous timestamp {previous}")]
    NonIncreasingTimestamp {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("bar {index}: {field} is not a finite number")]
    NonFiniteValue { index: usize, field: &'static str },

    #[error("bar {index}: {field} is negative ({value})")]
    NegativeValue {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("bar {index}: close must be greater than zero, got {close}")]
    NonPositiveClose { index: usize, close: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
