// In crates/signals/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{rule} thresholds are inverted: oversold {oversold} must be below overbought {overbought}")]
    InvertedThresholds {
        rule: &'static str,
        oversold: f64,
        overbought: f64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
