// In crates/indicators/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{indicator} period must be at least 1")]
    InvalidPeriod { indicator: &'static str },

    #[error("MACD fast period ({fast}) must be shorter than the slow period ({slow})")]
    InvalidMacd { fast: usize, slow: usize },

    #[error("Bollinger band width must be a positive number, got {0}")]
    InvalidBandWidth(f64),

    #[error("stoch_rsi_period requires rsi_period to be configured")]
    StochRsiRequiresRsi,

    #[error("Insufficient history: {required} bars required, {available} available")]
    InsufficientHistory { required: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
