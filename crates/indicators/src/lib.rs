// In crates/indicators/src/lib.rs

//! Technical indicators over a close-price series.
//!
//! Every function in this crate is pure and returns a vector aligned
//! index-for-index with its input. Positions that do not yet have enough
//! history are `None`, never zero.

pub mod bollinger;
pub mod error;
pub mod macd;
pub mod moving_average;
pub mod oscillators;
pub mod pipeline;
pub mod types;

pub use bollinger::{bollinger, BollingerSeries};
pub use error::{Error, Result};
pub use macd::{macd, MacdSeries};
pub use moving_average::{ema, sma};
pub use oscillators::{momentum, price_stochastic, rsi, stoch_rsi, stochastic, FLAT_STOCHASTIC};
pub use pipeline::{BandPoint, EnrichedSeries, IndicatorColumns, IndicatorPipeline, IndicatorRow, MacdPoint};
pub use types::{BollingerParams, IndicatorSettings, MacdParams};
