// In crates/api-client/src/normalizer.rs

use crate::error::{Error, Result};
use crate::types::RawKline;
use core_types::{Bar, Series};

/// Converts raw Binance kline rows into a validated `Series`.
///
/// Any price or volume field that does not parse as a number fails the
/// whole batch; no partial series is returned.
pub fn normalize_klines(raw_klines: Vec<RawKline>) -> Result<Series> {
    let bars = raw_klines
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            Ok(Bar {
                timestamp: raw.0,
                open: parse_field(index, "open", &raw.1)?,
                high: parse_field(index, "high", &raw.2)?,
                low: parse_field(index, "low", &raw.3)?,
                close: parse_field(index, "close", &raw.4)?,
                volume: parse_field(index, "volume", &raw.5)?,
            })
        })
        .collect::<Result<Vec<Bar>>>()?;

    Ok(Series::new(bars)?)
}

fn parse_field(index: usize, field: &'static str, value: &str) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|_| Error::MalformedKline {
        index,
        field,
        value: value.to_string(),
    })
}
