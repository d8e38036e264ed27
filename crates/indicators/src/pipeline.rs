// In crates/indicators/src/pipeline.rs

use crate::bollinger::{bollinger, BollingerSeries};
use crate::error::{Error, Result};
use crate::macd::{macd, MacdSeries};
use crate::moving_average::{ema, sma};
use crate::oscillators::{momentum, price_stochastic, rsi, stoch_rsi};
use crate::types::{BollingerParams, IndicatorSettings, MacdParams};
use core_types::{Bar, Series};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Applies the configured subset of indicators to a `Series`.
///
/// Built once from `IndicatorSettings` at startup; the configuration is
/// validated here so a running pipeline never meets a zero period.
#[derive(Debug, Clone)]
pub struct IndicatorPipeline {
    sma_periods: BTreeSet<usize>,
    ema_periods: BTreeSet<usize>,
    rsi_period: Option<usize>,
    macd: Option<MacdParams>,
    bollinger: Option<BollingerParams>,
    momentum_period: Option<usize>,
    stochastic_period: Option<usize>,
    stoch_rsi_period: Option<usize>,
}

impl IndicatorPipeline {
    pub fn new(settings: &IndicatorSettings) -> Result<Self> {
        if settings.sma_periods.contains(&0) {
            return Err(Error::InvalidPeriod { indicator: "SMA" });
        }
        if settings.ema_periods.contains(&0) {
            return Err(Error::InvalidPeriod { indicator: "EMA" });
        }
        check_period("RSI", settings.rsi_period)?;
        check_period("Momentum", settings.momentum_period)?;
        check_period("Stochastic", settings.stochastic_period)?;
        check_period("Stoch RSI", settings.stoch_rsi_period)?;

        if let Some(params) = settings.macd {
            if params.fast == 0 || params.signal == 0 {
                return Err(Error::InvalidPeriod { indicator: "MACD" });
            }
            if params.fast >= params.slow {
                return Err(Error::InvalidMacd { fast: params.fast, slow: params.slow });
            }
        }
        if let Some(params) = settings.bollinger {
            if params.period == 0 {
                return Err(Error::InvalidPeriod { indicator: "Bollinger" });
            }
            if !(params.k.is_finite() && params.k > 0.0) {
                return Err(Error::InvalidBandWidth(params.k));
            }
        }
        if settings.stoch_rsi_period.is_some() && settings.rsi_period.is_none() {
            return Err(Error::StochRsiRequiresRsi);
        }

        Ok(Self {
            sma_periods: settings.sma_periods.iter().copied().collect(),
            ema_periods: settings.ema_periods.iter().copied().collect(),
            rsi_period: settings.rsi_period,
            macd: settings.macd,
            bollinger: settings.bollinger,
            momentum_period: settings.momentum_period,
            stochastic_period: settings.stochastic_period,
            stoch_rsi_period: settings.stoch_rsi_period,
        })
    }

    /// Number of bars needed for every configured indicator to be defined at
    /// the latest position. Never less than one.
    pub fn required_history(&self) -> usize {
        let mut required = 1;
        if let Some(longest) = self.sma_periods.last() {
            required = required.max(*longest);
        }
        if let Some(period) = self.rsi_period {
            required = required.max(period + 1);
        }
        if let Some(params) = self.bollinger {
            required = required.max(params.period);
        }
        if let Some(period) = self.momentum_period {
            required = required.max(period + 1);
        }
        if let Some(period) = self.stochastic_period {
            required = required.max(period);
        }
        if let (Some(rsi_period), Some(stoch_period)) = (self.rsi_period, self.stoch_rsi_period) {
            required = required.max(rsi_period + stoch_period);
        }
        required
    }

    /// Computes every configured indicator over `series`.
    ///
    /// Fails with `InsufficientHistory` rather than returning a latest row
    /// full of undefined values.
    pub fn run<'a>(&self, series: &'a Series) -> Result<EnrichedSeries<'a>> {
        let required = self.required_history();
        if series.len() < required {
            return Err(Error::InsufficientHistory { required, available: series.len() });
        }

        let closes = series.closes();
        let columns = IndicatorColumns {
            sma: self.sma_periods.iter().map(|&p| (p, sma(&closes, p))).collect(),
            ema: self.ema_periods.iter().map(|&p| (p, ema(&closes, p))).collect(),
            rsi: self.rsi_period.map(|p| rsi(&closes, p)),
            macd: self.macd.map(|m| macd(&closes, m.fast, m.slow, m.signal)),
            bollinger: self.bollinger.map(|b| bollinger(&closes, b.period, b.k)),
            momentum: self.momentum_period.map(|p| momentum(&closes, p)),
            stochastic: self.stochastic_period.map(|p| price_stochastic(&closes, p)),
            stoch_rsi: self
                .rsi_period
                .zip(self.stoch_rsi_period)
                .map(|(r, s)| stoch_rsi(&closes, r, s)),
        };

        tracing::debug!(
            bars = series.len(),
            columns = columns.names().len(),
            "Indicator pipeline complete."
        );

        Ok(EnrichedSeries { series, columns })
    }
}

fn check_period(indicator: &'static str, period: Option<usize>) -> Result<()> {
    match period {
        Some(0) => Err(Error::InvalidPeriod { indicator }),
        _ => Ok(()),
    }
}

/// One column per configured indicator; `None`/empty means "not configured".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorColumns {
    pub sma: BTreeMap<usize, Vec<Option<f64>>>,
    pub ema: BTreeMap<usize, Vec<Option<f64>>>,
    pub rsi: Option<Vec<Option<f64>>>,
    pub macd: Option<MacdSeries>,
    pub bollinger: Option<BollingerSeries>,
    pub momentum: Option<Vec<Option<f64>>>,
    pub stochastic: Option<Vec<Option<f64>>>,
    pub stoch_rsi: Option<Vec<Option<f64>>>,
}

impl IndicatorColumns {
    /// Column labels in a fixed order, e.g. `SMA_10`, `RSI`, `MACD_SIGNAL`.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        names.extend(self.sma.keys().map(|p| format!("SMA_{p}")));
        names.extend(self.ema.keys().map(|p| format!("EMA_{p}")));
        if self.rsi.is_some() {
            names.push("RSI".into());
        }
        if self.macd.is_some() {
            names.push("MACD".into());
            names.push("MACD_SIGNAL".into());
        }
        if self.bollinger.is_some() {
            names.push("BB_UPPER".into());
            names.push("BB_MIDDLE".into());
            names.push("BB_LOWER".into());
        }
        if self.momentum.is_some() {
            names.push("MOMENTUM".into());
        }
        if self.stochastic.is_some() {
            names.push("STOCH".into());
        }
        if self.stoch_rsi.is_some() {
            names.push("STOCH_RSI".into());
        }
        names
    }

    /// Length of every configured column.
    fn column_lengths(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = Vec::new();
        lengths.extend(self.sma.values().map(Vec::len));
        lengths.extend(self.ema.values().map(Vec::len));
        lengths.extend(self.rsi.as_ref().map(Vec::len));
        lengths.extend(self.macd.as_ref().map(|m| m.macd.len()));
        lengths.extend(self.bollinger.as_ref().map(|b| b.middle.len()));
        lengths.extend(self.momentum.as_ref().map(Vec::len));
        lengths.extend(self.stochastic.as_ref().map(Vec::len));
        lengths.extend(self.stoch_rsi.as_ref().map(Vec::len));
        lengths
    }
}

/// A `Series` zipped with its indicator columns.
#[derive(Debug, Clone)]
pub struct EnrichedSeries<'a> {
    series: &'a Series,
    columns: IndicatorColumns,
}

impl<'a> EnrichedSeries<'a> {
    pub fn series(&self) -> &'a Series {
        self.series
    }

    pub fn columns(&self) -> &IndicatorColumns {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// `true` when every column has exactly one value per bar.
    pub fn is_aligned(&self) -> bool {
        self.columns.column_lengths().iter().all(|l| *l == self.series.len())
    }

    /// The typed indicator record at bar `index`.
    pub fn row(&self, index: usize) -> Option<IndicatorRow> {
        let bar: &Bar = self.series.bars().get(index)?;
        let at = |column: &Vec<Option<f64>>| column.get(index).copied().flatten();
        let c = &self.columns;

        Some(IndicatorRow {
            timestamp: bar.timestamp,
            close: bar.close,
            sma: c.sma.iter().map(|(p, col)| (*p, at(col))).collect(),
            ema: c.ema.iter().map(|(p, col)| (*p, at(col))).collect(),
            rsi: c.rsi.as_ref().and_then(at),
            macd: c.macd.as_ref().and_then(|m| {
                Some(MacdPoint { macd: at(&m.macd)?, signal: at(&m.signal)? })
            }),
            bollinger: c.bollinger.as_ref().and_then(|b| {
                Some(BandPoint { upper: at(&b.upper)?, middle: at(&b.middle)?, lower: at(&b.lower)? })
            }),
            momentum: c.momentum.as_ref().and_then(at),
            stochastic: c.stochastic.as_ref().and_then(at),
            stoch_rsi: c.stoch_rsi.as_ref().and_then(at),
        })
    }

    /// The row for the most recent bar.
    pub fn latest(&self) -> Option<IndicatorRow> {
        self.len().checked_sub(1).and_then(|i| self.row(i))
    }
}

/// Indicator values at one bar position.
///
/// A field is `None` when its indicator is not configured or not yet
/// defined at this position. SMA/EMA entries are sorted by period.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub timestamp: i64,
    pub close: f64,
    pub sma: Vec<(usize, Option<f64>)>,
    pub ema: Vec<(usize, Option<f64>)>,
    pub rsi: Option<f64>,
    pub macd: Option<MacdPoint>,
    pub bollinger: Option<BandPoint>,
    pub momentum: Option<f64>,
    pub stochastic: Option<f64>,
    pub stoch_rsi: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandPoint {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_from(closes: &[f64]) -> Series {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: 1_700_000_000_000 + i as i64 * 3_600_000,
                open: close,
                high: close,
                low: close,
                close,
                volume: 10.0,
            })
            .collect();
        Series::new(bars).unwrap()
    }

    fn full_settings() -> IndicatorSettings {
        IndicatorSettings {
            sma_periods: vec![50, 10, 10],
            ema_periods: vec![12, 26],
            rsi_period: Some(14),
            macd: Some(MacdParams::default()),
            bollinger: Some(BollingerParams::default()),
            momentum_period: Some(10),
            stochastic_period: Some(14),
            stoch_rsi_period: Some(14),
        }
    }

    #[test]
    fn default_settings_require_fifty_bars() {
        let pipeline = IndicatorPipeline::new(&IndicatorSettings::default()).unwrap();
        assert_eq!(pipeline.required_history(), 50);
    }

    #[test]
    fn full_settings_need_rsi_plus_stoch_window() {
        let pipeline = IndicatorPipeline::new(&full_settings()).unwrap();
        assert_eq!(pipeline.required_history(), 50);

        let mut settings = full_settings();
        settings.stoch_rsi_period = Some(40);
        let pipeline = IndicatorPipeline::new(&settings).unwrap();
        assert_eq!(pipeline.required_history(), 54);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let mut settings = full_settings();
        settings.sma_periods = vec![0];
        assert_eq!(IndicatorPipeline::new(&settings).unwrap_err(), Error::InvalidPeriod { indicator: "SMA" });

        let mut settings = full_settings();
        settings.macd = Some(MacdParams { fast: 26, slow: 12, signal: 9 });
        assert!(matches!(IndicatorPipeline::new(&settings), Err(Error::InvalidMacd { .. })));

        let mut settings = full_settings();
        settings.bollinger = Some(BollingerParams { period: 20, k: 0.0 });
        assert!(matches!(IndicatorPipeline::new(&settings), Err(Error::InvalidBandWidth(_))));

        let mut settings = full_settings();
        settings.rsi_period = None;
        assert_eq!(IndicatorPipeline::new(&settings).unwrap_err(), Error::StochRsiRequiresRsi);
    }

    #[test]
    fn short_series_is_insufficient_history() {
        let pipeline = IndicatorPipeline::new(&IndicatorSettings::default()).unwrap();
        let series = series_from(&[1.0; 49]);
        assert_eq!(
            pipeline.run(&series).unwrap_err(),
            Error::InsufficientHistory { required: 50, available: 49 }
        );
    }

    #[test]
    fn columns_match_configuration_and_align() {
        let closes: Vec<f64> = (1..=100).map(|v| v as f64).collect();
        let series = series_from(&closes);
        let pipeline = IndicatorPipeline::new(&full_settings()).unwrap();
        let enriched = pipeline.run(&series).unwrap();

        assert_eq!(enriched.len(), 100);
        assert!(enriched.is_aligned());
        assert_eq!(
            enriched.columns().names(),
            vec![
                "SMA_10", "SMA_50", "EMA_12", "EMA_26", "RSI", "MACD", "MACD_SIGNAL", "BB_UPPER",
                "BB_MIDDLE", "BB_LOWER", "MOMENTUM", "STOCH", "STOCH_RSI",
            ]
        );
    }

    #[test]
    fn unrequested_indicators_are_not_computed() {
        let settings = IndicatorSettings {
            sma_periods: vec![5],
            ema_periods: Vec::new(),
            rsi_period: None,
            macd: None,
            bollinger: None,
            momentum_period: None,
            stochastic_period: None,
            stoch_rsi_period: None,
        };
        let series = series_from(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let enriched = IndicatorPipeline::new(&settings).unwrap().run(&series).unwrap();
        let columns = enriched.columns();

        assert_eq!(columns.names(), vec!["SMA_5"]);
        assert!(columns.rsi.is_none() && columns.macd.is_none() && columns.stoch_rsi.is_none());
        let latest = enriched.latest().unwrap();
        assert_eq!(latest.sma, vec![(5, Some(4.0))]);
        assert_eq!(latest.rsi, None);
    }

    #[test]
    fn latest_row_of_ramp() {
        let closes: Vec<f64> = (1..=100).map(|v| v as f64).collect();
        let series = series_from(&closes);
        let enriched = IndicatorPipeline::new(&full_settings()).unwrap().run(&series).unwrap();
        let row = enriched.latest().unwrap();

        assert_eq!(row.close, 100.0);
        assert_eq!(row.sma[0], (10, Some(95.5)));
        assert_eq!(row.sma[1], (50, Some(75.5)));
        assert_eq!(row.rsi, Some(100.0));
        assert_eq!(row.momentum, Some(10.0));
        assert_eq!(row.stochastic, Some(100.0));
        // RSI is pinned at 100 on a ramp, so its stochastic window is flat.
        assert_eq!(row.stoch_rsi, Some(50.0));
        assert!(row.macd.is_some());
        assert!(row.bollinger.is_some());
    }

    #[test]
    fn early_rows_carry_undefined_values() {
        let closes: Vec<f64> = (1..=60).map(|v| v as f64).collect();
        let series = series_from(&closes);
        let enriched = IndicatorPipeline::new(&IndicatorSettings::default()).unwrap().run(&series).unwrap();
        let first = enriched.row(0).unwrap();

        assert_eq!(first.sma, vec![(10, None), (50, None)]);
        assert_eq!(first.rsi, None);
        // EMA-based indicators are defined from the first bar.
        assert_eq!(first.macd, Some(MacdPoint { macd: 0.0, signal: 0.0 }));
        assert!(enriched.row(60).is_none());
    }

    #[test]
    fn constant_series_moving_averages_equal_the_price() {
        let series = series_from(&[250.0; 80]);
        let enriched = IndicatorPipeline::new(&full_settings()).unwrap().run(&series).unwrap();
        let row = enriched.latest().unwrap();

        assert!(row.sma.iter().all(|(_, v)| *v == Some(250.0)));
        assert!(row.ema.iter().all(|(_, v)| (v.unwrap() - 250.0).abs() < 1e-9));
        assert_eq!(row.rsi, None);
        assert_eq!(row.stoch_rsi, None);
    }
}
