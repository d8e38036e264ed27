// In crates/tracker/src/lib.rs

pub mod error;
pub mod report;

use std::sync::Arc;

use api_client::MarketDataSource;
use app_config::{MarketSettings, Settings};
use core_types::{Series, Symbol};
use indicators::IndicatorPipeline;
use notifier::Notifier;
use signals::{AlertFormatter, SignalEvaluator};

pub use error::{Error, Result};
pub use report::{TrackOutcome, TrackReport};

/// Runs one evaluation cycle for the configured asset pair:
/// fetch → normalize → indicators → rules → (alert).
///
/// Holds no per-request state, so one instance can serve concurrent
/// requests behind an `Arc`.
pub struct Tracker {
    symbol: Symbol,
    market: MarketSettings,
    pipeline: IndicatorPipeline,
    evaluator: SignalEvaluator,
    formatter: AlertFormatter,
    source: Arc<dyn MarketDataSource>,
    notifier: Arc<dyn Notifier>,
}

impl Tracker {
    /// Builds the tracker from startup settings, validating the indicator and
    /// rule configuration once.
    pub fn new(
        settings: &Settings,
        source: Arc<dyn MarketDataSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let pipeline = IndicatorPipeline::new(&settings.indicators)?;
        let evaluator = SignalEvaluator::new(settings.rules)?;

        let required = pipeline.required_history();
        if usize::from(settings.market.limit) < required {
            return Err(Error::Config(format!(
                "market.limit ({}) is below the {} bars the indicator set needs",
                settings.market.limit, required
            )));
        }

        Ok(Self {
            symbol: settings.market.symbol(),
            market: settings.market.clone(),
            pipeline,
            evaluator,
            formatter: AlertFormatter::new(settings.market.asset_name.clone()),
            source,
            notifier,
        })
    }

    /// The pure core: indicators and rules over an already-fetched series.
    pub fn evaluate_series(&self, series: &Series) -> Result<TrackReport> {
        let enriched = self.pipeline.run(series)?;
        let (Some(row), Some(last)) = (enriched.latest(), series.last()) else {
            // `run` rejects series shorter than one bar.
            return Err(Error::InsufficientHistory { required: 1, available: 0 });
        };

        Ok(TrackReport {
            price: last.close,
            signals: self.evaluator.evaluate(&row),
        })
    }

    /// Fetches fresh bars and evaluates them. Never sends an alert.
    pub async fn evaluate(&self) -> Result<TrackReport> {
        let series = self
            .source
            .fetch_series(&self.symbol, &self.market.interval, self.market.limit)
            .await?;

        let report = self.evaluate_series(&series)?;
        tracing::info!(
            symbol = %self.symbol,
            price = report.price,
            signals = ?report.labels(),
            "Evaluation complete."
        );
        Ok(report)
    }

    /// Evaluates, then schedules an alert if any rule fired.
    ///
    /// The alert runs on its own task; its outcome cannot change the report.
    pub async fn track(&self) -> Result<TrackOutcome> {
        let report = self.evaluate().await?;
        let alert = self
            .alert_message(&report)
            .map(|message| notifier::dispatch(self.notifier.clone(), message));
        Ok(TrackOutcome { report, alert })
    }

    pub fn alert_message(&self, report: &TrackReport) -> Option<String> {
        self.formatter.format(report.price, &report.signals)
    }
}
