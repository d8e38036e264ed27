// In crates/tracker/src/report.rs

use core_types::Signal;
use serde::{Serialize, Serializer};
use tokio::task::JoinHandle;

/// The result of one evaluation: the latest close and the rule hits.
///
/// Serializes to `{"price": f64, "signals": ["BUY: SMA Crossover", ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackReport {
    pub price: f64,
    #[serde(serialize_with = "serialize_labels")]
    pub signals: Vec<Signal>,
}

impl TrackReport {
    pub fn labels(&self) -> Vec<String> {
        self.signals.iter().map(Signal::label).collect()
    }
}

fn serialize_labels<S: Serializer>(signals: &[Signal], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(signals.iter().map(Signal::label))
}

/// A report plus the handle of the alert it triggered, if any.
#[derive(Debug)]
pub struct TrackOutcome {
    pub report: TrackReport,
    pub alert: Option<JoinHandle<()>>,
}
