// In crates/signals/src/formatter.rs

use core_types::Signal;

/// Renders the latest price and signal labels into an alert message.
#[derive(Debug, Clone)]
pub struct AlertFormatter {
    asset_name: String,
}

impl AlertFormatter {
    pub fn new(asset_name: impl Into<String>) -> Self {
        Self { asset_name: asset_name.into() }
    }

    /// `None` when there is nothing to report.
    pub fn format(&self, price: f64, signals: &[Signal]) -> Option<String> {
        if signals.is_empty() {
            return None;
        }

        let labels: Vec<String> = signals.iter().map(Signal::label).collect();
        Some(format!(
            "{} Price: ${:.2}\nSignals: {}",
            self.asset_name,
            price,
            labels.join(", ")
        ))
    }
}
