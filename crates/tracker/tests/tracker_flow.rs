use std::sync::{Arc, Mutex};

use api_client::MarketDataSource;
use async_trait::async_trait;
use core_types::{Bar, Series, Signal, SignalReason, Symbol};
use notifier::Notifier;
use tracker::{Error, Tracker};

const SETTINGS: &str = r#"
    [app]
    environment = "test"
    log_level = "info"

    [server]
    host = "127.0.0.1"
    port = 0

    [market]
    symbol = "BTCUSDT"
    interval = "1h"
    limit = 100
    asset_name = "Bitcoin"
"#;

fn bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            timestamp: 1_700_000_000_000 + i as i64 * 3_600_000,
            open: close,
            high: close * 1.001,
            low: close * 0.999,
            close,
            volume: 100.0,
        })
        .collect()
}

fn ramp() -> Vec<f64> {
    (1..=100).map(|v| v as f64).collect()
}

/// Serves a fixed series, or fails like a rate-limited exchange.
struct FakeSource {
    closes: Option<Vec<f64>>,
    calls: Mutex<Vec<(Symbol, String, u16)>>,
}

impl FakeSource {
    fn serving(closes: Vec<f64>) -> Arc<Self> {
        Arc::new(Self { closes: Some(closes), calls: Mutex::default() })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self { closes: None, calls: Mutex::default() })
    }
}

#[async_trait]
impl MarketDataSource for FakeSource {
    async fn fetch_series(&self, symbol: &Symbol, interval: &str, limit: u16) -> api_client::Result<Series> {
        self.calls.lock().unwrap().push((symbol.clone(), interval.to_string(), limit));
        match &self.closes {
            Some(closes) => Ok(Series::new(bars(closes))?),
            None => Err(api_client::Error::ApiError { code: -1003, msg: "Too many requests.".into() }),
        }
    }
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, message: &str) -> notifier::Result<()> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.fail {
            return Err(notifier::Error::DeliveryFailed("boom".into()));
        }
        Ok(())
    }
}

fn tracker(source: Arc<FakeSource>, notifier: Arc<RecordingNotifier>) -> Tracker {
    let settings = app_config::load_settings_from_str(SETTINGS).unwrap();
    Tracker::new(&settings, source, notifier).unwrap()
}

#[tokio::test]
async fn ramp_produces_bullish_trend_signals() {
    let source = FakeSource::serving(ramp());
    let tracker = tracker(source.clone(), Arc::new(RecordingNotifier::default()));

    let report = tracker.evaluate().await.unwrap();

    assert_eq!(report.price, 100.0);
    // RSI is pinned at 100 on a ramp.
    assert_eq!(
        report.signals,
        vec![
            Signal::buy(SignalReason::SmaCrossover),
            Signal::sell(SignalReason::RsiOverbought),
            Signal::buy(SignalReason::MacdTrend),
        ]
    );
    assert_eq!(
        *source.calls.lock().unwrap(),
        vec![(Symbol("BTCUSDT".into()), "1h".to_string(), 100)]
    );
}

#[tokio::test]
async fn report_serializes_to_price_and_labels() {
    let tracker = tracker(FakeSource::serving(ramp()), Arc::new(RecordingNotifier::default()));
    let report = tracker.evaluate().await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "price": 100.0,
            "signals": ["BUY: SMA Crossover", "SELL: RSI Overbought", "BUY: MACD Trend"],
        })
    );
}

#[tokio::test]
async fn track_sends_formatted_alert() {
    let notifier = Arc::new(RecordingNotifier::default());
    let tracker = tracker(FakeSource::serving(ramp()), notifier.clone());

    let outcome = tracker.track().await.unwrap();
    outcome.alert.expect("signals should trigger an alert").await.unwrap();

    assert_eq!(
        *notifier.messages.lock().unwrap(),
        vec!["Bitcoin Price: $100.00\nSignals: BUY: SMA Crossover, SELL: RSI Overbought, BUY: MACD Trend".to_string()]
    );
}

#[tokio::test]
async fn quiet_market_sends_nothing() {
    let notifier = Arc::new(RecordingNotifier::default());
    let tracker = tracker(FakeSource::serving(vec![250.0; 100]), notifier.clone());

    let outcome = tracker.track().await.unwrap();

    assert!(outcome.report.signals.is_empty());
    assert!(outcome.alert.is_none());
    assert!(notifier.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_delivery_does_not_change_the_report() {
    let notifier = Arc::new(RecordingNotifier { fail: true, ..Default::default() });
    let tracker = tracker(FakeSource::serving(ramp()), notifier.clone());

    let outcome = tracker.track().await.unwrap();
    let expected = outcome.report.clone();
    outcome.alert.unwrap().await.unwrap();

    assert_eq!(outcome.report, expected);
    assert_eq!(notifier.messages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn upstream_failure_is_surfaced() {
    let tracker = tracker(FakeSource::failing(), Arc::new(RecordingNotifier::default()));
    assert!(matches!(tracker.evaluate().await, Err(Error::UpstreamData(_))));
}

#[tokio::test]
async fn short_history_is_rejected() {
    let tracker = tracker(FakeSource::serving(vec![10.0; 30]), Arc::new(RecordingNotifier::default()));
    match tracker.evaluate().await {
        Err(Error::InsufficientHistory { required, available }) => {
            assert_eq!(required, 50);
            assert_eq!(available, 30);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn repeated_runs_are_identical() {
    let closes: Vec<f64> = (0..100).map(|i| 30_000.0 + (i as f64 * 0.3).sin() * 500.0).collect();
    let tracker = tracker(FakeSource::serving(closes), Arc::new(RecordingNotifier::default()));

    let first = serde_json::to_vec(&tracker.evaluate().await.unwrap()).unwrap();
    let second = serde_json::to_vec(&tracker.evaluate().await.unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn limit_below_required_history_is_a_config_error() {
    let settings = app_config::load_settings_from_str(&SETTINGS.replace("limit = 100", "limit = 20")).unwrap();
    let result = Tracker::new(&settings, FakeSource::serving(ramp()), Arc::new(RecordingNotifier::default()));
    assert!(matches!(result, Err(Error::Config(_))));
}
