// In crates/notifier/src/lib.rs

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

pub mod error;
pub mod telegram;

pub use error::{Error, Result};
pub use telegram::TelegramNotifier;

/// A transport for alert messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, message: &str) -> Result<()>;
}

/// Writes alerts to the log instead of delivering them. Used when no
/// transport is configured.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, message: &str) -> Result<()> {
        tracing::info!(%message, "Alert (no transport configured).");
        Ok(())
    }
}

/// Builds the notifier selected by the settings.
pub fn from_settings(settings: &app_config::TelegramSettings) -> Result<Arc<dyn Notifier>> {
    if settings.enabled {
        Ok(Arc::new(TelegramNotifier::new(settings)?))
    } else {
        Ok(Arc::new(LogNotifier))
    }
}

/// Sends `message` on a background task.
///
/// Delivery failure is logged and never returned to the caller; the handle
/// is only useful for tests and graceful shutdown.
pub fn dispatch(notifier: Arc<dyn Notifier>, message: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.send(&message).await {
            Ok(()) => tracing::info!(transport = notifier.name(), "Alert delivered."),
            Err(e) => tracing::error!(transport = notifier.name(), error = %e, "Alert delivery failed."),
        }
    })
}
