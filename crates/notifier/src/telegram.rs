// In crates/notifier/src/telegram.rs

use std::time::Duration;

use app_config::TelegramSettings;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::Notifier;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers alerts through the Telegram Bot API `sendMessage` method.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    http_client: reqwest::Client,
    api_base_url: String,
    bot_token: String,
    chat_id: String,
}

/// The subset of the Bot API response envelope we inspect.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(settings: &TelegramSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            bot_token: settings.bot_token.clone(),
            chat_id: settings.chat_id.clone(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base_url, self.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, message: &str) -> Result<()> {
        let body = json!({ "chat_id": self.chat_id, "text": message });

        let response = self
            .http_client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        let text = response.text().await.map_err(Error::RequestFailed)?;
        let parsed: Option<ApiResponse> = serde_json::from_str(&text).ok();

        match parsed {
            Some(api) if status.is_success() && api.ok => Ok(()),
            Some(api) => Err(Error::Rejected {
                status: status.as_u16(),
                description: api.description.unwrap_or_else(|| "no description".into()),
            }),
            None => Err(Error::Rejected { status: status.as_u16(), description: text }),
        }
    }
}
