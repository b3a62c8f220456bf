pub mod error;
pub mod types;

pub use error::{Result, TelegramError};
pub use types::{ApiResponse, Chat, Message, Update};

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

const BASE_URL: &str = "https://api.telegram.org";

/// Long-poll timeout passed to getUpdates, in seconds.
const POLL_TIMEOUT_SECS: u32 = 50;

pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(BASE_URL, token)
    }

    /// Point the client at a different API host (tests, local relays).
    pub fn with_base_url(base_url: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                // Must outlive the long poll.
                .timeout(Duration::from_secs(POLL_TIMEOUT_SECS as u64 + 15))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: format!("{base_url}/bot{token}"),
        }
    }

    /// Long-poll for updates past `offset`.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        let mut body = serde_json::json!({ "timeout": POLL_TIMEOUT_SECS });
        if let Some(offset) = offset {
            body["offset"] = offset.into();
        }

        let updates: Vec<Update> = self.call("getUpdates", &body).await?;
        debug!(count = updates.len(), "Polled updates");
        Ok(updates)
    }

    /// Send plain text to a chat. Link previews are disabled: reports cite
    /// several sources and expanding one of them would drown the text.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "disable_web_page_preview": true,
        });
        self.call("sendMessage", &body).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}/{method}", self.base_url);
        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TelegramError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<T> = resp.json().await?;
        if !api_resp.ok {
            return Err(TelegramError::Rejected(
                api_resp.description.unwrap_or_else(|| "no description".to_string()),
            ));
        }
        api_resp
            .result
            .ok_or_else(|| TelegramError::Rejected("ok response without result".to_string()))
    }
}
