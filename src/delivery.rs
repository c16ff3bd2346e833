//! Posts rendered notifications to a Mattermost (or Slack-compatible)
//! incoming webhook.

use crate::config::DeliveryConfig;
use crate::formatters::{Attachment, Notification};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum DeliveryError {
    Request(reqwest::Error),
    Status(u16, String),
    Encode(String),
}

impl DeliveryError {
    /// Network trouble and server-side errors are worth another attempt;
    /// a rejected request is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            DeliveryError::Request(_) => true,
            DeliveryError::Status(code, _) => *code >= 500 || *code == 429,
            DeliveryError::Encode(_) => false,
        }
    }
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::Request(e) => write!(f, "Request error: {}", e),
            DeliveryError::Status(code, body) => {
                write!(f, "Webhook responded with status {}: {}", code, body)
            }
            DeliveryError::Encode(e) => write!(f, "Failed to encode message: {}", e),
        }
    }
}

impl std::error::Error for DeliveryError {}

impl From<reqwest::Error> for DeliveryError {
    fn from(error: reqwest::Error) -> Self {
        DeliveryError::Request(error)
    }
}

#[derive(Serialize)]
struct AttachmentEnvelope<'a> {
    attachments: [&'a Attachment; 1],
}

/// Content type and body for one notification.
pub fn encode_body(notification: &Notification) -> Result<(&'static str, String), DeliveryError> {
    match notification {
        Notification::Text(text) => serde_urlencoded::to_string([("payload", text.as_str())])
            .map(|body| ("application/x-www-form-urlencoded", body))
            .map_err(|e| DeliveryError::Encode(e.to_string())),
        Notification::Attachment(attachment) => serde_json::to_string(&AttachmentEnvelope {
            attachments: [attachment],
        })
        .map(|body| ("application/json", body))
        .map_err(|e| DeliveryError::Encode(e.to_string())),
    }
}

#[derive(Debug, Clone)]
pub struct MattermostClient {
    client: Client,
    webhook_url: String,
    config: DeliveryConfig,
}

impl MattermostClient {
    pub fn new(webhook_url: &str, config: DeliveryConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            webhook_url: webhook_url.to_string(),
            config,
        })
    }

    /// Deliver one notification, retrying transient failures up to
    /// `max_retries` times.
    pub async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let (content_type, body) = encode_body(notification)?;
        let mut attempt = 0;

        loop {
            match self.post(content_type, body.clone()).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Delivery attempt {} failed, retrying in {:?}: {}",
                        attempt,
                        self.config.retry_delay,
                        e
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn post(&self, content_type: &str, body: String) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(DeliveryError::Status(status.as_u16(), text))
    }
}
