//! Notification service client.

use std::time::Duration;

use async_trait::async_trait;

use copygate_core::config::upstream::NotificationConfig;
use copygate_core::error::{AppError, ErrorKind};
use copygate_core::events::copy_request::CopyRequestEvent;
use copygate_core::result::AppResult;
use copygate_core::traits::notifier::Notifier;

/// reqwest-backed client for the notification service.
///
/// Delivery is a best-effort side channel: this client reports failures,
/// but callers log them instead of failing their own transaction.
#[derive(Debug, Clone)]
pub struct NotificationServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl NotificationServiceClient {
    /// Create a new notification client from configuration.
    pub fn new(config: &NotificationConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build notification HTTP client",
                    e,
                )
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Notifier for NotificationServiceClient {
    async fn send(&self, event: &CopyRequestEvent) -> AppResult<()> {
        let url = format!("{}/v1/all/notifications/", self.base_url);
        let response = self.client.post(&url).json(event).send().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, "Notification service unreachable", e)
        })?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Notification service returned {} for copy-request event",
                response.status()
            )));
        }
        Ok(())
    }
}
