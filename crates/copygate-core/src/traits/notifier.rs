//! Notification sink trait.

use async_trait::async_trait;

use crate::events::copy_request::CopyRequestEvent;
use crate::result::AppResult;

/// Sink for copy-request events.
///
/// Send failures are surfaced as errors so callers can log them, but the
/// review and completion flows treat delivery as best effort and never
/// propagate a notification failure.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Deliver one event to the notification service.
    async fn send(&self, event: &CopyRequestEvent) -> AppResult<()>;
}
