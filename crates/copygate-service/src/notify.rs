//! Notification bridge.
//!
//! Translates review and completion outcomes into copy-request events for
//! the submitter. Delivery is best effort: a failure to build or send an
//! event is logged and swallowed, never propagated into the calling
//! transaction.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use copygate_core::events::copy_request::{CopyRequestEvent, EventTarget, Location, ReviewAction};
use copygate_core::result::AppResult;
use copygate_core::traits::metadata::MetadataClient;
use copygate_core::traits::notifier::Notifier;
use copygate_entity::request::model::Request;

/// Builds and delivers copy-request events.
#[derive(Clone)]
pub struct NotificationBridge {
    metadata: Arc<dyn MetadataClient>,
    notifier: Arc<dyn Notifier>,
}

impl NotificationBridge {
    /// Create a bridge over the metadata client and notification sink.
    pub fn new(metadata: Arc<dyn MetadataClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { metadata, notifier }
    }

    /// Announce an approval or denial to the submitter. Best effort.
    pub async fn announce_review(
        &self,
        request: &Request,
        action: ReviewAction,
        initiator: &str,
        target_ids: &[Uuid],
    ) {
        if let Err(err) = self.send_review(request, action, initiator, target_ids).await {
            warn!(
                request_id = %request.id,
                ?action,
                error = %err,
                "copy-request notification dropped"
            );
        }
    }

    /// Announce the completion of a request to the submitter. Best effort.
    pub async fn announce_close(&self, request: &Request, initiator: &str) {
        let event = CopyRequestEvent {
            recipient_username: request.submitted_by.clone(),
            action: ReviewAction::Close,
            initiator_username: initiator.to_string(),
            project_code: request.project_code.clone(),
            copy_request_id: request.id,
            source: None,
            destination: None,
            targets: None,
        };
        if let Err(err) = self.notifier.send(&event).await {
            warn!(
                request_id = %request.id,
                error = %err,
                "close notification dropped"
            );
        }
    }

    async fn send_review(
        &self,
        request: &Request,
        action: ReviewAction,
        initiator: &str,
        target_ids: &[Uuid],
    ) -> AppResult<()> {
        let source = self.location(request.source_id).await?;
        let destination = self.location(request.destination_id).await?;
        let targets = self
            .metadata
            .fetch_batch(target_ids)
            .await?
            .into_iter()
            .map(|node| EventTarget {
                id: node.id,
                name: node.name,
                kind: node.kind,
            })
            .collect();

        let event = CopyRequestEvent {
            recipient_username: request.submitted_by.clone(),
            action,
            initiator_username: initiator.to_string(),
            project_code: request.project_code.clone(),
            copy_request_id: request.id,
            source: Some(source),
            destination: Some(destination),
            targets: Some(targets),
        };
        self.notifier.send(&event).await
    }

    async fn location(&self, id: Uuid) -> AppResult<Location> {
        let node = self.metadata.fetch_by_id(id).await?;
        Ok(Location {
            id: node.id,
            path: node.display_path(),
            zone: node.zone,
        })
    }
}
