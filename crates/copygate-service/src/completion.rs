//! Completion gate.
//!
//! A request closes only when no live pending file remains. Pending files
//! whose external item has been archived are excluded from the gate but
//! stay pending in the database; they are never auto-resolved.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use copygate_core::error::AppError;
use copygate_core::result::AppResult;
use copygate_core::traits::metadata::MetadataClient;
use copygate_entity::entity::forest::EntityForest;
use copygate_entity::entity::model::ReviewStatus;
use copygate_entity::request::model::Request;

use crate::context::OperatorContext;
use crate::locks::RequestLocks;
use crate::notify::NotificationBridge;
use crate::store::ApprovalStore;

/// Live pending files of a request, archived items already excluded.
#[derive(Debug, Clone, Serialize)]
pub struct PendingFiles {
    /// Ids of the pending file leaves.
    pub pending_entities: Vec<Uuid>,
    /// Number of pending file leaves.
    pub pending_count: u64,
}

/// Result of a completion attempt.
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    /// The request was closed.
    Completed(Request),
    /// Live pending files remain; nothing was mutated.
    PendingRemain(PendingFiles),
}

/// Orchestrates request completion.
#[derive(Clone)]
pub struct CompletionService<S> {
    store: Arc<S>,
    locks: Arc<RequestLocks>,
    metadata: Arc<dyn MetadataClient>,
    bridge: Arc<NotificationBridge>,
}

impl<S: ApprovalStore> CompletionService<S> {
    /// Create a completion service.
    pub fn new(
        store: Arc<S>,
        locks: Arc<RequestLocks>,
        metadata: Arc<dyn MetadataClient>,
        bridge: Arc<NotificationBridge>,
    ) -> Self {
        Self {
            store,
            locks,
            metadata,
            bridge,
        }
    }

    /// Close a request if no live pending file remains.
    ///
    /// Holds the request lock so no review call can add to or settle the
    /// pending set while the gate is being evaluated. Completing an
    /// already-completed request is a conflict.
    pub async fn complete(
        &self,
        ctx: &OperatorContext,
        request_id: Uuid,
        review_notes: Option<String>,
    ) -> AppResult<CompletionOutcome> {
        let _guard = self.locks.acquire(request_id).await;

        let request = self
            .store
            .get_request(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;
        if request.is_completed() {
            return Err(AppError::conflict(format!(
                "Request {request_id} is already completed"
            )));
        }

        let pending = self.live_pending(request_id).await?;
        if !pending.is_empty() {
            info!(
                request_id = %request_id,
                pending = pending.len(),
                "completion refused, live pending files remain"
            );
            return Ok(CompletionOutcome::PendingRemain(PendingFiles {
                pending_count: pending.len() as u64,
                pending_entities: pending,
            }));
        }

        let completed = self
            .store
            .complete_request(request_id, &ctx.username, review_notes.as_deref(), Utc::now())
            .await?;
        info!(
            request_id = %request_id,
            completed_by = %ctx.username,
            "request completed"
        );

        self.bridge.announce_close(&completed, &ctx.username).await;
        Ok(CompletionOutcome::Completed(completed))
    }

    /// The live pending files of a request, without mutating anything.
    pub async fn pending(&self, request_id: Uuid) -> AppResult<PendingFiles> {
        self.store
            .get_request(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;

        let pending = self.live_pending(request_id).await?;
        Ok(PendingFiles {
            pending_count: pending.len() as u64,
            pending_entities: pending,
        })
    }

    /// Pending file leaves whose external item is still live.
    async fn live_pending(&self, request_id: Uuid) -> AppResult<Vec<Uuid>> {
        let entities = self.store.list_entities(request_id).await?;
        let pending = EntityForest::new(&entities).files_at(ReviewStatus::Pending);
        if pending.is_empty() {
            return Ok(pending);
        }

        let nodes = self.metadata.fetch_batch(&pending).await?;
        let archived: HashSet<Uuid> = nodes
            .iter()
            .filter(|n| n.is_archived())
            .map(|n| n.id)
            .collect();
        Ok(pending
            .into_iter()
            .filter(|id| !archived.contains(id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        entity_row, file_node, request_row, MemStore, RecordingNotifier, StubMetadata,
    };
    use copygate_core::types::node::NodeStatus;
    use copygate_entity::entity::model::EntityKind;

    struct Harness {
        service: CompletionService<MemStore>,
        notifier: Arc<RecordingNotifier>,
        request_id: Uuid,
    }

    /// One settled file plus two pending files, one of which is archived
    /// upstream.
    fn harness() -> (Harness, Uuid, Uuid) {
        let request = request_row("indoctest");
        let request_id = request.id;
        let settled = Uuid::new_v4();
        let live_pending = Uuid::new_v4();
        let archived_pending = Uuid::new_v4();

        let store = Arc::new(MemStore::new());
        store.insert_request(request);
        store.insert_entities(
            request_id,
            vec![
                entity_row(
                    request_id,
                    settled,
                    EntityKind::File,
                    None,
                    Some(ReviewStatus::Approved),
                ),
                entity_row(
                    request_id,
                    live_pending,
                    EntityKind::File,
                    None,
                    Some(ReviewStatus::Pending),
                ),
                entity_row(
                    request_id,
                    archived_pending,
                    EntityKind::File,
                    None,
                    Some(ReviewStatus::Pending),
                ),
            ],
        );

        let mut live_node = file_node("live.txt");
        live_node.id = live_pending;
        let mut archived_node = file_node("gone.txt");
        archived_node.id = archived_pending;
        archived_node.status = NodeStatus::Archived;
        let metadata = Arc::new(
            StubMetadata::default()
                .with_node(live_node)
                .with_node(archived_node),
        );

        let notifier = Arc::new(RecordingNotifier::default());
        let bridge = Arc::new(NotificationBridge::new(metadata.clone(), notifier.clone()));
        let service = CompletionService::new(
            store,
            Arc::new(RequestLocks::new()),
            metadata,
            bridge,
        );

        (
            Harness {
                service,
                notifier,
                request_id,
            },
            live_pending,
            archived_pending,
        )
    }

    fn ctx() -> OperatorContext {
        OperatorContext::unauthenticated("admin", "admin-session")
    }

    #[tokio::test]
    async fn test_live_pending_file_blocks_completion() {
        let (h, live_pending, _) = harness();

        let outcome = h
            .service
            .complete(&ctx(), h.request_id, None)
            .await
            .unwrap();
        // Only the live pending file gates; the archived one is excluded.
        match outcome {
            CompletionOutcome::PendingRemain(pending) => {
                assert_eq!(pending.pending_entities, vec![live_pending]);
                assert_eq!(pending.pending_count, 1);
            }
            CompletionOutcome::Completed(_) => panic!("must not complete"),
        }
        assert!(h.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_archived_pending_does_not_block() {
        let (h, live_pending, _) = harness();

        // Settle the live file out of band; the archived one stays pending.
        h.service
            .store
            .mark_reviewed(
                h.request_id,
                &[live_pending],
                ReviewStatus::Denied,
                "admin",
                Utc::now(),
            )
            .await
            .unwrap();

        let outcome = h
            .service
            .complete(&ctx(), h.request_id, Some("done".to_string()))
            .await
            .unwrap();
        match outcome {
            CompletionOutcome::Completed(request) => {
                assert!(request.is_completed());
                assert_eq!(request.completed_by.as_deref(), Some("admin"));
                assert_eq!(request.review_notes.as_deref(), Some("done"));
            }
            CompletionOutcome::PendingRemain(_) => panic!("must complete"),
        }
        assert_eq!(h.notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_double_completion_is_a_conflict() {
        let (h, live_pending, _) = harness();
        h.service
            .store
            .mark_reviewed(
                h.request_id,
                &[live_pending],
                ReviewStatus::Approved,
                "admin",
                Utc::now(),
            )
            .await
            .unwrap();

        h.service.complete(&ctx(), h.request_id, None).await.unwrap();
        let err = h
            .service
            .complete(&ctx(), h.request_id, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, copygate_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_pending_listing_applies_archived_filter() {
        let (h, live_pending, _) = harness();

        let pending = h.service.pending(h.request_id).await.unwrap();
        assert_eq!(pending.pending_entities, vec![live_pending]);
        // Nothing was mutated by the read.
        assert_eq!(
            h.service
                .store
                .get_request(h.request_id)
                .await
                .unwrap()
                .unwrap()
                .is_completed(),
            false
        );
    }
}
