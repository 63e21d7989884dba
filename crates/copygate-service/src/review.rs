//! Review engine.
//!
//! Settles pending file leaves of a request, approval or denial, under the
//! request lock. Folder ids in a scope resolve to their descendant file
//! leaves; already-settled files are never revisited. An approving call
//! that settled at least one leaf launches the copy pipeline exactly once.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use copygate_core::error::AppError;
use copygate_core::events::copy_request::ReviewAction;
use copygate_core::result::AppResult;
use copygate_entity::entity::forest::EntityForest;
use copygate_entity::entity::model::ReviewStatus;

use crate::context::OperatorContext;
use crate::locks::RequestLocks;
use crate::notify::NotificationBridge;
use crate::store::ApprovalStore;
use crate::trigger::PipelineTrigger;

/// The reviewer's decision for one review call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Approve the scoped pending files for copy.
    Approve,
    /// Deny the scoped pending files.
    Deny,
}

impl ReviewDecision {
    /// The review status this decision settles files into.
    pub fn status(self) -> ReviewStatus {
        match self {
            Self::Approve => ReviewStatus::Approved,
            Self::Deny => ReviewStatus::Denied,
        }
    }

    /// The notification action for this decision.
    pub fn action(self) -> ReviewAction {
        match self {
            Self::Approve => ReviewAction::Approval,
            Self::Deny => ReviewAction::Denial,
        }
    }
}

/// What a review call covers.
#[derive(Debug, Clone)]
pub enum ReviewScope {
    /// Every pending file of the request.
    AllPending,
    /// An explicit set of entity ids; folders resolve to their descendant
    /// file leaves.
    Entities(Vec<Uuid>),
}

/// Counters returned by a review call.
///
/// `approved` and `denied` are the counts that were already settled before
/// this call (scoped to the call's ids in explicit mode); `updated` is the
/// number of leaves this call settled.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReviewOutcome {
    /// Files already approved before this call.
    pub approved: u64,
    /// Files already denied before this call.
    pub denied: u64,
    /// Files settled by this call.
    pub updated: u64,
}

/// Orchestrates review calls end to end.
#[derive(Clone)]
pub struct ReviewService<S> {
    store: Arc<S>,
    locks: Arc<RequestLocks>,
    bridge: Arc<NotificationBridge>,
    trigger: Arc<PipelineTrigger>,
}

impl<S: ApprovalStore> ReviewService<S> {
    /// Create a review service.
    pub fn new(
        store: Arc<S>,
        locks: Arc<RequestLocks>,
        bridge: Arc<NotificationBridge>,
        trigger: Arc<PipelineTrigger>,
    ) -> Self {
        Self {
            store,
            locks,
            bridge,
            trigger,
        }
    }

    /// Settle the scoped pending files of a request.
    ///
    /// Holds the request lock across the whole read-decide-mutate-launch
    /// window. An empty pending scope is a no-op: counters are returned
    /// with `updated = 0` and neither the notifier nor the pipeline is
    /// called.
    pub async fn review(
        &self,
        ctx: &OperatorContext,
        request_id: Uuid,
        decision: ReviewDecision,
        scope: ReviewScope,
    ) -> AppResult<ReviewOutcome> {
        let _guard = self.locks.acquire(request_id).await;

        let request = self
            .store
            .get_request(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))?;

        let entities = self.store.list_entities(request_id).await?;
        let forest = EntityForest::new(&entities);

        // anchors double as the notification targets: the forest roots in
        // all-pending mode, the caller's ids verbatim in explicit mode.
        let (approved, denied, pending, anchors) = match &scope {
            ReviewScope::AllPending => (
                forest.count_files_at(ReviewStatus::Approved),
                forest.count_files_at(ReviewStatus::Denied),
                forest.files_at(ReviewStatus::Pending),
                forest.anchors(),
            ),
            ReviewScope::Entities(ids) => (
                forest.count_by_status(ids, ReviewStatus::Approved),
                forest.count_by_status(ids, ReviewStatus::Denied),
                forest.descendant_files(ids, Some(ReviewStatus::Pending)),
                ids.clone(),
            ),
        };

        if pending.is_empty() {
            info!(
                request_id = %request_id,
                ?decision,
                "review call matched no pending files"
            );
            return Ok(ReviewOutcome {
                approved,
                denied,
                updated: 0,
            });
        }

        let touched: Vec<Uuid> = forest.ancestor_closure(&pending).into_iter().collect();
        drop(forest);

        let updated = self
            .store
            .mark_reviewed(request_id, &pending, decision.status(), &ctx.username, Utc::now())
            .await?;
        info!(
            request_id = %request_id,
            ?decision,
            updated,
            reviewer = %ctx.username,
            "review applied"
        );

        self.bridge
            .announce_review(&request, decision.action(), &ctx.username, &anchors)
            .await;

        if decision == ReviewDecision::Approve {
            self.trigger.launch(ctx, &request, anchors, touched).await?;
        }

        Ok(ReviewOutcome {
            approved,
            denied,
            updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        entity_row, file_node, request_row, MemStore, RecordingNotifier, RecordingPipeline,
        StubMetadata,
    };
    use copygate_entity::entity::model::EntityKind;

    struct Harness {
        service: ReviewService<MemStore>,
        store: Arc<MemStore>,
        notifier: Arc<RecordingNotifier>,
        pipeline: Arc<RecordingPipeline>,
    }

    /// Request forest:
    ///
    /// ```text
    /// top/          anchor folder
    ///   a.txt       pending
    ///   b.txt       pending
    /// c.txt         anchor file, pending
    /// ```
    fn harness(pipeline_fails: bool) -> (Harness, Uuid, Uuid, [Uuid; 3]) {
        let request = request_row("indoctest");
        let request_id = request.id;
        let top = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        let store = Arc::new(MemStore::new());
        store.insert_request(request.clone());
        store.insert_entities(
            request_id,
            vec![
                entity_row(request_id, top, EntityKind::Folder, None, None),
                entity_row(request_id, a, EntityKind::File, Some(top), Some(ReviewStatus::Pending)),
                entity_row(request_id, b, EntityKind::File, Some(top), Some(ReviewStatus::Pending)),
                entity_row(request_id, c, EntityKind::File, None, Some(ReviewStatus::Pending)),
            ],
        );

        let mut metadata = StubMetadata::default();
        for id in [request.source_id, request.destination_id, top, a, b, c] {
            let mut node = file_node("item");
            node.id = id;
            metadata = metadata.with_node(node);
        }

        let notifier = Arc::new(RecordingNotifier::default());
        let pipeline = Arc::new(RecordingPipeline::new(pipeline_fails));
        let bridge = Arc::new(NotificationBridge::new(
            Arc::new(metadata),
            notifier.clone(),
        ));
        let service = ReviewService::new(
            store.clone(),
            Arc::new(RequestLocks::new()),
            bridge,
            Arc::new(PipelineTrigger::new(pipeline.clone())),
        );

        (
            Harness {
                service,
                store,
                notifier,
                pipeline,
            },
            request_id,
            top,
            [a, b, c],
        )
    }

    fn ctx() -> OperatorContext {
        OperatorContext::unauthenticated("admin", "admin-session")
    }

    #[tokio::test]
    async fn test_approve_all_then_repeat_is_noop() {
        let (h, request_id, top, [_, _, c]) = harness(false);

        let first = h
            .service
            .review(&ctx(), request_id, ReviewDecision::Approve, ReviewScope::AllPending)
            .await
            .unwrap();
        assert_eq!(first.updated, 3);
        assert_eq!(first.approved, 0);

        // Second identical call: every file is already settled, so nothing
        // moves and neither side channel fires again.
        let second = h
            .service
            .review(&ctx(), request_id, ReviewDecision::Approve, ReviewScope::AllPending)
            .await
            .unwrap();
        assert_eq!(second.updated, 0);
        assert_eq!(second.approved, 3);

        assert_eq!(h.notifier.sent().len(), 1);
        let jobs = h.pipeline.launched();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].targets, vec![top, c]);
    }

    #[tokio::test]
    async fn test_explicit_scope_anchors_are_the_caller_ids() {
        let (h, request_id, top, [a, b, c]) = harness(false);

        h.service
            .review(
                &ctx(),
                request_id,
                ReviewDecision::Approve,
                ReviewScope::Entities(vec![top]),
            )
            .await
            .unwrap();
        h.service
            .review(
                &ctx(),
                request_id,
                ReviewDecision::Approve,
                ReviewScope::Entities(vec![c]),
            )
            .await
            .unwrap();

        let jobs = h.pipeline.launched();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].targets, vec![top]);
        assert_eq!(jobs[1].targets, vec![c]);

        // The folder call's audit closure covers the folder and its leaves.
        let mut touched = jobs[0].touched.clone();
        touched.sort();
        let mut expected = vec![top, a, b];
        expected.sort();
        assert_eq!(touched, expected);
    }

    #[tokio::test]
    async fn test_deny_never_launches_pipeline() {
        let (h, request_id, _, [a, _, _]) = harness(false);

        let outcome = h
            .service
            .review(
                &ctx(),
                request_id,
                ReviewDecision::Deny,
                ReviewScope::Entities(vec![a]),
            )
            .await
            .unwrap();
        assert_eq!(outcome.updated, 1);
        assert!(h.pipeline.launched().is_empty());
        assert_eq!(h.store.review_status_of(request_id, a), Some(ReviewStatus::Denied));
        assert_eq!(h.notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_scope_is_a_complete_noop() {
        let (h, request_id, _, [a, ..]) = harness(false);

        h.service
            .review(
                &ctx(),
                request_id,
                ReviewDecision::Deny,
                ReviewScope::Entities(vec![a]),
            )
            .await
            .unwrap();

        // Re-reviewing the now-denied file matches nothing.
        let outcome = h
            .service
            .review(
                &ctx(),
                request_id,
                ReviewDecision::Approve,
                ReviewScope::Entities(vec![a]),
            )
            .await
            .unwrap();
        assert_eq!(outcome.updated, 0);
        assert_eq!(outcome.denied, 1);
        assert_eq!(h.notifier.sent().len(), 1);
        assert!(h.pipeline.launched().is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_failure_keeps_the_review_mutation() {
        let (h, request_id, _, [a, b, c]) = harness(true);

        let err = h
            .service
            .review(&ctx(), request_id, ReviewDecision::Approve, ReviewScope::AllPending)
            .await
            .unwrap_err();
        assert_eq!(err.kind, copygate_core::error::ErrorKind::Upstream);

        // The approvals stay committed even though the launch failed.
        for id in [a, b, c] {
            assert_eq!(
                h.store.review_status_of(request_id, id),
                Some(ReviewStatus::Approved)
            );
        }
    }

    #[tokio::test]
    async fn test_notification_failure_is_swallowed() {
        let (h, request_id, _, [a, ..]) = harness(false);
        h.notifier.fail_next();

        let outcome = h
            .service
            .review(
                &ctx(),
                request_id,
                ReviewDecision::Deny,
                ReviewScope::Entities(vec![a]),
            )
            .await
            .unwrap();
        assert_eq!(outcome.updated, 1);
    }

    #[tokio::test]
    async fn test_unknown_request_is_not_found() {
        let (h, _, _, _) = harness(false);
        let err = h
            .service
            .review(
                &ctx(),
                Uuid::new_v4(),
                ReviewDecision::Approve,
                ReviewScope::AllPending,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, copygate_core::error::ErrorKind::NotFound);
    }
}
