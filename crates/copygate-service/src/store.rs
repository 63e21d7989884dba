//! Persistence seam of the lifecycle services.
//!
//! The review and completion engines are generic over [`ApprovalStore`] so
//! their gating logic can be exercised against an in-memory store; the
//! production implementation delegates to the Postgres repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use copygate_core::result::AppResult;
use copygate_database::repositories::{EntityRepository, RequestRepository};
use copygate_entity::entity::model::{Entity, ReviewStatus};
use copygate_entity::request::model::Request;

/// Persistence operations the review and completion engines need.
#[async_trait]
pub trait ApprovalStore: Send + Sync + 'static {
    /// Load a request by id.
    async fn get_request(&self, id: Uuid) -> AppResult<Option<Request>>;

    /// Load every entity row of a request.
    async fn list_entities(&self, request_id: Uuid) -> AppResult<Vec<Entity>>;

    /// Bulk-settle pending file leaves; returns the rows actually updated.
    async fn mark_reviewed(
        &self,
        request_id: Uuid,
        entity_ids: &[Uuid],
        status: ReviewStatus,
        reviewed_by: &str,
        reviewed_at: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// Mark a request completed and return the updated row.
    async fn complete_request(
        &self,
        id: Uuid,
        completed_by: &str,
        review_notes: Option<&str>,
        completed_at: DateTime<Utc>,
    ) -> AppResult<Request>;
}

/// Postgres-backed store delegating to the repositories.
#[derive(Debug, Clone)]
pub struct PgApprovalStore {
    requests: Arc<RequestRepository>,
    entities: Arc<EntityRepository>,
}

impl PgApprovalStore {
    /// Wrap the request and entity repositories.
    pub fn new(requests: Arc<RequestRepository>, entities: Arc<EntityRepository>) -> Self {
        Self { requests, entities }
    }
}

#[async_trait]
impl ApprovalStore for PgApprovalStore {
    async fn get_request(&self, id: Uuid) -> AppResult<Option<Request>> {
        self.requests.find_by_id(id).await
    }

    async fn list_entities(&self, request_id: Uuid) -> AppResult<Vec<Entity>> {
        self.entities.list_by_request(request_id).await
    }

    async fn mark_reviewed(
        &self,
        request_id: Uuid,
        entity_ids: &[Uuid],
        status: ReviewStatus,
        reviewed_by: &str,
        reviewed_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        self.entities
            .mark_reviewed(request_id, entity_ids, status, reviewed_by, reviewed_at)
            .await
    }

    async fn complete_request(
        &self,
        id: Uuid,
        completed_by: &str,
        review_notes: Option<&str>,
        completed_at: DateTime<Utc>,
    ) -> AppResult<Request> {
        self.requests
            .complete(id, completed_by, review_notes, completed_at)
            .await
    }
}
