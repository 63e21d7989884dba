//! Entity repository — rows of a request's private forest.
//!
//! Traversal happens in memory over a single bulk fetch
//! ([`EntityForest`](copygate_entity::entity::forest::EntityForest));
//! this repository only does flat reads and bulk status updates.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use copygate_core::error::{AppError, ErrorKind};
use copygate_core::result::AppResult;
use copygate_core::types::pagination::{PageRequest, PageResponse};
use copygate_core::types::sorting::{EntityOrderBy, SortDirection};
use copygate_entity::entity::model::{CopyStatus, Entity, ReviewStatus};

/// Repository for approval entity rows.
#[derive(Debug, Clone)]
pub struct EntityRepository {
    pool: PgPool,
}

impl EntityRepository {
    /// Create a new entity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch every entity of a request in one query.
    pub async fn list_by_request(&self, request_id: Uuid) -> AppResult<Vec<Entity>> {
        sqlx::query_as::<_, Entity>(
            "SELECT * FROM approval_entities WHERE request_id = $1 ORDER BY uploaded_at ASC, name ASC",
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list entities", e))
    }

    /// List one level of the forest, folders before files.
    ///
    /// `parent_id = None` lists the top-level anchors. The name filter and
    /// order-by schema are fixed; no caller-controlled column names reach
    /// the query text.
    pub async fn list_children(
        &self,
        request_id: Uuid,
        parent_id: Option<Uuid>,
        name_contains: Option<&str>,
        order_by: EntityOrderBy,
        direction: SortDirection,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Entity>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM approval_entities \
             WHERE request_id = $1 AND parent_id IS NOT DISTINCT FROM $2 \
               AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%')",
        )
        .bind(request_id)
        .bind(parent_id)
        .bind(name_contains)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count entities", e))?;

        // order_by/direction come from closed enums, never from raw input.
        let query = format!(
            "SELECT * FROM approval_entities \
             WHERE request_id = $1 AND parent_id IS NOT DISTINCT FROM $2 \
               AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%') \
             ORDER BY entity_type DESC, {} {} LIMIT $4 OFFSET $5",
            order_by.as_column(),
            direction.as_sql(),
        );
        let entities = sqlx::query_as::<_, Entity>(&query)
            .bind(request_id)
            .bind(parent_id)
            .bind(name_contains)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list entity page", e)
            })?;

        Ok(PageResponse::new(entities, page, total as u64))
    }

    /// Bulk-settle a set of file leaves.
    ///
    /// The pending guard keeps the per-file transition monotonic even if a
    /// stale caller passes an already-settled id. Returns the number of
    /// rows actually updated.
    pub async fn mark_reviewed(
        &self,
        request_id: Uuid,
        entity_ids: &[Uuid],
        status: ReviewStatus,
        reviewed_by: &str,
        reviewed_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE approval_entities \
             SET review_status = $3, reviewed_by = $4, reviewed_at = $5 \
             WHERE request_id = $1 AND entity_id = ANY($2) AND review_status = 'pending'",
        )
        .bind(request_id)
        .bind(entity_ids)
        .bind(status)
        .bind(reviewed_by)
        .bind(reviewed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update review status", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Record the pipeline's copy-status report for a set of entities.
    pub async fn set_copy_status(
        &self,
        request_id: Uuid,
        entity_ids: &[Uuid],
        status: CopyStatus,
    ) -> AppResult<Vec<Entity>> {
        sqlx::query_as::<_, Entity>(
            "UPDATE approval_entities SET copy_status = $3 \
             WHERE request_id = $1 AND entity_id = ANY($2) AND entity_type = 'file' \
             RETURNING *",
        )
        .bind(request_id)
        .bind(entity_ids)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update copy status", e)
        })
    }
}
