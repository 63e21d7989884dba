//! Approval request repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use copygate_core::error::{AppError, ErrorKind};
use copygate_core::result::AppResult;
use copygate_core::types::pagination::{PageRequest, PageResponse};
use copygate_entity::entity::model::CreateEntity;
use copygate_entity::request::model::{CreateRequest, Request, RequestStatus};

/// Repository for approval request rows.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a request together with its snapshotted entity rows.
    ///
    /// Runs in one transaction so a failure partway through filing leaves
    /// no partial request behind.
    pub async fn create_with_entities(
        &self,
        data: &CreateRequest,
        entities: &[CreateEntity],
    ) -> AppResult<Request> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let request = sqlx::query_as::<_, Request>(
            "INSERT INTO approval_requests \
             (status, submitted_by, source_id, destination_id, note, project_code, \
              source_path, destination_path) \
             VALUES ('pending', $1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.submitted_by)
        .bind(data.source_id)
        .bind(data.destination_id)
        .bind(&data.note)
        .bind(&data.project_code)
        .bind(&data.source_path)
        .bind(&data.destination_path)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create request", e))?;

        for entity in entities {
            sqlx::query(
                "INSERT INTO approval_entities \
                 (request_id, entity_id, entity_type, parent_id, name, review_status, \
                  copy_status, uploaded_by, uploaded_at, file_size) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(request.id)
            .bind(entity.entity_id)
            .bind(entity.entity_type)
            .bind(entity.parent.as_column())
            .bind(&entity.name)
            .bind(entity.review_status)
            .bind(entity.copy_status)
            .bind(&entity.uploaded_by)
            .bind(entity.uploaded_at)
            .bind(entity.file_size)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert entity row", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit request filing", e)
        })?;

        Ok(request)
    }

    /// Find a request by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Request>> {
        sqlx::query_as::<_, Request>("SELECT * FROM approval_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find request", e))
    }

    /// List requests for a project by status, newest first.
    pub async fn list(
        &self,
        project_code: &str,
        status: RequestStatus,
        submitted_by: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM approval_requests \
             WHERE project_code = $1 AND status = $2 \
               AND ($3::text IS NULL OR submitted_by = $3)",
        )
        .bind(project_code)
        .bind(status)
        .bind(submitted_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count requests", e))?;

        let requests = sqlx::query_as::<_, Request>(
            "SELECT * FROM approval_requests \
             WHERE project_code = $1 AND status = $2 \
               AND ($3::text IS NULL OR submitted_by = $3) \
             ORDER BY submitted_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(project_code)
        .bind(status)
        .bind(submitted_by)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))?;

        Ok(PageResponse::new(requests, page, total as u64))
    }

    /// Mark a request completed.
    pub async fn complete(
        &self,
        id: Uuid,
        completed_by: &str,
        review_notes: Option<&str>,
        completed_at: DateTime<Utc>,
    ) -> AppResult<Request> {
        sqlx::query_as::<_, Request>(
            "UPDATE approval_requests \
             SET status = 'completed', completed_by = $2, review_notes = $3, completed_at = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(completed_by)
        .bind(review_notes)
        .bind(completed_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to complete request", e))?
        .ok_or_else(|| AppError::not_found(format!("Request {id} not found")))
    }

    /// Delete a request (cascades to its entities).
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM approval_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete request", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
