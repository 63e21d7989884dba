//! Request lifecycle service: filing, listing, browsing, deletion, and
//! the pipeline's copy-status report.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use copygate_core::error::AppError;
use copygate_core::result::AppResult;
use copygate_core::traits::metadata::MetadataClient;
use copygate_core::types::pagination::{PageRequest, PageResponse};
use copygate_core::types::sorting::{EntityOrderBy, SortDirection};
use copygate_database::repositories::{EntityRepository, RequestRepository};
use copygate_entity::entity::forest::EntityForest;
use copygate_entity::entity::model::{CopyStatus, Entity};
use copygate_entity::request::model::{CreateRequest, Request, RequestStatus};

use crate::snapshot::SnapshotService;

/// Filing parameters for a new request.
#[derive(Debug, Clone)]
pub struct FileRequestData {
    /// The items the submitter wants copied; become the forest anchors.
    pub entity_ids: Vec<Uuid>,
    /// Source folder id (greenroom side).
    pub source_id: Uuid,
    /// Destination folder id (core side).
    pub destination_id: Uuid,
    /// Free-text note to the reviewers.
    pub note: String,
    /// Username of the submitter.
    pub submitted_by: String,
}

impl FileRequestData {
    /// Reject empty filings before any upstream call.
    fn validate(&self) -> AppResult<()> {
        if self.entity_ids.is_empty() {
            return Err(AppError::validation("A request needs at least one entity"));
        }
        if self.note.trim().is_empty() {
            return Err(AppError::validation("A request needs a non-empty note"));
        }
        Ok(())
    }
}

/// Browsing parameters for one level of a request's forest.
#[derive(Debug, Clone)]
pub struct BrowseParams {
    /// Scope to the children of this entity; `None` lists the anchors.
    pub parent_id: Option<Uuid>,
    /// Case-insensitive name-contains filter.
    pub name_contains: Option<String>,
    /// Sort column.
    pub order_by: EntityOrderBy,
    /// Sort direction.
    pub direction: SortDirection,
    /// Page window.
    pub page: PageRequest,
}

/// One level of a request's forest plus the breadcrumb to its root.
#[derive(Debug, Clone, Serialize)]
pub struct EntityPage {
    /// The page of entities, folders before files.
    #[serde(flatten)]
    pub page: PageResponse<Entity>,
    /// Chain from the scoped parent up to its anchor; empty for top level.
    pub routing: Vec<Entity>,
}

/// Service for request CRUD and the copy-status report.
#[derive(Clone)]
pub struct RequestService {
    requests: Arc<RequestRepository>,
    entities: Arc<EntityRepository>,
    metadata: Arc<dyn MetadataClient>,
    snapshot: SnapshotService,
}

impl RequestService {
    /// Create a request service.
    pub fn new(
        requests: Arc<RequestRepository>,
        entities: Arc<EntityRepository>,
        metadata: Arc<dyn MetadataClient>,
        snapshot: SnapshotService,
    ) -> Self {
        Self {
            requests,
            entities,
            metadata,
            snapshot,
        }
    }

    /// File a new request: snapshot the submitted items and persist the
    /// request with its forest in one transaction.
    pub async fn create(
        &self,
        project_code: &str,
        data: FileRequestData,
        auth_token: Option<&str>,
    ) -> AppResult<Request> {
        data.validate()?;

        let source = self.metadata.fetch_by_id(data.source_id).await?;
        let destination = self.metadata.fetch_by_id(data.destination_id).await?;
        let rows = self.snapshot.snapshot(&data.entity_ids, auth_token).await?;

        let request = self
            .requests
            .create_with_entities(
                &CreateRequest {
                    submitted_by: data.submitted_by,
                    source_id: data.source_id,
                    destination_id: data.destination_id,
                    note: data.note,
                    project_code: project_code.to_string(),
                    source_path: source.display_path(),
                    destination_path: destination.display_path(),
                },
                &rows,
            )
            .await?;

        info!(
            request_id = %request.id,
            project_code,
            entities = rows.len(),
            submitted_by = %request.submitted_by,
            "copy request filed"
        );
        Ok(request)
    }

    /// List a project's requests by status, newest first.
    pub async fn list(
        &self,
        project_code: &str,
        status: RequestStatus,
        submitted_by: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Request>> {
        self.requests
            .list(project_code, status, submitted_by, page)
            .await
    }

    /// Browse one level of a request's forest with its routing breadcrumb.
    pub async fn list_files(&self, request_id: Uuid, params: BrowseParams) -> AppResult<EntityPage> {
        self.require_request(request_id).await?;

        let page = self
            .entities
            .list_children(
                request_id,
                params.parent_id,
                params.name_contains.as_deref(),
                params.order_by,
                params.direction,
                &params.page,
            )
            .await?;

        let routing = match params.parent_id {
            Some(parent_id) => {
                let all = self.entities.list_by_request(request_id).await?;
                EntityForest::new(&all)
                    .routing(parent_id)
                    .into_iter()
                    .cloned()
                    .collect()
            }
            None => Vec::new(),
        };

        Ok(EntityPage { page, routing })
    }

    /// Delete a request and its forest.
    pub async fn delete(&self, request_id: Uuid) -> AppResult<()> {
        if !self.requests.delete(request_id).await? {
            return Err(AppError::not_found(format!(
                "Request {request_id} not found"
            )));
        }
        info!(request_id = %request_id, "copy request deleted");
        Ok(())
    }

    /// Record the pipeline's per-entity copy-status report.
    pub async fn report_copy_status(
        &self,
        request_id: Uuid,
        entity_ids: &[Uuid],
        status: CopyStatus,
    ) -> AppResult<Vec<Entity>> {
        if entity_ids.is_empty() {
            return Err(AppError::validation("A copy-status report needs entity ids"));
        }
        self.require_request(request_id).await?;
        self.entities
            .set_copy_status(request_id, entity_ids, status)
            .await
    }

    async fn require_request(&self, request_id: Uuid) -> AppResult<Request> {
        self.requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {request_id} not found")))
    }
}
