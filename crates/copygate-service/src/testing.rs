//! In-memory fakes for the lifecycle services' unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use copygate_core::error::AppError;
use copygate_core::events::copy_request::CopyRequestEvent;
use copygate_core::result::AppResult;
use copygate_core::traits::metadata::MetadataClient;
use copygate_core::traits::notifier::Notifier;
use copygate_core::traits::pipeline::CopyPipeline;
use copygate_core::types::node::{Node, NodeKind, NodeStatus};
use copygate_core::types::pipeline::CopyJob;
use copygate_entity::entity::model::{CopyStatus, Entity, EntityKind, ReviewStatus};
use copygate_entity::request::model::{Request, RequestStatus};

/// In-memory [`crate::store::ApprovalStore`].
#[derive(Debug, Default)]
pub struct MemStore {
    requests: Mutex<HashMap<Uuid, Request>>,
    entities: Mutex<HashMap<Uuid, Vec<Entity>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_request(&self, request: Request) {
        self.requests.lock().unwrap().insert(request.id, request);
    }

    pub fn insert_entities(&self, request_id: Uuid, rows: Vec<Entity>) {
        self.entities.lock().unwrap().insert(request_id, rows);
    }

    pub fn review_status_of(&self, request_id: Uuid, entity_id: Uuid) -> Option<ReviewStatus> {
        self.entities
            .lock()
            .unwrap()
            .get(&request_id)?
            .iter()
            .find(|e| e.entity_id == entity_id)?
            .review_status
    }
}

#[async_trait]
impl crate::store::ApprovalStore for MemStore {
    async fn get_request(&self, id: Uuid) -> AppResult<Option<Request>> {
        Ok(self.requests.lock().unwrap().get(&id).cloned())
    }

    async fn list_entities(&self, request_id: Uuid) -> AppResult<Vec<Entity>> {
        Ok(self
            .entities
            .lock()
            .unwrap()
            .get(&request_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn mark_reviewed(
        &self,
        request_id: Uuid,
        entity_ids: &[Uuid],
        status: ReviewStatus,
        reviewed_by: &str,
        reviewed_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut entities = self.entities.lock().unwrap();
        let rows = entities.entry(request_id).or_default();
        let mut updated = 0;
        for row in rows.iter_mut() {
            // Same pending guard as the SQL update.
            if entity_ids.contains(&row.entity_id)
                && row.review_status == Some(ReviewStatus::Pending)
            {
                row.review_status = Some(status);
                row.reviewed_by = Some(reviewed_by.to_string());
                row.reviewed_at = Some(reviewed_at);
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn complete_request(
        &self,
        id: Uuid,
        completed_by: &str,
        review_notes: Option<&str>,
        completed_at: DateTime<Utc>,
    ) -> AppResult<Request> {
        let mut requests = self.requests.lock().unwrap();
        let request = requests
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Request {id} not found")))?;
        request.status = RequestStatus::Completed;
        request.completed_by = Some(completed_by.to_string());
        request.review_notes = review_notes.map(str::to_string);
        request.completed_at = Some(completed_at);
        Ok(request.clone())
    }
}

/// Metadata client backed by fixed maps.
#[derive(Debug, Default)]
pub struct StubMetadata {
    nodes: HashMap<Uuid, Node>,
    children: HashMap<String, Vec<Node>>,
}

impl StubMetadata {
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.insert(node.id, node);
        self
    }

    pub fn with_children(mut self, parent_path: String, children: Vec<Node>) -> Self {
        self.children.insert(parent_path, children);
        self
    }
}

#[async_trait]
impl MetadataClient for StubMetadata {
    async fn fetch_by_id(&self, id: Uuid) -> AppResult<Node> {
        self.nodes
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    async fn fetch_batch(&self, ids: &[Uuid]) -> AppResult<Vec<Node>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.nodes.get(id).cloned())
            .collect())
    }

    async fn search_children(
        &self,
        _container_code: &str,
        _zone: i32,
        parent_path: &str,
        _auth_token: Option<&str>,
    ) -> AppResult<Vec<Node>> {
        Ok(self.children.get(parent_path).cloned().unwrap_or_default())
    }
}

/// Notifier that records delivered events; can fail the next send.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<CopyRequestEvent>>,
    fail_next: Mutex<bool>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<CopyRequestEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, event: &CopyRequestEvent) -> AppResult<()> {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(AppError::upstream("notification service down"));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Pipeline client that records launched jobs; can be set to always fail.
#[derive(Debug)]
pub struct RecordingPipeline {
    jobs: Mutex<Vec<CopyJob>>,
    fail: bool,
}

impl RecordingPipeline {
    pub fn new(fail: bool) -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            fail,
        }
    }

    pub fn launched(&self) -> Vec<CopyJob> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl CopyPipeline for RecordingPipeline {
    async fn trigger_copy(&self, job: &CopyJob) -> AppResult<serde_json::Value> {
        if self.fail {
            return Err(AppError::upstream("copy pipeline down"));
        }
        self.jobs.lock().unwrap().push(job.clone());
        Ok(serde_json::json!({ "task_id": Uuid::new_v4() }))
    }
}

/// A pending request row for tests.
pub fn request_row(project_code: &str) -> Request {
    Request {
        id: Uuid::new_v4(),
        status: RequestStatus::Pending,
        submitted_by: "erik".to_string(),
        submitted_at: Utc::now(),
        source_id: Uuid::new_v4(),
        destination_id: Uuid::new_v4(),
        note: "please review".to_string(),
        project_code: project_code.to_string(),
        source_path: "admin/source".to_string(),
        destination_path: "admin/dest".to_string(),
        review_notes: None,
        completed_by: None,
        completed_at: None,
    }
}

/// One entity row for tests.
pub fn entity_row(
    request_id: Uuid,
    entity_id: Uuid,
    kind: EntityKind,
    parent_id: Option<Uuid>,
    review: Option<ReviewStatus>,
) -> Entity {
    Entity {
        id: Uuid::new_v4(),
        request_id,
        entity_id,
        entity_type: kind,
        parent_id,
        name: format!("entity-{entity_id}"),
        review_status: review,
        reviewed_by: None,
        reviewed_at: None,
        copy_status: matches!(kind, EntityKind::File).then_some(CopyStatus::Pending),
        uploaded_by: Some("erik".to_string()),
        uploaded_at: Some(Utc::now()),
        file_size: matches!(kind, EntityKind::File).then_some(100),
    }
}

/// An active file node for tests.
pub fn file_node(name: &str) -> Node {
    node(name, NodeKind::File)
}

/// An active folder node for tests.
pub fn folder_node(name: &str) -> Node {
    node(name, NodeKind::Folder)
}

fn node(name: &str, kind: NodeKind) -> Node {
    Node {
        id: Uuid::new_v4(),
        parent: None,
        parent_path: Some("admin".to_string()),
        name: name.to_string(),
        kind,
        size: matches!(kind, NodeKind::File).then_some(100),
        owner: Some("erik".to_string()),
        zone: 0,
        container_code: "indoctest".to_string(),
        status: NodeStatus::Active,
        created_time: Utc::now(),
    }
}
