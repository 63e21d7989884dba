//! Metadata service client trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::node::Node;

/// Client for the external metadata (item lookup) service.
///
/// All calls are synchronous from the caller's point of view and fail with
/// [`crate::error::ErrorKind::Upstream`] on any non-success response.
#[async_trait]
pub trait MetadataClient: Send + Sync + 'static {
    /// Fetch a single item by id. Missing items are a `NotFound` error.
    async fn fetch_by_id(&self, id: Uuid) -> AppResult<Node>;

    /// Fetch a batch of items by id. The result order is not guaranteed.
    async fn fetch_batch(&self, ids: &[Uuid]) -> AppResult<Vec<Node>>;

    /// Recursively search every item under `parent_path` within a
    /// container and zone.
    async fn search_children(
        &self,
        container_code: &str,
        zone: i32,
        parent_path: &str,
        auth_token: Option<&str>,
    ) -> AppResult<Vec<Node>>;
}
