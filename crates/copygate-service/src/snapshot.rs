//! Filing-time snapshot of the submitted namespace.

use std::sync::Arc;

use uuid::Uuid;

use copygate_core::error::AppError;
use copygate_core::result::AppResult;
use copygate_core::traits::metadata::MetadataClient;
use copygate_entity::entity::model::{CreateEntity, ParentLink};

/// Flattens the submitted items into entity rows.
///
/// The submitted ids become the anchors of the request forest (their
/// external parent is deliberately dropped); each submitted folder is
/// expanded through a recursive metadata search and every descendant keeps
/// its true parent link. Any metadata failure aborts filing before a row
/// is written.
#[derive(Clone)]
pub struct SnapshotService {
    metadata: Arc<dyn MetadataClient>,
}

impl SnapshotService {
    /// Create a snapshot service over the metadata client.
    pub fn new(metadata: Arc<dyn MetadataClient>) -> Self {
        Self { metadata }
    }

    /// Build the entity rows for a new request.
    pub async fn snapshot(
        &self,
        submitted_ids: &[Uuid],
        auth_token: Option<&str>,
    ) -> AppResult<Vec<CreateEntity>> {
        let nodes = self.metadata.fetch_batch(submitted_ids).await?;
        if nodes.len() != submitted_ids.len() {
            return Err(AppError::not_found(
                "One or more submitted items no longer exist",
            ));
        }

        let mut rows = Vec::with_capacity(nodes.len());
        for node in &nodes {
            rows.push(CreateEntity::from_node(node, ParentLink::Root));
            if !node.is_file() {
                let children = self
                    .metadata
                    .search_children(
                        &node.container_code,
                        node.zone,
                        &node.display_path(),
                        auth_token,
                    )
                    .await?;
                for child in &children {
                    rows.push(CreateEntity::from_node(
                        child,
                        ParentLink::from_column(child.parent),
                    ));
                }
            }
        }
        Ok(rows)
    }
}
