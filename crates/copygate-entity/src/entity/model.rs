//! Entity model — one node in a request's private forest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use copygate_core::types::node::{Node, NodeKind};

/// Whether an entity is a file leaf or a folder container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "entity_kind", rename_all = "lowercase")]
pub enum EntityKind {
    /// A file leaf; carries authoritative review and copy status.
    File,
    /// A folder container; gating always resolves to its file leaves.
    Folder,
}

/// Per-file review state. Monotonic: once non-pending, a file is never
/// revisited by later review calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "review_status", rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Awaiting a reviewer decision.
    Pending,
    /// Approved for copy.
    Approved,
    /// Denied.
    Denied,
}

/// Per-file copy state, updated only by the downstream pipeline's
/// status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "copy_status", rename_all = "lowercase")]
pub enum CopyStatus {
    /// Not yet copied.
    Pending,
    /// Copy pipeline reported the file as copied.
    Copied,
}

/// Position of an entity in its request's forest.
///
/// The ids the submitter listed at filing time are always `Root`, even if
/// the external namespace nests them under a common ancestor outside the
/// submitted set: the forest is deliberately re-rooted at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "parent_id")]
pub enum ParentLink {
    /// A top-level anchor of the request forest.
    Root,
    /// A descendant of another entity in the same request.
    ChildOf(Uuid),
}

impl ParentLink {
    /// Build from the nullable `parent_id` column.
    pub fn from_column(parent_id: Option<Uuid>) -> Self {
        match parent_id {
            Some(id) => Self::ChildOf(id),
            None => Self::Root,
        }
    }

    /// The nullable `parent_id` column value.
    pub fn as_column(&self) -> Option<Uuid> {
        match self {
            Self::Root => None,
            Self::ChildOf(id) => Some(*id),
        }
    }

    /// Whether this is a top-level anchor.
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

/// A node in a request's private forest, snapshotted from the metadata
/// service at filing time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entity {
    /// Unique row identifier.
    pub id: Uuid,
    /// The request this entity belongs to.
    pub request_id: Uuid,
    /// External metadata item id; unique only within a request.
    pub entity_id: Uuid,
    /// File or folder.
    pub entity_type: EntityKind,
    /// Parent entity id within the same request; null for anchors.
    pub parent_id: Option<Uuid>,
    /// Item name at filing time.
    pub name: String,
    /// Review state (file entities only; never authoritative for folders).
    pub review_status: Option<ReviewStatus>,
    /// Username of the reviewer who settled this file.
    pub reviewed_by: Option<String>,
    /// When this file was settled.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Copy state (file entities only).
    pub copy_status: Option<CopyStatus>,
    /// Username of the uploader.
    pub uploaded_by: Option<String>,
    /// When the item was uploaded.
    pub uploaded_at: Option<DateTime<Utc>>,
    /// File size in bytes (file entities only).
    pub file_size: Option<i64>,
}

impl Entity {
    /// Position of this entity in the request forest.
    pub fn parent(&self) -> ParentLink {
        ParentLink::from_column(self.parent_id)
    }

    /// Whether this entity is a file leaf.
    pub fn is_file(&self) -> bool {
        matches!(self.entity_type, EntityKind::File)
    }

    /// Whether this entity is a file leaf at the given review status.
    pub fn is_file_at(&self, status: ReviewStatus) -> bool {
        self.is_file() && self.review_status == Some(status)
    }
}

/// Data required to insert one entity row at filing time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntity {
    /// External metadata item id.
    pub entity_id: Uuid,
    /// File or folder.
    pub entity_type: EntityKind,
    /// Position in the request forest.
    pub parent: ParentLink,
    /// Item name.
    pub name: String,
    /// Initial review state (`Pending` for files, none for folders).
    pub review_status: Option<ReviewStatus>,
    /// Initial copy state (`Pending` for files, none for folders).
    pub copy_status: Option<CopyStatus>,
    /// Username of the uploader.
    pub uploaded_by: Option<String>,
    /// When the item was uploaded.
    pub uploaded_at: Option<DateTime<Utc>>,
    /// File size in bytes (files only).
    pub file_size: Option<i64>,
}

impl CreateEntity {
    /// Build an entity row from a metadata node.
    ///
    /// Files start pending on both review and copy status; folders carry
    /// neither. The caller decides the parent link — submitted ids are
    /// forced to `Root` regardless of the node's true external parent.
    pub fn from_node(node: &Node, parent: ParentLink) -> Self {
        let is_file = matches!(node.kind, NodeKind::File);
        Self {
            entity_id: node.id,
            entity_type: match node.kind {
                NodeKind::File => EntityKind::File,
                NodeKind::Folder => EntityKind::Folder,
            },
            parent,
            name: node.name.clone(),
            review_status: is_file.then_some(ReviewStatus::Pending),
            copy_status: is_file.then_some(CopyStatus::Pending),
            uploaded_by: node.owner.clone(),
            uploaded_at: Some(node.created_time),
            file_size: if is_file { node.size } else { None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use copygate_core::types::node::NodeStatus;

    fn node(kind: NodeKind) -> Node {
        Node {
            id: Uuid::new_v4(),
            parent: Some(Uuid::new_v4()),
            parent_path: Some("admin".to_string()),
            name: "item".to_string(),
            kind,
            size: Some(42),
            owner: Some("erik".to_string()),
            zone: 0,
            container_code: "indoctest".to_string(),
            status: NodeStatus::Active,
            created_time: Utc::now(),
        }
    }

    #[test]
    fn test_file_rows_start_pending() {
        let row = CreateEntity::from_node(&node(NodeKind::File), ParentLink::Root);
        assert_eq!(row.review_status, Some(ReviewStatus::Pending));
        assert_eq!(row.copy_status, Some(CopyStatus::Pending));
        assert_eq!(row.file_size, Some(42));
        assert!(row.parent.is_root());
    }

    #[test]
    fn test_folder_rows_carry_no_file_state() {
        let parent = Uuid::new_v4();
        let row = CreateEntity::from_node(&node(NodeKind::Folder), ParentLink::ChildOf(parent));
        assert_eq!(row.review_status, None);
        assert_eq!(row.copy_status, None);
        assert_eq!(row.file_size, None);
        assert_eq!(row.parent.as_column(), Some(parent));
    }

    #[test]
    fn test_parent_link_round_trip() {
        assert_eq!(ParentLink::from_column(None), ParentLink::Root);
        let id = Uuid::new_v4();
        assert_eq!(
            ParentLink::from_column(Some(id)),
            ParentLink::ChildOf(id)
        );
        assert_eq!(ParentLink::ChildOf(id).as_column(), Some(id));
        assert_eq!(ParentLink::Root.as_column(), None);
    }
}
