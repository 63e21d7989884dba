//! Metadata item model.
//!
//! `Node` mirrors the wire format of the metadata service. It is the only
//! view this service ever has of the external namespace: request filing
//! flattens node subtrees into entity rows, and the completion gate
//! re-checks node lifecycle status at close time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a metadata item is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A file leaf.
    File,
    /// A folder container.
    Folder,
}

/// Lifecycle status of a metadata item.
///
/// `Archived` means the underlying content no longer exists; archived
/// pending files are excluded from completion gating but never
/// auto-resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeStatus {
    /// The item exists and is reachable.
    Active,
    /// The item has been archived (trashed) upstream.
    Archived,
}

/// A single item in the external metadata namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Item identifier, globally unique in the metadata service.
    pub id: Uuid,
    /// Parent item identifier, if any.
    pub parent: Option<Uuid>,
    /// Path of the parent container (no leading slash, no trailing name).
    pub parent_path: Option<String>,
    /// Item name.
    pub name: String,
    /// File or folder.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Size in bytes (files only).
    pub size: Option<i64>,
    /// Username of the uploader.
    pub owner: Option<String>,
    /// Zone index (0 = greenroom, 1 = core).
    pub zone: i32,
    /// Project / container code the item belongs to.
    pub container_code: String,
    /// Lifecycle status.
    pub status: NodeStatus,
    /// When the item was created upstream.
    pub created_time: DateTime<Utc>,
}

impl Node {
    /// Full display path of the item (`parent_path/name`, or just the name
    /// for top-of-namespace items).
    pub fn display_path(&self) -> String {
        match self.parent_path.as_deref() {
            Some(parent) if !parent.is_empty() => format!("{parent}/{}", self.name),
            _ => self.name.clone(),
        }
    }

    /// Whether the item is a file.
    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File)
    }

    /// Whether the item has been archived upstream.
    pub fn is_archived(&self) -> bool {
        matches!(self.status, NodeStatus::Archived)
    }
}
