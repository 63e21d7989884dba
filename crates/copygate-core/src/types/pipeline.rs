//! Copy pipeline launch parameters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything one launch of the downstream copy pipeline needs.
///
/// `targets` are the anchor ids (top-level entities of the request forest)
/// the pipeline copies recursively. `touched` is the full ancestor closure
/// of the leaves approved by the triggering review call; the pipeline uses
/// it for auditing and lock bookkeeping only, never for anchor selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyJob {
    /// The approval request this launch belongs to.
    pub request_id: Uuid,
    /// Project / container code.
    pub project_code: String,
    /// Source folder id (greenroom side).
    pub source_id: Uuid,
    /// Destination folder id (core side).
    pub destination_id: Uuid,
    /// Anchor ids handed to the pipeline as copy roots.
    pub targets: Vec<Uuid>,
    /// Username of the approving reviewer.
    pub operator: String,
    /// Client session id, forwarded for progress tracking.
    pub session_id: String,
    /// Ancestor closure of the newly-approved leaves.
    pub touched: Vec<Uuid>,
    /// Bearer token forwarded from the review call.
    pub access_token: Option<String>,
    /// Refresh token forwarded from the review call.
    pub refresh_token: Option<String>,
}
