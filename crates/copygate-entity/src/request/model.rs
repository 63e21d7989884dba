//! Approval request model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle state of an approval request.
///
/// `Pending → Completed` is the only transition; denying an entire request
/// is expressed by denying all its files, not by a request-level state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
pub enum RequestStatus {
    /// Filed and awaiting per-file review.
    Pending,
    /// Closed by a reviewer; terminal.
    Completed,
}

/// A request to copy a subtree of files across the trust boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Request {
    /// Unique request identifier.
    pub id: Uuid,
    /// Lifecycle state.
    pub status: RequestStatus,
    /// Username of the submitter.
    pub submitted_by: String,
    /// When the request was filed.
    pub submitted_at: DateTime<Utc>,
    /// Source folder id (greenroom side).
    pub source_id: Uuid,
    /// Destination folder id (core side).
    pub destination_id: Uuid,
    /// Free-text note from the submitter.
    pub note: String,
    /// Project / container code the request belongs to.
    pub project_code: String,
    /// Display path of the source folder at filing time.
    pub source_path: String,
    /// Display path of the destination folder at filing time.
    pub destination_path: String,
    /// Reviewer notes recorded at completion.
    pub review_notes: Option<String>,
    /// Username of the reviewer who completed the request.
    pub completed_by: Option<String>,
    /// When the request was completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Request {
    /// Whether the request has been completed.
    pub fn is_completed(&self) -> bool {
        matches!(self.status, RequestStatus::Completed)
    }
}

/// Data required to file a new request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Username of the submitter.
    pub submitted_by: String,
    /// Source folder id.
    pub source_id: Uuid,
    /// Destination folder id.
    pub destination_id: Uuid,
    /// Free-text note.
    pub note: String,
    /// Project / container code.
    pub project_code: String,
    /// Display path of the source folder.
    pub source_path: String,
    /// Display path of the destination folder.
    pub destination_path: String,
}
