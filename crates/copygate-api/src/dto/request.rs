//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use copygate_core::types::sorting::{EntityOrderBy, SortDirection};
use copygate_entity::entity::model::CopyStatus;
use copygate_entity::request::model::RequestStatus;
use copygate_service::ReviewDecision;

/// The reviewer's verdict as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewVerdict {
    /// Approve the scoped files.
    Approved,
    /// Deny the scoped files.
    Denied,
}

impl From<ReviewVerdict> for ReviewDecision {
    fn from(verdict: ReviewVerdict) -> Self {
        match verdict {
            ReviewVerdict::Approved => ReviewDecision::Approve,
            ReviewVerdict::Denied => ReviewDecision::Deny,
        }
    }
}

/// File a new copy request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRequestBody {
    /// The items to copy; become the anchors of the request forest.
    #[validate(length(min = 1, message = "entity_ids must not be empty"))]
    pub entity_ids: Vec<Uuid>,
    /// Source folder id.
    pub source_id: Uuid,
    /// Destination folder id.
    pub destination_id: Uuid,
    /// Note to the reviewers.
    #[validate(length(min = 1, message = "note is required"))]
    pub note: String,
    /// Username of the submitter.
    #[validate(length(min = 1, message = "submitted_by is required"))]
    pub submitted_by: String,
}

/// Query parameters for the request listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListRequestsQuery {
    /// Lifecycle state to list.
    pub status: RequestStatus,
    /// Restrict to one submitter.
    pub submitted_by: Option<String>,
    /// Page number (0-based).
    #[serde(default)]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

/// Query parameters for browsing one level of a request's forest.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowseFilesQuery {
    /// The request to browse.
    pub request_id: Uuid,
    /// Scope to the children of this entity; absent lists the anchors.
    pub parent_id: Option<Uuid>,
    /// Case-insensitive name filter.
    pub name_contains: Option<String>,
    /// Sort column.
    #[serde(default)]
    pub order_by: EntityOrderBy,
    /// Sort direction.
    #[serde(default)]
    pub order_type: SortDirection,
    /// Page number (0-based).
    #[serde(default)]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

/// Review every pending file of a request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewAllBody {
    /// The request under review.
    pub request_id: Uuid,
    /// Approve or deny.
    pub review_status: ReviewVerdict,
    /// Username of the reviewer.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Client session id, forwarded to the copy pipeline.
    #[validate(length(min = 1, message = "session_id is required"))]
    pub session_id: String,
}

/// Review an explicit set of entities.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewSelectedBody {
    /// The request under review.
    pub request_id: Uuid,
    /// The scoped entity ids; folders resolve to their file leaves.
    #[validate(length(min = 1, message = "entity_ids must not be empty"))]
    pub entity_ids: Vec<Uuid>,
    /// Approve or deny.
    pub review_status: ReviewVerdict,
    /// Username of the reviewer.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Client session id, forwarded to the copy pipeline.
    #[validate(length(min = 1, message = "session_id is required"))]
    pub session_id: String,
}

/// Close a request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompleteRequestBody {
    /// The request to close.
    pub request_id: Uuid,
    /// Reviewer notes recorded at completion.
    pub review_notes: Option<String>,
    /// Username of the reviewer.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Client session id.
    #[validate(length(min = 1, message = "session_id is required"))]
    pub session_id: String,
}

/// Query parameters for the pending-files listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PendingFilesQuery {
    /// The request to inspect.
    pub request_id: Uuid,
}

/// The pipeline's per-entity copy-status report.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CopyStatusBody {
    /// The entities the report covers.
    #[validate(length(min = 1, message = "entity_ids must not be empty"))]
    pub entity_ids: Vec<Uuid>,
    /// The new copy status.
    pub copy_status: CopyStatus,
}

fn default_page_size() -> u64 {
    25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_wire_values() {
        let verdict: ReviewVerdict = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(ReviewDecision::from(verdict), ReviewDecision::Approve);
        let verdict: ReviewVerdict = serde_json::from_str("\"denied\"").unwrap();
        assert_eq!(ReviewDecision::from(verdict), ReviewDecision::Deny);
    }

    #[test]
    fn test_create_body_validation() {
        let body = CreateRequestBody {
            entity_ids: vec![],
            source_id: Uuid::new_v4(),
            destination_id: Uuid::new_v4(),
            note: "please".to_string(),
            submitted_by: "erik".to_string(),
        };
        assert!(body.validate().is_err());
    }
}
