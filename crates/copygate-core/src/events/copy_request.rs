//! Copy-request notification events.
//!
//! One event is emitted per effective review call (approval/denial) and one
//! when a request is closed. Delivery is best effort: the notification
//! service is a side channel and its failures never fail the review
//! transaction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::node::NodeKind;

/// What happened to the copy request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    /// Files in the request were approved.
    Approval,
    /// Files in the request were denied.
    Denial,
    /// The request was completed by a reviewer.
    Close,
}

/// A source or destination location attached to an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Metadata item id of the folder.
    pub id: Uuid,
    /// Display path of the folder.
    pub path: String,
    /// Zone index the folder lives in.
    pub zone: i32,
}

/// An entity the review action covered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTarget {
    /// Metadata item id.
    pub id: Uuid,
    /// Item name.
    pub name: String,
    /// File or folder.
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// Event payload sent to the notification service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRequestEvent {
    /// Username of the request submitter (the recipient).
    pub recipient_username: String,
    /// Approval, denial, or close.
    pub action: ReviewAction,
    /// Username of the reviewer who acted.
    pub initiator_username: String,
    /// Project / container code.
    pub project_code: String,
    /// The approval request id.
    pub copy_request_id: Uuid,
    /// Source folder location (approval/denial only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Location>,
    /// Destination folder location (approval/denial only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Location>,
    /// The entities the action covered (approval/denial only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<EventTarget>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_event_omits_locations() {
        let event = CopyRequestEvent {
            recipient_username: "erik".to_string(),
            action: ReviewAction::Close,
            initiator_username: "admin".to_string(),
            project_code: "indoctest".to_string(),
            copy_request_id: Uuid::new_v4(),
            source: None,
            destination: None,
            targets: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "close");
        assert!(json.get("source").is_none());
        assert!(json.get("targets").is_none());
    }
}
