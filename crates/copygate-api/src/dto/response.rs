//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use copygate_service::PendingFiles;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Structured refusal body of a completion attempt, returned with a 400.
#[derive(Debug, Clone, Serialize)]
pub struct PendingRefusal {
    /// Always `"pending"`.
    pub status: &'static str,
    /// Ids of the pending file leaves.
    pub pending_entities: Vec<Uuid>,
    /// Number of pending file leaves.
    pub pending_count: u64,
}

impl From<PendingFiles> for PendingRefusal {
    fn from(pending: PendingFiles) -> Self {
        Self {
            status: "pending",
            pending_entities: pending.pending_entities,
            pending_count: pending.pending_count,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Database reachability.
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_refusal_wire_shape() {
        let refusal = PendingRefusal::from(PendingFiles {
            pending_entities: vec![Uuid::new_v4()],
            pending_count: 1,
        });
        let json = serde_json::to_value(&refusal).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["pending_count"], 1);
        assert_eq!(json["pending_entities"].as_array().unwrap().len(), 1);
    }
}
