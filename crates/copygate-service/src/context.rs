//! Per-call operator identity.

/// Identity and credentials of the caller of a review, completion, or
/// filing operation. Built by the API layer from the request body and
/// forwarded auth headers.
#[derive(Debug, Clone)]
pub struct OperatorContext {
    /// Username of the acting reviewer or submitter.
    pub username: String,
    /// Client session id, forwarded to the copy pipeline for progress
    /// tracking.
    pub session_id: String,
    /// Bearer token of the caller, forwarded to upstream services.
    pub access_token: Option<String>,
    /// Refresh token of the caller, forwarded to the copy pipeline.
    pub refresh_token: Option<String>,
}

impl OperatorContext {
    /// Context with no forwarded credentials, for calls that never reach
    /// an authenticated upstream.
    pub fn unauthenticated(username: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            session_id: session_id.into(),
            access_token: None,
            refresh_token: None,
        }
    }
}
