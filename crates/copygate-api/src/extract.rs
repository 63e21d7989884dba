//! Header extraction helpers.

use axum::http::HeaderMap;

use copygate_service::OperatorContext;

/// Build the operator context for a mutating call from the body-supplied
/// identity and the forwarded auth headers.
pub fn operator(headers: &HeaderMap, username: &str, session_id: &str) -> OperatorContext {
    OperatorContext {
        username: username.to_string(),
        session_id: session_id.to_string(),
        access_token: header_value(headers, "authorization"),
        refresh_token: header_value(headers, "refresh-token"),
    }
}

/// The caller's bearer token, if any.
pub fn auth_token(headers: &HeaderMap) -> Option<String> {
    header_value(headers, "authorization")
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
