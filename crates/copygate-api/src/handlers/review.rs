//! Review and completion handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use validator::Validate;

use copygate_core::error::AppError;
use copygate_service::{CompletionOutcome, PendingFiles, ReviewOutcome, ReviewScope};

use crate::dto::request::{
    CompleteRequestBody, PendingFilesQuery, ReviewAllBody, ReviewSelectedBody,
};
use crate::dto::response::{ApiResponse, PendingRefusal};
use crate::error::ApiResult;
use crate::extract;
use crate::state::AppState;

/// PUT /v1/request/copy/{project_code}/files
///
/// Settles every pending file of the request.
pub async fn review_all(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ReviewAllBody>,
) -> ApiResult<Json<ApiResponse<ReviewOutcome>>> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let ctx = extract::operator(&headers, &body.username, &body.session_id);
    let outcome = state
        .review
        .review(
            &ctx,
            body.request_id,
            body.review_status.into(),
            ReviewScope::AllPending,
        )
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// PATCH /v1/request/copy/{project_code}/files
///
/// Settles an explicit set of entities; folders resolve to their
/// descendant file leaves.
pub async fn review_selected(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ReviewSelectedBody>,
) -> ApiResult<Json<ApiResponse<ReviewOutcome>>> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let ctx = extract::operator(&headers, &body.username, &body.session_id);
    let outcome = state
        .review
        .review(
            &ctx,
            body.request_id,
            body.review_status.into(),
            ReviewScope::Entities(body.entity_ids),
        )
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// PUT /v1/request/copy/{project_code}
///
/// Closes the request if no live pending file remains; a refusal is a
/// 400 carrying the pending files.
pub async fn complete_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CompleteRequestBody>,
) -> ApiResult<Response> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let ctx = extract::operator(&headers, &body.username, &body.session_id);
    let outcome = state
        .completion
        .complete(&ctx, body.request_id, body.review_notes)
        .await?;
    Ok(complete_response(outcome))
}

/// GET /v1/request/copy/{project_code}/pending-files
pub async fn pending_files(
    State(state): State<AppState>,
    Query(query): Query<PendingFilesQuery>,
) -> ApiResult<Json<ApiResponse<PendingFiles>>> {
    let pending = state.completion.pending(query.request_id).await?;
    Ok(Json(ApiResponse::ok(pending)))
}

/// A refused completion is a client error, not a success.
fn complete_response(outcome: CompletionOutcome) -> Response {
    match outcome {
        CompletionOutcome::Completed(request) => Json(ApiResponse::ok(request)).into_response(),
        CompletionOutcome::PendingRemain(pending) => (
            StatusCode::BAD_REQUEST,
            Json(PendingRefusal::from(pending)),
        )
            .into_response(),
    }
}
