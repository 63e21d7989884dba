//! Request lifecycle handlers: filing, listing, browsing, deletion, and
//! the pipeline's copy-status report.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use uuid::Uuid;
use validator::Validate;

use copygate_core::error::AppError;
use copygate_core::types::pagination::{PageRequest, PageResponse};
use copygate_entity::entity::model::Entity;
use copygate_entity::request::model::Request;
use copygate_service::{BrowseParams, EntityPage, FileRequestData};

use crate::dto::request::{BrowseFilesQuery, CopyStatusBody, CreateRequestBody, ListRequestsQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extract;
use crate::state::AppState;

/// POST /v1/request/copy/{project_code}
pub async fn create_request(
    State(state): State<AppState>,
    Path(project_code): Path<String>,
    headers: HeaderMap,
    Json(body): Json<CreateRequestBody>,
) -> ApiResult<Json<ApiResponse<Request>>> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let auth_token = extract::auth_token(&headers);
    let request = state
        .requests
        .create(
            &project_code,
            FileRequestData {
                entity_ids: body.entity_ids,
                source_id: body.source_id,
                destination_id: body.destination_id,
                note: body.note,
                submitted_by: body.submitted_by,
            },
            auth_token.as_deref(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// GET /v1/request/copy/{project_code}
pub async fn list_requests(
    State(state): State<AppState>,
    Path(project_code): Path<String>,
    Query(query): Query<ListRequestsQuery>,
) -> ApiResult<Json<ApiResponse<PageResponse<Request>>>> {
    let page = PageRequest::new(query.page, query.page_size);
    let requests = state
        .requests
        .list(
            &project_code,
            query.status,
            query.submitted_by.as_deref(),
            &page,
        )
        .await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /v1/request/copy/{project_code}/files
pub async fn list_request_files(
    State(state): State<AppState>,
    Query(query): Query<BrowseFilesQuery>,
) -> ApiResult<Json<ApiResponse<EntityPage>>> {
    let files = state
        .requests
        .list_files(
            query.request_id,
            BrowseParams {
                parent_id: query.parent_id,
                name_contains: query.name_contains,
                order_by: query.order_by,
                direction: query.order_type,
                page: PageRequest::new(query.page, query.page_size),
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// DELETE /v1/request/copy/{project_code}/{request_id}
pub async fn delete_request(
    State(state): State<AppState>,
    Path((_project_code, request_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.requests.delete(request_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Request {request_id} deleted"),
    })))
}

/// PUT /v1/request/{request_id}/copy-status
pub async fn report_copy_status(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<CopyStatusBody>,
) -> ApiResult<Json<ApiResponse<Vec<Entity>>>> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let updated = state
        .requests
        .report_copy_status(request_id, &body.entity_ids, body.copy_status)
        .await?;
    Ok(Json(ApiResponse::ok(updated)))
}
