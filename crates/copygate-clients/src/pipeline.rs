//! Copy pipeline client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use copygate_core::config::upstream::PipelineConfig;
use copygate_core::error::{AppError, ErrorKind};
use copygate_core::result::AppResult;
use copygate_core::traits::pipeline::CopyPipeline;
use copygate_core::types::pipeline::CopyJob;

/// One copy root handed to the pipeline.
#[derive(Debug, Serialize)]
struct CopyTarget {
    id: Uuid,
}

/// Inner payload of a copy action.
#[derive(Debug, Serialize)]
struct CopyPayload {
    targets: Vec<CopyTarget>,
    destination: Uuid,
    source: Uuid,
    /// request id → ancestor closure of the approved leaves; consumed by
    /// the pipeline for auditing and lock bookkeeping only.
    request_info: HashMap<String, Vec<Uuid>>,
}

/// Wire format of the data-operations copy action.
#[derive(Debug, Serialize)]
struct CopyAction {
    payload: CopyPayload,
    operator: String,
    operation: &'static str,
    project_code: String,
    session_id: String,
}

impl CopyAction {
    fn from_job(job: &CopyJob) -> Self {
        Self {
            payload: CopyPayload {
                targets: job.targets.iter().map(|&id| CopyTarget { id }).collect(),
                destination: job.destination_id,
                source: job.source_id,
                request_info: HashMap::from([(
                    job.request_id.to_string(),
                    job.touched.clone(),
                )]),
            },
            operator: job.operator.clone(),
            operation: "copy",
            project_code: job.project_code.clone(),
            session_id: job.session_id.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CopyActionResponse {
    operation_info: serde_json::Value,
}

/// The pipeline expects the raw token, without the `Bearer` scheme prefix.
fn strip_bearer(token: &str) -> &str {
    token.strip_prefix("Bearer ").unwrap_or(token)
}

/// reqwest-backed client for the downstream copy pipeline.
#[derive(Debug, Clone)]
pub struct PipelineClient {
    client: reqwest::Client,
    base_url: String,
}

impl PipelineClient {
    /// Create a new pipeline client from configuration.
    pub fn new(config: &PipelineConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build pipeline HTTP client",
                    e,
                )
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CopyPipeline for PipelineClient {
    async fn trigger_copy(&self, job: &CopyJob) -> AppResult<serde_json::Value> {
        let url = format!("{}/files/actions/", self.base_url);
        let mut request = self.client.post(&url).json(&CopyAction::from_job(job));
        if let Some(token) = &job.access_token {
            request = request.header("Authorization", strip_bearer(token));
        }
        if let Some(token) = &job.refresh_token {
            request = request.header("Refresh-Token", token);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, "Copy pipeline unreachable", e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(format!(
                "Failed to start copy pipeline: {status} {body}"
            )));
        }

        let parsed: CopyActionResponse = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, "Invalid pipeline response", e)
        })?;
        Ok(parsed.operation_info)
    }
}
