//! Copy pipeline launch.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use copygate_core::result::AppResult;
use copygate_core::traits::pipeline::CopyPipeline;
use copygate_core::types::pipeline::CopyJob;
use copygate_entity::request::model::Request;

use crate::context::OperatorContext;

/// Launches the downstream copy pipeline for an approving review call.
///
/// Invoked at most once per call, only after the review mutation has been
/// committed. A launch failure is a hard error of the review call; the
/// committed mutation stays.
#[derive(Clone)]
pub struct PipelineTrigger {
    pipeline: Arc<dyn CopyPipeline>,
}

impl PipelineTrigger {
    /// Create a trigger over the pipeline client.
    pub fn new(pipeline: Arc<dyn CopyPipeline>) -> Self {
        Self { pipeline }
    }

    /// Launch one copy operation.
    ///
    /// `anchors` are the copy roots the pipeline receives; `touched` is the
    /// ancestor closure of the leaves this call approved, forwarded for
    /// auditing only.
    pub async fn launch(
        &self,
        ctx: &OperatorContext,
        request: &Request,
        anchors: Vec<Uuid>,
        touched: Vec<Uuid>,
    ) -> AppResult<serde_json::Value> {
        let job = CopyJob {
            request_id: request.id,
            project_code: request.project_code.clone(),
            source_id: request.source_id,
            destination_id: request.destination_id,
            targets: anchors,
            operator: ctx.username.clone(),
            session_id: ctx.session_id.clone(),
            touched,
            access_token: ctx.access_token.clone(),
            refresh_token: ctx.refresh_token.clone(),
        };

        info!(
            request_id = %request.id,
            project_code = %request.project_code,
            targets = job.targets.len(),
            operator = %job.operator,
            "launching copy pipeline"
        );
        self.pipeline.trigger_copy(&job).await
    }
}
