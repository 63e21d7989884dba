//! Copy pipeline client trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::pipeline::CopyJob;

/// Client for the downstream copy pipeline.
///
/// A launch must happen at most once per approving review call. Failures
/// are hard errors for the caller; the review mutation that preceded the
/// launch stays committed (see the review engine documentation).
#[async_trait]
pub trait CopyPipeline: Send + Sync + 'static {
    /// Launch one copy operation. Returns the pipeline's operation info.
    async fn trigger_copy(&self, job: &CopyJob) -> AppResult<serde_json::Value>;
}
