//! Upstream collaborator endpoints.
//!
//! Every external call carries a bounded timeout and is never retried
//! automatically: a retried review call could trigger the copy pipeline
//! twice for the same anchor set.

use serde::{Deserialize, Serialize};

/// Metadata (item/identity lookup) service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Base URL of the metadata service, e.g. `http://metadata:5066/v1/`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Notification service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Base URL of the notification service.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Downstream copy pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Base URL of the data-operations service that runs the copy pipeline.
    pub base_url: String,
    /// Per-request timeout in seconds. Pipeline launches are the slowest
    /// upstream call, so the default is more generous.
    #[serde(default = "default_pipeline_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    15
}

fn default_pipeline_timeout() -> u64 {
    60
}
