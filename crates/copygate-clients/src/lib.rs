//! # copygate-clients
//!
//! reqwest-backed implementations of the upstream collaborator traits:
//! the metadata service, the notification service, and the downstream
//! copy pipeline. Every client carries a bounded per-request timeout and
//! never retries automatically — a retried review call could launch the
//! copy pipeline twice.

pub mod metadata;
pub mod notifier;
pub mod pipeline;

pub use metadata::MetadataService;
pub use notifier::NotificationServiceClient;
pub use pipeline::PipelineClient;
