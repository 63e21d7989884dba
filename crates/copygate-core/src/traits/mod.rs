//! Traits for the external collaborators of the approval engine.
//!
//! Concrete reqwest-backed implementations live in `copygate-clients`;
//! tests substitute in-memory fakes.

pub mod metadata;
pub mod notifier;
pub mod pipeline;

pub use metadata::MetadataClient;
pub use notifier::Notifier;
pub use pipeline::CopyPipeline;
