//! # copygate-service
//!
//! Lifecycle orchestration for copy requests: filing-time snapshots, the
//! review engine, the completion gate, the pipeline trigger, and the
//! notification bridge. All request-mutating flows serialize on a
//! per-request lock.

pub mod completion;
pub mod context;
pub mod locks;
pub mod notify;
pub mod request;
pub mod review;
pub mod snapshot;
pub mod store;
pub mod trigger;

#[cfg(test)]
pub(crate) mod testing;

pub use completion::{CompletionOutcome, CompletionService, PendingFiles};
pub use context::OperatorContext;
pub use locks::RequestLocks;
pub use notify::NotificationBridge;
pub use request::{BrowseParams, EntityPage, FileRequestData, RequestService};
pub use review::{ReviewDecision, ReviewOutcome, ReviewScope, ReviewService};
pub use snapshot::SnapshotService;
pub use store::{ApprovalStore, PgApprovalStore};
pub use trigger::PipelineTrigger;
