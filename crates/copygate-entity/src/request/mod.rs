//! Approval request entities.

pub mod model;

pub use model::{CreateRequest, Request, RequestStatus};
