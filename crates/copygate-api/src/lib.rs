//! # copygate-api
//!
//! HTTP API layer using Axum: routes, handlers, DTOs, the `AppError` to
//! HTTP status mapping, and the server wiring.

pub mod app;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
