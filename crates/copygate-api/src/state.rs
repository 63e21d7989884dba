//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use copygate_core::config::AppConfig;
use copygate_service::store::PgApprovalStore;
use copygate_service::{CompletionService, RequestService, ReviewService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db_pool: PgPool,
    /// Request lifecycle service.
    pub requests: Arc<RequestService>,
    /// Review engine.
    pub review: Arc<ReviewService<PgApprovalStore>>,
    /// Completion gate.
    pub completion: Arc<CompletionService<PgApprovalStore>>,
}
