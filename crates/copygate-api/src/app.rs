//! Application builder — wires clients, repositories, and services into
//! an Axum app and runs it.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::net::TcpListener;

use copygate_clients::{MetadataService, NotificationServiceClient, PipelineClient};
use copygate_core::config::AppConfig;
use copygate_core::error::AppError;
use copygate_core::result::AppResult;
use copygate_core::traits::metadata::MetadataClient;
use copygate_database::repositories::{EntityRepository, RequestRepository};
use copygate_service::store::PgApprovalStore;
use copygate_service::{
    CompletionService, NotificationBridge, PipelineTrigger, RequestLocks, RequestService,
    ReviewService, SnapshotService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Build the application state from configuration and a database pool.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppResult<AppState> {
    let metadata: Arc<dyn MetadataClient> = Arc::new(MetadataService::new(&config.metadata)?);
    let notifier = Arc::new(NotificationServiceClient::new(&config.notification)?);
    let pipeline = Arc::new(PipelineClient::new(&config.pipeline)?);

    let request_repo = Arc::new(RequestRepository::new(db_pool.clone()));
    let entity_repo = Arc::new(EntityRepository::new(db_pool.clone()));
    let store = Arc::new(PgApprovalStore::new(
        request_repo.clone(),
        entity_repo.clone(),
    ));

    let locks = Arc::new(RequestLocks::new());
    let bridge = Arc::new(NotificationBridge::new(metadata.clone(), notifier));
    let trigger = Arc::new(PipelineTrigger::new(pipeline));

    let requests = Arc::new(RequestService::new(
        request_repo,
        entity_repo,
        metadata.clone(),
        SnapshotService::new(metadata.clone()),
    ));
    let review = Arc::new(ReviewService::new(
        store.clone(),
        locks.clone(),
        bridge.clone(),
        trigger,
    ));
    let completion = Arc::new(CompletionService::new(store, locks, metadata, bridge));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        requests,
        review,
        completion,
    })
}

/// Run the CopyGate server until ctrl-c.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> AppResult<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, db_pool)?;
    let app = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(
            copygate_core::error::ErrorKind::Configuration,
            format!("Failed to bind {addr}"),
            e,
        ))?;
    tracing::info!(%addr, "CopyGate listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(
            copygate_core::error::ErrorKind::Internal,
            "Server error",
            e,
        ))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install ctrl-c handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
