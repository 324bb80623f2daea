use std::sync::Arc;

use uiforge_pipeline::{Resolver, UserEditRecorder};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Everything here is constructed once at process start and lives until
/// shutdown; nothing is reconstructed mid-run.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks; the pipeline holds its
    /// own handle through the store/index adapters).
    pub pool: uiforge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The resolution pipeline.
    pub resolver: Arc<Resolver>,
    /// The user-edit save path.
    pub recorder: Arc<UserEditRecorder>,
}
