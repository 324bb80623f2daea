//! Handlers for the template resolution endpoints.
//!
//! Endpoints:
//! - POST /generate-ui
//! - POST /save-ui

use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateUiRequest {
    pub command: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateUiResponse {
    pub html: String,
    pub template_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveUiRequest {
    pub html: String,
    pub parent_template_id: String,
    pub user: String,
}

#[derive(Debug, Serialize)]
pub struct SaveUiResponse {
    pub message: String,
    pub template_id: String,
}

/// POST /generate-ui
///
/// Resolve a natural-language command to a template: a cached one when
/// the index has an acceptable match, a freshly generated one otherwise.
async fn generate_ui(
    State(state): State<AppState>,
    Json(input): Json<GenerateUiRequest>,
) -> AppResult<Json<GenerateUiResponse>> {
    if input.command.trim().is_empty() {
        return Err(AppError::BadRequest("command must not be empty".into()));
    }

    tracing::debug!(command = %input.command, "Received generate-ui request");

    let resolution = state.resolver.resolve(&input.command).await?;

    Ok(Json(GenerateUiResponse {
        html: resolution.html,
        template_id: resolution.template_id,
    }))
}

/// POST /save-ui
///
/// Persist a user-modified template linked to its parent by identifier.
async fn save_ui(
    State(state): State<AppState>,
    Json(input): Json<SaveUiRequest>,
) -> AppResult<Json<SaveUiResponse>> {
    let template_id = state
        .recorder
        .save(&input.html, &input.parent_template_id, &input.user)
        .await?;

    Ok(Json(SaveUiResponse {
        message: "Template saved successfully".into(),
        template_id: template_id.to_string(),
    }))
}

/// Mount the template resolution routes (root level, per the published
/// interface).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-ui", post(generate_ui))
        .route("/save-ui", post(save_ui))
}
