//! Handlers for the pipeline settings bag.
//!
//! The settings are opaque to this service: they are stored and returned
//! verbatim for the external discovery/processor/queue/sink services to
//! consume. Keys are flat `section.param` strings.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /config -- current settings snapshot.
pub async fn get_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = state.settings.read().await;
    Ok(Json(DataResponse {
        data: settings.snapshot().clone(),
    }))
}

/// PUT /config -- apply a batch of settings updates and return the new
/// snapshot. Keys not named in the payload are left untouched.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(updates): Json<BTreeMap<String, Value>>,
) -> AppResult<impl IntoResponse> {
    let mut settings = state.settings.write().await;
    let updated_keys = updates.len();
    settings.merge(updates);

    tracing::info!(updated_keys, "Pipeline settings updated");

    Ok(Json(DataResponse {
        data: settings.snapshot().clone(),
    }))
}
