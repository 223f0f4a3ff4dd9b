//! Handlers for the instance registry.
//!
//! Provides:
//! - Listing with status filter + search (the Instances page query).
//! - Per-log-type collection toggles.
//! - Instance registration (called by the discovery service).

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use fleetlog_core::error::CoreError;
use fleetlog_core::format::format_bytes;
use fleetlog_core::registry::{Instance, InstanceFilter, LogTypeState, STATUS_AVAILABLE};
use fleetlog_core::types::LogType;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Per-log-type state as presented to clients: raw byte count plus the
/// dashboard-formatted size string.
#[derive(Debug, Serialize)]
pub struct LogTypeStateView {
    pub enabled: bool,
    pub last_processed: Option<DateTime<Utc>>,
    pub count: u64,
    pub size_bytes: u64,
    pub size: String,
}

impl From<&LogTypeState> for LogTypeStateView {
    fn from(state: &LogTypeState) -> Self {
        LogTypeStateView {
            enabled: state.enabled,
            last_processed: state.last_processed,
            count: state.count,
            size_bytes: state.size_bytes,
            size: format_bytes(state.size_bytes),
        }
    }
}

/// Full instance presentation, log types keyed by their wire names.
#[derive(Debug, Serialize)]
pub struct InstanceView {
    pub id: String,
    pub cluster_id: String,
    pub instance_class: String,
    pub engine: String,
    pub region: String,
    pub az: String,
    pub status: String,
    pub last_seen: DateTime<Utc>,
    pub log_types: BTreeMap<LogType, LogTypeStateView>,
}

impl From<&Instance> for InstanceView {
    fn from(instance: &Instance) -> Self {
        InstanceView {
            id: instance.id.clone(),
            cluster_id: instance.cluster_id.clone(),
            instance_class: instance.instance_class.clone(),
            engine: instance.engine.clone(),
            region: instance.region.clone(),
            az: instance.az.clone(),
            status: instance.status.clone(),
            last_seen: instance.last_seen,
            log_types: instance
                .log_types
                .iter()
                .map(|(lt, state)| (*lt, LogTypeStateView::from(state)))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// GET /instances
// ---------------------------------------------------------------------------

/// Query parameters for instance listing (`?filter=&search=`).
#[derive(Debug, Deserialize)]
pub struct ListInstancesParams {
    pub filter: Option<String>,
    pub search: Option<String>,
}

/// List instances matching the status filter and search term.
pub async fn list_instances(
    State(state): State<AppState>,
    Query(params): Query<ListInstancesParams>,
) -> AppResult<impl IntoResponse> {
    let filter: InstanceFilter = params.filter.as_deref().unwrap_or("all").parse()?;
    let search = params.search.as_deref().unwrap_or("");

    let registry = state.registry.read().await;
    let views: Vec<InstanceView> = registry
        .list(filter, search)
        .into_iter()
        .map(InstanceView::from)
        .collect();

    Ok(Json(DataResponse { data: views }))
}

// ---------------------------------------------------------------------------
// GET /instances/{id}
// ---------------------------------------------------------------------------

/// Get a single instance by id.
pub async fn get_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let registry = state.registry.read().await;
    let instance = registry.get(&id)?;
    Ok(Json(DataResponse {
        data: InstanceView::from(instance),
    }))
}

// ---------------------------------------------------------------------------
// POST /instances/{id}/log-types/{key}/toggle
// ---------------------------------------------------------------------------

/// Flip collection on/off for one log type on one instance.
pub async fn toggle_log_type(
    State(state): State<AppState>,
    Path((id, key)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    // A key outside the tracked set cannot exist on any instance.
    let log_type: LogType = key
        .parse()
        .map_err(|_| CoreError::not_found("LogType", key.clone()))?;

    let mut registry = state.registry.write().await;
    let updated = registry.toggle_log_type(&id, log_type)?;

    tracing::info!(
        instance_id = %id,
        log_type = %log_type,
        enabled = updated.enabled,
        "Log collection toggled",
    );

    Ok(Json(DataResponse {
        data: LogTypeStateView::from(updated),
    }))
}

// ---------------------------------------------------------------------------
// POST /instances  (discovery registration)
// ---------------------------------------------------------------------------

/// Registration payload reported by the discovery service.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInstanceRequest {
    #[validate(length(min = 1, max = 128))]
    pub id: String,
    #[validate(length(min = 1, max = 128))]
    pub cluster_id: String,
    pub instance_class: String,
    pub engine: String,
    pub region: String,
    pub az: String,
    /// Open status string; defaults to `available`.
    pub status: Option<String>,
}

/// Register a newly discovered instance. All tracked log types start
/// disabled with empty history.
pub async fn register_instance(
    State(state): State<AppState>,
    Json(input): Json<RegisterInstanceRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let instance = Instance {
        id: input.id,
        cluster_id: input.cluster_id,
        instance_class: input.instance_class,
        engine: input.engine,
        region: input.region,
        az: input.az,
        status: input.status.unwrap_or_else(|| STATUS_AVAILABLE.to_string()),
        last_seen: Utc::now(),
        log_types: LogType::ALL
            .into_iter()
            .map(|lt| (lt, LogTypeState::disabled()))
            .collect(),
    };

    let mut registry = state.registry.write().await;
    registry.register(instance.clone())?;

    tracing::info!(
        instance_id = %instance.id,
        cluster_id = %instance.cluster_id,
        "Instance registered",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: InstanceView::from(&instance),
        }),
    ))
}
