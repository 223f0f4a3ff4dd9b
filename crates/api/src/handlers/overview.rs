//! Fleet overview: the aggregate numbers behind the dashboard's stat tiles.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use fleetlog_core::format::format_bytes;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fleet-level aggregate statistics, derived from the three aggregates on
/// every request.
#[derive(Debug, Serialize)]
pub struct FleetOverview {
    pub total_instances: usize,
    pub available_instances: usize,
    /// Instances with collection enabled for at least one log type.
    pub collecting_instances: usize,
    pub total_logs_processed: u64,
    pub total_bytes_processed: u64,
    pub total_size_processed: String,
    pub active_jobs: usize,
    pub active_issues: usize,
}

/// GET /overview
pub async fn fleet_overview(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let registry = state.registry.read().await;
    let ledger = state.ledger.read().await;
    let jobs = state.jobs.read().await;

    let mut total_logs_processed = 0u64;
    let mut total_bytes_processed = 0u64;
    let mut available_instances = 0usize;
    let mut collecting_instances = 0usize;

    for instance in registry.iter() {
        if instance.is_available() {
            available_instances += 1;
        }
        if instance.any_log_type_enabled() {
            collecting_instances += 1;
        }
        for log_state in instance.log_types.values() {
            total_logs_processed += log_state.count;
            total_bytes_processed += log_state.size_bytes;
        }
    }

    Ok(Json(DataResponse {
        data: FleetOverview {
            total_instances: registry.len(),
            available_instances,
            collecting_instances,
            total_logs_processed,
            total_bytes_processed,
            total_size_processed: format_bytes(total_bytes_processed),
            active_jobs: jobs.active_count(),
            active_issues: ledger.active_count(),
        },
    }))
}
