//! Handlers for the job progress tracker.
//!
//! Listing is the dashboard view; creation, progress, and the terminal
//! transitions are called by the external processor service.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use fleetlog_core::jobs::JobOutcome;
use fleetlog_core::types::LogType;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /jobs
// ---------------------------------------------------------------------------

/// List all jobs in creation order.
pub async fn list_jobs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let jobs = state.jobs.read().await;
    Ok(Json(DataResponse {
        data: jobs.list().to_vec(),
    }))
}

// ---------------------------------------------------------------------------
// POST /jobs  (processor entrypoint)
// ---------------------------------------------------------------------------

/// Payload for recording a started processing job.
#[derive(Debug, Deserialize, Validate)]
pub struct StartJobRequest {
    #[validate(length(min = 1, max = 128))]
    pub instance_id: String,
    pub log_type: String,
    pub total_files: u64,
}

/// Record a job the processor has started.
pub async fn start_job(
    State(state): State<AppState>,
    Json(input): Json<StartJobRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let log_type: LogType = input.log_type.parse()?;

    let mut jobs = state.jobs.write().await;
    let job = jobs.start(input.instance_id, log_type, input.total_files);

    tracing::info!(
        job_id = %job.id,
        instance_id = %job.instance_id,
        log_type = %job.log_type,
        total_files = job.total_files,
        "Processing job started",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: job.clone() })))
}

// ---------------------------------------------------------------------------
// PUT /jobs/{id}/progress
// ---------------------------------------------------------------------------

/// Payload for a progress report.
#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub files_processed: u64,
}

/// Update the processed-file counter; `progress` is recomputed server-side.
pub async fn update_progress(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProgressRequest>,
) -> AppResult<impl IntoResponse> {
    let mut jobs = state.jobs.write().await;
    let job = jobs.update_progress(&id, input.files_processed)?;
    Ok(Json(DataResponse { data: job.clone() }))
}

// ---------------------------------------------------------------------------
// POST /jobs/{id}/complete, POST /jobs/{id}/fail
// ---------------------------------------------------------------------------

/// Mark a job completed.
pub async fn complete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    finish(state, id, JobOutcome::Completed).await
}

/// Mark a job failed.
pub async fn fail_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    finish(state, id, JobOutcome::Failed).await
}

async fn finish(state: AppState, id: String, outcome: JobOutcome) -> AppResult<impl IntoResponse> {
    let mut jobs = state.jobs.write().await;
    let job = jobs.finish(&id, outcome)?;

    tracing::info!(job_id = %id, status = ?job.status, "Processing job finished");

    Ok(Json(DataResponse { data: job.clone() }))
}
