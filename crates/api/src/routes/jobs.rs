//! Route definitions for the job progress tracker.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET   /                -> list_jobs
/// POST  /                -> start_job (processor)
/// PUT   /{id}/progress   -> update_progress (processor)
/// POST  /{id}/complete   -> complete_job (processor)
/// POST  /{id}/fail       -> fail_job (processor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list_jobs).post(jobs::start_job))
        .route("/{id}/progress", put(jobs::update_progress))
        .route("/{id}/complete", post(jobs::complete_job))
        .route("/{id}/fail", post(jobs::fail_job))
}
