//! Route definitions for the issue ledger.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::issues;
use crate::state::AppState;

/// Routes mounted at `/issues`.
///
/// ```text
/// GET   /                  -> list_issues
/// POST  /                  -> raise_issue (detection)
/// GET   /summary           -> issue_summary
/// POST  /{id}/resolve      -> resolve_issue
/// POST  /{id}/occurrence   -> record_occurrence (detection)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(issues::list_issues).post(issues::raise_issue))
        .route("/summary", get(issues::issue_summary))
        .route("/{id}/resolve", post(issues::resolve_issue))
        .route("/{id}/occurrence", post(issues::record_occurrence))
}
