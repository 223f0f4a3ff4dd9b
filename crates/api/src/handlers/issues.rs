//! Handlers for the issue ledger.
//!
//! Provides:
//! - Listing with severity filter and the summary-tile counts.
//! - The operator resolve action.
//! - Raise and recurrence endpoints for external detection logic.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use fleetlog_core::ledger::{Issue, SeverityFilter};
use fleetlog_core::types::{IssueKind, IssueStatus, Severity};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Issue presentation: the raw kind identifier plus its display label.
#[derive(Debug, Serialize)]
pub struct IssueView {
    pub id: String,
    pub severity: Severity,
    pub kind: IssueKind,
    pub kind_label: String,
    pub instance_id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub count: u64,
    pub status: IssueStatus,
}

impl From<&Issue> for IssueView {
    fn from(issue: &Issue) -> Self {
        IssueView {
            id: issue.id.clone(),
            severity: issue.severity,
            kind: issue.kind.clone(),
            kind_label: issue.kind.label().to_string(),
            instance_id: issue.instance_id.clone(),
            message: issue.message.clone(),
            timestamp: issue.timestamp,
            count: issue.count,
            status: issue.status,
        }
    }
}

/// Per-severity counts for the summary tiles, including resolved issues.
#[derive(Debug, Serialize)]
pub struct IssueSummary {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// GET /issues
// ---------------------------------------------------------------------------

/// Query parameters for issue listing (`?severity=`).
#[derive(Debug, Deserialize)]
pub struct ListIssuesParams {
    pub severity: Option<String>,
}

/// List issues, optionally restricted to one severity. Resolved issues are
/// included in every view.
pub async fn list_issues(
    State(state): State<AppState>,
    Query(params): Query<ListIssuesParams>,
) -> AppResult<impl IntoResponse> {
    let filter: SeverityFilter = params.severity.as_deref().unwrap_or("all").parse()?;

    let ledger = state.ledger.read().await;
    let views: Vec<IssueView> = ledger
        .list(filter)
        .into_iter()
        .map(IssueView::from)
        .collect();

    Ok(Json(DataResponse { data: views }))
}

// ---------------------------------------------------------------------------
// GET /issues/summary
// ---------------------------------------------------------------------------

/// Per-severity issue counts for the summary tiles.
pub async fn issue_summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ledger = state.ledger.read().await;
    let counts = ledger.count_by_severity();

    Ok(Json(DataResponse {
        data: IssueSummary {
            critical: counts.critical,
            warning: counts.warning,
            info: counts.info,
            total: counts.total(),
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /issues  (detection entrypoint)
// ---------------------------------------------------------------------------

/// Payload for raising a new issue.
///
/// `severity` arrives as a string so an out-of-taxonomy value maps to the
/// domain's invalid-argument error rather than a generic decode failure.
#[derive(Debug, Deserialize, Validate)]
pub struct RaiseIssueRequest {
    pub severity: String,
    pub kind: String,
    #[validate(length(min = 1, max = 128))]
    pub instance_id: String,
    #[validate(length(min = 1, max = 1024))]
    pub message: String,
}

/// Raise a new active issue with `count = 1`.
pub async fn raise_issue(
    State(state): State<AppState>,
    Json(input): Json<RaiseIssueRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let severity: Severity = input.severity.parse()?;
    let kind = IssueKind::from(input.kind);

    let mut ledger = state.ledger.write().await;
    let issue = ledger.raise(severity, kind, input.instance_id, input.message);

    tracing::info!(
        issue_id = %issue.id,
        severity = %issue.severity,
        kind = %issue.kind,
        instance_id = %issue.instance_id,
        "Issue raised",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IssueView::from(issue),
        }),
    ))
}

// ---------------------------------------------------------------------------
// POST /issues/{id}/resolve
// ---------------------------------------------------------------------------

/// Resolve an issue. Idempotent: resolving twice is not an error.
pub async fn resolve_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mut ledger = state.ledger.write().await;
    let issue = ledger.resolve(&id)?;

    tracing::info!(issue_id = %id, "Issue resolved");

    Ok(Json(DataResponse {
        data: IssueView::from(issue),
    }))
}

// ---------------------------------------------------------------------------
// POST /issues/{id}/occurrence
// ---------------------------------------------------------------------------

/// Record a repeat occurrence of an active issue (bumps `count`).
pub async fn record_occurrence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mut ledger = state.ledger.write().await;
    let issue = ledger.record_recurrence(&id)?;

    Ok(Json(DataResponse {
        data: IssueView::from(issue),
    }))
}
