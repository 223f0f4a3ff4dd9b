pub mod health;
pub mod instances;
pub mod issues;
pub mod jobs;
pub mod settings;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /instances                                list, register
/// /instances/{id}                           get
/// /instances/{id}/log-types/{key}/toggle    toggle collection
///
/// /issues                                   list, raise
/// /issues/summary                           per-severity counts
/// /issues/{id}/resolve                      resolve
/// /issues/{id}/occurrence                   record recurrence
///
/// /jobs                                     list, start
/// /jobs/{id}/progress                       update progress (PUT)
/// /jobs/{id}/complete                       terminal: completed
/// /jobs/{id}/fail                           terminal: failed
///
/// /config                                   settings snapshot (GET), update (PUT)
/// /overview                                 fleet summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/instances", instances::router())
        .nest("/issues", issues::router())
        .nest("/jobs", jobs::router())
        .merge(settings::router())
        .route("/overview", get(handlers::overview::fleet_overview))
}
