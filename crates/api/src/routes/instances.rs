//! Route definitions for the instance registry.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::instances;
use crate::state::AppState;

/// Routes mounted at `/instances`.
///
/// ```text
/// GET   /                                 -> list_instances
/// POST  /                                 -> register_instance (discovery)
/// GET   /{id}                             -> get_instance
/// POST  /{id}/log-types/{key}/toggle      -> toggle_log_type
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(instances::list_instances).post(instances::register_instance),
        )
        .route("/{id}", get(instances::get_instance))
        .route(
            "/{id}/log-types/{key}/toggle",
            post(instances::toggle_log_type),
        )
}
