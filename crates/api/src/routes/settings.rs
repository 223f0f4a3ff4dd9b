//! Route definitions for the pipeline settings bag.

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// GET  /config   -> get_settings
/// PUT  /config   -> update_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/config",
        get(settings::get_settings).put(settings::update_settings),
    )
}
