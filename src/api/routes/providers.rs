//! Provider API routes
//!
//! Both trailing-slash forms are registered directly rather than redirected.

use crate::api::handlers::providers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn provider_routes() -> Router<AppState> {
    Router::new()
        // Exact routes first (more specific)
        .route("/", get(providers::list_providers))
        .route("/_filters/options", get(providers::filter_options))
        .route("/_filters/options/", get(providers::filter_options))
        // Parameterized routes come after exact routes
        .route("/:id", get(providers::get_provider))
        .route("/:id/", get(providers::get_provider))
}
