// src/routes.rs

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::quiz,
    state::AppState,
    utils::session::session_middleware,
};

/// Assembles the main application router.
///
/// * Quiz pages (`/`, `/submit`) behind the session cookie middleware.
/// * Static assets from the configured directory for every other path.
/// * Global request tracing.
pub fn create_router(state: AppState) -> Router {
    let static_files =
        ServeDir::new(&state.config.static_dir).not_found_service(quiz::not_found.into_service());

    let quiz_routes = Router::new()
        .route("/", get(quiz::index))
        .route("/submit", post(quiz::submit))
        .layer(middleware::from_fn(session_middleware));

    Router::new()
        .merge(quiz_routes)
        .fallback_service(static_files)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
