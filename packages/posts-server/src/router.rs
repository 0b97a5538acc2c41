//! Assembles the Axum [`Router`] from the handlers and negotiation filters.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    error::AppError,
    handlers::{posts, AppState},
    middleware::negotiate::{require_accept_json, require_json_body},
    storage::Storage,
};

/// Build the complete application router with shared state.
///
/// Filter order per request: trace span → Accept check (every route) →
/// Content-Type check (create and update only) → handler.
///
/// Write bodies are not size-capped, and a known path hit with an unsupported
/// method gets a JSON 405 rather than an empty one.
pub fn build_router(storage: Arc<dyn Storage>) -> Router {
    let state = AppState { storage };

    Router::new()
        .route(
            "/api/posts",
            get(posts::list).merge(post(posts::create).route_layer(from_fn(require_json_body))),
        )
        .route(
            "/api/posts/{id}",
            get(posts::get_by_id)
                .delete(posts::delete)
                .merge(put(posts::update).route_layer(from_fn(require_json_body))),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(unknown_route)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(from_fn(require_accept_json))
        .layer(TraceLayer::new_for_http())
}

/// JSON 404 for paths outside the API.
async fn unknown_route() -> AppError {
    AppError::NotFound("Not found".into())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
