//! HTTP request handlers for the posts API.
//!
//! Handlers are pure async functions that receive Axum extractors and return
//! `Result<impl IntoResponse, AppError>`. Content negotiation has already
//! happened in [`crate::middleware::negotiate`] by the time they run.

pub mod posts;

use std::sync::Arc;

use crate::storage::Storage;

/// Shared application state threaded through all Axum handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}
