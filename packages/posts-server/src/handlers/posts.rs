//! Post handlers — list, get, create, update, delete.
//!
//! - `GET    /api/posts` — list, optionally filtered by `title_like`/`body_like`.
//! - `GET    /api/posts/{id}` — fetch one post.
//! - `POST   /api/posts` — create; 201 with a `Location` header.
//! - `PUT    /api/posts/{id}` — overwrite title and body.
//! - `DELETE /api/posts/{id}` — remove.
//!
//! Write bodies are read as raw bytes and run through
//! [`posts_api::validate_post`] so that schema violations surface as 422 with
//! the validator's message rather than a generic extractor rejection.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        FromRequestParts, Path, Query, State,
    },
    http::{header, request::Parts, StatusCode},
    response::IntoResponse,
    Json,
};
use posts_api::{message::messages, validate_post, ListQuery, MessageResponse, Post, PostPayload};
use serde_json::Value;

use crate::{error::AppError, storage::PostFilter};

use super::AppState;

// ---------------------------------------------------------------------------
// PostId extractor
// ---------------------------------------------------------------------------

/// The `{id}` path segment of the by-id routes.
///
/// A segment that is not an integer cannot name a post, so it is rejected
/// with the same 404 a missing post gets.
pub struct PostId(pub i64);

impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let Path(raw) = Path::<String>::from_request_parts(parts, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            raw.parse::<i64>()
                .map(PostId)
                .map_err(|_| AppError::post_not_found(raw))
        }
    }
}

/// Parse and validate a write body.
fn parse_payload(body: Result<Bytes, BytesRejection>) -> Result<PostPayload, AppError> {
    let body = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let value: Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest(messages::INVALID_JSON.into()))?;
    Ok(validate_post(&value)?)
}

// ---------------------------------------------------------------------------
// GET /api/posts
// ---------------------------------------------------------------------------

/// `GET /api/posts` — every post matching the optional substring filters,
/// in ascending id order.
///
/// The query string is read as raw pairs so a repeated filter key keeps its
/// first value instead of failing deserialisation.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Post>>, AppError> {
    let Query(pairs) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let filter = PostFilter::from(&ListQuery::from_pairs(pairs));
    let posts = state.storage.list_posts(&filter).await?;
    Ok(Json(posts))
}

// ---------------------------------------------------------------------------
// GET /api/posts/{id}
// ---------------------------------------------------------------------------

/// `GET /api/posts/{id}` — a single post, or 404.
pub async fn get_by_id(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<Json<Post>, AppError> {
    let post = state
        .storage
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::post_not_found(id))?;
    Ok(Json(post))
}

// ---------------------------------------------------------------------------
// POST /api/posts
// ---------------------------------------------------------------------------

/// `POST /api/posts` — validate, store, and return the new post with 201 and
/// a `Location` header pointing at its get-by-id route.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = parse_payload(body)?;
    let post = state.storage.create_post(&payload).await?;
    tracing::info!(id = post.id, "created post");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, post.location())],
        Json(post),
    ))
}

// ---------------------------------------------------------------------------
// PUT /api/posts/{id}
// ---------------------------------------------------------------------------

/// `PUT /api/posts/{id}` — overwrite title and body of an existing post.
///
/// A missing post is reported before the body is looked at. The payload is
/// held to the same schema as create, and the stored post is returned.
pub async fn update(
    State(state): State<AppState>,
    PostId(id): PostId,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Post>, AppError> {
    if state.storage.get_post(id).await?.is_none() {
        return Err(AppError::post_not_found(id));
    }

    let payload = parse_payload(body)?;
    let post = state.storage.update_post(id, &payload).await?;
    tracing::info!(id, "updated post");
    Ok(Json(post))
}

// ---------------------------------------------------------------------------
// DELETE /api/posts/{id}
// ---------------------------------------------------------------------------

/// `DELETE /api/posts/{id}` — remove a post and confirm with a message.
pub async fn delete(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<Json<MessageResponse>, AppError> {
    state.storage.delete_post(id).await?;
    tracing::info!(id, "deleted post");
    Ok(Json(MessageResponse::post_deleted(id)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
