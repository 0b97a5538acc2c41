//! Application-level error type returned by handlers and middleware.
//!
//! All variants serialise to a [`MessageResponse`] body and map to the
//! appropriate HTTP status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use posts_api::{message::messages, MessageResponse, SchemaError};

use crate::storage::StorageError;

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    MethodNotAllowed,
    NotAcceptable,
    UnsupportedMediaType,
    UnprocessableEntity(String),
    Internal(String),
}

impl AppError {
    /// The 404 returned by every by-id route when the post does not exist.
    pub fn post_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound(MessageResponse::post_not_found(id).message)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::UnprocessableEntity(msg) => msg,
            AppError::MethodNotAllowed => messages::METHOD_NOT_ALLOWED.into(),
            AppError::NotAcceptable => messages::NOT_ACCEPTABLE.into(),
            AppError::UnsupportedMediaType => messages::UNSUPPORTED_MEDIA_TYPE.into(),
            AppError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                msg
            }
        };
        (status, Json(MessageResponse::new(message))).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(id) => AppError::post_not_found(id),
            StorageError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<SchemaError> for AppError {
    fn from(e: SchemaError) -> Self {
        AppError::UnprocessableEntity(e.to_string())
    }
}
