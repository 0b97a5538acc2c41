//! The `{"message": ...}` body shared by errors and confirmations.

use serde::{Deserialize, Serialize};

/// The JSON body returned for all error responses and for delete confirmations.
///
/// ```json
/// { "message": "Could not find post with id 7" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    /// Human-readable description of the outcome.
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `404` body for a post id that does not resolve.
    pub fn post_not_found(id: impl std::fmt::Display) -> Self {
        Self::new(format!("Could not find post with id {id}"))
    }

    /// `200` body confirming a delete.
    pub fn post_deleted(id: i64) -> Self {
        Self::new(format!("Deleted post with id {id} from database"))
    }
}

/// Fixed messages used by the content-negotiation filters.
pub mod messages {
    pub const NOT_ACCEPTABLE: &str = "Request must accept application/json data";
    pub const UNSUPPORTED_MEDIA_TYPE: &str = "Request must contain application/json data";
    pub const INVALID_JSON: &str = "Request body is not valid JSON";
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
}
