//! Storage abstraction layer for the posts server.
//!
//! The [`Storage`] trait defines the contract between the HTTP handler layer
//! and persistence. Validation and content negotiation live in the handlers
//! and middleware; storage is purely a data access layer.
//!
//! # Implementations
//!
//! | Type | When to use |
//! |------|-------------|
//! | [`MemoryStorage`] | Tests, conformance suite, ephemeral servers |
//! | [`SqliteStorage`] | Production; durable single-file database |
//!
//! [`MemoryStorage`]: memory::MemoryStorage
//! [`SqliteStorage`]: sqlite::SqliteStorage

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use posts_api::{Post, PostPayload};

// ---------------------------------------------------------------------------
// StorageError
// ---------------------------------------------------------------------------

/// Errors that storage operations can return.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No post with this id exists.
    #[error("post {0} not found")]
    NotFound(i64),

    /// An unexpected error in the underlying storage backend.
    #[error("internal storage error: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// PostFilter
// ---------------------------------------------------------------------------

/// Query parameters for [`Storage::list_posts`].
///
/// Both fields are case-sensitive substring matches; when both are set a post
/// must match both. `None` disables that filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub title_like: Option<String>,
    pub body_like: Option<String>,
}

impl PostFilter {
    /// Whether `post` passes every active filter.
    pub fn matches(&self, post: &Post) -> bool {
        let title_ok = self
            .title_like
            .as_deref()
            .map_or(true, |needle| post.title.contains(needle));
        let body_ok = self
            .body_like
            .as_deref()
            .map_or(true, |needle| post.body.contains(needle));
        title_ok && body_ok
    }
}

impl From<&posts_api::ListQuery> for PostFilter {
    fn from(q: &posts_api::ListQuery) -> Self {
        Self {
            title_like: q.title().map(str::to_owned),
            body_like: q.body().map(str::to_owned),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage trait
// ---------------------------------------------------------------------------

/// The persistence contract for the posts server.
///
/// All methods are `async` and return `Result<_, StorageError>`. Implementations
/// must be `Send + Sync + 'static` so they can be held in an `Arc<dyn Storage>`.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    /// Return every post matching `filter`, ordered by `id` ascending.
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, StorageError>;

    /// Retrieve a post by id. Returns `None` if not found.
    async fn get_post(&self, id: i64) -> Result<Option<Post>, StorageError>;

    /// Persist a new post under the next free id and return it.
    ///
    /// Ids increase monotonically and are never handed out twice, even after
    /// the post holding the highest id is deleted.
    async fn create_post(&self, payload: &PostPayload) -> Result<Post, StorageError>;

    /// Overwrite `title` and `body` of an existing post and return the stored
    /// result. Returns [`StorageError::NotFound`] if no post has `id`.
    async fn update_post(&self, id: i64, payload: &PostPayload) -> Result<Post, StorageError>;

    /// Remove a post. Returns [`StorageError::NotFound`] if no post has `id`.
    async fn delete_post(&self, id: i64) -> Result<(), StorageError>;

    /// Remove every post. Used to reset state between test cases.
    async fn clear(&self) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, body: &str) -> Post {
        Post {
            id: 1,
            title: title.into(),
            body: body.into(),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(PostFilter::default().matches(&post("a", "b")));
    }

    #[test]
    fn filters_are_case_sensitive_substrings() {
        let f = PostFilter {
            title_like: Some("whistles".into()),
            body_like: None,
        };
        assert!(f.matches(&post("Post with bells and whistles", "x")));
        assert!(!f.matches(&post("Post with WHISTLES", "x")));
    }

    #[test]
    fn both_filters_must_match() {
        let f = PostFilter {
            title_like: Some("whistles".into()),
            body_like: Some("Another".into()),
        };
        assert!(f.matches(&post("Post with bells and whistles", "Another test")));
        assert!(!f.matches(&post("Post with whistles", "Still a test")));
    }

    #[test]
    fn list_query_drops_empty_values() {
        let q = posts_api::ListQuery {
            title_like: Some(String::new()),
            body_like: Some("test".into()),
        };
        let f = PostFilter::from(&q);
        assert_eq!(f.title_like, None);
        assert_eq!(f.body_like.as_deref(), Some("test"));
    }
}
