//! In-memory storage implementation.
//!
//! All data is held in RAM behind a [`RwLock`] and is lost when the process
//! exits. Use this for tests, the conformance suite, and ephemeral servers.
//!
//! Posts are stored in a [`BTreeMap`] keyed by id, so iteration order is
//! ascending id order with no extra sort.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use posts_api::{Post, PostPayload};

use super::{PostFilter, Storage, StorageError};

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

struct Inner {
    posts: BTreeMap<i64, Post>,
    /// Last id handed out. Never decreases, so deleted ids are not reused.
    last_id: i64,
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// Thread-safe, in-memory implementation of [`Storage`].
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                posts: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|p| p.into_inner())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Storage impl
// ---------------------------------------------------------------------------

#[async_trait]
impl Storage for MemoryStorage {
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, StorageError> {
        let inner = self.read();
        Ok(inner
            .posts
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, StorageError> {
        Ok(self.read().posts.get(&id).cloned())
    }

    async fn create_post(&self, payload: &PostPayload) -> Result<Post, StorageError> {
        let mut inner = self.write();
        inner.last_id += 1;
        let post = Post {
            id: inner.last_id,
            title: payload.title.clone(),
            body: payload.body.clone(),
        };
        inner.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: i64, payload: &PostPayload) -> Result<Post, StorageError> {
        let mut inner = self.write();
        let post = inner.posts.get_mut(&id).ok_or(StorageError::NotFound(id))?;
        post.title = payload.title.clone();
        post.body = payload.body.clone();
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<(), StorageError> {
        self.write()
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound(id))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.write().posts.clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
