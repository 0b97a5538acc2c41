//! SQLite-backed storage implementation.
//!
//! Uses `rusqlite` (with bundled SQLite) wrapped in an `Arc<Mutex<Connection>>`
//! to satisfy the `Send + Sync` requirements. All blocking calls are offloaded
//! to a thread-pool via `tokio::task::spawn_blocking`.
//!
//! # Schema
//!
//! - `posts` — one row per post. `AUTOINCREMENT` keeps ids monotonic even
//!   after the highest row is deleted.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use posts_api::{Post, PostPayload};
use rusqlite::{params, Connection};

use super::{PostFilter, Storage, StorageError};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS posts (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    body  TEXT NOT NULL
);
";

// ---------------------------------------------------------------------------
// SqliteStorage
// ---------------------------------------------------------------------------

/// SQLite-backed implementation of [`Storage`].
///
/// Holds a single database connection protected by a `Mutex`. All operations
/// run inside `spawn_blocking` to avoid blocking the async runtime.
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Open (or create) the SQLite database at `path` and apply the schema.
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database (data is lost when dropped).
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking thread-pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StorageError::Internal("connection mutex poisoned".into()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// Error conversions
// ---------------------------------------------------------------------------

fn map_err(e: rusqlite::Error) -> StorageError {
    StorageError::Internal(e.to_string())
}

fn row_to_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
    })
}

// ---------------------------------------------------------------------------
// Storage impl
// ---------------------------------------------------------------------------

#[async_trait]
impl Storage for SqliteStorage {
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, StorageError> {
        let filter = filter.clone();

        self.with_conn(move |conn| {
            let mut sql = String::from("SELECT id, title, body FROM posts WHERE 1=1");
            let mut params_vec: Vec<String> = Vec::new();

            // instr() is case-sensitive, unlike LIKE.
            if let Some(title) = filter.title_like {
                sql.push_str(" AND instr(title, ?) > 0");
                params_vec.push(title);
            }
            if let Some(body) = filter.body_like {
                sql.push_str(" AND instr(body, ?) > 0");
                params_vec.push(body);
            }
            sql.push_str(" ORDER BY id ASC");

            let mut stmt = conn.prepare(&sql).map_err(map_err)?;
            let posts = stmt
                .query_map(rusqlite::params_from_iter(params_vec.iter()), row_to_post)
                .map_err(map_err)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_err)?;
            Ok(posts)
        })
        .await
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, StorageError> {
        self.with_conn(move |conn| {
            let result = conn.query_row(
                "SELECT id, title, body FROM posts WHERE id = ?1",
                params![id],
                row_to_post,
            );
            match result {
                Ok(post) => Ok(Some(post)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(map_err(e)),
            }
        })
        .await
    }

    async fn create_post(&self, payload: &PostPayload) -> Result<Post, StorageError> {
        let payload = payload.clone();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO posts (title, body) VALUES (?1, ?2)",
                params![payload.title, payload.body],
            )
            .map_err(map_err)?;
            Ok(Post {
                id: conn.last_insert_rowid(),
                title: payload.title,
                body: payload.body,
            })
        })
        .await
    }

    async fn update_post(&self, id: i64, payload: &PostPayload) -> Result<Post, StorageError> {
        let payload = payload.clone();

        self.with_conn(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE posts SET title = ?1, body = ?2 WHERE id = ?3",
                    params![payload.title, payload.body, id],
                )
                .map_err(map_err)?;
            if changed == 0 {
                return Err(StorageError::NotFound(id));
            }
            Ok(Post {
                id,
                title: payload.title,
                body: payload.body,
            })
        })
        .await
    }

    async fn delete_post(&self, id: i64) -> Result<(), StorageError> {
        self.with_conn(move |conn| {
            let changed = conn
                .execute("DELETE FROM posts WHERE id = ?1", params![id])
                .map_err(map_err)?;
            if changed == 0 {
                return Err(StorageError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM posts", []).map_err(map_err)?;
            Ok(())
        })
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
