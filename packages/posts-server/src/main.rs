//! `posts-server` — JSON CRUD service for blog posts.
//!
//! # Quick start
//!
//! ```sh
//! # In-memory store on the default port:
//! posts-server
//!
//! # Persistent SQLite store:
//! POSTS_DB=./posts.db posts-server
//!
//! # Custom bind address:
//! POSTS_BIND=127.0.0.1:5000 posts-server
//! ```
//!
//! # Environment variables
//!
//! See [`posts_server::ServerConfig::from_env`] for the full list.

use std::process::ExitCode;
use std::sync::Arc;

use posts_server::{build_router, MemoryStorage, ServerConfig, SqliteStorage, Storage};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "posts_server=info,tower_http=debug".into()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let storage: Arc<dyn Storage> = match &config.db_path {
        Some(path) => match SqliteStorage::open(path) {
            Ok(s) => {
                tracing::info!("storage: SQLite at {path}");
                Arc::new(s)
            }
            Err(e) => {
                tracing::error!("failed to open SQLite database at {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            tracing::info!("storage: in-memory (data will not survive restart)");
            Arc::new(MemoryStorage::new())
        }
    };

    let app = build_router(storage);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("failed to bind {}: {e}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("listening on {}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
