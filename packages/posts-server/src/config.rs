//! Server configuration, populated from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

/// Default listen address when `POSTS_BIND` is not set.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// A configuration value that could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("POSTS_BIND must be a valid socket address (e.g. 0.0.0.0:8080), got {0:?}")]
    InvalidBind(String),
}

/// Runtime configuration for the posts server.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `POSTS_BIND` | `0.0.0.0:8080` | TCP socket address to listen on |
/// | `POSTS_DB` | (absent = in-memory) | Path to the SQLite database file |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,

    /// Path to the SQLite database file.
    /// `None` means use an in-memory store (data is lost on restart).
    pub db_path: Option<String>,
}

impl ServerConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = get("POSTS_BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind_addr = bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;

        Ok(Self {
            bind_addr,
            db_path: get("POSTS_DB"),
        })
    }
}
