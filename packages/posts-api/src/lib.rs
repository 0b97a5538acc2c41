//! Request and response types for the posts HTTP API.
//!
//! This crate encodes the wire contract of the service as Rust types and
//! holds the payload validator that every write goes through before a
//! [`PostPayload`] is built.
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | GET | `/api/posts` | [`ListQuery`] → `Vec<`[`Post`]`>` |
//! | GET | `/api/posts/{id}` | → [`Post`] |
//! | POST | `/api/posts` | [`PostPayload`] → [`Post`] (201 + `Location`) |
//! | PUT | `/api/posts/{id}` | [`PostPayload`] → [`Post`] |
//! | DELETE | `/api/posts/{id}` | → [`MessageResponse`] |
//!
//! Every error response is a [`MessageResponse`].

pub mod message;
pub mod post;
pub mod schema;

pub use message::MessageResponse;
pub use post::{ListQuery, Post, PostPayload};
pub use schema::{validate_post, SchemaError};
