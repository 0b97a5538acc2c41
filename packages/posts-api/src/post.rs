//! The post resource and its write payload.

use serde::{Deserialize, Serialize};

/// A stored post.
///
/// `id` is assigned by the server on create, increases monotonically and is
/// never reused after a delete.
///
/// # Example
///
/// ```json
/// { "id": 1, "title": "Example Post", "body": "Just a test" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Path of the get-by-id endpoint for this post, used as the `Location`
    /// header of a `201 Created`.
    pub fn location(&self) -> String {
        format!("/api/posts/{}", self.id)
    }
}

/// The validated body of `POST /api/posts` and `PUT /api/posts/{id}`.
///
/// Build it with [`crate::validate_post`] rather than deserialising directly,
/// so rejected payloads carry the validator's message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostPayload {
    pub title: String,
    pub body: String,
}

impl PostPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Query parameters for `GET /api/posts`.
///
/// Both filters are case-sensitive substring matches and are ANDed together.
/// An empty value is treated the same as an absent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    pub title_like: Option<String>,
    pub body_like: Option<String>,
}

impl ListQuery {
    /// Build from decoded query-string pairs. A repeated key keeps its first
    /// value; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "title_like" => &mut query.title_like,
                "body_like" => &mut query.body_like,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// `title_like`, ignoring the empty string.
    pub fn title(&self) -> Option<&str> {
        self.title_like.as_deref().filter(|s| !s.is_empty())
    }

    /// `body_like`, ignoring the empty string.
    pub fn body(&self) -> Option<&str> {
        self.body_like.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_points_at_get_by_id() {
        let post = Post {
            id: 42,
            title: "t".into(),
            body: "b".into(),
        };
        assert_eq!(post.location(), "/api/posts/42");
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let q = ListQuery::from_pairs([
            ("title_like", "a"),
            ("page", "2"),
            ("title_like", "b"),
            ("body_like", "test"),
        ]);
        assert_eq!(q.title(), Some("a"));
        assert_eq!(q.body(), Some("test"));
    }

    #[test]
    fn empty_filters_are_ignored() {
        let q = ListQuery {
            title_like: Some(String::new()),
            body_like: Some("test".into()),
        };
        assert_eq!(q.title(), None);
        assert_eq!(q.body(), Some("test"));
    }
}
