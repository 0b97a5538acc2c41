//! Content-negotiation filters.
//!
//! The service speaks exactly one representation, `application/json`. Two
//! `from_fn` middleware enforce that before any handler runs:
//!
//! - [`require_accept_json`] wraps every route and answers `406 Not
//!   Acceptable` when the `Accept` header does not admit JSON.
//! - [`require_json_body`] wraps the write routes (create, update) and answers
//!   `415 Unsupported Media Type` when the `Content-Type` is not JSON.
//!
//! The router layers them so the Accept check always runs first; a failed
//! check short-circuits the request.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// The only media type this service produces and consumes.
pub const JSON: &str = "application/json";

// ---------------------------------------------------------------------------
// Middleware functions
// ---------------------------------------------------------------------------

/// Axum `from_fn` middleware: reject requests that will not accept JSON.
pub async fn require_accept_json(req: Request, next: Next) -> Response {
    if accepts_json(req.headers()) {
        return next.run(req).await;
    }
    tracing::debug!(
        accept = ?req.headers().get(header::ACCEPT),
        "rejecting {} {}: JSON not acceptable",
        req.method(),
        req.uri().path()
    );
    AppError::NotAcceptable.into_response()
}

/// Axum `from_fn` middleware: reject write requests whose body is not JSON.
pub async fn require_json_body(req: Request, next: Next) -> Response {
    if has_json_body(req.headers()) {
        return next.run(req).await;
    }
    tracing::debug!(
        content_type = ?req.headers().get(header::CONTENT_TYPE),
        "rejecting {} {}: body is not JSON",
        req.method(),
        req.uri().path()
    );
    AppError::UnsupportedMediaType.into_response()
}

// ---------------------------------------------------------------------------
// Header matching
// ---------------------------------------------------------------------------

/// Whether the `Accept` header admits `application/json`.
///
/// Exact type, `application/*` and `*/*` all match. The most specific
/// matching range decides, so `application/json;q=0, */*` refuses JSON while
/// `*/*;q=0, application/json` admits it. A missing or unreadable header does
/// not match.
pub fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(MediaRange::parse)
        .filter_map(|range| range.json_specificity().map(|s| (s, range.quality)))
        .max_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)))
        .is_some_and(|(_, quality)| quality > 0.0)
}

/// Whether `Content-Type` names `application/json`, ignoring parameters.
pub fn has_json_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(JSON))
}

/// One entry of an `Accept` header, e.g. `application/*;q=0.8`.
struct MediaRange<'a> {
    main: &'a str,
    sub: &'a str,
    quality: f32,
}

impl<'a> MediaRange<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let mut parts = raw.split(';');
        let (main, sub) = parts.next()?.trim().split_once('/')?;

        let mut quality = 1.0;
        for param in parts {
            if let Some((name, value)) = param.split_once('=') {
                if name.trim().eq_ignore_ascii_case("q") {
                    quality = value.trim().parse().unwrap_or(1.0);
                }
            }
        }

        Some(Self {
            main: main.trim(),
            sub: sub.trim(),
            quality,
        })
    }

    /// How closely this range names JSON: 2 exact, 1 `application/*`,
    /// 0 `*/*`, `None` when it does not cover JSON at all.
    fn json_specificity(&self) -> Option<u8> {
        let application = self.main.eq_ignore_ascii_case("application");
        match (self.main, self.sub) {
            ("*", "*") => Some(0),
            (_, "*") if application => Some(1),
            (_, sub) if application && sub.eq_ignore_ascii_case("json") => Some(2),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with(name: header::HeaderName, value: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(name, HeaderValue::from_static(value));
        h
    }

    #[test]
    fn exact_json_is_accepted() {
        assert!(accepts_json(&with(header::ACCEPT, "application/json")));
    }

    #[test]
    fn wildcards_are_accepted() {
        assert!(accepts_json(&with(header::ACCEPT, "*/*")));
        assert!(accepts_json(&with(header::ACCEPT, "application/*")));
        assert!(accepts_json(&with(header::ACCEPT, "text/html, */*;q=0.1")));
    }

    #[test]
    fn xml_only_is_refused() {
        assert!(!accepts_json(&with(header::ACCEPT, "application/xml")));
        assert!(!accepts_json(&with(header::ACCEPT, "text/*")));
    }

    #[test]
    fn zero_quality_is_refused() {
        assert!(!accepts_json(&with(header::ACCEPT, "application/json;q=0")));
    }

    #[test]
    fn specific_refusal_beats_wildcard() {
        assert!(!accepts_json(&with(header::ACCEPT, "application/json;q=0, */*")));
        assert!(!accepts_json(&with(header::ACCEPT, "application/*;q=0, */*")));
        assert!(accepts_json(&with(header::ACCEPT, "*/*;q=0, application/json")));
        assert!(accepts_json(&with(header::ACCEPT, "application/*;q=0, application/json;q=0.5")));
    }

    #[test]
    fn missing_accept_is_refused() {
        assert!(!accepts_json(&HeaderMap::new()));
    }

    #[test]
    fn accept_matching_ignores_case_and_params() {
        assert!(accepts_json(&with(
            header::ACCEPT,
            "Application/JSON; charset=utf-8"
        )));
    }

    #[test]
    fn content_type_with_charset_is_json() {
        assert!(has_json_body(&with(
            header::CONTENT_TYPE,
            "application/json; charset=utf-8"
        )));
    }

    #[test]
    fn content_type_xml_or_missing_is_not_json() {
        assert!(!has_json_body(&with(header::CONTENT_TYPE, "application/xml")));
        assert!(!has_json_body(&HeaderMap::new()));
    }
}
