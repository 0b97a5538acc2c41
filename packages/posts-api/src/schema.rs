//! Payload validation for post writes.
//!
//! The post schema is fixed: the payload must be an object whose `title` and
//! `body` properties are both present and both strings. Extra properties are
//! ignored. The first violation found is reported, in this order:
//!
//! 1. the payload is not an object;
//! 2. a required property is missing (`title` before `body`);
//! 3. a property has the wrong type (`title` before `body`).
//!
//! Error messages follow the JSON Schema validator wording clients already
//! match on, e.g. `'body' is a required property` and
//! `32 is not of type 'string'`.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::post::PostPayload;

/// Properties every post payload must carry, in reporting order.
pub const REQUIRED_PROPERTIES: [&str; 2] = ["title", "body"];

/// Why a payload was rejected. `Display` is the message sent to clients.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("{} is not of type 'object'", repr(.0))]
    NotAnObject(Value),

    #[error("'{0}' is a required property")]
    MissingProperty(&'static str),

    #[error("{} is not of type 'string'", repr(.value))]
    NotAString { property: &'static str, value: Value },
}

/// Validate `payload` against the post schema and extract a [`PostPayload`].
pub fn validate_post(payload: &Value) -> Result<PostPayload, SchemaError> {
    let object = payload
        .as_object()
        .ok_or_else(|| SchemaError::NotAnObject(payload.clone()))?;

    for name in REQUIRED_PROPERTIES {
        if !object.contains_key(name) {
            return Err(SchemaError::MissingProperty(name));
        }
    }

    let title = string_property(object, "title")?;
    let body = string_property(object, "body")?;
    Ok(PostPayload::new(title, body))
}

fn string_property(object: &Map<String, Value>, name: &'static str) -> Result<String, SchemaError> {
    match object.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SchemaError::NotAString {
            property: name,
            value: other.clone(),
        }),
        None => Err(SchemaError::MissingProperty(name)),
    }
}

// --- instance rendering ------------------------------------------------------

/// Render a JSON value the way validator messages quote instances:
/// `'text'`, `32`, `1.5`, `None`, `True`, `[1, 2]`, `{'k': 'v'}`.
fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".into(),
        Value::Bool(true) => "True".into(),
        Value::Bool(false) => "False".into(),
        Value::Number(n) => repr_number(n),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(repr).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), repr(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

/// Integer literals of any width are echoed as written; everything else is
/// a float and goes through [`repr_float`].
fn repr_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    let literal = n.to_string();
    let is_integer = literal
        .strip_prefix('-')
        .unwrap_or(&literal)
        .bytes()
        .all(|b| b.is_ascii_digit());
    if is_integer {
        return literal;
    }
    match n.as_f64() {
        Some(f) => repr_float(f),
        None => literal,
    }
}

/// Shortest round-trip digits, positional for exponents in `-4..16` and
/// scientific otherwise with a signed two-digit exponent:
/// `1.5`, `123.0`, `0.0001`, `1e+16`, `1e-07`.
fn repr_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".into();
    }
    if f.is_infinite() {
        return if f < 0.0 { "-inf" } else { "inf" }.into();
    }
    let sign = if f.is_sign_negative() { "-" } else { "" };
    if f == 0.0 {
        return format!("{sign}0.0");
    }

    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let body = if (-4..16).contains(&exp) {
        if exp >= 0 {
            let point = exp as usize + 1;
            if digits.len() <= point {
                format!("{digits}{}.0", "0".repeat(point - digits.len()))
            } else {
                format!("{}.{}", &digits[..point], &digits[point..])
            }
        } else {
            format!("0.{}{digits}", "0".repeat((-exp - 1) as usize))
        }
    } else {
        let (head, tail) = digits.split_at(1);
        let dot = if tail.is_empty() { "" } else { "." };
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{head}{dot}{tail}e{exp_sign}{:02}", exp.abs())
    };
    format!("{sign}{body}")
}

/// Single-quote `s`, switching to double quotes when that avoids escaping.
fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_payload_extracts_fields() {
        let p = validate_post(&json!({ "title": "Example Post", "body": "Just a test" })).unwrap();
        assert_eq!(p, PostPayload::new("Example Post", "Just a test"));
    }

    #[test]
    fn extra_properties_are_ignored() {
        let p = validate_post(&json!({ "title": "a", "body": "b", "tags": ["x"] })).unwrap();
        assert_eq!(p.title, "a");
    }

    #[test]
    fn empty_strings_are_accepted() {
        assert!(validate_post(&json!({ "title": "", "body": "" })).is_ok());
    }

    #[test]
    fn missing_body_names_the_property() {
        let err = validate_post(&json!({ "title": "Example Post" })).unwrap_err();
        assert_eq!(err.to_string(), "'body' is a required property");
    }

    #[test]
    fn missing_title_is_reported_before_body() {
        let err = validate_post(&json!({})).unwrap_err();
        assert_eq!(err, SchemaError::MissingProperty("title"));
    }

    #[test]
    fn integer_body_names_value_and_type() {
        let err = validate_post(&json!({ "title": "Example Post", "body": 32 })).unwrap_err();
        assert_eq!(err.to_string(), "32 is not of type 'string'");
    }

    #[test]
    fn missing_property_wins_over_wrong_type() {
        let err = validate_post(&json!({ "title": 5 })).unwrap_err();
        assert_eq!(err.to_string(), "'body' is a required property");
    }

    #[test]
    fn null_and_bool_render_like_python() {
        let err = validate_post(&json!({ "title": null, "body": "b" })).unwrap_err();
        assert_eq!(err.to_string(), "None is not of type 'string'");

        let err = validate_post(&json!({ "title": "t", "body": true })).unwrap_err();
        assert_eq!(err.to_string(), "True is not of type 'string'");
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = validate_post(&json!("<xml></xml>")).unwrap_err();
        assert_eq!(err.to_string(), "'<xml></xml>' is not of type 'object'");

        let err = validate_post(&json!([1, 2.5])).unwrap_err();
        assert_eq!(err.to_string(), "[1, 2.5] is not of type 'object'");
    }

    #[test]
    fn floats_render_like_python() {
        let cases = [
            (json!(1.5), "1.5"),
            (json!(123.0), "123.0"),
            (json!(0.0001), "0.0001"),
            (json!(0.00001), "1e-05"),
            (json!(1e-7), "1e-07"),
            (json!(1e16), "1e+16"),
            (json!(1e20), "1e+20"),
            (json!(-2.5e-10), "-2.5e-10"),
            (json!(1e15), "1000000000000000.0"),
        ];
        for (value, expected) in cases {
            let err = validate_post(&json!({ "title": value, "body": "b" })).unwrap_err();
            assert_eq!(err.to_string(), format!("{expected} is not of type 'string'"));
        }
    }

    #[test]
    fn wide_integers_keep_their_digits() {
        let payload: Value =
            serde_json::from_str(r#"{"title": "t", "body": 100000000000000000000}"#).unwrap();
        let err = validate_post(&payload).unwrap_err();
        assert_eq!(err.to_string(), "100000000000000000000 is not of type 'string'");

        let payload: Value =
            serde_json::from_str(r#"{"title": "t", "body": 18446744073709551615}"#).unwrap();
        let err = validate_post(&payload).unwrap_err();
        assert_eq!(err.to_string(), "18446744073709551615 is not of type 'string'");
    }

    #[test]
    fn float_literals_in_payload_render_like_python() {
        let payload: Value = serde_json::from_str(r#"{"title": 1E20, "body": "b"}"#).unwrap();
        let err = validate_post(&payload).unwrap_err();
        assert_eq!(err.to_string(), "1e+20 is not of type 'string'");
    }

    #[test]
    fn nested_values_render_with_quotes() {
        let err = validate_post(&json!({ "title": "t", "body": { "k": "it's" } })).unwrap_err();
        assert_eq!(err.to_string(), "{'k': \"it's\"} is not of type 'string'");
    }
}
