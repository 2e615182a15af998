//! Attribute grammar for self-closing component lines.
//!
//! Embedded components live on a line of their own and have the exact shape
//!
//! ```text
//! <ComponentName key="double" key='single' key={json-literal} />
//! ```
//!
//! The scanner is a single repeated-match pattern over the text between the
//! component name and the closing `/>`. Quoted values understand `\"`, `\'`
//! and `\\` escapes. Brace values are handed to a JSON parser; a value that is
//! not valid JSON (or is an array/object) drops only that key.
//!
//! Attribute order never matters and the last occurrence of a key wins.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// One attribute pattern: key, `=`, then exactly one of the three value forms.
///
/// Capture groups: 1 key, 2 double-quoted body, 3 single-quoted body,
/// 4 brace body (JSON strings inside may contain braces).
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"([A-Za-z_][\w.:-]*)\s*=\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)'|\{((?:[^{}"]|"(?:[^"\\]|\\.)*")*)\})"#,
    )
    .expect("valid regex for component attributes")
});

/// A scalar attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Converts a decoded JSON value. Arrays and objects are not attribute values.
    fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(text) => Some(AttributeValue::String(text)),
            serde_json::Value::Number(number) => number.as_f64().map(AttributeValue::Number),
            serde_json::Value::Bool(flag) => Some(AttributeValue::Boolean(flag)),
            serde_json::Value::Null => Some(AttributeValue::Null),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

/// Attribute map produced by [`parse_tag`].
pub type Attributes = HashMap<String, AttributeValue>;

/// Parse a `<component_name ... />` line into its attribute map.
///
/// Returns `None` when the line does not have the exact tag shape, so the
/// caller can fall through to its other line rules.
pub fn parse_tag(line: &str, component_name: &str) -> Option<Attributes> {
    let line = line.trim();
    let rest = line.strip_prefix('<')?.strip_prefix(component_name)?;
    let body = rest.strip_suffix("/>")?;

    // `<ImageFigureX />` is a different component.
    if !(body.is_empty() || body.starts_with(char::is_whitespace)) {
        return None;
    }

    let mut attributes = Attributes::new();
    for captures in ATTRIBUTE.captures_iter(body) {
        let key = &captures[1];
        let value = if let Some(quoted) = captures.get(2).or_else(|| captures.get(3)) {
            Some(AttributeValue::String(unescape(quoted.as_str())))
        } else if let Some(literal) = captures.get(4) {
            parse_json_literal(key, literal.as_str())
        } else {
            None
        };

        if let Some(value) = value {
            attributes.insert(key.to_string(), value);
        }
    }

    Some(attributes)
}

fn parse_json_literal(key: &str, literal: &str) -> Option<AttributeValue> {
    match serde_json::from_str::<serde_json::Value>(literal) {
        Ok(value) => {
            let converted = AttributeValue::from_json(value);
            if converted.is_none() {
                tracing::debug!(key, "dropping non-scalar attribute value");
            }
            converted
        }
        Err(err) => {
            tracing::debug!(key, error = %err, "dropping attribute with invalid JSON literal");
            None
        }
    }
}

/// Resolve `\"`, `\'` and `\\`; any other escape is kept verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\'' | '\\')) => out.push(next),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Render a string as a brace-wrapped JSON literal (`{"..."}`).
///
/// This is the inverse of the brace branch of [`parse_tag`]; serde_json's
/// escaping keeps the value on a single line.
pub fn json_string_literal(value: &str) -> String {
    let encoded = serde_json::Value::String(value.to_string()).to_string();
    format!("{{{encoded}}}")
}

/// Render a number as a brace-wrapped JSON literal (`{640}`).
pub fn json_number_literal(value: f64) -> String {
    match serde_json::Number::from_f64(value) {
        Some(number) => format!("{{{number}}}"),
        None => "{null}".to_string(),
    }
}
