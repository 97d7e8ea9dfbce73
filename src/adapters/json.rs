// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON document parser.
//!
//! This module provides a parser that flattens JSON objects into dotted paths. Comments
//! and trailing commas are tolerated when enabled.

use crate::domain::config_key::join_path;
use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigParser, Entries};
use serde_json::Value;

/// JSON parser implementation.
///
/// Objects recurse with `.field` and arrays with `[i]`. Scalar array elements are also
/// appended to the array's own path, one value per element, so the unindexed path reads
/// back as the ordered list of elements. Strings are emitted without quotes and `null`
/// as an empty value. The document root must be an object.
///
/// [`ConfigParser::parse`] accepts `//` and `/* */` comments and trailing commas; use
/// [`JsonParser::parse_with`] to require strict JSON instead.
///
/// # Examples
///
/// ```rust
/// use pathcfg::adapters::JsonParser;
/// use pathcfg::ports::ConfigParser;
///
/// let parser = JsonParser::new();
/// let content = r#"{
///     // service settings
///     "service": { "port": 8080, "tags": ["a", "b",], },
/// }"#;
/// let entries = parser.parse(content).unwrap();
/// assert!(entries.contains(&("service.port".to_string(), "8080".to_string())));
/// assert!(entries.contains(&("service.tags[1]".to_string(), "b".to_string())));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }

    /// Parses `content`, stripping comments and trailing commas first when
    /// `allow_comments` is set.
    pub fn parse_with(&self, content: &str, allow_comments: bool) -> Result<Entries> {
        let value: Value = if allow_comments {
            serde_json::from_str::<Value>(&strip_comments(content))
        } else {
            serde_json::from_str::<Value>(content)
        }
        .map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse JSON: {}", e),
            source: Some(Box::new(e)),
        })?;

        if !value.is_object() {
            return Err(ConfigError::parse("JSON document root must be an object"));
        }

        let mut entries = Entries::new();
        Self::flatten_json(&value, "", &mut entries);
        tracing::debug!("Parsed {} JSON entries", entries.len());
        Ok(entries)
    }

    /// Flattens a JSON value into dotted and indexed paths.
    fn flatten_json(value: &Value, prefix: &str, result: &mut Entries) {
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    Self::flatten_json(val, &join_path(prefix, key), result);
                }
            }
            Value::Array(seq) => {
                for (i, val) in seq.iter().enumerate() {
                    let element = format!("{}[{}]", prefix, i);
                    match val {
                        Value::Object(_) | Value::Array(_) => Self::flatten_json(val, &element, result),
                        scalar => {
                            let text = scalar_text(scalar);
                            result.push((element, text.clone()));
                            result.push((prefix.to_string(), text));
                        }
                    }
                }
            }
            scalar => result.push((prefix.to_string(), scalar_text(scalar))),
        }
    }
}

impl ConfigParser for JsonParser {
    fn parse(&self, content: &str) -> Result<Entries> {
        self.parse_with(content, true)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json", "json5"]
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Removes `//` and `/* */` comments and trailing commas outside string literals.
fn strip_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for skipped in chars.by_ref() {
                    if previous == '*' && skipped == '/' {
                        break;
                    }
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    previous = skipped;
                }
                out.push(' ');
            }
            '}' | ']' => {
                let kept = out.trim_end().len();
                if out[..kept].ends_with(',') {
                    out.remove(kept - 1);
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
