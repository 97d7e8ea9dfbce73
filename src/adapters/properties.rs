// SPDX-License-Identifier: MIT OR Apache-2.0

//! Properties document parser.
//!
//! This module provides a parser for `key = value` documents, one assignment per line.

use crate::domain::config_key::strip_all_indices;
use crate::domain::config_value::clean_value;
use crate::domain::{ConfigKey, Result};
use crate::ports::{ConfigParser, Entries};

/// Properties parser implementation.
///
/// Each line of the form `key = value` or `key=value` produces one pair. The key is the
/// text before the first `=` and the value everything after it, trimmed and with one
/// layer of matching quotes removed. Blank lines, lines whose first non-blank character
/// is `#` or `!`, and lines without `=` are ignored.
///
/// Indexed keys such as `servers[0].host` are emitted twice: under the exact path and
/// under the path with every index removed (`servers.host`), so the unindexed path
/// collects all elements in file order.
///
/// # Examples
///
/// ```rust
/// use pathcfg::adapters::PropertiesParser;
/// use pathcfg::ports::ConfigParser;
///
/// let parser = PropertiesParser::new();
/// let entries = parser.parse("tags[0] = a\ntags[1] = b").unwrap();
/// assert_eq!(
///     entries,
///     vec![
///         ("tags[0]".to_string(), "a".to_string()),
///         ("tags".to_string(), "a".to_string()),
///         ("tags[1]".to_string(), "b".to_string()),
///         ("tags".to_string(), "b".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesParser;

impl PropertiesParser {
    /// Creates a new properties parser.
    pub fn new() -> Self {
        PropertiesParser
    }
}

impl ConfigParser for PropertiesParser {
    fn parse(&self, content: &str) -> Result<Entries> {
        let mut entries = Entries::new();

        for line in content.lines() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            let value = clean_value(value).to_string();

            if ConfigKey::from(key).is_indexed() {
                entries.push((key.to_string(), value.clone()));
                entries.push((strip_all_indices(key), value));
            } else {
                entries.push((key.to_string(), value));
            }
        }

        tracing::debug!("Parsed {} properties entries", entries.len());
        Ok(entries)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["properties"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(String, String)]) -> Vec<(&str, &str)> {
        entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_simple_assignment() {
        let entries = PropertiesParser::new().parse("a.b.c = hello").unwrap();
        assert_eq!(pairs(&entries), vec![("a.b.c", "hello")]);
    }

    #[test]
    fn test_spacing_and_quotes() {
        let content = "example.property.value1 = Hello 1\nexample.property.value2=\"Hello 2\"\nsingle='x'";
        let entries = PropertiesParser::new().parse(content).unwrap();
        assert_eq!(
            pairs(&entries),
            vec![
                ("example.property.value1", "Hello 1"),
                ("example.property.value2", "Hello 2"),
                ("single", "x"),
            ]
        );
    }

    #[test]
    fn test_comments_blank_and_invalid_lines() {
        let content = "# comment\n   # indented comment\n! bang comment\n\nno assignment here\nkey=value";
        let entries = PropertiesParser::new().parse(content).unwrap();
        assert_eq!(pairs(&entries), vec![("key", "value")]);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let entries = PropertiesParser::new().parse("url = a=b&c=d").unwrap();
        assert_eq!(pairs(&entries), vec![("url", "a=b&c=d")]);
    }

    #[test]
    fn test_empty_value() {
        let entries = PropertiesParser::new().parse("empty=").unwrap();
        assert_eq!(pairs(&entries), vec![("empty", "")]);
    }

    #[test]
    fn test_chained_indices() {
        let content = "servers[0].ports[0]=80\nservers[0].ports[1]=443\nservers[1].ports[0]=8080";
        let entries = PropertiesParser::new().parse(content).unwrap();
        assert_eq!(
            pairs(&entries),
            vec![
                ("servers[0].ports[0]", "80"),
                ("servers.ports", "80"),
                ("servers[0].ports[1]", "443"),
                ("servers.ports", "443"),
                ("servers[1].ports[0]", "8080"),
                ("servers.ports", "8080"),
            ]
        );
    }

    #[test]
    fn test_crlf_lines() {
        let entries = PropertiesParser::new().parse("a=1\r\nb=2\r\n").unwrap();
        assert_eq!(pairs(&entries), vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_supported_extensions() {
        assert_eq!(PropertiesParser::new().supported_extensions(), &["properties"]);
    }
}
