// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype and path syntax helpers.
//!
//! A key is a path: dot-separated segments, each optionally followed by bracketed
//! indices, e.g. `service.endpoints[0].port`. Brackets belong to the segment, they are
//! never separators.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A type-safe wrapper for configuration keys.
///
/// `ConfigKey` is a newtype that wraps a `String` to provide type safety when working
/// with configuration keys. This prevents accidental mixing of configuration keys with
/// other string values and makes the API more self-documenting.
///
/// # Examples
///
/// ```
/// use pathcfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("service.endpoints[0].port");
/// let segments: Vec<&str> = key.segments().collect();
/// assert_eq!(segments, vec!["service", "endpoints[0]", "port"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the dot-separated segments of the key.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Returns the key with the normalization rules applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcfg::domain::config_key::ConfigKey;
    ///
    /// let key = ConfigKey::from("formatting.test.uppercaseUsageWorks");
    /// assert_eq!(key.normalized().as_str(), "formatting.test.uppercase-usage-works");
    /// ```
    pub fn normalized(&self) -> ConfigKey {
        ConfigKey(normalize_key(&self.0))
    }

    /// Returns true if any segment of the key carries a bracketed index.
    pub fn is_indexed(&self) -> bool {
        self.segments().any(|segment| split_index(segment).1.is_some())
    }

    /// Returns the key with every bracketed index removed.
    pub fn without_indices(&self) -> ConfigKey {
        ConfigKey(strip_all_indices(&self.0))
    }
}

/// Normalizes a key so differently styled spellings address the same node.
///
/// The key is trimmed, underscores become dots, a lower-case letter directly followed by
/// an upper-case letter gets a dash between them, and everything is lower-cased.
///
/// # Examples
///
/// ```
/// use pathcfg::domain::config_key::normalize_key;
///
/// assert_eq!(normalize_key("my_value"), "my.value");
/// assert_eq!(normalize_key("myValue"), "my-value");
/// assert_eq!(normalize_key(" Server.PORT "), "server.port");
/// ```
pub fn normalize_key(key: &str) -> String {
    let mut normalized = String::with_capacity(key.len() + 4);
    let mut previous_lower = false;
    for c in key.trim().chars() {
        if c == '_' {
            normalized.push('.');
            previous_lower = false;
            continue;
        }
        if c.is_uppercase() && previous_lower {
            normalized.push('-');
        }
        previous_lower = c.is_lowercase();
        normalized.extend(c.to_lowercase());
    }
    normalized
}

/// Splits a single trailing `[n]` off a segment or path.
///
/// Returns the text before the bracket and the index, or the input unchanged and `None`
/// when there is no well-formed non-negative index at the end.
///
/// # Examples
///
/// ```
/// use pathcfg::domain::config_key::split_index;
///
/// assert_eq!(split_index("tags[2]"), ("tags", Some(2)));
/// assert_eq!(split_index("a.b[0][1]"), ("a.b[0]", Some(1)));
/// assert_eq!(split_index("tags[-1]"), ("tags[-1]", None));
/// assert_eq!(split_index("tags"), ("tags", None));
/// ```
pub fn split_index(text: &str) -> (&str, Option<usize>) {
    let Some(body) = text.strip_suffix(']') else {
        return (text, None);
    };
    let Some(open) = body.rfind('[') else {
        return (text, None);
    };
    let digits = &body[open + 1..];
    if open == 0 || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return (text, None);
    }
    match digits.parse::<usize>() {
        Ok(index) => (&text[..open], Some(index)),
        Err(_) => (text, None),
    }
}

/// Removes every bracketed numeric index from a path.
///
/// # Examples
///
/// ```
/// use pathcfg::domain::config_key::strip_all_indices;
///
/// assert_eq!(strip_all_indices("a[0].b[1]"), "a.b");
/// assert_eq!(strip_all_indices("matrix[0][1]"), "matrix");
/// assert_eq!(strip_all_indices("plain.key"), "plain.key");
/// ```
pub fn strip_all_indices(path: &str) -> String {
    path.split('.')
        .map(|segment| {
            let mut base = segment;
            while let (stripped, Some(_)) = split_index(base) {
                base = stripped;
            }
            base
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Appends `child` to `prefix` with a dot, or returns `child` when the prefix is empty.
pub fn join_path(prefix: &str, child: &str) -> String {
    if prefix.is_empty() {
        child.to_string()
    } else {
        format!("{}.{}", prefix, child)
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for ConfigKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_key_from_str() {
        let key = ConfigKey::from("test.key");
        assert_eq!(key.as_str(), "test.key");
    }

    #[test]
    fn test_config_key_display() {
        let key = ConfigKey::from("test.key");
        assert_eq!(format!("{}", key), "test.key");
    }

    #[test]
    fn test_config_key_hash() {
        let key1 = ConfigKey::from("test.key");
        let key2 = ConfigKey::from("test.key");
        let key3 = ConfigKey::from("other.key");

        let mut map = HashMap::new();
        map.insert(key1.clone(), "value1");

        assert_eq!(map.get(&key2), Some(&"value1"));
        assert_eq!(map.get(&key3), None);
    }

    #[test]
    fn test_segments_keep_brackets() {
        let key = ConfigKey::from("a.b[2].c");
        let segments: Vec<&str> = key.segments().collect();
        assert_eq!(segments, vec!["a", "b[2]", "c"]);
    }

    #[test]
    fn test_normalize_variants_agree() {
        let expected = "formatting.test.uppercase-usage-works";
        assert_eq!(normalize_key("formatting.test.uppercase-usage-works"), expected);
        assert_eq!(normalize_key("formatting.test.uppercaseUsageWorks"), expected);
        assert_eq!(normalize_key("formatting_test_uppercase-usage-works"), expected);
    }

    #[test]
    fn test_normalize_keeps_acronyms_together() {
        assert_eq!(normalize_key("HTTPServer"), "httpserver");
        assert_eq!(normalize_key("useHTTP"), "use-http");
    }

    #[test]
    fn test_normalize_indexed_key() {
        assert_eq!(normalize_key("Items[3].subValue"), "items[3].sub-value");
    }

    #[test]
    fn test_split_index_rejects_malformed() {
        assert_eq!(split_index("[0]"), ("[0]", None));
        assert_eq!(split_index("a[]"), ("a[]", None));
        assert_eq!(split_index("a[x]"), ("a[x]", None));
        assert_eq!(split_index("a[1"), ("a[1", None));
    }

    #[test]
    fn test_is_indexed_and_without_indices() {
        let key = ConfigKey::from("servers[1].ports[0]");
        assert!(key.is_indexed());
        assert_eq!(key.without_indices().as_str(), "servers.ports");
        assert!(!ConfigKey::from("servers.ports").is_indexed());
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a.b", "c[0]"), "a.b.c[0]");
    }
}
