// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! This module provides the `ConfigValue` type, which wraps a single textual value read
//! from the store, and the cleanup helpers shared by the parsers and the trie.

use crate::domain::convert::{ConfigScalar, Scalar, ScalarKind};
use crate::domain::errors::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A type-safe wrapper for configuration values.
///
/// `ConfigValue` stores configuration values as strings internally and converts them on
/// demand to one of the supported scalar types.
///
/// # Examples
///
/// ```
/// use pathcfg::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::new("42".to_string());
/// assert_eq!(value.as_str(), "42");
/// assert_eq!(value.to::<i32>("test.key").unwrap(), 42);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValue(String);

impl ConfigValue {
    /// Creates a new `ConfigValue` from a `String`.
    pub fn new(value: String) -> Self {
        ConfigValue(value)
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the value into a `String`.
    pub fn as_string(&self) -> String {
        self.0.clone()
    }

    /// Converts the value into `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::from("yes");
    /// assert!(value.to::<bool>("feature.enabled").unwrap());
    /// ```
    pub fn to<T: ConfigScalar>(&self, key: &str) -> Result<T> {
        T::from_config_str(key, &self.0)
    }

    /// Converts the value into the scalar kind chosen at runtime.
    pub fn convert(&self, key: &str, kind: ScalarKind) -> Result<Scalar> {
        kind.convert(key, &self.0)
    }
}

/// Strips one layer of matching surrounding quotes (`"..."` or `'...'`).
///
/// Unbalanced quotes are left alone.
pub fn strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Trims the value and strips one layer of matching surrounding quotes.
///
/// # Examples
///
/// ```
/// use pathcfg::domain::config_value::clean_value;
///
/// assert_eq!(clean_value("  \"Hello 2\" "), "Hello 2");
/// assert_eq!(clean_value("'single'"), "single");
/// assert_eq!(clean_value("\"unbalanced'"), "\"unbalanced'");
/// ```
pub fn clean_value(text: &str) -> &str {
    strip_quotes(text.trim())
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(s.to_string())
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
