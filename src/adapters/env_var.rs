// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.
//!
//! This module provides a source that reads configuration values from environment
//! variables.

use crate::domain::config_value::clean_value;
use crate::domain::Result;
use crate::ports::{ConfigSource, Entries};
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable keys
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Configuration source for environment variables.
///
/// This source reads configuration values from environment variables. It supports
/// optional prefix filtering (e.g., only read variables starting with "APP_") and
/// key transformation (e.g., converting underscores to dots). The environment is read
/// again on every load, so a store reload picks up changed variables.
///
/// # Priority
///
/// Environment variables have a priority of 2, which means they override configuration
/// files (priority 1) but are overridden by command-line arguments (priority 3).
///
/// # Examples
///
/// ```rust
/// use pathcfg::adapters::EnvVarSource;
/// use pathcfg::ports::ConfigSource;
///
/// // Read all environment variables
/// let source = EnvVarSource::new();
///
/// // Read only variables with a specific prefix
/// let source = EnvVarSource::with_prefix("APP_");
/// assert_eq!(source.priority(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EnvVarSource {
    /// Optional prefix to filter environment variables
    prefix: Option<String>,
    /// Whether to convert keys to lowercase
    lowercase_keys: bool,
    /// Whether to replace underscores with dots
    replace_underscores: bool,
    /// Fixed values used instead of the process environment
    fixed: Option<HashMap<String, String>>,
    priority: u8,
}

impl EnvVarSource {
    /// Creates a new environment variable source without prefix filtering.
    ///
    /// This will read all environment variables available to the process.
    pub fn new() -> Self {
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: true,
            fixed: None,
            priority: 2,
        }
    }

    /// Creates a new environment variable source with prefix filtering.
    ///
    /// Only environment variables starting with the given prefix will be read.
    /// The prefix is stripped from the key when storing values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathcfg::adapters::EnvVarSource;
    ///
    /// let source = EnvVarSource::with_prefix("MYAPP_");
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new()
        }
    }

    /// Sets whether to convert keys to lowercase.
    pub fn lowercase_keys(mut self, enabled: bool) -> Self {
        self.lowercase_keys = enabled;
        self
    }

    /// Sets whether to replace underscores with dots in keys.
    ///
    /// When enabled (default), underscores in environment variable names are
    /// replaced with dots to match the standard configuration key format.
    pub fn replace_underscores(mut self, enabled: bool) -> Self {
        self.replace_underscores = enabled;
        self
    }

    /// Overrides the default priority of 2.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Creates a source with pre-populated values for testing.
    ///
    /// **Note**: This method is primarily intended for testing and should not
    /// be used in production code. Use `new()` or `with_prefix()` for normal usage.
    ///
    /// Keys are used verbatim; no prefix filtering or transformation is applied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathcfg::adapters::EnvVarSource;
    /// use pathcfg::ports::ConfigSource;
    /// use std::collections::HashMap;
    ///
    /// let mut values = HashMap::new();
    /// values.insert("test.key".to_string(), "test_value".to_string());
    ///
    /// let source = EnvVarSource::with_values(values);
    /// assert_eq!(source.load().unwrap().len(), 1);
    /// ```
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: false,
            fixed: Some(values),
            priority: 2,
        }
    }

    /// Applies prefix filtering and key transformation to one variable.
    fn transform_key(&self, key: &str) -> Option<String> {
        let key = match &self.prefix {
            Some(prefix) => key.strip_prefix(prefix.as_str())?,
            None => key,
        };
        if key.is_empty() {
            return None;
        }

        let mut transformed_key = key.to_string();
        if self.lowercase_keys {
            transformed_key = transformed_key.to_lowercase();
        }
        if self.replace_underscores {
            transformed_key = transformed_key.replace('_', ".");
        }
        Some(transformed_key)
    }
}

impl Default for EnvVarSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvVarSource {
    fn name(&self) -> &str {
        "env"
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn load(&self) -> Result<Entries> {
        if let Some(values) = &self.fixed {
            let mut entries: Entries = values
                .iter()
                .map(|(k, v)| (k.clone(), clean_value(v).to_string()))
                .collect();
            entries.sort();
            return Ok(entries);
        }

        let mut entries = Entries::new();
        for (key, value) in env::vars() {
            // Validate input sizes
            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    key.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }

            if let Some(transformed_key) = self.transform_key(&key) {
                entries.push((transformed_key, clean_value(&value).to_string()));
            }
        }
        // env::vars order is unspecified
        entries.sort();

        tracing::debug!(
            "Loaded {} environment variables (prefix={:?}, lowercase={}, replace_underscores={})",
            entries.len(),
            self.prefix,
            self.lowercase_keys,
            self.replace_underscores
        );

        Ok(entries)
    }
}
