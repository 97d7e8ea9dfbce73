// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! This module defines the `ConfigurationService` trait, the object-safe interface the rest
//! of an application can depend on instead of a concrete store. It covers single-value
//! lookup, multi-value lookup, existence checks and reloading.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// The main configuration service trait.
///
/// A service aggregates one or more sources into a single view. Every key may hold several
/// values; single-value accessors return the last one, which is the value written by the
/// highest priority source.
///
/// # Examples
///
/// ```rust
/// use pathcfg::domain::{ConfigError, ConfigKey, ConfigValue, ConfigurationService, Result};
///
/// struct Fixed;
///
/// impl ConfigurationService for Fixed {
///     fn get_all(&self, key: &ConfigKey) -> Vec<ConfigValue> {
///         match key.as_str() {
///             "database.host" => vec![ConfigValue::from("localhost")],
///             _ => Vec::new(),
///         }
///     }
///
///     fn reload(&self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let service = Fixed;
/// let key = ConfigKey::from("database.host");
/// assert_eq!(service.get(&key).unwrap().as_str(), "localhost");
/// assert!(matches!(
///     service.get(&ConfigKey::from("missing")),
///     Err(ConfigError::ConfigKeyNotFound { .. })
/// ));
/// ```
pub trait ConfigurationService: Send + Sync {
    /// Retrieves every value stored for `key`, oldest first. Empty when the key is absent.
    fn get_all(&self, key: &ConfigKey) -> Vec<ConfigValue>;

    /// Rebuilds the configuration from all sources.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The configuration was rebuilt and swapped in
    /// * `Err(ConfigError)` - A source failed and the previous configuration was kept
    fn reload(&self) -> Result<()>;

    /// Retrieves the effective value for `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigValue)` - The last value written for the key
    /// * `Err(ConfigError::ConfigKeyNotFound)` - No source provided the key
    fn get(&self, key: &ConfigKey) -> Result<ConfigValue> {
        self.get_all(key)
            .pop()
            .ok_or_else(|| crate::domain::ConfigError::ConfigKeyNotFound {
                key: key.as_str().to_string(),
            })
    }

    /// Retrieves the effective value for `key` or `default` when it is absent.
    fn get_or_default(&self, key: &ConfigKey, default: &str) -> ConfigValue {
        self.get(key).unwrap_or_else(|_| ConfigValue::from(default))
    }

    /// Checks if any source provided a value for `key`.
    fn has(&self, key: &ConfigKey) -> bool {
        !self.get_all(key).is_empty()
    }
}
