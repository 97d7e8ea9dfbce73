// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, which is the primary port (interface)
//! for feeding the store. Any configuration source (files, environment variables, command
//! line, in-memory documents) must implement this trait.

use crate::domain::Result;
use crate::ports::parser::Entries;

/// A trait for configuration sources.
///
/// A source produces `(path, value)` pairs each time it is loaded. The store loads
/// every source on build and on reload, so `load` must read fresh data each time.
/// Values are stored exactly as returned: a source trims or unquotes them itself.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded contexts.
///
/// # Priority
///
/// Each source has a priority value (0-255) that determines the order in which sources
/// are merged. Values are additive: a source loaded later appends to the same paths, and
/// single-value reads return the last value, so higher priority values take precedence.
/// The typical priority values are:
///
/// - **3 (highest)**: Command-line arguments
/// - **2**: Environment variables
/// - **1 (lowest)**: Configuration files and in-memory documents
///
/// # Examples
///
/// ```rust
/// use pathcfg::ports::{ConfigSource, Entries};
/// use pathcfg::domain::Result;
///
/// struct Defaults;
///
/// impl ConfigSource for Defaults {
///     fn name(&self) -> &str {
///         "defaults"
///     }
///
///     fn priority(&self) -> u8 {
///         0
///     }
///
///     fn load(&self) -> Result<Entries> {
///         Ok(vec![("server.port".to_string(), "8080".to_string())])
///     }
/// }
///
/// let source = Defaults;
/// assert_eq!(source.load().unwrap().len(), 1);
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this configuration source.
    ///
    /// This name is used for logging, error messages, and debugging. It should be
    /// a short, descriptive identifier like "env", "file:app.yml", "cli", etc.
    fn name(&self) -> &str;

    /// Returns the priority of this configuration source.
    ///
    /// # Priority Guidelines
    ///
    /// - **3**: Command-line arguments (highest priority)
    /// - **2**: Environment variables
    /// - **1**: Files (lowest priority)
    fn priority(&self) -> u8;

    /// Reads the source and returns its pairs in document order.
    ///
    /// # Returns
    ///
    /// * `Ok(Entries)` - The pairs to merge into the store
    /// * `Err(ConfigError)` - The source could not be read or parsed
    fn load(&self) -> Result<Entries>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;

    // Test implementation of ConfigSource for testing purposes
    struct TestSource {
        name: String,
        priority: u8,
        fail: bool,
    }

    impl ConfigSource for TestSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn load(&self) -> Result<Entries> {
            if self.fail {
                return Err(ConfigError::SourceError {
                    source_name: self.name.clone(),
                    message: "unavailable".to_string(),
                    source: None,
                });
            }
            Ok(vec![("test.key".to_string(), "test.value".to_string())])
        }
    }

    #[test]
    fn test_source_name_and_priority() {
        let source = TestSource {
            name: "test".to_string(),
            priority: 2,
            fail: false,
        };
        assert_eq!(source.name(), "test");
        assert_eq!(source.priority(), 2);
    }

    #[test]
    fn test_source_load() {
        let source = TestSource {
            name: "test".to_string(),
            priority: 1,
            fail: false,
        };
        let entries = source.load().unwrap();
        assert_eq!(entries, vec![("test.key".to_string(), "test.value".to_string())]);
    }

    #[test]
    fn test_source_load_failure() {
        let source = TestSource {
            name: "broken".to_string(),
            priority: 1,
            fail: true,
        };
        assert!(matches!(source.load(), Err(ConfigError::SourceError { .. })));
    }
}
