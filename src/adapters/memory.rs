// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document source adapter.

use crate::adapters::file::parser_for_extension;
use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigSource, Entries};

/// Configuration source for a document held in memory.
///
/// The document format is named by a file extension (`properties`, `yml`, `json`, ...)
/// and parsed on every load. Useful for embedded defaults and tests.
///
/// # Examples
///
/// ```rust
/// use pathcfg::adapters::MemorySource;
/// use pathcfg::ports::ConfigSource;
///
/// let defaults = MemorySource::new("defaults", "yml", "server:\n  port: 8080\n")
///     .unwrap()
///     .with_priority(0);
/// assert_eq!(defaults.priority(), 0);
/// assert_eq!(defaults.load().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    extension: String,
    content: String,
    priority: u8,
}

impl MemorySource {
    /// Creates a source for `content` in the format named by `extension`.
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` if no parser handles `extension`.
    pub fn new(
        name: impl Into<String>,
        extension: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let extension = extension.into().to_ascii_lowercase();
        if parser_for_extension(&extension).is_none() {
            return Err(ConfigError::SourceError {
                source_name: name,
                message: format!("No parser available for extension '{}'", extension),
                source: None,
            });
        }

        Ok(Self {
            name,
            extension,
            content: content.into(),
            priority: 1,
        })
    }

    /// Overrides the default priority of 1.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

impl ConfigSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn load(&self) -> Result<Entries> {
        match parser_for_extension(&self.extension) {
            Some(parser) => parser.parse(&self.content),
            None => Ok(Entries::new()),
        }
    }
}
