// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which provides an interface for
//! parsing configuration documents in different formats (properties, indented structured
//! text, JSON).

use crate::domain::Result;

/// Ordered `(path, value)` pairs produced by a parser.
///
/// A path may appear several times. Every occurrence is one more value at that path, which
/// is how aggregate paths such as `tags` collect the elements of `tags[0]`, `tags[1]`, ...
pub type Entries = Vec<(String, String)>;

/// A trait for parsing configuration documents.
///
/// This trait defines the interface for implementing parsers that read one raw document
/// and flatten it into dotted paths. Parsers do no I/O and keep no state.
///
/// # Key Format
///
/// Parsers flatten nested structures using dot notation and array elements using
/// bracketed indices. For example, a structure like:
///
/// ```yaml
/// database:
///   host: localhost
///   ports: [5432, 5433]
/// ```
///
/// Should be parsed into:
/// - `database.host` -> `"localhost"`
/// - `database.ports[0]` -> `"5432"`
/// - `database.ports[1]` -> `"5433"`
/// - `database.ports` -> `"5432"`, then `"5433"`
///
/// # Examples
///
/// ```rust
/// use pathcfg::ports::{ConfigParser, Entries};
/// use pathcfg::domain::Result;
///
/// struct LineParser;
///
/// impl ConfigParser for LineParser {
///     fn parse(&self, content: &str) -> Result<Entries> {
///         Ok(content
///             .lines()
///             .enumerate()
///             .map(|(i, line)| (format!("line[{}]", i), line.to_string()))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["txt"]
///     }
/// }
///
/// let entries = LineParser.parse("a\nb").unwrap();
/// assert_eq!(entries[1], ("line[1]".to_string(), "b".to_string()));
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into ordered `(path, value)` pairs.
    ///
    /// # Returns
    ///
    /// * `Ok(Entries)` - The parsed pairs, in document order
    /// * `Err(ConfigError)` - The document is malformed; nothing from it should be used
    fn parse(&self, content: &str) -> Result<Entries>;

    /// Returns the file extensions supported by this parser.
    ///
    /// This allows the store to select the appropriate parser based on the file
    /// extension. Extensions are lower case and carry no leading dot.
    fn supported_extensions(&self) -> &[&str];
}
