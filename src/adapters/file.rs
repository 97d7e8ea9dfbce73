// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file source adapter.
//!
//! This module provides a source that reads a configuration document from disk and picks
//! the parser from the file extension.

use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigParser, ConfigSource, Entries};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for configuration files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Returns the parser registered for a file extension.
///
/// `properties` selects the properties parser, `yml` and `yaml` the structured-text
/// parser, `json` and `json5` the JSON parser. Matching ignores ASCII case. Formats whose
/// Cargo feature is disabled are not available.
///
/// # Examples
///
/// ```rust
/// use pathcfg::adapters::parser_for_extension;
///
/// assert!(parser_for_extension("yml").is_some());
/// assert!(parser_for_extension("toml").is_none());
/// ```
pub fn parser_for_extension(extension: &str) -> Option<Box<dyn ConfigParser>> {
    match extension.to_ascii_lowercase().as_str() {
        #[cfg(feature = "properties")]
        "properties" => Some(Box::new(super::PropertiesParser::new())),
        #[cfg(feature = "yaml")]
        "yml" | "yaml" => Some(Box::new(super::YamlParser::new())),
        #[cfg(feature = "json")]
        "json" | "json5" => Some(Box::new(super::JsonParser::new())),
        _ => None,
    }
}

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

/// Configuration source for a document on disk.
///
/// The parser is chosen from the file extension when the source is created; unknown
/// extensions are rejected. The file is read again on every load so a store reload
/// picks up edits.
///
/// # Priority
///
/// Files have a priority of 1, which means they are overridden by both
/// environment variables (priority 2) and command-line arguments (priority 3).
///
/// # Examples
///
/// ```rust,no_run
/// use pathcfg::adapters::FileSource;
///
/// // Load from a specific file
/// let source = FileSource::from_file("/path/to/config.yml").unwrap();
///
/// // A file that may not exist yet
/// let overrides = FileSource::optional("/etc/myapp/overrides.properties").unwrap();
///
/// // Load from default OS location
/// let source = FileSource::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    /// Path to the configuration file
    file_path: PathBuf,
    /// Source name, `file:<file name>`
    name: String,
    /// Lower-cased extension used to select the parser
    extension: String,
    /// Whether a missing file loads as empty
    optional: bool,
    priority: u8,
}

impl FileSource {
    /// Creates a source for a file that must exist.
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` if the extension has no parser or the path cannot be
    /// resolved.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = Self::build(path.as_ref(), false)?;

        // Canonicalize path to prevent directory traversal attacks
        let canonical_path = source.file_path.canonicalize().map_err(|e| ConfigError::SourceError {
            source_name: source.name.clone(),
            message: format!(
                "Invalid or inaccessible path: {}",
                display_name(&source.file_path)
            ),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            file_path: canonical_path,
            ..source
        })
    }

    /// Creates a source for a file that may be absent; a missing file loads as empty.
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` if the extension has no parser.
    pub fn optional<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(path.as_ref(), true)
    }

    /// Creates a source for `config.yml` in the default OS-appropriate location.
    ///
    /// This method uses the `directories` crate to determine the appropriate
    /// configuration directory for the current operating system.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, "config.yml")
    }

    /// Creates a source with a custom file name in the default location.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use pathcfg::adapters::FileSource;
    ///
    /// let source = FileSource::with_filename("myapp", "com.example", "settings.properties").unwrap();
    /// ```
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: format!("file:{}", filename),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Self::from_file(proj_dirs.config_dir().join(filename))
    }

    /// Overrides the default priority of 1.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns whether a missing file is tolerated.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    fn build(path: &Path, optional: bool) -> Result<Self> {
        let name = format!("file:{}", display_name(path));
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if parser_for_extension(&extension).is_none() {
            return Err(ConfigError::SourceError {
                source_name: name,
                message: format!("No parser available for extension '{}'", extension),
                source: None,
            });
        }

        Ok(Self {
            file_path: path.to_path_buf(),
            name,
            extension,
            optional,
            priority: 1,
        })
    }

    fn read(&self) -> Result<Option<String>> {
        if self.optional && !self.file_path.exists() {
            tracing::debug!("Optional configuration file not found: {}", self.file_path.display());
            return Ok(None);
        }

        // Check file size before reading to prevent DoS via large files
        let metadata = fs::metadata(&self.file_path).map_err(|e| ConfigError::SourceError {
            source_name: self.name.clone(),
            message: format!(
                "Failed to read file metadata: {}",
                display_name(&self.file_path)
            ),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: self.name.clone(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_CONFIG_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(&self.file_path).map_err(|e| ConfigError::SourceError {
            source_name: self.name.clone(),
            message: format!(
                "Failed to read configuration file: {}",
                display_name(&self.file_path)
            ),
            source: Some(Box::new(e)),
        })?;
        Ok(Some(content))
    }
}

impl ConfigSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn load(&self) -> Result<Entries> {
        let Some(content) = self.read()? else {
            return Ok(Entries::new());
        };
        let parser = parser_for_extension(&self.extension).ok_or_else(|| ConfigError::SourceError {
            source_name: self.name.clone(),
            message: format!("No parser available for extension '{}'", self.extension),
            source: None,
        })?;

        let entries = parser.parse(&content)?;
        tracing::debug!(
            "Loaded {} entries from {}",
            entries.len(),
            self.file_path.display()
        );
        Ok(entries)
    }
}
