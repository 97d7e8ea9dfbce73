// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur when parsing documents, converting
//! values or materializing subtrees of the store. All errors use `thiserror` for proper
//! error handling and conversion.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// The main error type for configuration operations.
///
/// Missing values are not errors: store lookups return `Option` instead. This enum is
/// marked as `#[non_exhaustive]` to allow for future additions without breaking
/// backwards compatibility.
///
/// # Examples
///
/// ```
/// use pathcfg::domain::errors::ConfigError;
///
/// fn read_indented() -> Result<String, ConfigError> {
///     Err(ConfigError::BadIndentation {
///         key: "database".to_string(),
///         line: 3,
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested configuration key was not found in the store.
    #[error("Configuration key not found: {key}")]
    ConfigKeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// The requested target type is not one of the supported scalar kinds.
    #[error("Unsupported type '{type_name}', expected one of: {supported}")]
    UnsupportedType {
        /// The name of the type that was requested
        type_name: String,
        /// The supported type names, comma separated
        supported: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A structured-text document used indentation that does not fit its indentation unit.
    #[error("Bad indentation detected for '{key}' on line {line}")]
    BadIndentation {
        /// The key of the offending line
        key: String,
        /// The 1-based line number in the document
        line: usize,
    },

    /// Failed to parse a configuration document.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A subtree could not be materialized into the requested shape.
    #[error("Failed to map configuration at '{path}': {message}")]
    MappingError {
        /// The subtree root path
        path: String,
        /// The error message
        message: String,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// Implement conversions from common parsing errors to TypeConversionError
impl ConfigError {
    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, target_type: &str, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: target_type.to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, target_type: &str, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: target_type.to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError carrying a plain message.
    pub fn conversion(key: impl Into<String>, target_type: &str, message: impl Into<String>) -> Self {
        let message: String = message.into();
        ConfigError::TypeConversionError {
            key: key.into(),
            target_type: target_type.to_string(),
            source: message.into(),
        }
    }

    /// Creates a ParseError without an underlying source.
    pub fn parse(message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            message: message.into(),
            source: None,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
