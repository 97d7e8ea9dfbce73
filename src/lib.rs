// SPDX-License-Identifier: MIT OR Apache-2.0

//! A path-indexed, multi-value configuration store.
//!
//! This crate loads configuration from properties files, indented structured-text
//! documents, JSON documents, environment variables and command-line definitions into a
//! single trie keyed by dotted paths such as `service.endpoints[0].port`. Every path can
//! hold several values; lookups return the whole list or its last element, and subtrees
//! can be converted into typed maps or materialized into `serde` types.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: The path trie, keys, values, the scalar converter and errors
//! - **Ports**: Trait definitions that define interfaces (`ConfigParser`, `ConfigSource`)
//! - **Adapters**: Document parsers and sources (files, env vars, CLI, in-memory)
//! - **Service**: The configuration store that orchestrates everything
//!
//! # Features
//!
//! - **Multiple Formats**: Properties, YAML-like structured text, JSON with comments
//! - **Multi-Value Paths**: Every source appends; single-value reads take the last value
//! - **Precedence**: Sources load in priority order (CLI > env > files by default)
//! - **Type Safety**: Conversions into scalars, typed submaps and `serde` objects
//! - **Atomic Reload**: A reload builds a new trie and swaps it in
//!
//! # Feature Flags
//!
//! - `properties`: Enable the properties parser (default)
//! - `yaml`: Enable the structured-text parser (default)
//! - `json`: Enable the JSON parser (default)
//! - `env`: Enable environment variable support (default)
//! - `cli`: Enable command-line definitions through `clap` (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use pathcfg::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Database {
//!     host: String,
//!     port: u16,
//!     replicas: Vec<String>,
//! }
//!
//! # fn main() -> Result<()> {
//! let store = ConfigStore::builder()
//!     .with_document(
//!         "app",
//!         "yml",
//!         "database:\n  host: localhost\n  port: 5432\n  replicas:\n    - r1\n    - r2\n",
//!     )?
//!     .with_cli_args(["-D", "database.port=6543"])?
//!     .build()?;
//!
//! assert_eq!(store.get::<u16>("database.port")?, Some(6543));
//! assert_eq!(store.get_value("database.replicas[1]").as_deref(), Some("r2"));
//!
//! let db: Database = store.get_object("database")?;
//! assert_eq!(db.host, "localhost");
//! assert_eq!(db.replicas, vec!["r1", "r2"]);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigScalar, ConfigValue, ConfigurationService, PathTrie,
        Result, ScalarKind,
    };
    pub use crate::ports::{ConfigParser, ConfigSource, Entries};
    pub use crate::service::{ConfigStore, ConfigStoreBuilder, StoreOptions};

    // Re-export adapters based on feature flags
    #[cfg(feature = "cli")]
    pub use crate::adapters::CommandLineSource;
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarSource;
    #[cfg(feature = "json")]
    pub use crate::adapters::JsonParser;
    #[cfg(feature = "properties")]
    pub use crate::adapters::PropertiesParser;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
    pub use crate::adapters::{FileSource, MemorySource};
}
