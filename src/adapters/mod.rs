// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing parser and source implementations.
//!
//! This module contains concrete implementations of the traits defined in the ports
//! layer: one `ConfigParser` per document format and one `ConfigSource` per place
//! configuration can come from.

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "env")]
pub mod env_var;
pub mod file;
#[cfg(feature = "json")]
pub mod json;
pub mod memory;
#[cfg(feature = "properties")]
pub mod properties;
#[cfg(feature = "yaml")]
pub mod yaml;

// Re-export adapters based on feature flags
#[cfg(feature = "cli")]
pub use cli::CommandLineSource;
#[cfg(feature = "env")]
pub use env_var::EnvVarSource;
pub use file::{parser_for_extension, FileSource};
#[cfg(feature = "json")]
pub use json::JsonParser;
pub use memory::MemorySource;
#[cfg(feature = "properties")]
pub use properties::PropertiesParser;
#[cfg(feature = "yaml")]
pub use yaml::YamlParser;
