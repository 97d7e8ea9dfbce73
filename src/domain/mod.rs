// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the path trie, the value converter and the fundamental types used
//! throughout the library. It performs no I/O and is independent of any source format.

pub mod config_key;
pub mod config_value;
pub mod convert;
pub mod errors;
mod materialize;
pub mod path_trie;
pub mod service;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use convert::{ConfigScalar, Scalar, ScalarKind};
pub use errors::{ConfigError, Result};
pub use path_trie::{PathTrie, TrieOptions};
pub use service::ConfigurationService;
