// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration store.
//!
//! This module contains `ConfigStore`, the concrete implementation of the
//! `ConfigurationService` trait that merges sources into a path trie and serves
//! lookups from it.

pub mod store;

// Re-export commonly used types
pub use store::{ConfigStore, ConfigStoreBuilder, StoreOptions, DEFAULT_ADDITIONAL_SOURCES_KEY};
