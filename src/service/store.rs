// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration store implementation.
//!
//! This module provides `ConfigStore`, which loads every registered source into one
//! [`PathTrie`] and serves lookups, typed conversions and object materialization from it.

use crate::adapters::{FileSource, MemorySource};
use crate::domain::convert::convert_list_as;
use crate::domain::{
    ConfigError, ConfigKey, ConfigScalar, ConfigValue, ConfigurationService, PathTrie, Result,
    TrieOptions,
};
use crate::ports::{ConfigSource, Entries};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Default key listing additional configuration files.
pub const DEFAULT_ADDITIONAL_SOURCES_KEY: &str = "config.sources";

/// Options controlling how a [`ConfigStore`] loads and stores values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Normalize keys on write and lookup (`App_Name` and `app.name` match).
    pub normalize_keys: bool,
    /// Trim values and strip one layer of matching quotes on program writes.
    /// Values from sources are stored as the source returns them.
    pub clean_values: bool,
    /// Abort a load when any source fails instead of skipping it.
    pub strict: bool,
    /// Key whose comma separated values name additional files to load, `None` to disable.
    pub additional_sources_key: Option<String>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            normalize_keys: true,
            clean_values: true,
            strict: false,
            additional_sources_key: Some(DEFAULT_ADDITIONAL_SOURCES_KEY.to_string()),
        }
    }
}

impl StoreOptions {
    fn trie_options(&self) -> TrieOptions {
        TrieOptions {
            normalize_keys: self.normalize_keys,
            clean_values: self.clean_values,
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    trie: PathTrie,
    loaded: Vec<String>,
    closed: bool,
}

/// Path-indexed configuration store.
///
/// Sources are loaded in ascending priority order, ties in registration order. Values are
/// additive: every source appends to the paths it provides, so a path can hold several
/// values and single-value reads return the last one, which comes from the highest
/// priority source.
///
/// The store is `Send + Sync`. Reads take a shared lock; [`reload`](Self::reload) builds a
/// fresh trie without holding the lock and swaps it in, so readers never observe a
/// partially loaded configuration.
///
/// # Examples
///
/// ```rust
/// use pathcfg::service::ConfigStore;
///
/// # fn main() -> pathcfg::domain::Result<()> {
/// let store = ConfigStore::builder()
///     .with_document("defaults", "yml", "server:\n  port: 8080\n  tags: [web, api]\n")?
///     .with_document("overrides", "properties", "server.port = 9090")?
///     .build()?;
///
/// assert_eq!(store.get::<u16>("server.port")?, Some(9090));
/// assert_eq!(store.get_values("server.port"), Some(vec!["8080".to_string(), "9090".to_string()]));
/// assert_eq!(store.get_list::<String>("server.tags")?, vec!["web", "api"]);
/// # Ok(())
/// # }
/// ```
pub struct ConfigStore {
    /// Configuration sources in load order (lowest priority first)
    sources: Vec<Box<dyn ConfigSource>>,
    options: StoreOptions,
    state: RwLock<StoreState>,
}

impl ConfigStore {
    /// Creates a new store builder.
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::new()
    }

    /// Creates a store with default sources.
    ///
    /// This includes environment variables and `config.yml` from the default
    /// OS-appropriate location. If the file doesn't exist, only environment
    /// variables will be used.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use pathcfg::service::ConfigStore;
    ///
    /// # fn main() -> pathcfg::domain::Result<()> {
    /// let store = ConfigStore::with_defaults("myapp", "com.example")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_defaults(app_name: &str, qualifier: &str) -> Result<Self> {
        let mut builder = Self::builder();

        #[cfg(feature = "env")]
        {
            builder = builder.with_env_vars();
        }

        if let Ok(source) = FileSource::from_default_location(app_name, qualifier) {
            builder = builder.with_source(Box::new(source));
        }

        builder.build()
    }

    /// Returns the options the store was built with.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Re-reads every source and swaps in the new configuration.
    ///
    /// Values set with [`put`](Self::put) are discarded. In strict mode a failing source
    /// aborts the reload and the previous configuration stays in place.
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` if the store has been closed, or the failing source's error
    /// in strict mode.
    pub fn reload(&self) -> Result<()> {
        if self.read().closed {
            return Err(closed_error());
        }

        let (trie, loaded) = self.load_all()?;

        // close() may have run while the sources were loading
        let mut state = self.write();
        if state.closed {
            tracing::debug!("Discarding reload of a store closed while loading");
            return Err(closed_error());
        }
        tracing::info!(
            "Loaded {} values under {} paths from {} sources",
            trie.len(),
            trie.keys().len(),
            loaded.len()
        );
        state.trie = trie;
        state.loaded = loaded;
        Ok(())
    }

    /// Drops every value and stops serving lookups. Writes and reloads are refused
    /// afterwards.
    pub fn close(&self) {
        let mut state = self.write();
        state.trie.clear();
        state.loaded.clear();
        state.closed = true;
        tracing::debug!("Configuration store closed");
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.read().closed
    }

    /// Appends a program-set value at `path`. Returns the number of values added.
    pub fn put(&self, path: &str, value: impl AsRef<str>) -> usize {
        let mut state = self.write();
        if state.closed {
            return 0;
        }
        state.trie.put(path, value)
    }

    /// Replaces every value at `path`. Returns the number of values stored.
    pub fn put_replacing<I, S>(&self, path: &str, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.write();
        if state.closed {
            return 0;
        }
        state.trie.put_replacing(path, values)
    }

    /// Removes the values at exactly `path` and returns them.
    pub fn remove(&self, path: &str) -> Option<Vec<String>> {
        self.write().trie.remove(path)
    }

    /// Returns every value at `path` in load order.
    pub fn get_values(&self, path: &str) -> Option<Vec<String>> {
        self.read().trie.get(path).map(<[String]>::to_vec)
    }

    /// Returns the effective value at `path`.
    ///
    /// For a path ending in an index such as `tags[1]` this is that element; otherwise it
    /// is the last value written.
    pub fn get_value(&self, path: &str) -> Option<String> {
        let state = self.read();
        let value = state
            .trie
            .get_last(path)
            .or_else(|| state.trie.get_by_index(path))
            .map(str::to_string);
        if value.is_none() {
            tracing::debug!("No configuration value for '{}'", path);
        }
        value
    }

    /// Returns the effective value at `path` converted to `T`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(T))` - The value converted successfully
    /// * `Ok(None)` - No value is stored at `path`
    /// * `Err(ConfigError::TypeConversionError)` - The value is not a valid `T`
    pub fn get<T: ConfigScalar>(&self, path: &str) -> Result<Option<T>> {
        self.get_value(path)
            .map(|value| ConfigValue::from(value).to::<T>(path))
            .transpose()
    }

    /// Returns the value at `path` converted to `T`, or `default` when absent.
    pub fn get_or<T: ConfigScalar>(&self, path: &str, default: T) -> Result<T> {
        Ok(self.get(path)?.unwrap_or(default))
    }

    /// Converts every value at `path` to `T`. Empty when nothing is stored.
    pub fn get_list<T: ConfigScalar>(&self, path: &str) -> Result<Vec<T>> {
        match self.get_values(path) {
            Some(values) => convert_list_as::<T, _>(path, &values),
            None => Ok(Vec::new()),
        }
    }

    /// Returns the first value written at `path`.
    pub fn get_first(&self, path: &str) -> Option<String> {
        self.read().trie.get_first(path).map(str::to_string)
    }

    /// Returns the last value written at `path`.
    pub fn get_last(&self, path: &str) -> Option<String> {
        self.read().trie.get_last(path).map(str::to_string)
    }

    /// Returns true if `path` or any path below it holds a value.
    pub fn has(&self, path: &str) -> bool {
        self.read().trie.contains_key(path)
    }

    /// Flattens the subtree under `path` into relative paths with converted values.
    ///
    /// Returns `Ok(None)` when nothing exists at `path`.
    pub fn get_sub_map<T: ConfigScalar>(
        &self,
        path: &str,
    ) -> Result<Option<BTreeMap<String, Vec<T>>>> {
        self.read().trie.to_sub_map_as::<T>(path)
    }

    /// Materializes every immediate child of `path` as a `T`, `Ok(None)` when nothing
    /// exists at `path`.
    pub fn get_object_map<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<BTreeMap<String, T>>> {
        self.read().trie.to_sub_map_of::<T>(path)
    }

    /// Materializes the subtree at `path` into `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathcfg::service::ConfigStore;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Endpoint {
    ///     host: String,
    ///     port: u16,
    /// }
    ///
    /// # fn main() -> pathcfg::domain::Result<()> {
    /// let store = ConfigStore::builder()
    ///     .with_document("app", "json", r#"{"endpoints": [{"host": "a", "port": 1}, {"host": "b", "port": 2}]}"#)?
    ///     .build()?;
    ///
    /// let endpoints: Vec<Endpoint> = store.get_object("endpoints")?;
    /// assert_eq!(endpoints[1].host, "b");
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_object<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.read().trie.to_object::<T>(path)
    }

    /// Every path that holds a value, depth first in load order.
    pub fn keys(&self) -> Vec<String> {
        self.read()
            .trie
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Exports the subtree at `path` as JSON. An empty path exports everything.
    pub fn to_json(&self, path: &str) -> Option<serde_json::Value> {
        self.read().trie.to_json(path)
    }

    /// Names of the sources that contributed to the current configuration, in load order.
    pub fn loaded_sources(&self) -> Vec<String> {
        self.read().loaded.clone()
    }

    /// Returns a copy of the current configuration.
    pub fn snapshot(&self) -> PathTrie {
        self.read().trie.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads every source into a new trie without touching the live state.
    fn load_all(&self) -> Result<(PathTrie, Vec<String>)> {
        let mut trie = PathTrie::with_options(self.options.trie_options());
        let mut loaded = Vec::new();

        for source in &self.sources {
            self.load_source(source.as_ref(), &mut trie, &mut loaded)?;
        }

        if let Some(key) = &self.options.additional_sources_key {
            for path in additional_files(&trie, key) {
                match FileSource::from_file(&path) {
                    Ok(source) => self.load_source(&source, &mut trie, &mut loaded)?,
                    Err(e) if self.options.strict => return Err(e),
                    Err(e) => tracing::warn!("Skipping additional configuration file '{}': {}", path, e),
                }
            }
        }

        Ok((trie, loaded))
    }

    fn load_source(
        &self,
        source: &dyn ConfigSource,
        trie: &mut PathTrie,
        loaded: &mut Vec<String>,
    ) -> Result<()> {
        match source.load() {
            Ok(entries) => {
                let added = merge(trie, source.name(), entries);
                tracing::debug!("Merged {} values from source '{}'", added, source.name());
                loaded.push(source.name().to_string());
                Ok(())
            }
            Err(e) if self.options.strict => Err(e),
            Err(e) => {
                tracing::warn!("Failed to load source '{}': {}", source.name(), e);
                Ok(())
            }
        }
    }
}

fn closed_error() -> ConfigError {
    ConfigError::SourceError {
        source_name: "store".to_string(),
        message: "Configuration store is closed".to_string(),
        source: None,
    }
}

/// Appends `entries` to `trie` and returns how many values were stored.
fn merge(trie: &mut PathTrie, source_name: &str, entries: Entries) -> usize {
    let mut added = 0;
    for (path, value) in entries {
        let count = trie.put_verbatim(&path, [value]);
        if count == 0 {
            tracing::debug!("Ignoring invalid path '{}' from source '{}'", path, source_name);
        }
        added += count;
    }
    added
}

/// Collects the distinct comma separated file names listed under `key`.
fn additional_files(trie: &PathTrie, key: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    trie.get(key)
        .unwrap_or_default()
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|path| !path.is_empty() && seen.insert(path.to_string()))
        .map(str::to_string)
        .collect()
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("ConfigStore")
            .field("sources", &names)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ConfigStore {
    /// Dumps every path with its values, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.read().trie)
    }
}

impl ConfigurationService for ConfigStore {
    fn get_all(&self, key: &ConfigKey) -> Vec<ConfigValue> {
        self.get_values(key.as_str())
            .unwrap_or_default()
            .into_iter()
            .map(ConfigValue::from)
            .collect()
    }

    fn reload(&self) -> Result<()> {
        ConfigStore::reload(self)
    }
}

/// Builder for constructing a `ConfigStore`.
///
/// # Examples
///
/// ```rust
/// use pathcfg::service::ConfigStoreBuilder;
///
/// # fn main() -> pathcfg::domain::Result<()> {
/// let store = ConfigStoreBuilder::new()
///     .with_env_prefix("MYAPP_")
///     .strict(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigStoreBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
    options: StoreOptions,
}

impl ConfigStoreBuilder {
    /// Creates a new builder with default options.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            options: StoreOptions::default(),
        }
    }

    /// Adds a configuration source to the builder.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds a file that must exist; the parser is chosen from its extension.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use pathcfg::service::ConfigStoreBuilder;
    ///
    /// # fn main() -> pathcfg::domain::Result<()> {
    /// let store = ConfigStoreBuilder::new()
    ///     .with_file("/etc/myapp/config.yml")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let source = FileSource::from_file(path)?;
        Ok(self.with_source(Box::new(source)))
    }

    /// Adds a file that is skipped when absent.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let source = FileSource::optional(path)?;
        Ok(self.with_source(Box::new(source)))
    }

    /// Adds an in-memory document in the format named by `extension`.
    pub fn with_document(self, name: &str, extension: &str, content: &str) -> Result<Self> {
        let source = MemorySource::new(name, extension, content)?;
        Ok(self.with_source(Box::new(source)))
    }

    /// Adds environment variables as a configuration source.
    #[cfg(feature = "env")]
    pub fn with_env_vars(self) -> Self {
        use crate::adapters::EnvVarSource;
        self.with_source(Box::new(EnvVarSource::new().lowercase_keys(true)))
    }

    /// Adds environment variables with a prefix as a configuration source.
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        use crate::adapters::EnvVarSource;
        self.with_source(Box::new(
            EnvVarSource::with_prefix(prefix).lowercase_keys(true),
        ))
    }

    /// Adds `-D key=value` command-line definitions as a configuration source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathcfg::service::ConfigStoreBuilder;
    ///
    /// # fn main() -> pathcfg::domain::Result<()> {
    /// let store = ConfigStoreBuilder::new()
    ///     .with_cli_args(["-D", "key=value"])?
    ///     .build()?;
    /// assert_eq!(store.get_value("key").as_deref(), Some("value"));
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "cli")]
    pub fn with_cli_args<I, T>(self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        use crate::adapters::CommandLineSource;
        let source = CommandLineSource::from_args(args)?;
        Ok(self.with_source(Box::new(source)))
    }

    /// Replaces all store options.
    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets whether keys are normalized.
    pub fn normalize_keys(mut self, enabled: bool) -> Self {
        self.options.normalize_keys = enabled;
        self
    }

    /// Sets whether program-set values are trimmed and unquoted.
    pub fn clean_values(mut self, enabled: bool) -> Self {
        self.options.clean_values = enabled;
        self
    }

    /// Sets whether a failing source aborts loading.
    pub fn strict(mut self, enabled: bool) -> Self {
        self.options.strict = enabled;
        self
    }

    /// Sets the key listing additional files, `None` to disable the lookup.
    pub fn additional_sources_key(mut self, key: Option<&str>) -> Self {
        self.options.additional_sources_key = key.map(str::to_string);
        self
    }

    /// Builds the store and performs the first load.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the error of the first source that fails to load.
    pub fn build(mut self) -> Result<ConfigStore> {
        // Stable, so equal priorities keep registration order
        self.sources.sort_by_key(|source| source.priority());

        let store = ConfigStore {
            sources: self.sources,
            options: self.options,
            state: RwLock::new(StoreState::default()),
        };
        store.reload()?;
        Ok(store)
    }
}

impl Default for ConfigStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
