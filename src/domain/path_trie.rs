// SPDX-License-Identifier: MIT OR Apache-2.0

//! Path-indexed multi-value trie.
//!
//! The trie is the central store of the crate. Every node is addressed by a dot-separated
//! path, holds an ordered list of textual values and an insertion-ordered set of named
//! children. Nodes live in an arena and refer to their parent by [`NodeId`], so the tree
//! has no owning back pointers. Nodes are only freed by [`PathTrie::clear`].

use crate::domain::config_key::{join_path, normalize_key, split_index};
use crate::domain::config_value::clean_value;
use crate::domain::convert::{convert_list_as, ConfigScalar};
use crate::domain::errors::{ConfigError, Result};
use crate::domain::materialize::{self, Item};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Index of a node in the trie arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone)]
struct PathNode {
    segment: String,
    full_path: String,
    values: Vec<String>,
    children: Vec<NodeId>,
    index: HashMap<String, NodeId>,
    parent: Option<NodeId>,
}

impl PathNode {
    fn root() -> Self {
        PathNode {
            segment: String::new(),
            full_path: String::new(),
            values: Vec::new(),
            children: Vec::new(),
            index: HashMap::new(),
            parent: None,
        }
    }
}

/// Behavior switches for a [`PathTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieOptions {
    /// Normalize keys on every write and lookup (see [`normalize_key`]).
    pub normalize_keys: bool,
    /// Trim values and strip one layer of matching quotes in [`PathTrie::put`],
    /// [`PathTrie::put_all`] and [`PathTrie::put_replacing`].
    pub clean_values: bool,
}

impl Default for TrieOptions {
    fn default() -> Self {
        TrieOptions {
            normalize_keys: true,
            clean_values: true,
        }
    }
}

/// A path-indexed store of ordered, possibly repeated, textual values.
///
/// # Examples
///
/// ```
/// use pathcfg::domain::path_trie::PathTrie;
///
/// let mut trie = PathTrie::new();
/// trie.put("server.port", "8080");
/// trie.put("server.port", "9090");
///
/// assert_eq!(trie.get("server.port").unwrap(), ["8080", "9090"]);
/// assert_eq!(trie.get_last("server.port"), Some("9090"));
/// assert_eq!(trie.get("server"), None);
/// ```
#[derive(Debug, Clone)]
pub struct PathTrie {
    nodes: Vec<PathNode>,
    options: TrieOptions,
}

impl Default for PathTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTrie {
    /// Creates an empty trie with default options.
    pub fn new() -> Self {
        Self::with_options(TrieOptions::default())
    }

    /// Creates an empty trie with the given options.
    pub fn with_options(options: TrieOptions) -> Self {
        PathTrie {
            nodes: vec![PathNode::root()],
            options,
        }
    }

    /// Returns the options this trie was created with.
    pub fn options(&self) -> TrieOptions {
        self.options
    }

    /// Appends a value at `path`, creating intermediate nodes as needed.
    ///
    /// Returns the number of values added: 1, or 0 when the path is empty or has an empty
    /// segment.
    pub fn put(&mut self, path: &str, value: impl AsRef<str>) -> usize {
        self.put_all(path, std::iter::once(value))
    }

    /// Appends every value at `path` in order and returns how many were added.
    pub fn put_all<I, S>(&mut self, path: &str, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let clean = self.options.clean_values;
        self.append(path, values, clean)
    }

    /// Appends every value at `path` exactly as given, ignoring
    /// [`TrieOptions::clean_values`].
    ///
    /// Parsed documents go through here: their values are already final, and a JSON
    /// string such as `"\"quoted\""` must keep its quotes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcfg::domain::path_trie::PathTrie;
    ///
    /// let mut trie = PathTrie::new();
    /// trie.put_verbatim("motto", [" \"as is\" "]);
    /// assert_eq!(trie.get_last("motto"), Some(" \"as is\" "));
    /// ```
    pub fn put_verbatim<I, S>(&mut self, path: &str, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.append(path, values, false)
    }

    fn append<I, S>(&mut self, path: &str, values: I, clean: bool) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(key) = self.resolve(path) else {
            return 0;
        };
        let id = self.find_or_create(&key);
        let node = &mut self.nodes[id.0];
        let before = node.values.len();
        node.values.extend(values.into_iter().map(|value| {
            let value = value.as_ref();
            if clean {
                clean_value(value).to_string()
            } else {
                value.to_string()
            }
        }));
        node.values.len() - before
    }

    /// Replaces the values at `path` with `values`. Children are left alone.
    pub fn put_replacing<I, S>(&mut self, path: &str, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.remove(path);
        self.put_all(path, values)
    }

    /// Returns every value stored at exactly `path`.
    ///
    /// A node that only has children, or whose values were removed, yields `None`.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        let id = self.find(path)?;
        let values = &self.nodes[id.0].values;
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    /// Returns the first value written at `path`.
    pub fn get_first(&self, path: &str) -> Option<&str> {
        self.get(path)?.first().map(String::as_str)
    }

    /// Returns the last value written at `path`.
    pub fn get_last(&self, path: &str) -> Option<&str> {
        self.get(path)?.last().map(String::as_str)
    }

    /// Resolves an indexed path such as `tags[1]` against the aggregate `tags`.
    ///
    /// Paths without a trailing index yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcfg::domain::path_trie::PathTrie;
    ///
    /// let mut trie = PathTrie::new();
    /// trie.put_all("tags", ["a", "b", "c"]);
    /// assert_eq!(trie.get_by_index("tags[1]"), Some("b"));
    /// assert_eq!(trie.get_by_index("tags[3]"), None);
    /// ```
    pub fn get_by_index(&self, indexed_path: &str) -> Option<&str> {
        let trimmed = indexed_path.trim();
        match split_index(trimmed) {
            (base, Some(index)) => self.get(base)?.get(index).map(String::as_str),
            (_, None) => None,
        }
    }

    /// Returns element `index` of the values at `path`, `None` when negative or out of range.
    pub fn get_at(&self, path: &str, index: i64) -> Option<&str> {
        let index = usize::try_from(index).ok()?;
        self.get(path)?.get(index).map(String::as_str)
    }

    /// Returns true if `path` holds values or has descendants that do.
    pub fn contains_key(&self, path: &str) -> bool {
        self.find(path)
            .map(|id| self.subtree_has_values(id))
            .unwrap_or(false)
    }

    /// Clears the values at exactly `path` and returns them. Descendants are untouched.
    pub fn remove(&mut self, path: &str) -> Option<Vec<String>> {
        let id = self.find(path)?;
        let previous = std::mem::take(&mut self.nodes[id.0].values);
        if previous.is_empty() {
            None
        } else {
            Some(previous)
        }
    }

    /// Drops every node and value.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(PathNode::root());
    }

    /// Total number of values stored across all paths.
    pub fn len(&self) -> usize {
        self.nodes.iter().map(|node| node.values.len()).sum()
    }

    /// Returns true if no path holds a value.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|node| node.values.is_empty())
    }

    /// Every path that holds at least one value, depth first in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries().into_iter().map(|(path, _)| path).collect()
    }

    /// Every `(path, values)` pair that holds at least one value, depth first in insertion
    /// order.
    pub fn entries(&self) -> Vec<(&str, &[String])> {
        let mut entries = Vec::new();
        self.walk(ROOT, &mut |_, node| {
            if !node.values.is_empty() {
                entries.push((node.full_path.as_str(), node.values.as_slice()));
            }
        });
        entries
    }

    /// Flattens the subtree under `path` into relative paths and their values.
    ///
    /// The node at `path` itself is not included. An empty path exports the whole trie.
    /// Returns `None` when no node exists at `path`, and an empty map for a section that
    /// exists but holds no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcfg::domain::path_trie::PathTrie;
    ///
    /// let mut trie = PathTrie::new();
    /// trie.put("db.host", "localhost");
    /// trie.put("db.pool.size", "4");
    ///
    /// let sub = trie.to_sub_map("db").unwrap();
    /// assert_eq!(sub["host"], vec!["localhost"]);
    /// assert_eq!(sub["pool.size"], vec!["4"]);
    /// assert_eq!(trie.to_sub_map("cache"), None);
    /// ```
    pub fn to_sub_map(&self, path: &str) -> Option<BTreeMap<String, Vec<String>>> {
        let id = self.subtree_root(path)?;
        let mut map = BTreeMap::new();
        for &child in &self.nodes[id.0].children {
            self.walk(child, &mut |node_id, node| {
                if !node.values.is_empty() {
                    map.insert(self.relative_path(node_id, id), node.values.clone());
                }
            });
        }
        Some(map)
    }

    /// Like [`to_sub_map`](Self::to_sub_map), converting every value into `T`.
    pub fn to_sub_map_as<T: ConfigScalar>(
        &self,
        path: &str,
    ) -> Result<Option<BTreeMap<String, Vec<T>>>> {
        let Some(sub) = self.to_sub_map(path) else {
            return Ok(None);
        };
        sub.into_iter()
            .map(|(relative, values)| {
                let key = join_path(path.trim(), &relative);
                let converted = convert_list_as::<T, _>(&key, &values)?;
                Ok((relative, converted))
            })
            .collect::<Result<_>>()
            .map(Some)
    }

    /// Materializes every immediate child of `path` as a `T`.
    ///
    /// Indexed children such as `servers[0]`, `servers[1]` are grouped into one entry
    /// `servers` that `T` must accept as a sequence. Returns `Ok(None)` when nothing
    /// exists at `path`.
    pub fn to_sub_map_of<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<BTreeMap<String, T>>> {
        let Some(id) = self.subtree_root(path) else {
            return Ok(None);
        };
        materialize::fields(self, id)
            .into_iter()
            .map(|(name, item)| {
                let value = materialize::from_item(&join_path(path.trim(), &name), item)?;
                Ok((name, value))
            })
            .collect::<Result<_>>()
            .map(Some)
    }

    /// Materializes the subtree at `path` into `T`.
    ///
    /// Field names are child segment keys. A node with one value is a scalar, with several
    /// values a list, and with children an object. An empty path materializes the whole
    /// trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcfg::domain::path_trie::PathTrie;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Server {
    ///     host: String,
    ///     port: u16,
    ///     tags: Vec<String>,
    /// }
    ///
    /// let mut trie = PathTrie::new();
    /// trie.put("server.host", "localhost");
    /// trie.put("server.port", "8080");
    /// trie.put_all("server.tags", ["a", "b"]);
    ///
    /// let server: Server = trie.to_object("server").unwrap();
    /// assert_eq!(server.host, "localhost");
    /// assert_eq!(server.port, 8080);
    /// assert_eq!(server.tags, vec!["a", "b"]);
    /// ```
    pub fn to_object<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let item = self.item(path).ok_or_else(|| ConfigError::MappingError {
            path: path.trim().to_string(),
            message: "no configuration found at this path".to_string(),
        })?;
        materialize::from_item(path.trim(), item)
    }

    /// Exports the subtree at `path` as a JSON value, `None` if nothing is stored there.
    pub fn to_json(&self, path: &str) -> Option<serde_json::Value> {
        let item = self.item(path)?;
        materialize::from_item::<serde_json::Value>(path.trim(), item).ok()
    }

    pub(crate) fn segment(&self, id: NodeId) -> &str {
        &self.nodes[id.0].segment
    }

    pub(crate) fn values(&self, id: NodeId) -> &[String] {
        &self.nodes[id.0].values
    }

    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Resolves `path` to something that can be materialized: a node, or a group of
    /// indexed siblings when only `path[0]`, `path[1]`, ... exist.
    fn item(&self, path: &str) -> Option<Item<'_>> {
        if path.trim().is_empty() {
            return Some(Item::Node(self, ROOT));
        }
        let key = self.resolve(path)?;
        let (parent, last) = match key.rfind('.') {
            Some(dot) => (self.find_resolved(&key[..dot]), &key[dot + 1..]),
            None => (Some(ROOT), key.as_str()),
        };
        if let Some(parent) = parent {
            if let Some(group) = materialize::indexed_group(self, parent, last) {
                return Some(group);
            }
        }
        self.find_resolved(&key).map(|id| Item::Node(self, id))
    }

    fn subtree_root(&self, path: &str) -> Option<NodeId> {
        if path.trim().is_empty() {
            Some(ROOT)
        } else {
            self.find(path)
        }
    }

    fn resolve(&self, path: &str) -> Option<String> {
        let key = if self.options.normalize_keys {
            normalize_key(path)
        } else {
            path.to_string()
        };
        if key.is_empty() || key.split('.').any(str::is_empty) {
            None
        } else {
            Some(key)
        }
    }

    fn find(&self, path: &str) -> Option<NodeId> {
        let key = self.resolve(path)?;
        self.find_resolved(&key)
    }

    fn find_resolved(&self, key: &str) -> Option<NodeId> {
        key.split('.').try_fold(ROOT, |current, segment| {
            self.nodes[current.0].index.get(segment).copied()
        })
    }

    fn find_or_create(&mut self, key: &str) -> NodeId {
        let mut current = ROOT;
        for segment in key.split('.') {
            current = match self.nodes[current.0].index.get(segment) {
                Some(&child) => child,
                None => {
                    let id = NodeId(self.nodes.len());
                    let parent = &self.nodes[current.0];
                    let node = PathNode {
                        segment: segment.to_string(),
                        full_path: join_path(&parent.full_path, segment),
                        values: Vec::new(),
                        children: Vec::new(),
                        index: HashMap::new(),
                        parent: Some(current),
                    };
                    self.nodes.push(node);
                    let parent = &mut self.nodes[current.0];
                    parent.children.push(id);
                    parent.index.insert(segment.to_string(), id);
                    id
                }
            };
        }
        current
    }

    fn subtree_has_values(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        !node.values.is_empty()
            || node
                .children
                .iter()
                .any(|&child| self.subtree_has_values(child))
    }

    /// Rebuilds the path of `id` below `ancestor` from the parent links.
    fn relative_path(&self, id: NodeId, ancestor: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                break;
            }
            let node = &self.nodes[node_id.0];
            segments.push(node.segment.as_str());
            current = node.parent;
        }
        segments.reverse();
        segments.join(".")
    }

    fn walk<'a, F>(&'a self, id: NodeId, visit: &mut F)
    where
        F: FnMut(NodeId, &'a PathNode),
    {
        let node = &self.nodes[id.0];
        visit(id, node);
        for &child in &node.children {
            self.walk(child, visit);
        }
    }
}

impl fmt::Display for PathTrie {
    /// Writes one `path: [values]` line per populated path.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, values) in self.entries() {
            writeln!(f, "{}: [{}]", path, values.join(", "))?;
        }
        Ok(())
    }
}
