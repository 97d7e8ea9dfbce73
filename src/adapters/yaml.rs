// SPDX-License-Identifier: MIT OR Apache-2.0

//! Indented structured-text (YAML-like) document parser.
//!
//! This module provides a parser for documents that express nesting through leading
//! whitespace. It understands the subset of YAML that configuration files actually use:
//!
//! ```yaml
//! server:
//!   host: localhost        # trailing comments are dropped
//!   tags: [web, "a, b"]
//!   endpoints:
//!     - host: a
//!       port: 80
//!   aliases:
//!   - www
//!   - api
//! ```
//!
//! There is no grammar. Lines are classified one by one, attached to a tree by comparing
//! their depth with the previous line, and the tree is flattened into dotted paths.

use crate::domain::config_key::{join_path, split_index};
use crate::domain::config_value::strip_quotes;
use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigParser, Entries};
use std::collections::{HashMap, HashSet};

/// Structured-text parser implementation.
///
/// # Emitted paths
///
/// - `key: value` emits `(key, value)`.
/// - `key:` with nested lines emits the nested lines under `key.`; with nothing nested it
///   emits `(key, "")`.
/// - `key: [a, b]` emits `key[0]`, `key[1]` and the aggregate `key` once per element.
/// - `- value` under `key:` emits `key[i]` and the aggregate `key`.
/// - `- field: value` under `key:` starts the object element `key[i]`; lines indented under
///   the dash are further fields of the same element. No aggregate is emitted for objects.
/// - `key[n]: value` emits `key[n]` and the aggregate `key`.
///
/// Explicit indices win: automatic indices take the smallest index not used anywhere in
/// the document for the same array.
///
/// # Indentation
///
/// The leading whitespace of the first indented line is the indentation unit. Every other
/// indented line must use a whole number of units, and a dedent must land on the depth of
/// an enclosing line; both violations are [`ConfigError::BadIndentation`]. Dash elements may
/// sit at the same depth as the key that owns them. Lines below a `- key: value` element
/// may also line up with `key` itself, so with a four space unit
///
/// ```yaml
/// servers:
///     - host: a
///       port: 80
/// ```
///
/// is one element with two fields.
///
/// # Examples
///
/// ```rust
/// use pathcfg::adapters::YamlParser;
/// use pathcfg::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let entries = parser.parse("example:\n  value1: Hello 1\n  value2: \"Hello 2\"").unwrap();
/// assert_eq!(
///     entries,
///     vec![
///         ("example.value1".to_string(), "Hello 1".to_string()),
///         ("example.value2".to_string(), "Hello 2".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new structured-text parser.
    pub fn new() -> Self {
        YamlParser
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<Entries> {
        let tree = Tree::build(content)?;

        // First pass only discovers explicit indices; its output is discarded.
        let mut discovery = Indices::default();
        tree.emit_all(&mut discovery, &mut Entries::new())?;

        let mut indices = Indices::seeded(discovery.explicit);
        let mut entries = Entries::new();
        tree.emit_all(&mut indices, &mut entries)?;

        tracing::debug!("Parsed {} structured-text entries", entries.len());
        Ok(entries)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yml", "yaml"]
    }
}

/// What follows the colon of a `key:` line.
#[derive(Debug, Clone, PartialEq)]
enum Body {
    Empty,
    Scalar(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
enum LineKind {
    /// `key: ...`
    Field { key: String, body: Body },
    /// `- value`
    Item(String),
    /// `- key: ...`
    ObjectItem { key: String, body: Body },
}

#[derive(Debug)]
struct Line {
    number: usize,
    /// Width of the leading whitespace.
    depth: usize,
    /// For `- key: ...` lines, the whitespace that lines up with `key`.
    continuation: Option<String>,
    kind: LineKind,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl Line {
    fn label(&self) -> &str {
        match &self.kind {
            LineKind::Field { key, .. } | LineKind::ObjectItem { key, .. } => key,
            LineKind::Item(value) => value,
        }
    }

    fn is_header(&self) -> bool {
        matches!(&self.kind, LineKind::Field { body: Body::Empty, .. })
    }

    fn is_item(&self) -> bool {
        matches!(&self.kind, LineKind::Item(_) | LineKind::ObjectItem { .. })
    }

    fn accepts_children(&self) -> bool {
        matches!(
            &self.kind,
            LineKind::Field { body: Body::Empty, .. } | LineKind::ObjectItem { .. }
        )
    }

    fn bad_indentation(&self) -> ConfigError {
        ConfigError::BadIndentation {
            key: self.label().to_string(),
            line: self.number,
        }
    }
}

/// Index bookkeeping per array path.
#[derive(Debug, Default)]
struct Indices {
    explicit: HashMap<String, HashSet<usize>>,
    taken: HashMap<String, HashSet<usize>>,
    cursors: HashMap<String, usize>,
}

impl Indices {
    fn seeded(explicit: HashMap<String, HashSet<usize>>) -> Self {
        Indices {
            taken: explicit.clone(),
            explicit,
            cursors: HashMap::new(),
        }
    }

    fn reserve(&mut self, array: &str, index: usize) {
        self.explicit.entry(array.to_string()).or_default().insert(index);
        self.taken.entry(array.to_string()).or_default().insert(index);
    }

    /// Smallest index of `array` not taken yet.
    fn next(&mut self, array: &str) -> usize {
        let taken = self.taken.entry(array.to_string()).or_default();
        let cursor = self.cursors.entry(array.to_string()).or_insert(0);
        while taken.contains(cursor) {
            *cursor += 1;
        }
        let index = *cursor;
        taken.insert(index);
        *cursor += 1;
        index
    }
}

struct Tree {
    lines: Vec<Line>,
    roots: Vec<usize>,
}

impl Tree {
    fn build(content: &str) -> Result<Self> {
        let mut tree = Tree {
            lines: Vec::new(),
            roots: Vec::new(),
        };
        let mut unit: Option<&str> = None;

        for (offset, raw) in content.lines().enumerate() {
            let text = raw.trim_start_matches([' ', '\t']);
            let trimmed = text.trim_end();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---" || trimmed == "..." {
                continue;
            }

            let indent = &raw[..raw.len() - text.len()];
            let kind = classify(trimmed, offset + 1)?;
            let continuation = match kind {
                LineKind::ObjectItem { .. } => {
                    let gap = trimmed[1..].len() - trimmed[1..].trim_start().len();
                    Some(format!("{} {}", indent, &trimmed[1..1 + gap]))
                }
                _ => None,
            };
            let mut line = Line {
                number: offset + 1,
                depth: indent.len(),
                continuation,
                kind,
                parent: None,
                children: Vec::new(),
            };

            if !indent.is_empty() {
                let unit = *unit.get_or_insert(indent);
                if !is_units(indent, unit) && !tree.continues_element(indent, unit) {
                    return Err(line.bad_indentation());
                }
            }

            line.parent = tree.attach(&line)?;
            let id = tree.lines.len();
            match line.parent {
                Some(parent) => tree.lines[parent].children.push(id),
                None => tree.roots.push(id),
            }
            tree.lines.push(line);
        }

        Ok(tree)
    }

    /// True if `indent` lines up with the key of an open `- key:` element, plus whole units.
    fn continues_element(&self, indent: &str, unit: &str) -> bool {
        let mut current = self.lines.len().checked_sub(1);
        while let Some(id) = current {
            let line = &self.lines[id];
            if let Some(rest) = line
                .continuation
                .as_deref()
                .and_then(|prefix| indent.strip_prefix(prefix))
            {
                if is_units(rest, unit) {
                    return true;
                }
            }
            current = line.parent;
        }
        false
    }

    /// Finds the parent of `line` relative to the previously attached line.
    fn attach(&self, line: &Line) -> Result<Option<usize>> {
        let Some(previous) = self.lines.len().checked_sub(1) else {
            return if line.depth == 0 {
                Ok(None)
            } else {
                Err(line.bad_indentation())
            };
        };

        if line.depth > self.lines[previous].depth {
            return if self.lines[previous].accepts_children() {
                Ok(Some(previous))
            } else {
                Err(line.bad_indentation())
            };
        }

        let mut current = previous;
        while self.lines[current].depth > line.depth {
            current = self.lines[current].parent.ok_or_else(|| line.bad_indentation())?;
        }
        if self.lines[current].depth != line.depth {
            return Err(line.bad_indentation());
        }

        if line.is_item() {
            // compact list: a dash at the depth of its key
            return Ok(if self.lines[current].is_header() {
                Some(current)
            } else {
                self.lines[current].parent
            });
        }

        // step out of compact list elements that share the key's depth
        while let Some(parent) = self.lines[current].parent {
            if self.lines[parent].depth == line.depth && self.lines[current].is_item() {
                current = parent;
            } else {
                break;
            }
        }
        Ok(self.lines[current].parent)
    }

    fn emit_all(&self, indices: &mut Indices, out: &mut Entries) -> Result<()> {
        for &root in &self.roots {
            self.emit(root, "", indices, out)?;
        }
        Ok(())
    }

    fn emit(&self, id: usize, prefix: &str, indices: &mut Indices, out: &mut Entries) -> Result<()> {
        let line = &self.lines[id];
        match &line.kind {
            LineKind::Field { key, body } => self.emit_field(key, body, &line.children, prefix, indices, out),
            LineKind::Item(value) => {
                let array = self.owning_array(line, prefix)?;
                let index = indices.next(array);
                out.push((format!("{}[{}]", array, index), value.clone()));
                out.push((array.to_string(), value.clone()));
                Ok(())
            }
            LineKind::ObjectItem { key, body } => {
                let array = self.owning_array(line, prefix)?;
                let element = format!("{}[{}]", array, indices.next(array));
                self.emit_field(key, body, &[], &element, indices, out)?;
                for &child in &line.children {
                    self.emit(child, &element, indices, out)?;
                }
                Ok(())
            }
        }
    }

    fn emit_field(
        &self,
        key: &str,
        body: &Body,
        children: &[usize],
        prefix: &str,
        indices: &mut Indices,
        out: &mut Entries,
    ) -> Result<()> {
        let path = join_path(prefix, key);
        let (base, explicit) = split_index(key);
        let aggregate = join_path(prefix, base);
        if let Some(index) = explicit {
            indices.reserve(&aggregate, index);
        }

        match body {
            Body::Empty if children.is_empty() => out.push((path, String::new())),
            Body::Empty => {
                for &child in children {
                    self.emit(child, &path, indices, out)?;
                }
            }
            Body::Scalar(value) => {
                out.push((path, value.clone()));
                if explicit.is_some() {
                    out.push((aggregate, value.clone()));
                }
            }
            Body::List(items) => {
                for item in items {
                    let index = indices.next(&path);
                    out.push((format!("{}[{}]", path, index), item.clone()));
                    out.push((path.clone(), item.clone()));
                }
            }
        }
        Ok(())
    }

    fn owning_array<'a>(&self, line: &Line, prefix: &'a str) -> Result<&'a str> {
        if prefix.is_empty() {
            return Err(ConfigError::parse(format!(
                "list element '{}' on line {} has no enclosing key",
                line.label(),
                line.number
            )));
        }
        Ok(prefix)
    }
}

/// True if `indent` is `unit` repeated zero or more times.
fn is_units(indent: &str, unit: &str) -> bool {
    indent.len() % unit.len() == 0 && indent == unit.repeat(indent.len() / unit.len())
}

/// Classifies one line with its indentation removed.
fn classify(text: &str, number: usize) -> Result<LineKind> {
    if let Some(rest) = text.strip_prefix('-') {
        if rest.is_empty() || rest.starts_with([' ', '\t']) {
            let content = rest.trim();
            if let Some(colon) = key_colon(content) {
                let key = strip_quotes(content[..colon].trim());
                if !key.is_empty() {
                    return Ok(LineKind::ObjectItem {
                        key: key.to_string(),
                        body: body(&content[colon + 1..]),
                    });
                }
            }
            return Ok(LineKind::Item(clean(content)));
        }
    }

    let colon = key_colon(text)
        .or_else(|| first_colon(text))
        .ok_or_else(|| ConfigError::parse(format!("expected 'key: value' or '- value' on line {}: {}", number, text)))?;
    let key = strip_quotes(text[..colon].trim());
    if key.is_empty() {
        return Err(ConfigError::parse(format!("missing key on line {}", number)));
    }
    Ok(LineKind::Field {
        key: key.to_string(),
        body: body(&text[colon + 1..]),
    })
}

fn body(raw: &str) -> Body {
    let value = strip_comment(raw);
    let value = value.trim();
    if value.is_empty() {
        Body::Empty
    } else if value.len() >= 2 && value.starts_with('[') && value.ends_with(']') {
        Body::List(split_list(&value[1..value.len() - 1]))
    } else {
        Body::Scalar(strip_quotes(value).to_string())
    }
}

fn clean(raw: &str) -> String {
    strip_quotes(strip_comment(raw).trim()).to_string()
}

/// Position of the first `:` outside quotes that is followed by whitespace or the end.
fn key_colon(text: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') if i == 0 => quote = Some(c),
            (None, ':') => match chars.peek() {
                None => return Some(i),
                Some(&(_, next)) if next.is_whitespace() => return Some(i),
                _ => {}
            },
            _ => {}
        }
    }
    None
}

/// Position of the first `:` outside a leading quoted key.
fn first_colon(text: &str) -> Option<usize> {
    let start = match text.chars().next() {
        Some(q @ ('"' | '\'')) => text[1..].find(q).map(|end| end + 2)?,
        _ => 0,
    };
    text[start..].find(':').map(|i| i + start)
}

/// Drops a trailing comment: a `#` outside quotes that starts the value or follows
/// whitespace and is not escaped. Escaped `\#` becomes `#`.
fn strip_comment(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut quote: Option<char> = None;
    let mut previous: Option<char> = None;
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => {
                if previous.map_or(true, |p| p.is_whitespace() || p == '[' || p == ',') {
                    quote = Some(c);
                }
            }
            None if c == '\\' && chars.peek() == Some(&'#') => {
                result.push('#');
                chars.next();
                previous = Some('#');
                continue;
            }
            None if c == '#' && previous.map_or(true, char::is_whitespace) => break,
            None => {}
        }
        result.push(c);
        previous = Some(c);
    }
    result
}

/// Splits the inside of `[ ... ]` on commas outside quotes.
fn split_list(inner: &str) -> Vec<String> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    for c in inner.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == ',' => {
                items.push(strip_quotes(current.trim()).to_string());
                current.clear();
                continue;
            }
            None => {}
        }
        current.push(c);
    }
    items.push(strip_quotes(current.trim()).to_string());
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<(String, String)> {
        YamlParser::new().parse(content).unwrap()
    }

    fn values<'a>(entries: &'a [(String, String)], path: &str) -> Vec<&'a str> {
        entries
            .iter()
            .filter(|(k, _)| k == path)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_nested_fields_and_quotes() {
        let entries = parse("example:\n  value1: Hello 1\n  value2: \"Hello 2\"\n");
        assert_eq!(values(&entries, "example.value1"), vec!["Hello 1"]);
        assert_eq!(values(&entries, "example.value2"), vec!["Hello 2"]);
    }

    #[test]
    fn test_dotted_keys_mix_with_nesting() {
        let content = "example.property.value1: Hello 1\nexample:\n  property:\n    value3: 'Hello 3'\n";
        let entries = parse(content);
        assert_eq!(values(&entries, "example.property.value1"), vec!["Hello 1"]);
        assert_eq!(values(&entries, "example.property.value3"), vec!["Hello 3"]);
    }

    #[test]
    fn test_inline_array() {
        let entries = parse("tags: [a, b, c]");
        assert_eq!(values(&entries, "tags[0]"), vec!["a"]);
        assert_eq!(values(&entries, "tags[2]"), vec!["c"]);
        assert_eq!(values(&entries, "tags"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_inline_array_quoted_commas_and_empty() {
        let entries = parse("tags: [\"a, b\", 'c']\nnone: []");
        assert_eq!(values(&entries, "tags"), vec!["a, b", "c"]);
        assert!(values(&entries, "none").is_empty());
    }

    #[test]
    fn test_dash_elements() {
        let entries = parse("list:\n  - one\n  - \"two\"\n");
        assert_eq!(values(&entries, "list[0]"), vec!["one"]);
        assert_eq!(values(&entries, "list[1]"), vec!["two"]);
        assert_eq!(values(&entries, "list"), vec!["one", "two"]);
    }

    #[test]
    fn test_compact_dash_elements() {
        let entries = parse("list:\n- one\n- two\nafter: x\n");
        assert_eq!(values(&entries, "list"), vec!["one", "two"]);
        assert_eq!(values(&entries, "after"), vec!["x"]);
    }

    #[test]
    fn test_object_elements() {
        let content = "servers:\n  - host: a\n    port: 80\n  - host: b\n    port: 81\nname: x\n";
        let entries = parse(content);
        assert_eq!(values(&entries, "servers[0].host"), vec!["a"]);
        assert_eq!(values(&entries, "servers[0].port"), vec!["80"]);
        assert_eq!(values(&entries, "servers[1].host"), vec!["b"]);
        assert_eq!(values(&entries, "servers[1].port"), vec!["81"]);
        assert_eq!(values(&entries, "name"), vec!["x"]);
        assert!(values(&entries, "servers").is_empty());
    }

    #[test]
    fn test_object_element_fields_align_with_first_key() {
        let content = "servers:\n    - host: a\n      port: 80\n      tls:\n          cert: x\n    - host: b\nname: n\n";
        let entries = parse(content);
        assert_eq!(values(&entries, "servers[0].host"), vec!["a"]);
        assert_eq!(values(&entries, "servers[0].port"), vec!["80"]);
        assert_eq!(values(&entries, "servers[0].tls.cert"), vec!["x"]);
        assert_eq!(values(&entries, "servers[1].host"), vec!["b"]);
        assert_eq!(values(&entries, "name"), vec!["n"]);
    }

    #[test]
    fn test_misaligned_element_field_is_rejected() {
        let content = "servers:\n    - host: a\n       port: 80\n";
        let err = YamlParser::new().parse(content).unwrap_err();
        assert!(matches!(err, ConfigError::BadIndentation { ref key, line: 3 } if key == "port"));
    }

    #[test]
    fn test_compact_object_elements() {
        let content = "servers:\n- host: a\n  port: 80\n- host: b\nnext: y\n";
        let entries = parse(content);
        assert_eq!(values(&entries, "servers[0].port"), vec!["80"]);
        assert_eq!(values(&entries, "servers[1].host"), vec!["b"]);
        assert_eq!(values(&entries, "next"), vec!["y"]);
    }

    #[test]
    fn test_explicit_index_wins_over_auto() {
        let content = "tags:\n  - a\n  - b\ntags[0]: z\n";
        let entries = parse(content);
        assert_eq!(values(&entries, "tags[0]"), vec!["z"]);
        assert_eq!(values(&entries, "tags[1]"), vec!["a"]);
        assert_eq!(values(&entries, "tags[2]"), vec!["b"]);
        assert_eq!(values(&entries, "tags"), vec!["a", "b", "z"]);
    }

    #[test]
    fn test_indexed_key_emits_aggregate() {
        let entries = parse("ports[1]: 443\nports[0]: 80\n");
        assert_eq!(values(&entries, "ports[1]"), vec!["443"]);
        assert_eq!(values(&entries, "ports"), vec!["443", "80"]);
    }

    #[test]
    fn test_trailing_comments() {
        let content = "a: value # comment\nb: \"quoted # kept\"\nc: a\\#b\nd: x#y\ne: # only comment\n";
        let entries = parse(content);
        assert_eq!(values(&entries, "a"), vec!["value"]);
        assert_eq!(values(&entries, "b"), vec!["quoted # kept"]);
        assert_eq!(values(&entries, "c"), vec!["a#b"]);
        assert_eq!(values(&entries, "d"), vec!["x#y"]);
        assert_eq!(values(&entries, "e"), vec![""]);
    }

    #[test]
    fn test_full_line_comments_and_blank_lines() {
        let entries = parse("# header\n\na:\n  # inside\n\n  b: 1\n");
        assert_eq!(entries, vec![("a.b".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_header_without_children_is_empty() {
        let entries = parse("empty:\nfull: 1\n");
        assert_eq!(values(&entries, "empty"), vec![""]);
    }

    #[test]
    fn test_urls_keep_colons() {
        let entries = parse("url: http://localhost:8080/path\nlist:\n  - http://a:1\n");
        assert_eq!(values(&entries, "url"), vec!["http://localhost:8080/path"]);
        assert_eq!(values(&entries, "list"), vec!["http://a:1"]);
    }

    #[test]
    fn test_tab_indentation() {
        let entries = parse("a:\n\tb:\n\t\tc: 1\n");
        assert_eq!(values(&entries, "a.b.c"), vec!["1"]);
    }

    #[test]
    fn test_dedent_without_matching_ancestor() {
        let content = "a:\n  b:\n      c: 1\n    d: 2\n";
        let err = YamlParser::new().parse(content).unwrap_err();
        assert!(matches!(err, ConfigError::BadIndentation { ref key, line: 4 } if key == "d"));
    }

    #[test]
    fn test_inconsistent_unit() {
        let content = "a:\n    b: 1\n  c: 2\n";
        let err = YamlParser::new().parse(content).unwrap_err();
        assert!(matches!(err, ConfigError::BadIndentation { ref key, line: 3 } if key == "c"));
    }

    #[test]
    fn test_mixed_tabs_and_spaces() {
        let err = YamlParser::new().parse("a:\n  b:\n\t\tc: 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::BadIndentation { .. }));
    }

    #[test]
    fn test_indented_first_line() {
        let err = YamlParser::new().parse("  a: 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::BadIndentation { ref key, line: 1 } if key == "a"));
    }

    #[test]
    fn test_child_under_scalar_is_rejected() {
        let err = YamlParser::new().parse("a: 1\n  b: 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::BadIndentation { ref key, .. } if key == "b"));
    }

    #[test]
    fn test_root_dash_is_error() {
        let err = YamlParser::new().parse("- a\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_line_without_key_is_error() {
        let err = YamlParser::new().parse("a: 1\njust text\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_document_markers_are_ignored() {
        let entries = parse("---\na: 1\n...\n");
        assert_eq!(values(&entries, "a"), vec!["1"]);
    }

    #[test]
    fn test_key_without_space_after_colon() {
        let entries = parse("a:1\n");
        assert_eq!(values(&entries, "a"), vec!["1"]);
    }

    #[test]
    fn test_strip_comment_helper() {
        assert_eq!(strip_comment(" value # c"), " value ");
        assert_eq!(strip_comment("#all"), "");
        assert_eq!(strip_comment(" 'a # b' # c"), " 'a # b' ");
    }

    #[test]
    fn test_split_list_helper() {
        assert_eq!(split_list(" a , 'b,c' "), vec!["a", "b,c"]);
        assert_eq!(split_list("  "), Vec::<String>::new());
    }
}
