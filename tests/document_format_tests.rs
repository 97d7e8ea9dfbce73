// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the document formats.
//!
//! These tests load equivalent documents in each format and check that they produce
//! the same configuration, then cover format specific behavior end to end.

#![cfg(all(feature = "properties", feature = "yaml", feature = "json"))]

use pathcfg::prelude::*;
use std::fs;
use tempfile::TempDir;

const PROPERTIES: &str = "\
# service settings
service.name = orders
service.port = 8080
service.tags[0] = web
service.tags[1] = api
service.endpoints[0].host = a.local
service.endpoints[1].host = b.local
";

const STRUCTURED: &str = "\
# service settings
service:
  name: orders
  port: 8080
  tags: [web, api]
  endpoints:
    - host: a.local
    - host: b.local
";

const JSON: &str = r#"{
  // service settings
  "service": {
    "name": "orders",
    "port": 8080,
    "tags": ["web", "api"],
    "endpoints": [{"host": "a.local"}, {"host": "b.local"}]
  }
}"#;

fn store_from(dir: &TempDir, file_name: &str, content: &str) -> ConfigStore {
    let path = dir.path().join(file_name);
    fs::write(&path, content).unwrap();
    ConfigStore::builder().with_file(path).unwrap().build().unwrap()
}

#[test]
fn test_formats_agree() {
    let dir = TempDir::new().unwrap();
    let stores = [
        store_from(&dir, "app.properties", PROPERTIES),
        store_from(&dir, "app.yml", STRUCTURED),
        store_from(&dir, "app.json", JSON),
    ];

    for store in &stores {
        assert_eq!(store.get_value("service.name").as_deref(), Some("orders"));
        assert_eq!(store.get::<u16>("service.port").unwrap(), Some(8080));
        assert_eq!(store.get_values("service.tags").unwrap(), vec!["web", "api"]);
        assert_eq!(store.get_value("service.tags[1]").as_deref(), Some("api"));
        assert_eq!(
            store.get_value("service.endpoints[1].host").as_deref(),
            Some("b.local")
        );
    }
}

#[test]
fn test_properties_aggregate_over_indexed_objects() {
    let dir = TempDir::new().unwrap();
    let store = store_from(&dir, "app.properties", PROPERTIES);

    assert_eq!(
        store.get_values("service.endpoints.host").unwrap(),
        vec!["a.local", "b.local"]
    );
}

#[test]
fn test_structured_text_explicit_and_auto_indices() {
    let dir = TempDir::new().unwrap();
    let store = store_from(
        &dir,
        "list.yaml",
        "items:\n  - first\n  - second\nitems[0]: pinned\n",
    );

    // Auto indices skip the explicit one
    assert_eq!(store.get_value("items[0]").as_deref(), Some("pinned"));
    assert_eq!(store.get_value("items[1]").as_deref(), Some("first"));
    assert_eq!(store.get_value("items[2]").as_deref(), Some("second"));
}

#[test]
fn test_structured_text_comments_and_quotes() {
    let dir = TempDir::new().unwrap();
    let store = store_from(
        &dir,
        "quoted.yml",
        "url: http://example.com:8080/path # trailing\nmotto: \"keep # this\"\nempty:\n",
    );

    assert_eq!(
        store.get_value("url").as_deref(),
        Some("http://example.com:8080/path")
    );
    assert_eq!(store.get_value("motto").as_deref(), Some("keep # this"));
    assert_eq!(store.get_value("empty").as_deref(), Some(""));
}

#[test]
fn test_structured_text_bad_indentation_names_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yml");
    fs::write(&path, "parent:\n    child: 1\n  sibling: 2\n").unwrap();

    let result = ConfigStore::builder()
        .with_file(&path)
        .unwrap()
        .strict(true)
        .build();

    match result {
        Err(ConfigError::BadIndentation { key, line }) => {
            assert_eq!(key, "sibling");
            assert_eq!(line, 3);
        }
        other => panic!("expected bad indentation, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_json_nested_arrays_and_null() {
    let dir = TempDir::new().unwrap();
    let store = store_from(&dir, "grid.json", r#"{"grid": [[1, 2], [3]], "unset": null}"#);

    assert_eq!(store.get_list::<u8>("grid[0]").unwrap(), vec![1, 2]);
    assert_eq!(store.get_value("grid[1][0]").as_deref(), Some("3"));
    assert_eq!(store.get_value("unset").as_deref(), Some(""));

    let grid: Vec<Vec<u8>> = store.get_object("grid").unwrap();
    assert_eq!(grid, vec![vec![1, 2], vec![3]]);
}

#[test]
fn test_parsers_directly() {
    let entries = PropertiesParser::new().parse("a=1").unwrap();
    assert_eq!(entries, vec![("a".to_string(), "1".to_string())]);

    let entries = YamlParser::new().parse("a:\n  b: 2\n").unwrap();
    assert_eq!(entries, vec![("a.b".to_string(), "2".to_string())]);

    let entries = JsonParser::new().parse(r#"{"a": {"b": 3}}"#).unwrap();
    assert_eq!(entries, vec![("a.b".to_string(), "3".to_string())]);
}

#[test]
fn test_documents_strip_a_single_quote_layer() {
    let store = ConfigStore::builder()
        .with_document("props", "properties", "props.k = '\"x\"'\n")
        .unwrap()
        .with_document("text", "yml", "text:\n  k: '\"x\"'\n  list: ['\"a\"', b]\n")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(store.get_values("props.k").unwrap(), vec!["\"x\""]);
    assert_eq!(store.get_values("text.k").unwrap(), vec!["\"x\""]);
    assert_eq!(store.get_values("text.list").unwrap(), vec!["\"a\"", "b"]);
}

#[test]
fn test_json_strings_are_kept_verbatim() {
    let store = ConfigStore::builder()
        .with_document(
            "doc",
            "json",
            r#"{"q": "\"quoted\"", "s": "'single'", "pad": "  x  ", "tags": [" a ", "\"b\""]}"#,
        )
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(store.get_value("q").as_deref(), Some("\"quoted\""));
    assert_eq!(store.get_value("s").as_deref(), Some("'single'"));
    assert_eq!(store.get_value("pad").as_deref(), Some("  x  "));
    assert_eq!(store.get_values("tags").unwrap(), vec![" a ", "\"b\""]);
}

#[test]
fn test_program_writes_are_still_cleaned() {
    let store = ConfigStore::builder()
        .with_document("doc", "json", r#"{"q": "\"quoted\""}"#)
        .unwrap()
        .build()
        .unwrap();

    store.put("q", " 'set' ");
    assert_eq!(store.get_values("q").unwrap(), vec!["\"quoted\"", "set"]);
}
