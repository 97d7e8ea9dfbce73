// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests use property-based testing to verify that the path trie, the key
//! helpers and the converter hold their invariants for arbitrary inputs.

use pathcfg::domain::config_key::{normalize_key, split_index};
use pathcfg::domain::{ConfigKey, ConfigValue, PathTrie};
use proptest::prelude::*;

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9]{0,5}", 1..5).prop_map(|parts| parts.join("."))
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{0,8}"
}

// Test that a put is visible as the last value and grows the list by one
proptest! {
    #[test]
    fn test_put_then_get_ends_with_value(
        path in path_strategy(),
        earlier in prop::collection::vec(value_strategy(), 0..4),
        value in value_strategy()
    ) {
        let mut trie = PathTrie::new();
        trie.put_all(&path, &earlier);
        let before = trie.get(&path).map(|v| v.len()).unwrap_or(0);

        prop_assert_eq!(trie.put(&path, &value), 1);

        let values = trie.get(&path).unwrap();
        prop_assert_eq!(values.len(), before + 1);
        prop_assert_eq!(values.last().unwrap(), &value);
        prop_assert_eq!(trie.get_last(&path), Some(value.as_str()));
    }
}

// Test that positional reads agree with the value list
proptest! {
    #[test]
    fn test_get_at_matches_list(
        path in path_strategy(),
        values in prop::collection::vec(value_strategy(), 1..6),
        index in -3i64..10
    ) {
        let mut trie = PathTrie::new();
        trie.put_all(&path, &values);

        let expected = usize::try_from(index).ok().and_then(|i| values.get(i)).map(String::as_str);
        prop_assert_eq!(trie.get_at(&path, index), expected);
        prop_assert_eq!(trie.get_first(&path), Some(values[0].as_str()));
    }
}

// Test that the total value count matches the number of puts
proptest! {
    #[test]
    fn test_len_counts_every_put(
        puts in prop::collection::vec((path_strategy(), value_strategy()), 0..20)
    ) {
        let mut trie = PathTrie::new();
        for (path, value) in &puts {
            trie.put(path, value);
        }
        prop_assert_eq!(trie.len(), puts.len());
        prop_assert_eq!(trie.is_empty(), puts.is_empty());

        let total: usize = trie.entries().iter().map(|(_, values)| values.len()).sum();
        prop_assert_eq!(total, puts.len());
    }
}

// Test that every written path is enumerated exactly once
proptest! {
    #[test]
    fn test_keys_cover_written_paths(
        puts in prop::collection::vec((path_strategy(), value_strategy()), 1..20)
    ) {
        let mut trie = PathTrie::new();
        for (path, value) in &puts {
            trie.put(path, value);
        }

        let keys = trie.keys();
        let mut unique: Vec<&str> = puts.iter().map(|(p, _)| p.as_str()).collect();
        unique.sort();
        unique.dedup();

        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(sorted, unique);
        prop_assert_eq!(trie.to_sub_map("").map(|sub| sub.len()), Some(keys.len()));
    }
}

// Test that removing values leaves descendants intact
proptest! {
    #[test]
    fn test_remove_keeps_children(
        path in path_strategy(),
        child in "[a-z]{1,4}",
        value in value_strategy()
    ) {
        let mut trie = PathTrie::new();
        let child_path = format!("{}.{}", path, child);
        trie.put(&path, &value);
        trie.put(&child_path, &value);

        prop_assert_eq!(trie.remove(&path), Some(vec![value.clone()]));
        prop_assert_eq!(trie.get(&path), None);
        prop_assert!(trie.contains_key(&path));
        prop_assert_eq!(trie.get_last(&child_path), Some(value.as_str()));
    }
}

// Test that key normalization is idempotent
proptest! {
    #[test]
    fn test_normalize_key_idempotent(s in "[A-Za-z_.]{0,20}") {
        let once = normalize_key(&s);
        prop_assert_eq!(normalize_key(&once), once.clone());
        prop_assert!(!once.contains('_'));
        prop_assert_eq!(once.to_lowercase(), once);
    }
}

// Test that a well-formed trailing index is always recovered
proptest! {
    #[test]
    fn test_split_index_recovers_index(base in "[a-z]{1,8}", index in 0usize..10_000) {
        let indexed = format!("{}[{}]", base, index);
        prop_assert_eq!(split_index(&indexed), (base.as_str(), Some(index)));
        prop_assert!(ConfigKey::from(indexed.as_str()).is_indexed());
    }
}

// Test integer parsing
proptest! {
    #[test]
    fn test_i32_parsing_valid(n in prop::num::i32::ANY) {
        let value = ConfigValue::from(n.to_string());
        prop_assert_eq!(value.to::<i32>("test").unwrap(), n);
    }
}

proptest! {
    #[test]
    fn test_u64_parsing_valid(n in prop::num::u64::ANY) {
        let value = ConfigValue::from(n.to_string());
        prop_assert_eq!(value.to::<u64>("test").unwrap(), n);
    }
}

// Test float parsing
proptest! {
    #[test]
    fn test_f64_parsing_valid(n in prop::num::f64::NORMAL) {
        let value = ConfigValue::from(n.to_string());
        let parsed = value.to::<f64>("test").unwrap();
        // Allow for floating point precision issues
        prop_assert!((parsed - n).abs() < 1e-10 * n.abs().max(1.0));
    }
}

// Test that non-numeric strings fail integer parsing
proptest! {
    #[test]
    fn test_integer_parsing_non_numeric(
        s in "[a-zA-Z]\\PC*" // Strings starting with a letter
    ) {
        let value = ConfigValue::from(s);
        prop_assert!(value.to::<i32>("test").is_err());
    }
}

// Test that ConfigValue keeps its text verbatim
proptest! {
    #[test]
    fn test_config_value_from_any_string(s in "\\PC*") {
        let value = ConfigValue::from(s.clone());
        prop_assert_eq!(value.as_str(), s.as_str());
        prop_assert_eq!(value.to::<String>("test").unwrap(), s);
    }
}
