// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde materialization of trie subtrees.
//!
//! A subtree is exposed to serde as a self-describing document: a node with children is a
//! map keyed by segment, a node with one value is a string, a node with several values is a
//! sequence, and indexed siblings (`items[0]`, `items[1]`) form the sequence `items`.
//! Primitive targets parse the string on demand, so `port: u16` reads `"8080"` directly.
//!
//! A node holding both values and children materializes as its children. Only a single
//! trailing index per segment is grouped: `matrix[0][1]` becomes element 1 of `matrix[0]`.

use crate::domain::config_key::split_index;
use crate::domain::convert::ConfigScalar;
use crate::domain::errors::{ConfigError, Result};
use crate::domain::path_trie::{NodeId, PathTrie};
use serde::de::{self, DeserializeOwned, DeserializeSeed, IntoDeserializer, MapAccess, SeqAccess, Visitor};
use std::collections::HashMap;
use thiserror::Error;

/// Something in the trie that can be handed to serde.
pub(crate) enum Item<'a> {
    /// A single node and everything below it.
    Node(&'a PathTrie, NodeId),
    /// Indexed siblings sorted by index.
    Array(&'a PathTrie, Vec<(usize, NodeId)>),
    /// One value out of a node's value list.
    Text(&'a str),
    /// A gap in an indexed array or an absent section.
    Missing,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub(crate) struct DeError(String);

impl de::Error for DeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        DeError(msg.to_string())
    }
}

/// Deserializes `T` from `item`, reporting failures against `path`.
pub(crate) fn from_item<T: DeserializeOwned>(path: &str, item: Item<'_>) -> Result<T> {
    T::deserialize(ItemDeserializer { item }).map_err(|e| ConfigError::MappingError {
        path: path.to_string(),
        message: e.0,
    })
}

/// The named fields of a node: plain children by segment, indexed children grouped by
/// their base name. Grouped arrays take precedence over a plain child of the same name.
pub(crate) fn fields(trie: &PathTrie, id: NodeId) -> Vec<(String, Item<'_>)> {
    enum Slot {
        Plain(NodeId),
        Group(Vec<(usize, NodeId)>),
    }

    let mut slots: Vec<(String, Slot)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for &child in trie.children(id) {
        let segment = trie.segment(child);
        match split_index(segment) {
            (base, Some(index)) => match positions.get(base) {
                Some(&position) => match &mut slots[position].1 {
                    Slot::Group(members) => members.push((index, child)),
                    slot => *slot = Slot::Group(vec![(index, child)]),
                },
                None => {
                    positions.insert(base, slots.len());
                    slots.push((base.to_string(), Slot::Group(vec![(index, child)])));
                }
            },
            (_, None) => {
                if !positions.contains_key(segment) {
                    positions.insert(segment, slots.len());
                    slots.push((segment.to_string(), Slot::Plain(child)));
                }
            }
        }
    }

    slots
        .into_iter()
        .map(|(name, slot)| {
            let item = match slot {
                Slot::Plain(child) => Item::Node(trie, child),
                Slot::Group(mut members) => {
                    members.sort_by_key(|&(index, _)| index);
                    Item::Array(trie, members)
                }
            };
            (name, item)
        })
        .collect()
}

/// The children of `parent` named `name[i]`, as one array item.
pub(crate) fn indexed_group<'a>(trie: &'a PathTrie, parent: NodeId, name: &str) -> Option<Item<'a>> {
    let mut members: Vec<(usize, NodeId)> = trie
        .children(parent)
        .iter()
        .filter_map(|&child| match split_index(trie.segment(child)) {
            (base, Some(index)) if base == name => Some((index, child)),
            _ => None,
        })
        .collect();
    if members.is_empty() {
        return None;
    }
    members.sort_by_key(|&(index, _)| index);
    Some(Item::Array(trie, members))
}

struct ItemDeserializer<'de> {
    item: Item<'de>,
}

impl<'de> ItemDeserializer<'de> {
    /// The scalar text of the item. Several values read as the last one.
    fn text(&self) -> Option<&'de str> {
        match self.item {
            Item::Text(text) => Some(text),
            Item::Node(trie, id) => trie.values(id).last().map(String::as_str),
            _ => None,
        }
    }

    fn scalar<T: ConfigScalar>(&self) -> std::result::Result<T, DeError> {
        let text = self
            .text()
            .ok_or_else(|| DeError(format!("expected a {} value, found {}", T::KIND, self.describe())))?;
        T::from_config_str("", text).map_err(|_| DeError(format!("invalid {} value '{}'", T::KIND, text)))
    }

    fn describe(&self) -> &'static str {
        match &self.item {
            Item::Node(trie, id) if !trie.children(*id).is_empty() => "a map",
            Item::Node(..) => "no value",
            Item::Array(..) => "a sequence",
            Item::Text(_) => "a string",
            Item::Missing => "nothing",
        }
    }

    fn is_empty(&self) -> bool {
        match &self.item {
            Item::Missing => true,
            Item::Text(text) => text.is_empty(),
            Item::Node(trie, id) => {
                trie.children(*id).is_empty()
                    && trie.values(*id).iter().all(|value| value.is_empty())
                    && trie.values(*id).len() <= 1
            }
            Item::Array(..) => false,
        }
    }
}

macro_rules! deserialize_scalar {
    ($($method:ident => $visit:ident : $ty:ty),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
                visitor.$visit(self.scalar::<$ty>()?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ItemDeserializer<'de> {
    type Error = DeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
        match self.item {
            Item::Text(text) => visitor.visit_borrowed_str(text),
            Item::Missing => visitor.visit_unit(),
            Item::Array(trie, members) => visitor.visit_seq(ArrayAccess::new(trie, members)),
            Item::Node(trie, id) => {
                if !trie.children(id).is_empty() {
                    return visitor.visit_map(FieldAccess::new(fields(trie, id)));
                }
                match trie.values(id) {
                    [] => visitor.visit_unit(),
                    [one] => visitor.visit_borrowed_str(one),
                    many => visitor.visit_seq(ValueAccess::new(many.iter().map(String::as_str).collect())),
                }
            }
        }
    }

    deserialize_scalar! {
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
        deserialize_char => visit_char: char,
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
        match self.text() {
            Some(text) if !matches!(&self.item, Item::Node(trie, id) if !trie.children(*id).is_empty()) => {
                visitor.visit_borrowed_str(text)
            }
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
        self.deserialize_any(visitor)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
        self.deserialize_any(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
        if self.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> std::result::Result<V::Value, DeError> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> std::result::Result<V::Value, DeError> {
        visitor.visit_newtype_struct(self)
    }

    /// Accepts indexed siblings, a multi-valued node, or a single value as a one-element list.
    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
        match self.item {
            Item::Missing => visitor.visit_seq(ValueAccess::new(Vec::new())),
            Item::Text(text) => visitor.visit_seq(ValueAccess::new(vec![text])),
            Item::Node(trie, id) if trie.children(id).is_empty() => {
                visitor.visit_seq(ValueAccess::new(trie.values(id).iter().map(String::as_str).collect()))
            }
            item => ItemDeserializer { item }.deserialize_any(visitor),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> std::result::Result<V::Value, DeError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> std::result::Result<V::Value, DeError> {
        self.deserialize_seq(visitor)
    }

    /// An absent or empty section reads as an empty map so defaulted fields still apply.
    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
        match self.item {
            Item::Missing => visitor.visit_map(FieldAccess::new(Vec::new())),
            Item::Node(trie, id) if trie.children(id).is_empty() && trie.values(id).is_empty() => {
                visitor.visit_map(FieldAccess::new(Vec::new()))
            }
            item => ItemDeserializer { item }.deserialize_any(visitor),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> std::result::Result<V::Value, DeError> {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> std::result::Result<V::Value, DeError> {
        match self.text() {
            Some(text) => visitor.visit_enum(text.into_deserializer()),
            None => Err(DeError(format!("expected an enum variant name, found {}", self.describe()))),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> std::result::Result<V::Value, DeError> {
        visitor.visit_unit()
    }
}

struct FieldAccess<'de> {
    fields: std::vec::IntoIter<(String, Item<'de>)>,
    pending: Option<Item<'de>>,
}

impl<'de> FieldAccess<'de> {
    fn new(fields: Vec<(String, Item<'de>)>) -> Self {
        FieldAccess {
            fields: fields.into_iter(),
            pending: None,
        }
    }
}

impl<'de> MapAccess<'de> for FieldAccess<'de> {
    type Error = DeError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> std::result::Result<Option<K::Value>, DeError> {
        match self.fields.next() {
            Some((name, item)) => {
                self.pending = Some(item);
                seed.deserialize(name.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> std::result::Result<V::Value, DeError> {
        let item = self
            .pending
            .take()
            .ok_or_else(|| DeError("map value requested before its key".to_string()))?;
        seed.deserialize(ItemDeserializer { item })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

struct ArrayAccess<'de> {
    trie: &'de PathTrie,
    members: std::iter::Peekable<std::vec::IntoIter<(usize, NodeId)>>,
    position: usize,
}

impl<'de> ArrayAccess<'de> {
    fn new(trie: &'de PathTrie, members: Vec<(usize, NodeId)>) -> Self {
        ArrayAccess {
            trie,
            members: members.into_iter().peekable(),
            position: 0,
        }
    }
}

impl<'de> SeqAccess<'de> for ArrayAccess<'de> {
    type Error = DeError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> std::result::Result<Option<T::Value>, DeError> {
        let item = match self.members.peek() {
            None => return Ok(None),
            Some(&(index, id)) if index == self.position => {
                self.members.next();
                Item::Node(self.trie, id)
            }
            // gap before the next explicit index
            Some(_) => Item::Missing,
        };
        self.position += 1;
        seed.deserialize(ItemDeserializer { item }).map(Some)
    }
}

struct ValueAccess<'de> {
    values: std::vec::IntoIter<&'de str>,
}

impl<'de> ValueAccess<'de> {
    fn new(values: Vec<&'de str>) -> Self {
        ValueAccess {
            values: values.into_iter(),
        }
    }
}

impl<'de> SeqAccess<'de> for ValueAccess<'de> {
    type Error = DeError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> std::result::Result<Option<T::Value>, DeError> {
        match self.values.next() {
            Some(text) => seed.deserialize(ItemDeserializer { item: Item::Text(text) }).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.values.len())
    }
}
