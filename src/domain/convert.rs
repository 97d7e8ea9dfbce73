// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of textual configuration values into scalar types.
//!
//! Every value in the store is text. Callers pick a target from a closed set of scalar
//! kinds, either at runtime through [`ScalarKind`] or at compile time through the
//! [`ConfigScalar`] trait. Both routes share the same parse functions.

use crate::domain::errors::{ConfigError, Result};
use std::fmt;

/// The closed set of scalar kinds a configuration value can be converted into.
///
/// # Examples
///
/// ```
/// use pathcfg::domain::convert::{Scalar, ScalarKind};
///
/// let kind = ScalarKind::from_name("integer").unwrap();
/// assert_eq!(kind, ScalarKind::I32);
/// assert_eq!(kind.convert("port", "8080").unwrap(), Scalar::I32(8080));
///
/// assert!(ScalarKind::from_name("Duration").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `char`
    Char,
    /// `String`, converted verbatim
    String,
}

impl ScalarKind {
    /// Every supported kind, in the order used for error messages.
    pub const ALL: [ScalarKind; 13] = [
        ScalarKind::Bool,
        ScalarKind::I8,
        ScalarKind::I16,
        ScalarKind::I32,
        ScalarKind::I64,
        ScalarKind::U8,
        ScalarKind::U16,
        ScalarKind::U32,
        ScalarKind::U64,
        ScalarKind::F32,
        ScalarKind::F64,
        ScalarKind::Char,
        ScalarKind::String,
    ];

    /// Returns the canonical name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Char => "char",
            ScalarKind::String => "string",
        }
    }

    /// Looks up a kind by name.
    ///
    /// Accepts the canonical names (`i32`, `f64`, ...) and the common aliases `boolean`,
    /// `byte`, `short`, `integer`/`int`, `long`, `float`, `double`, `character` and `str`,
    /// case-insensitively. Any other name is an [`ConfigError::UnsupportedType`] that lists
    /// the supported set.
    pub fn from_name(name: &str) -> Result<Self> {
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "bool" | "boolean" => ScalarKind::Bool,
            "i8" | "byte" => ScalarKind::I8,
            "i16" | "short" => ScalarKind::I16,
            "i32" | "int" | "integer" => ScalarKind::I32,
            "i64" | "long" => ScalarKind::I64,
            "u8" => ScalarKind::U8,
            "u16" => ScalarKind::U16,
            "u32" => ScalarKind::U32,
            "u64" => ScalarKind::U64,
            "f32" | "float" => ScalarKind::F32,
            "f64" | "double" => ScalarKind::F64,
            "char" | "character" => ScalarKind::Char,
            "string" | "str" => ScalarKind::String,
            _ => {
                return Err(ConfigError::UnsupportedType {
                    type_name: name.to_string(),
                    supported: Self::supported_names(),
                })
            }
        };
        Ok(kind)
    }

    /// Returns the canonical names of all supported kinds, comma separated.
    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Converts `text` into a scalar of this kind.
    ///
    /// `key` is only used to give conversion errors context.
    pub fn convert(self, key: &str, text: &str) -> Result<Scalar> {
        Ok(match self {
            ScalarKind::Bool => Scalar::Bool(bool::from_config_str(key, text)?),
            ScalarKind::I8 => Scalar::I8(i8::from_config_str(key, text)?),
            ScalarKind::I16 => Scalar::I16(i16::from_config_str(key, text)?),
            ScalarKind::I32 => Scalar::I32(i32::from_config_str(key, text)?),
            ScalarKind::I64 => Scalar::I64(i64::from_config_str(key, text)?),
            ScalarKind::U8 => Scalar::U8(u8::from_config_str(key, text)?),
            ScalarKind::U16 => Scalar::U16(u16::from_config_str(key, text)?),
            ScalarKind::U32 => Scalar::U32(u32::from_config_str(key, text)?),
            ScalarKind::U64 => Scalar::U64(u64::from_config_str(key, text)?),
            ScalarKind::F32 => Scalar::F32(f32::from_config_str(key, text)?),
            ScalarKind::F64 => Scalar::F64(f64::from_config_str(key, text)?),
            ScalarKind::Char => Scalar::Char(char::from_config_str(key, text)?),
            ScalarKind::String => Scalar::String(text.to_string()),
        })
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A converted scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A boolean
    Bool(bool),
    /// An 8-bit signed integer
    I8(i8),
    /// A 16-bit signed integer
    I16(i16),
    /// A 32-bit signed integer
    I32(i32),
    /// A 64-bit signed integer
    I64(i64),
    /// An 8-bit unsigned integer
    U8(u8),
    /// A 16-bit unsigned integer
    U16(u16),
    /// A 32-bit unsigned integer
    U32(u32),
    /// A 64-bit unsigned integer
    U64(u64),
    /// A 32-bit float
    F32(f32),
    /// A 64-bit float
    F64(f64),
    /// A single character
    Char(char),
    /// Text
    String(String),
}

impl Scalar {
    /// Returns the kind of this scalar.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::I8(_) => ScalarKind::I8,
            Scalar::I16(_) => ScalarKind::I16,
            Scalar::I32(_) => ScalarKind::I32,
            Scalar::I64(_) => ScalarKind::I64,
            Scalar::U8(_) => ScalarKind::U8,
            Scalar::U16(_) => ScalarKind::U16,
            Scalar::U32(_) => ScalarKind::U32,
            Scalar::U64(_) => ScalarKind::U64,
            Scalar::F32(_) => ScalarKind::F32,
            Scalar::F64(_) => ScalarKind::F64,
            Scalar::Char(_) => ScalarKind::Char,
            Scalar::String(_) => ScalarKind::String,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::I8(v) => write!(f, "{}", v),
            Scalar::I16(v) => write!(f, "{}", v),
            Scalar::I32(v) => write!(f, "{}", v),
            Scalar::I64(v) => write!(f, "{}", v),
            Scalar::U8(v) => write!(f, "{}", v),
            Scalar::U16(v) => write!(f, "{}", v),
            Scalar::U32(v) => write!(f, "{}", v),
            Scalar::U64(v) => write!(f, "{}", v),
            Scalar::F32(v) => write!(f, "{}", v),
            Scalar::F64(v) => write!(f, "{}", v),
            Scalar::Char(v) => write!(f, "{}", v),
            Scalar::String(v) => f.write_str(v),
        }
    }
}

/// A Rust type that configuration text can be converted into.
///
/// Implemented for exactly the types listed by [`ScalarKind`], so requesting anything else
/// is a compile error rather than a runtime surprise.
pub trait ConfigScalar: Sized {
    /// The runtime kind matching this type.
    const KIND: ScalarKind;

    /// Converts `text` into `Self`, using `key` for error context.
    fn from_config_str(key: &str, text: &str) -> Result<Self>;
}

macro_rules! impl_int_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ConfigScalar for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn from_config_str(key: &str, text: &str) -> Result<Self> {
                    text.trim()
                        .parse::<$ty>()
                        .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), stringify!($ty), e))
                }
            }
        )*
    };
}

impl_int_scalar!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
);

macro_rules! impl_float_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ConfigScalar for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn from_config_str(key: &str, text: &str) -> Result<Self> {
                    text.trim()
                        .parse::<$ty>()
                        .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), stringify!($ty), e))
                }
            }
        )*
    };
}

impl_float_scalar!(f32 => F32, f64 => F64);

impl ConfigScalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    /// Recognizes `true`, `yes`, `1`, `on` and `false`, `no`, `0`, `off`, case-insensitively.
    fn from_config_str(key: &str, text: &str) -> Result<Self> {
        match text.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => text
                .trim()
                .parse::<bool>()
                .map_err(|e| ConfigError::TypeConversionError {
                    key: key.to_string(),
                    target_type: "bool".to_string(),
                    source: Box::new(e),
                }),
        }
    }
}

impl ConfigScalar for char {
    const KIND: ScalarKind = ScalarKind::Char;

    fn from_config_str(key: &str, text: &str) -> Result<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConfigError::conversion(
                key,
                "char",
                format!("expected exactly one character, got '{}'", text),
            )),
        }
    }
}

impl ConfigScalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn from_config_str(_key: &str, text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

/// Converts a single value into the given kind.
pub fn convert(key: &str, text: &str, kind: ScalarKind) -> Result<Scalar> {
    kind.convert(key, text)
}

/// Converts every value into the given kind. Fails as a whole if any element fails.
pub fn convert_list<S: AsRef<str>>(key: &str, texts: &[S], kind: ScalarKind) -> Result<Vec<Scalar>> {
    texts
        .iter()
        .map(|text| kind.convert(key, text.as_ref()))
        .collect()
}

/// Converts every value into `T`. Fails as a whole if any element fails.
pub fn convert_list_as<T: ConfigScalar, S: AsRef<str>>(key: &str, texts: &[S]) -> Result<Vec<T>> {
    texts
        .iter()
        .map(|text| T::from_config_str(key, text.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_identity() {
        let value = convert("k", "  keep spaces ", ScalarKind::String).unwrap();
        assert_eq!(value, Scalar::String("  keep spaces ".to_string()));
    }

    #[test]
    fn test_integer_widths() {
        assert_eq!(convert("k", "-8", ScalarKind::I8).unwrap(), Scalar::I8(-8));
        assert_eq!(convert("k", "300", ScalarKind::I16).unwrap(), Scalar::I16(300));
        assert_eq!(convert("k", "42", ScalarKind::I32).unwrap(), Scalar::I32(42));
        assert_eq!(
            convert("k", "9223372036854775807", ScalarKind::I64).unwrap(),
            Scalar::I64(i64::MAX)
        );
        assert_eq!(convert("k", "255", ScalarKind::U8).unwrap(), Scalar::U8(255));
        assert_eq!(convert("k", "8080", ScalarKind::U16).unwrap(), Scalar::U16(8080));
        assert_eq!(
            convert("k", "4294967295", ScalarKind::U32).unwrap(),
            Scalar::U32(u32::MAX)
        );
        assert_eq!(
            convert("k", "18446744073709551615", ScalarKind::U64).unwrap(),
            Scalar::U64(u64::MAX)
        );
    }

    #[test]
    fn test_integer_overflow_fails() {
        assert!(convert("k", "256", ScalarKind::U8).is_err());
        assert!(convert("k", "-1", ScalarKind::U32).is_err());
    }

    #[test]
    fn test_not_a_number_fails() {
        let err = convert("count", "notanumber", ScalarKind::I32).unwrap_err();
        assert!(matches!(err, ConfigError::TypeConversionError { .. }));
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn test_floats() {
        assert_eq!(convert("k", "2.5", ScalarKind::F32).unwrap(), Scalar::F32(2.5));
        assert_eq!(convert("k", "-3.25", ScalarKind::F64).unwrap(), Scalar::F64(-3.25));
        assert!(convert("k", "pi", ScalarKind::F64).is_err());
    }

    #[test]
    fn test_bool_variants() {
        for text in ["true", "TRUE", "yes", "On", "1"] {
            assert_eq!(bool::from_config_str("k", text).unwrap(), true, "{}", text);
        }
        for text in ["false", "No", "OFF", "0"] {
            assert_eq!(bool::from_config_str("k", text).unwrap(), false, "{}", text);
        }
        assert!(bool::from_config_str("k", "maybe").is_err());
    }

    #[test]
    fn test_char() {
        assert_eq!(convert("k", "x", ScalarKind::Char).unwrap(), Scalar::Char('x'));
        assert_eq!(convert("k", "é", ScalarKind::Char).unwrap(), Scalar::Char('é'));
        assert!(convert("k", "xy", ScalarKind::Char).is_err());
        assert!(convert("k", "", ScalarKind::Char).is_err());
    }

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(ScalarKind::from_name("Boolean").unwrap(), ScalarKind::Bool);
        assert_eq!(ScalarKind::from_name("long").unwrap(), ScalarKind::I64);
        assert_eq!(ScalarKind::from_name("double").unwrap(), ScalarKind::F64);
        assert_eq!(ScalarKind::from_name("u16").unwrap(), ScalarKind::U16);
    }

    #[test]
    fn test_from_name_unsupported_lists_supported_set() {
        let err = ScalarKind::from_name("ParserTests").unwrap_err();
        match err {
            ConfigError::UnsupportedType {
                type_name,
                supported,
            } => {
                assert_eq!(type_name, "ParserTests");
                assert!(supported.contains("bool"));
                assert!(supported.contains("string"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_convert_list_all_or_nothing() {
        let values = convert_list("k", &["1", "2", "3"], ScalarKind::U8).unwrap();
        assert_eq!(values, vec![Scalar::U8(1), Scalar::U8(2), Scalar::U8(3)]);

        assert!(convert_list("k", &["1", "two", "3"], ScalarKind::U8).is_err());
    }

    #[test]
    fn test_convert_list_as() {
        let values: Vec<i64> = convert_list_as("k", &["10", "-20"]).unwrap();
        assert_eq!(values, vec![10, -20]);
    }

    #[test]
    fn test_scalar_kind_roundtrip() {
        for kind in ScalarKind::ALL {
            assert_eq!(ScalarKind::from_name(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::U16(8080).to_string(), "8080");
        assert_eq!(Scalar::String("abc".to_string()).to_string(), "abc");
        assert_eq!(Scalar::Bool(true).kind(), ScalarKind::Bool);
    }
}
