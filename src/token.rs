//! The token tree produced by conversion.
//!
//! A [`Token`] is one node of the bounded representation of a captured value:
//!
//! - [`Scalar`]: a leaf holding one primitive-like value, or [`Scalar::Null`]
//! - `Sequence`: ordered child tokens
//! - `Mapping`: unique scalar keys to tokens, see [`TokenMap`]
//! - [`Structure`]: an optional type name and ordered [`Property`] entries
//! - [`Property`]: a named token
//!
//! Tokens are built once per conversion and never mutated afterwards. Every
//! child is owned by its parent, so a token tree never contains cycles, even
//! when the captured object graph does.
//!
//! ## Examples
//!
//! ```rust
//! use serde_capture::{to_token, Scalar, Token};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let token = to_token(&Point { x: 1, y: 2 });
//! let structure = token.as_structure().unwrap();
//! assert_eq!(structure.type_name(), Some("Point"));
//! assert_eq!(structure.get("x"), Some(&Token::Scalar(Scalar::Int(1))));
//! ```

use crate::format::{DisplayFormatter, TokenFormatter};
use crate::{Error, Result, TokenMap};
use chrono::{DateTime, FixedOffset};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

/// A leaf value in the token tree.
///
/// Floats compare and hash by bit pattern so that `Scalar` can key a
/// [`TokenMap`]; `NaN` equals itself and `0.0` differs from `-0.0`.
#[derive(Clone, Debug, Default)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    BigInt(BigInt),
    Float(f64),
    Char(char),
    Text(String),
    Bytes(Vec<u8>),
    DateTime(DateTime<FixedOffset>),
    Duration(Duration),
    Uuid(Uuid),
    Url(Url),
}

impl Scalar {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            Scalar::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Scalar::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns `true` for scalars a JSON-like formatter renders as quoted text.
    pub(crate) const fn is_textual(&self) -> bool {
        matches!(
            self,
            Scalar::Text(_)
                | Scalar::Char(_)
                | Scalar::Bytes(_)
                | Scalar::DateTime(_)
                | Scalar::Duration(_)
                | Scalar::Uuid(_)
                | Scalar::Url(_)
        )
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::UInt(a), Scalar::UInt(b)) => a == b,
            (Scalar::BigInt(a), Scalar::BigInt(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a.to_bits() == b.to_bits(),
            (Scalar::Char(a), Scalar::Char(b)) => a == b,
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            (Scalar::Bytes(a), Scalar::Bytes(b)) => a == b,
            (Scalar::DateTime(a), Scalar::DateTime(b)) => a == b,
            (Scalar::Duration(a), Scalar::Duration(b)) => a == b,
            (Scalar::Uuid(a), Scalar::Uuid(b)) => a == b,
            (Scalar::Url(a), Scalar::Url(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::Null => {}
            Scalar::Bool(b) => b.hash(state),
            Scalar::Int(i) => i.hash(state),
            Scalar::UInt(u) => u.hash(state),
            Scalar::BigInt(bi) => bi.hash(state),
            Scalar::Float(f) => f.to_bits().hash(state),
            Scalar::Char(c) => c.hash(state),
            Scalar::Text(s) => s.hash(state),
            Scalar::Bytes(b) => b.hash(state),
            Scalar::DateTime(dt) => dt.hash(state),
            Scalar::Duration(d) => d.hash(state),
            Scalar::Uuid(u) => u.hash(state),
            Scalar::Url(u) => u.hash(state),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::UInt(u) => write!(f, "{}", u),
            Scalar::BigInt(bi) => write!(f, "{}", bi),
            Scalar::Float(fl) => write!(f, "{}", fl),
            Scalar::Char(c) => write!(f, "{}", c),
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Bytes(bytes) => {
                write!(f, "0x")?;
                for b in bytes {
                    write!(f, "{:02X}", b)?;
                }
                Ok(())
            }
            Scalar::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Scalar::Duration(d) => write!(f, "{:?}", d),
            Scalar::Uuid(u) => write!(f, "{}", u.hyphenated()),
            Scalar::Url(u) => write!(f, "{}", u.as_str()),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value as $target)
                }
            }
        )*
    };
}

scalar_from! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<char> for Scalar {
    fn from(value: char) -> Self {
        Scalar::Char(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// A named token inside a [`Structure`] or a bound template hole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    name: String,
    value: Token,
}

impl Property {
    /// Creates a property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProperty`] when `name` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_capture::{Property, Scalar, Token};
    ///
    /// let prop = Property::new("Id", Token::from(Scalar::Int(7))).unwrap();
    /// assert_eq!(prop.name(), "Id");
    /// assert!(Property::new("", Token::null()).is_err());
    /// ```
    pub fn new(name: impl Into<String>, value: Token) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_property("property name must not be empty"));
        }
        Ok(Property { name, value })
    }

    /// For names the grammar guarantees are non-empty.
    pub(crate) fn named(name: &str, value: Token) -> Self {
        debug_assert!(!name.is_empty());
        Property {
            name: name.to_string(),
            value,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &Token {
        &self.value
    }

    pub fn into_parts(self) -> (String, Token) {
        (self.name, self.value)
    }
}

/// A captured record: optional type name plus properties in discovery order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Structure {
    type_name: Option<String>,
    properties: Vec<Property>,
}

impl Structure {
    pub fn new(type_name: Option<String>, properties: Vec<Property>) -> Self {
        Structure {
            type_name,
            properties,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Looks up a property value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A node of the converted output tree.
///
/// Tokens expose themselves to formatters through [`Token::render`]; formatters
/// never inspect the tree on their own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Scalar(Scalar),
    Sequence(Vec<Token>),
    Mapping(TokenMap),
    Structure(Structure),
    Property(Box<Property>),
}

impl Default for Token {
    fn default() -> Self {
        Token::null()
    }
}

impl Token {
    /// The empty scalar used for absent values and depth truncation.
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Token::Scalar(Scalar::Null)
    }

    /// A text scalar.
    pub fn text(value: impl Into<String>) -> Self {
        Token::Scalar(Scalar::Text(value.into()))
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Token::Scalar(Scalar::Null))
    }

    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Token::Scalar(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Token]> {
        match self {
            Token::Sequence(elements) => Some(elements),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&TokenMap> {
        match self {
            Token::Mapping(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Token::Structure(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Token::Property(p) => Some(p),
            _ => None,
        }
    }

    /// Hands this token to a formatter, one call per token kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_capture::{to_token, JsonFormatter};
    ///
    /// let mut out = String::new();
    /// to_token(&vec![1, 2]).render(&mut JsonFormatter::new(&mut out)).unwrap();
    /// assert_eq!(out, "[1, 2]");
    /// ```
    pub fn render<F>(&self, formatter: &mut F) -> fmt::Result
    where
        F: TokenFormatter + ?Sized,
    {
        match self {
            Token::Scalar(s) => formatter.format_scalar(s),
            Token::Sequence(elements) => formatter.format_sequence(elements),
            Token::Mapping(map) => formatter.format_mapping(map),
            Token::Structure(s) => formatter.format_structure(s),
            Token::Property(p) => formatter.format_property(p),
        }
    }

    /// Nesting depth of the tree; a scalar has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Token::Scalar(_) => 0,
            Token::Sequence(elements) => 1 + elements.iter().map(Token::depth).max().unwrap_or(0),
            Token::Mapping(map) => 1 + map.values().map(Token::depth).max().unwrap_or(0),
            Token::Structure(s) => {
                1 + s
                    .properties
                    .iter()
                    .map(|p| p.value.depth())
                    .max()
                    .unwrap_or(0)
            }
            Token::Property(p) => p.value.depth(),
        }
    }
}

impl From<Scalar> for Token {
    fn from(value: Scalar) -> Self {
        Token::Scalar(value)
    }
}

impl From<Structure> for Token {
    fn from(value: Structure) -> Self {
        Token::Structure(value)
    }
}

impl From<Property> for Token {
    fn from(value: Property) -> Self {
        Token::Property(Box::new(value))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(&mut DisplayFormatter::new(f))
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::UInt(u) => serializer.serialize_u64(*u),
            Scalar::BigInt(bi) => serializer.serialize_str(&bi.to_string()),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::Char(c) => serializer.serialize_char(*c),
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Bytes(b) => serializer.serialize_bytes(b),
            Scalar::DateTime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Scalar::Duration(d) => serializer.serialize_f64(d.as_secs_f64()),
            Scalar::Uuid(u) => serializer.collect_str(&u.hyphenated()),
            Scalar::Url(u) => serializer.serialize_str(u.as_str()),
        }
    }
}

/// Key carrying a structure's type name when a token is serialized as a map.
pub const TYPE_TAG: &str = "$type";

impl Serialize for Token {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Token::Scalar(s) => s.serialize(serializer),
            Token::Sequence(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Token::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Token::Structure(s) => {
                let len = s.properties.len() + usize::from(s.type_name.is_some());
                let mut out = serializer.serialize_map(Some(len))?;
                if let Some(type_name) = &s.type_name {
                    out.serialize_entry(TYPE_TAG, type_name)?;
                }
                for p in &s.properties {
                    out.serialize_entry(&p.name, &p.value)?;
                }
                out.end()
            }
            Token::Property(p) => {
                let mut out = serializer.serialize_map(Some(1))?;
                out.serialize_entry(&p.name, &p.value)?;
                out.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_float_keys_are_bitwise() {
        let mut set = HashSet::new();
        set.insert(Scalar::Float(f64::NAN));
        set.insert(Scalar::Float(f64::NAN));
        set.insert(Scalar::Float(0.0));
        set.insert(Scalar::Float(-0.0));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_int_and_uint_are_distinct_keys() {
        assert_ne!(Scalar::Int(1), Scalar::UInt(1));
    }

    #[test]
    fn test_property_requires_name() {
        let err = Property::new("", Token::null()).unwrap_err();
        assert!(matches!(err, Error::InvalidProperty(_)));
    }

    #[test]
    fn test_structure_lookup() {
        let s = Structure::new(
            Some("User".to_string()),
            vec![
                Property::new("Id", Token::from(Scalar::Int(1))).unwrap(),
                Property::new("Name", Token::text("Alice")).unwrap(),
            ],
        );
        assert_eq!(s.type_name(), Some("User"));
        assert_eq!(s.get("Name"), Some(&Token::text("Alice")));
        assert_eq!(s.get("Missing"), None);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_depth() {
        let nested = Token::Sequence(vec![Token::Sequence(vec![Token::null()])]);
        assert_eq!(Token::null().depth(), 0);
        assert_eq!(nested.depth(), 2);
    }

    #[test]
    fn test_bytes_display() {
        assert_eq!(Scalar::Bytes(vec![0x0a, 0xff]).to_string(), "0x0AFF");
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Scalar::from(5u8), Scalar::UInt(5));
        assert_eq!(Scalar::from(-5i16), Scalar::Int(-5));
        assert_eq!(Scalar::from("hi"), Scalar::Text("hi".to_string()));
    }
}
