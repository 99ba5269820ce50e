//! Ordered map type for mapping tokens.
//!
//! This module provides [`TokenMap`], a wrapper around [`IndexMap`] keyed by
//! [`Scalar`]. Keys are unique and iterate in first-insertion order; inserting an
//! existing key replaces its value in place.
//!
//! ## Examples
//!
//! ```rust
//! use serde_capture::{Scalar, Token, TokenMap};
//!
//! let mut map = TokenMap::new();
//! map.insert(Scalar::from("name"), Token::text("Alice"));
//! map.insert(Scalar::from(1), Token::text("one"));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&Scalar::from("name")), Some(&Token::text("Alice")));
//! ```

use crate::{Scalar, Token};
use indexmap::IndexMap;

/// An ordered map of scalar keys to tokens.
///
/// # Examples
///
/// ```rust
/// use serde_capture::{Scalar, Token, TokenMap};
///
/// let mut map = TokenMap::new();
/// map.insert(Scalar::from("b"), Token::null());
/// map.insert(Scalar::from("a"), Token::null());
///
/// let keys: Vec<_> = map.keys().map(|k| k.to_string()).collect();
/// assert_eq!(keys, vec!["b", "a"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenMap(IndexMap<Scalar, Token>);

impl TokenMap {
    #[must_use]
    pub fn new() -> Self {
        TokenMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for that key.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: Scalar, value: Token) -> Option<Token> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &Scalar) -> Option<&Token> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &Scalar) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Scalar, Token> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Scalar, Token> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Scalar, Token> {
        self.0.iter()
    }
}

impl IntoIterator for TokenMap {
    type Item = (Scalar, Token);
    type IntoIter = indexmap::map::IntoIter<Scalar, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenMap {
    type Item = (&'a Scalar, &'a Token);
    type IntoIter = indexmap::map::Iter<'a, Scalar, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Scalar, Token)> for TokenMap {
    fn from_iter<T: IntoIterator<Item = (Scalar, Token)>>(iter: T) -> Self {
        TokenMap(IndexMap::from_iter(iter))
    }
}
