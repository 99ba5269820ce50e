use super::{capped, Candidate, ConversionPolicy};
use crate::{LimitedConverter, Result, Token, TokenMap};

/// Converts maps whose keys are all non-null scalars into a mapping.
///
/// A map with any complex or null key is declined as a whole and left for the
/// collection policy. Duplicate keys collapse, the last value winning.
///
/// # Examples
///
/// ```rust
/// use serde_capture::{to_token, Scalar, Token};
/// use std::collections::BTreeMap;
///
/// let map = BTreeMap::from([("a", 1), ("b", 2)]);
/// let token = to_token(&map);
/// assert_eq!(token.as_mapping().unwrap().get(&Scalar::from("b")), Some(&Token::Scalar(Scalar::Int(2))));
///
/// let complex = BTreeMap::from([((1, 2), "pair")]);
/// assert!(to_token(&complex).as_sequence().is_some());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MappingPolicy {
    item_limit: usize,
}

impl MappingPolicy {
    #[must_use]
    pub const fn new(item_limit: usize) -> Self {
        MappingPolicy { item_limit }
    }
}

impl ConversionPolicy for MappingPolicy {
    fn try_convert(
        &self,
        _converter: &LimitedConverter<'_>,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Token>> {
        let Candidate::Map(entries) = candidate else {
            return Ok(None);
        };

        let scalar_keys = entries
            .iter()
            .all(|(key, _)| matches!(key, Token::Scalar(s) if !s.is_null()));
        if !scalar_keys {
            return Ok(None);
        }

        let mut map = TokenMap::with_capacity(entries.len());
        for (key, value) in capped(entries, self.item_limit) {
            if let Token::Scalar(key) = key {
                map.insert(key, value);
            }
        }
        Ok(Some(Token::Mapping(map)))
    }
}
