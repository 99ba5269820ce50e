use super::{capped, Candidate, ConversionPolicy};
use crate::{LimitedConverter, Result, Scalar, Token};

/// Converts anything iterable into a sequence.
///
/// Maps the mapping policy declined become a sequence of `[key, value]` pairs.
/// Byte sequences that reach this policy become a sequence of integers.
#[derive(Clone, Copy, Debug, Default)]
pub struct CollectionPolicy {
    item_limit: usize,
}

impl CollectionPolicy {
    #[must_use]
    pub const fn new(item_limit: usize) -> Self {
        CollectionPolicy { item_limit }
    }
}

impl ConversionPolicy for CollectionPolicy {
    fn try_convert(
        &self,
        _converter: &LimitedConverter<'_>,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Token>> {
        let elements = match candidate {
            Candidate::Seq(elements) => capped(elements, self.item_limit),
            Candidate::Map(entries) => capped(entries, self.item_limit)
                .into_iter()
                .map(|(key, value)| Token::Sequence(vec![key, value]))
                .collect(),
            Candidate::Bytes { bytes, .. } => {
                let bytes: &[u8] = bytes;
                let mut elements: Vec<Token> = bytes
                    .iter()
                    .map(|b| Token::Scalar(Scalar::UInt(u64::from(*b))))
                    .collect();
                if self.item_limit > 0 {
                    elements.truncate(self.item_limit);
                }
                elements
            }
            _ => return Ok(None),
        };
        Ok(Some(Token::Sequence(elements)))
    }
}
