use super::{Candidate, ConversionPolicy};
use crate::{LimitedConverter, Result, Scalar, Token};

/// Accepts the closed set of primitive-like values: booleans, numbers, chars,
/// strings, timestamps, intervals, identifiers and URLs.
///
/// Byte sequences and arrays of primitives are not scalars.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarPolicy;

impl ConversionPolicy for ScalarPolicy {
    fn try_convert(
        &self,
        _converter: &LimitedConverter<'_>,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Token>> {
        match candidate {
            Candidate::Primitive(scalar) => Ok(Some(Token::Scalar(scalar.clone()))),
            Candidate::Str(text) => Ok(Some(Token::Scalar(Scalar::Text(text.to_string())))),
            _ => Ok(None),
        }
    }
}
