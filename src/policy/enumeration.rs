use super::{Candidate, ConversionPolicy};
use crate::{LimitedConverter, Result, Token};

/// Converts unit enum variants to their variant name.
///
/// Variants carrying data are structures, not named constants.
///
/// # Examples
///
/// ```rust
/// use serde_capture::to_token;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// enum Level { Info, Warning }
///
/// assert_eq!(to_token(&Level::Warning).to_string(), "Warning");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EnumPolicy;

impl ConversionPolicy for EnumPolicy {
    fn try_convert(
        &self,
        _converter: &LimitedConverter<'_>,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Token>> {
        match candidate {
            Candidate::Variant { variant, .. } => Ok(Some(Token::text(*variant))),
            _ => Ok(None),
        }
    }
}
