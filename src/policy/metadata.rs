use super::{Candidate, ConversionPolicy};
use crate::{LimitedConverter, Result, Token};

/// Converts type and member descriptors to their name.
///
/// # Examples
///
/// ```rust
/// use serde_capture::{to_token, TypeInfo};
///
/// assert_eq!(to_token(&TypeInfo::of::<u32>()).to_string(), "u32");
/// assert_eq!(to_token(&TypeInfo::named("User.Name")).to_string(), "User.Name");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeInfoPolicy;

impl ConversionPolicy for TypeInfoPolicy {
    fn try_convert(
        &self,
        _converter: &LimitedConverter<'_>,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Token>> {
        match candidate {
            Candidate::TypeInfo(name) => Ok(Some(Token::text(name.as_str()))),
            _ => Ok(None),
        }
    }
}
