use super::{Candidate, ConversionPolicy};
use crate::{LimitedConverter, Result, Scalar, Token};

/// Converts strings to text scalars, truncating past the string limit.
///
/// # Examples
///
/// ```rust
/// use serde_capture::{to_token_with_config, ConversionConfig, ConversionLimits};
///
/// let config = ConversionConfig::new().with_limits(ConversionLimits::new().with_string_limit(5));
/// let token = to_token_with_config(&"Hello, World!", config).unwrap();
/// assert_eq!(token.to_string(), "Hello…");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StringPolicy {
    limit: usize,
}

impl StringPolicy {
    /// `limit` counts characters; 0 means no limit.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        StringPolicy { limit }
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Applies the string limit to `text`.
    pub fn truncate(&self, text: &str) -> String {
        if self.limit == 0 {
            return text.to_string();
        }
        match text.char_indices().nth(self.limit) {
            Some((cut, _)) => format!("{}…", &text[..cut]),
            None => text.to_string(),
        }
    }
}

impl ConversionPolicy for StringPolicy {
    fn try_convert(
        &self,
        _converter: &LimitedConverter<'_>,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Token>> {
        match candidate {
            Candidate::Str(text) => Ok(Some(Token::Scalar(Scalar::Text(self.truncate(text))))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        let policy = StringPolicy::new(3);
        assert_eq!(policy.truncate("héllo"), "hél…");
        assert_eq!(policy.truncate("abc"), "abc");
        assert_eq!(policy.truncate(""), "");
    }

    #[test]
    fn test_zero_is_unlimited() {
        let long = "x".repeat(10_000);
        assert_eq!(StringPolicy::new(0).truncate(&long), long);
    }
}
