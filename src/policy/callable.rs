use super::{Candidate, ConversionPolicy};
use crate::{LimitedConverter, Result, Token};

/// Converts function references to their signature text.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallablePolicy;

impl ConversionPolicy for CallablePolicy {
    fn try_convert(
        &self,
        _converter: &LimitedConverter<'_>,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Token>> {
        match candidate {
            Candidate::Callable(signature) => Ok(Some(Token::text(signature.as_str()))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{to_token, Callable, Scalar, Token};

    fn greet(name: &str) -> String {
        format!("hello {}", name)
    }

    #[test]
    fn test_function_item() {
        let token = to_token(&Callable::of(&greet));
        let text = token.as_scalar().and_then(Scalar::as_str).unwrap();
        assert!(text.ends_with("::greet"), "{}", text);
    }

    #[test]
    fn test_plain_struct_is_not_callable() {
        #[derive(serde::Serialize)]
        struct Handler {
            id: u8,
        }

        assert!(matches!(to_token(&Handler { id: 1 }), Token::Structure(_)));
    }
}
