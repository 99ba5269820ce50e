use super::{capped, Candidate, ConversionPolicy};
use crate::{LimitedConverter, Result, Structure, Token};

/// Converts structs and data-carrying enum variants into a structure.
///
/// The type name is omitted for anonymous shapes such as closures. Properties
/// keep the order the value emitted them in; a member emitted twice keeps its
/// first value.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructurePolicy {
    item_limit: usize,
}

impl StructurePolicy {
    #[must_use]
    pub const fn new(item_limit: usize) -> Self {
        StructurePolicy { item_limit }
    }
}

fn is_anonymous(type_name: &str) -> bool {
    type_name.is_empty() || type_name.starts_with('<') || type_name.contains("{{closure}}")
}

impl ConversionPolicy for StructurePolicy {
    fn try_convert(
        &self,
        _converter: &LimitedConverter<'_>,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Token>> {
        let Candidate::Struct {
            type_name,
            properties,
        } = candidate
        else {
            return Ok(None);
        };

        let label = (!is_anonymous(type_name)).then(|| type_name.to_string());
        let properties = capped(properties, self.item_limit);
        Ok(Some(Token::Structure(Structure::new(label, properties))))
    }
}
