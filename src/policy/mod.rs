//! Conversion policies.
//!
//! A policy looks at a [`Candidate`] and either produces a [`Token`] or declines.
//! The engine tries its policies in order and the first one to produce a token
//! wins, so order matters: the specific policies (strings, bytes) must precede
//! the generic ones (mapping, collection, structure).
//!
//! | Policy | Accepts | Produces |
//! |---|---|---|
//! | [`StringPolicy`] | strings | text, truncated with `…` past the string limit |
//! | [`ScalarPolicy`] | primitives and strings | the scalar itself |
//! | [`EnumPolicy`] | unit variants | the variant name |
//! | [`BytesPolicy`] | byte sequences | raw bytes, or a hex preview past the byte limit |
//! | [`CallablePolicy`] | function references | the signature text |
//! | [`TypeInfoPolicy`] | type descriptors | the type name |
//! | [`MappingPolicy`] | maps with scalar keys | a mapping |
//! | [`CollectionPolicy`] | sequences, any map, bytes | a sequence |
//! | [`StructurePolicy`] | structs and enum variants with data | a structure |
//!
//! A policy that returns an error is logged and skipped.
//!
//! ## Examples
//!
//! ```rust
//! use serde_capture::policy::{self, ConversionPolicy, StructurePolicy};
//! use serde_capture::{to_token_with_config, ConversionConfig, ConversionLimits, Scalar};
//! use std::sync::Arc;
//!
//! // Only structures: everything else falls back to text.
//! let policies: Vec<Arc<dyn ConversionPolicy>> = vec![Arc::new(StructurePolicy::new(1000))];
//! let config = ConversionConfig::new().with_policies(policies);
//! let token = to_token_with_config(&true, config).unwrap();
//! assert_eq!(token.as_scalar(), Some(&Scalar::Text("true".to_string())));
//!
//! assert_eq!(policy::default_policies(&ConversionLimits::default()).len(), 9);
//! ```

mod bytes;
mod callable;
mod candidate;
mod collection;
mod enumeration;
mod mapping;
mod metadata;
mod scalar;
mod string;
mod structure;

pub use bytes::BytesPolicy;
pub use callable::CallablePolicy;
pub use candidate::Candidate;
pub use collection::CollectionPolicy;
pub use enumeration::EnumPolicy;
pub use mapping::MappingPolicy;
pub use metadata::TypeInfoPolicy;
pub use scalar::ScalarPolicy;
pub use string::StringPolicy;
pub use structure::StructurePolicy;

use crate::{ConversionLimits, LimitedConverter, Result, Token};
use std::fmt::Debug;
use std::sync::Arc;

/// A strategy deciding whether and how a candidate becomes a token.
///
/// Returning `Ok(Some(token))` accepts, `Ok(None)` declines, and an error is
/// logged by the engine before the next policy sees the same candidate. The
/// candidate is shared, so an accepting policy copies what it keeps.
/// Policies are shared across threads and hold no mutable state.
pub trait ConversionPolicy: Debug + Send + Sync {
    /// Identity reported in log events.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Attempts the conversion. `converter` is already one level deeper than
    /// the candidate and is the one to use for any further nested conversion.
    fn try_convert(
        &self,
        converter: &LimitedConverter<'_>,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Token>>;
}

/// The nine standard policies in their standard order.
#[must_use]
pub fn default_policies(limits: &ConversionLimits) -> Vec<Arc<dyn ConversionPolicy>> {
    vec![
        Arc::new(StringPolicy::new(limits.string_limit)),
        Arc::new(ScalarPolicy),
        Arc::new(EnumPolicy),
        Arc::new(BytesPolicy::new(limits.byte_array_limit)),
        Arc::new(CallablePolicy),
        Arc::new(TypeInfoPolicy),
        Arc::new(MappingPolicy::new(limits.item_limit)),
        Arc::new(CollectionPolicy::new(limits.item_limit)),
        Arc::new(StructurePolicy::new(limits.item_limit)),
    ]
}

/// Copies at most `limit` items; 0 keeps everything.
pub(crate) fn capped<T: Clone>(items: &[T], limit: usize) -> Vec<T> {
    let end = if limit == 0 { items.len() } else { items.len().min(limit) };
    items[..end].to_vec()
}
