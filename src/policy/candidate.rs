//! The closed classification of captured values.

use crate::format::DisplayFormatter;
use crate::{Property, Scalar, Token};
use std::borrow::Cow;
use std::fmt;

/// A value as seen by the policy chain.
///
/// Children of compound candidates have already been converted through the
/// depth-limited sub-converter and capped at the item limit. A policy that
/// accepts a candidate may move its contents out; a policy that declines must
/// leave it untouched.
#[derive(Debug)]
pub enum Candidate<'a> {
    /// Booleans, numbers, chars and typed marker scalars.
    Primitive(Scalar),
    Str(&'a str),
    /// A byte sequence. `bytes` may hold only a prefix of the `len` total bytes.
    Bytes { bytes: Cow<'a, [u8]>, len: usize },
    /// A unit enum variant.
    Variant {
        type_name: &'static str,
        variant: &'static str,
    },
    /// A function reference by signature.
    Callable(String),
    /// A type or member descriptor by name.
    TypeInfo(String),
    Seq(Vec<Token>),
    /// Converted key/value pairs in source order, duplicates included.
    Map(Vec<(Token, Token)>),
    Struct {
        type_name: &'static str,
        properties: Vec<Property>,
    },
}

impl Candidate<'_> {
    /// Short kind label used in log events.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Candidate::Primitive(_) => "primitive",
            Candidate::Str(_) => "string",
            Candidate::Bytes { .. } => "bytes",
            Candidate::Variant { .. } => "variant",
            Candidate::Callable(_) => "callable",
            Candidate::TypeInfo(_) => "type",
            Candidate::Seq(_) => "sequence",
            Candidate::Map(_) => "map",
            Candidate::Struct { .. } => "struct",
        }
    }
}

/// The default textual form, used by the fallback path.
impl fmt::Display for Candidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Primitive(scalar) => write!(f, "{}", scalar),
            Candidate::Str(s) => f.write_str(s),
            Candidate::Bytes { bytes, .. } => {
                write!(f, "{}", Scalar::Bytes(bytes.to_vec()))
            }
            Candidate::Variant { variant, .. } => f.write_str(variant),
            Candidate::Callable(s) | Candidate::TypeInfo(s) => f.write_str(s),
            Candidate::Seq(elements) => {
                use crate::TokenFormatter;
                DisplayFormatter::new(f).format_sequence(elements)
            }
            Candidate::Map(entries) => DisplayFormatter::new(f).format_pairs(entries),
            Candidate::Struct {
                type_name,
                properties,
            } => DisplayFormatter::new(f).format_record(Some(*type_name), properties),
        }
    }
}
