//! Binding arguments to template holes.

use super::parser::parse;
use super::token::{BoundToken, TemplateToken};
use super::Template;
use crate::{
    Capture, ConversionConfig, ConversionEngine, ConverterFactory, Property, Result, Token,
};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Text carried by holes that have no argument.
pub const NOT_BOUND: &str = "<Property not bound>";

/// Widest padding applied when rendering; larger alignments are clamped.
pub const MAX_ALIGNMENT: usize = 1024;

/// Binds argument lists to templates.
///
/// Each hole resolves to a position: its explicit index, or for named holes
/// the order in which distinct names first appear. The argument at that
/// position is converted according to the hole's hint. A hole without an
/// argument is logged and bound to [`NOT_BOUND`].
///
/// # Examples
///
/// ```rust
/// use serde_capture::template::TemplateBinder;
///
/// let binder = TemplateBinder::default();
/// let bound = binder.bind("{User} logged in from {Ip}, {User}", &[&"ada", &"10.0.0.1"]);
/// assert_eq!(bound.to_string(), "ada logged in from 10.0.0.1, ada");
///
/// let bound = binder.bind("{0} {1}", &[&1]);
/// assert_eq!(bound.tokens().len(), 3);
/// assert_eq!(bound.to_string(), "1 {1}");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TemplateBinder {
    factory: ConverterFactory,
}

impl TemplateBinder {
    /// Builds a binder with its own engine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) when the
    /// configuration is rejected by [`ConversionEngine::new`].
    pub fn new(config: ConversionConfig) -> Result<Self> {
        Ok(Self::with_engine(ConversionEngine::new(config)?))
    }

    #[must_use]
    pub fn with_engine(engine: ConversionEngine) -> Self {
        TemplateBinder {
            factory: ConverterFactory::new(engine),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &ConversionEngine {
        self.factory.engine()
    }

    /// Parses `template` and binds `args` to its holes.
    pub fn bind(&self, template: &str, args: &[&dyn Capture]) -> BoundTemplate {
        self.bind_tokens(template, parse(template), args)
    }

    /// Binds `args` to an already parsed template.
    pub fn bind_template(&self, template: &Template, args: &[&dyn Capture]) -> BoundTemplate {
        self.bind_tokens(template.text(), template.tokens().iter().cloned(), args)
    }

    fn bind_tokens<I>(&self, text: &str, tokens: I, args: &[&dyn Capture]) -> BoundTemplate
    where
        I: IntoIterator<Item = TemplateToken>,
    {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut bound = Vec::new();

        for token in tokens {
            let TemplateToken::Hole(hole) = token else {
                bound.push(token);
                continue;
            };

            let position = match (hole.index(), hole.name()) {
                (Some(index), _) => index,
                (None, Some(name)) => {
                    let next = positions.len();
                    *positions.entry(name.to_string()).or_insert(next)
                }
                (None, None) => usize::MAX,
            };

            let name = hole.property_name();
            let token = match args.get(position) {
                Some(arg) => {
                    let value = self.factory.for_hint(hole.hint()).convert(*arg);
                    BoundToken::new(&hole, Property::named(name, value), true)
                }
                None => {
                    warn!(position, template = text, "required parameter not provided");
                    BoundToken::new(&hole, Property::named(name, Token::text(NOT_BOUND)), false)
                }
            };
            bound.push(TemplateToken::Bound(token));
        }

        BoundTemplate {
            text: text.to_string(),
            tokens: bound,
        }
    }
}

/// A template with every hole replaced by a bound token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundTemplate {
    text: String,
    tokens: Vec<TemplateToken>,
}

impl BoundTemplate {
    /// The original template text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text and bound tokens in template order.
    #[must_use]
    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// The properties of all bound tokens, unbound ones included.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.tokens
            .iter()
            .filter_map(TemplateToken::as_bound)
            .map(BoundToken::property)
    }
}

/// Renders the message: values are padded to their alignment (at most
/// [`MAX_ALIGNMENT`] columns), unbound holes print as written.
impl fmt::Display for BoundTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                TemplateToken::Text(text) => f.write_str(&text.text())?,
                TemplateToken::Hole(hole) => f.write_str(hole.raw())?,
                TemplateToken::Bound(b) if !b.is_bound() => f.write_str(b.raw())?,
                TemplateToken::Bound(b) => {
                    let value = b.value().to_string();
                    let width = (b.alignment().unsigned_abs() as usize).min(MAX_ALIGNMENT);
                    if b.alignment() < 0 {
                        write!(f, "{:<width$}", value, width = width)?;
                    } else {
                        write!(f, "{:>width$}", value, width = width)?;
                    }
                }
            }
        }
        Ok(())
    }
}
