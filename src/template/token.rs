//! Template segments.

use crate::{ConversionHint, Property, Token};
use std::borrow::Cow;

/// Literal text, kept with its escapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextToken {
    raw: String,
}

impl TextToken {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        TextToken { raw: raw.into() }
    }

    /// The text as written in the template.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The text with `{{` and `}}` unescaped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_capture::template::{parse, TemplateToken};
    ///
    /// let token = parse("{{ Hello, World ! }}").next().unwrap();
    /// let TemplateToken::Text(text) = token else { panic!() };
    /// assert_eq!(text.text(), "{ Hello, World ! }");
    /// ```
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        if self.raw.contains("{{") || self.raw.contains("}}") {
            Cow::Owned(self.raw.replace("{{", "{").replace("}}", "}"))
        } else {
            Cow::Borrowed(&self.raw)
        }
    }
}

/// A placeholder awaiting an argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoleToken {
    pub(crate) raw: String,
    pub(crate) name: Option<String>,
    pub(crate) index: Option<usize>,
    pub(crate) hint: ConversionHint,
    pub(crate) alignment: i32,
    pub(crate) format: Option<String>,
}

impl HoleToken {
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The name of a named hole such as `{User}`.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The position of an indexed hole such as `{0}`.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    #[must_use]
    pub fn hint(&self) -> ConversionHint {
        self.hint
    }

    /// Field width; negative left-aligns. 0 when absent or unparsable.
    #[must_use]
    pub fn alignment(&self) -> i32 {
        self.alignment
    }

    /// The format string, passed through for formatters to interpret.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// The name the bound property carries: the hole name, or the raw hole
    /// text for indexed holes.
    pub(crate) fn property_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.raw)
    }
}

/// A hole together with the property its argument produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundToken {
    raw: String,
    alignment: i32,
    format: Option<String>,
    property: Property,
    bound: bool,
}

impl BoundToken {
    pub(crate) fn new(hole: &HoleToken, property: Property, bound: bool) -> Self {
        BoundToken {
            raw: hole.raw.clone(),
            alignment: hole.alignment,
            format: hole.format.clone(),
            property,
            bound,
        }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn alignment(&self) -> i32 {
        self.alignment
    }

    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    #[must_use]
    pub fn property(&self) -> &Property {
        &self.property
    }

    #[must_use]
    pub fn value(&self) -> &Token {
        self.property.value()
    }

    /// `false` when no argument existed for the hole's position.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound
    }
}

/// One segment of a parsed or bound template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateToken {
    Text(TextToken),
    Hole(HoleToken),
    Bound(BoundToken),
}

impl TemplateToken {
    /// The segment exactly as written in the template.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            TemplateToken::Text(t) => t.raw(),
            TemplateToken::Hole(h) => h.raw(),
            TemplateToken::Bound(b) => b.raw(),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&TextToken> {
        match self {
            TemplateToken::Text(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_hole(&self) -> Option<&HoleToken> {
        match self {
            TemplateToken::Hole(h) => Some(h),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bound(&self) -> Option<&BoundToken> {
        match self {
            TemplateToken::Bound(b) => Some(b),
            _ => None,
        }
    }
}
