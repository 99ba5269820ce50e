//! Message templates.
//!
//! A template is free text with holes such as `{User}`, `{0}` or
//! `{@Order,-10:format}`. [`parse`] splits it into [`TemplateToken`]s and a
//! [`TemplateBinder`] replaces every hole with the converted argument.
//!
//! | Hole part | Syntax | Meaning |
//! |---|---|---|
//! | hint | `@` / `$` | destructure / stringify; absent or any other symbol uses the configured default |
//! | index | digits | explicit argument position |
//! | name | word characters | positions assigned by first appearance |
//! | alignment | `,` signed integer | pad width, negative left-aligns; unparsable is 0; rendering clamps to `MAX_ALIGNMENT` |
//! | format | `:` text | passed through untouched |
//!
//! `{{` and `}}` are literal braces. Malformed holes are literal text; parsing
//! never fails.
//!
//! ## Examples
//!
//! ```rust
//! use serde_capture::template::{Template, TemplateBinder};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Order { id: u32, total: f64 }
//!
//! let template = Template::parse("Processed {@Order} in {Elapsed,6} ms");
//! assert_eq!(template.holes().count(), 2);
//!
//! let binder = TemplateBinder::default();
//! let bound = binder.bind_template(&template, &[&Order { id: 7, total: 9.5 }, &34]);
//! assert_eq!(bound.to_string(), "Processed Order { id: 7, total: 9.5 } in     34 ms");
//! ```

mod binder;
mod parser;
mod token;

pub use binder::{BoundTemplate, TemplateBinder, MAX_ALIGNMENT, NOT_BOUND};
pub use parser::{parse, Tokens};
pub use token::{BoundToken, HoleToken, TemplateToken, TextToken};

use std::convert::Infallible;
use std::str::FromStr;

/// A parsed template, reusable across bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    text: String,
    tokens: Vec<TemplateToken>,
}

impl Template {
    /// Parses `text` eagerly.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Template {
            text: text.to_string(),
            tokens: parse(text).collect(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    pub fn holes(&self) -> impl Iterator<Item = &HoleToken> {
        self.tokens.iter().filter_map(TemplateToken::as_hole)
    }
}

impl FromStr for Template {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Infallible> {
        Ok(Template::parse(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_spans_reconstruct_input() {
        let text = "a {B} {{c}} {0,3:x} {bad";
        let template = Template::parse(text);
        let rebuilt: String = template.tokens().iter().map(TemplateToken::raw).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_from_str() {
        let template: Template = "{A}".parse().unwrap();
        assert_eq!(template.holes().count(), 1);
    }
}
