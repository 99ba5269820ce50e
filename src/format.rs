//! Rendering token trees.
//!
//! A formatter implements [`TokenFormatter`], one method per token kind, and is
//! driven by [`Token::render`]. Containers recurse by calling `render` on their
//! children, so a formatter never has to inspect the tree itself.
//!
//! Two formatters ship with the crate:
//!
//! - [`JsonFormatter`]: a JSON-like rendering
//! - the `Display` form of [`Token`], a compact debugging rendering
//!
//! ## JSON-like rendering
//!
//! | Token | Output |
//! |---|---|
//! | null | `null` |
//! | text | `"text"` with `"` escaped as `\"` |
//! | number, bool | bare, e.g. `1.5`, `true` |
//! | char, bytes, date, duration, uuid, url | quoted default text |
//! | sequence | `[e1, e2]` |
//! | mapping | `[{"key": k, "value": v}]` |
//! | structure | `"Type": { "A": 1, "B": 2 }`, or without the `"Type": ` prefix when anonymous |
//! | property | `"Name": value` |
//!
//! ```rust
//! use serde_capture::{to_json_string, to_token};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct MyType { foo: i32, bar: &'static str }
//!
//! let token = to_token(&MyType { foo: 1, bar: "bar" });
//! assert_eq!(to_json_string(&token), r#""MyType": { "foo": 1, "bar": "bar" }"#);
//! ```

use crate::{Property, Scalar, Structure, Token, TokenMap};
use std::fmt::{self, Write};

/// A visitor receiving one call per token kind.
pub trait TokenFormatter {
    fn format_scalar(&mut self, scalar: &Scalar) -> fmt::Result;
    fn format_sequence(&mut self, elements: &[Token]) -> fmt::Result;
    fn format_mapping(&mut self, map: &TokenMap) -> fmt::Result;
    fn format_structure(&mut self, structure: &Structure) -> fmt::Result;
    fn format_property(&mut self, property: &Property) -> fmt::Result;
}

/// JSON-like formatter writing into any [`fmt::Write`].
///
/// # Examples
///
/// ```rust
/// use serde_capture::{to_token, JsonFormatter};
/// use std::collections::BTreeMap;
///
/// let map = BTreeMap::from([("bar", vec![1.2]), ("foo", vec![])]);
/// let mut out = String::new();
/// to_token(&map).render(&mut JsonFormatter::new(&mut out)).unwrap();
/// assert_eq!(out, r#"[{"key": "bar", "value": [1.2]}, {"key": "foo", "value": []}]"#);
/// ```
pub struct JsonFormatter<W> {
    out: W,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(out: W) -> Self {
        JsonFormatter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn quoted(&mut self, text: &str) -> fmt::Result {
        self.out.write_char('"')?;
        self.out.write_str(&text.replace('"', "\\\""))?;
        self.out.write_char('"')
    }
}

impl<W: Write> TokenFormatter for JsonFormatter<W> {
    fn format_scalar(&mut self, scalar: &Scalar) -> fmt::Result {
        match scalar {
            Scalar::Null => self.out.write_str("null"),
            Scalar::Text(text) => self.quoted(text),
            other if other.is_textual() => self.quoted(&other.to_string()),
            other => write!(self.out, "{}", other),
        }
    }

    fn format_sequence(&mut self, elements: &[Token]) -> fmt::Result {
        self.out.write_char('[')?;
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            element.render(self)?;
        }
        self.out.write_char(']')
    }

    fn format_mapping(&mut self, map: &TokenMap) -> fmt::Result {
        self.out.write_char('[')?;
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.out.write_str("{\"key\": ")?;
            self.format_scalar(key)?;
            self.out.write_str(", \"value\": ")?;
            value.render(self)?;
            self.out.write_char('}')?;
        }
        self.out.write_char(']')
    }

    fn format_structure(&mut self, structure: &Structure) -> fmt::Result {
        if let Some(type_name) = structure.type_name() {
            write!(self.out, "\"{}\": ", type_name)?;
        }
        self.out.write_str("{ ")?;
        for (i, property) in structure.properties().iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.format_property(property)?;
        }
        self.out.write_str(" }")
    }

    fn format_property(&mut self, property: &Property) -> fmt::Result {
        write!(self.out, "\"{}\": ", property.name())?;
        property.value().render(self)
    }
}

/// Renders a token with [`JsonFormatter`].
#[must_use]
pub fn to_json_string(token: &Token) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = token.render(&mut JsonFormatter::new(&mut out));
    out
}

/// The `Display` rendering. Text prints raw at the top level and quoted when
/// nested, so `"a"` and `["a"]` stay distinguishable.
pub(crate) struct DisplayFormatter<'a, 'b> {
    out: &'a mut fmt::Formatter<'b>,
    depth: usize,
}

impl<'a, 'b> DisplayFormatter<'a, 'b> {
    pub(crate) fn new(out: &'a mut fmt::Formatter<'b>) -> Self {
        DisplayFormatter { out, depth: 0 }
    }

    fn nested(&mut self, token: &Token) -> fmt::Result {
        self.depth += 1;
        let result = token.render(self);
        self.depth -= 1;
        result
    }

    fn nested_scalar(&mut self, scalar: &Scalar) -> fmt::Result {
        self.depth += 1;
        let result = self.format_scalar(scalar);
        self.depth -= 1;
        result
    }

    /// Writes `{k: v, …}` for unconverted key/value pairs.
    pub(crate) fn format_pairs(&mut self, pairs: &[(Token, Token)]) -> fmt::Result {
        self.out.write_char('{')?;
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.nested(key)?;
            self.out.write_str(": ")?;
            self.nested(value)?;
        }
        self.out.write_char('}')
    }

    /// Writes `Name { a: 1 }`, or `{ a: 1 }` without a name.
    pub(crate) fn format_record(
        &mut self,
        type_name: Option<&str>,
        properties: &[Property],
    ) -> fmt::Result {
        if let Some(type_name) = type_name {
            write!(self.out, "{} ", type_name)?;
        }
        if properties.is_empty() {
            return self.out.write_str("{}");
        }
        self.out.write_str("{ ")?;
        for (i, property) in properties.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            write!(self.out, "{}: ", property.name())?;
            self.nested(property.value())?;
        }
        self.out.write_str(" }")
    }
}

impl TokenFormatter for DisplayFormatter<'_, '_> {
    fn format_scalar(&mut self, scalar: &Scalar) -> fmt::Result {
        if self.depth == 0 {
            return write!(self.out, "{}", scalar);
        }
        match scalar {
            Scalar::Text(text) => write!(self.out, "\"{}\"", text.replace('"', "\\\"")),
            Scalar::Char(c) => write!(self.out, "'{}'", c),
            other => write!(self.out, "{}", other),
        }
    }

    fn format_sequence(&mut self, elements: &[Token]) -> fmt::Result {
        self.out.write_char('[')?;
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.nested(element)?;
        }
        self.out.write_char(']')
    }

    fn format_mapping(&mut self, map: &TokenMap) -> fmt::Result {
        self.out.write_char('{')?;
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.nested_scalar(key)?;
            self.out.write_str(": ")?;
            self.nested(value)?;
        }
        self.out.write_char('}')
    }

    fn format_structure(&mut self, structure: &Structure) -> fmt::Result {
        self.format_record(structure.type_name(), structure.properties())
    }

    fn format_property(&mut self, property: &Property) -> fmt::Result {
        write!(self.out, "{}: ", property.name())?;
        self.nested(property.value())
    }
}
