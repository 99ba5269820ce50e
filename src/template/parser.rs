//! Template grammar.
//!
//! A hole is `{` [hint] (index | name) [`,` alignment] [`:` format] `}` with
//! optional whitespace inside the braces. Anything that does not match, and
//! every `{{` / `}}` pair, is literal text. Parsing never fails.

use super::token::{HoleToken, TemplateToken, TextToken};
use crate::ConversionHint;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static HOLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\{\s*(?P<hint>[^\w\s{}])?(?:(?P<index>[0-9]+)|(?P<name>\w+))(?:,(?P<alignment>[^}:]*))?(?::(?P<format>[^}]*))?\s*\}",
    )
    .unwrap()
});

/// Lazily tokenizes a template.
///
/// Always yields at least one token, and the raw text of all tokens
/// concatenates back to the input.
///
/// # Examples
///
/// ```rust
/// use serde_capture::template::{parse, TemplateToken};
///
/// let tokens: Vec<_> = parse("{Greeting}, {Name} {{!}}").collect();
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[0].as_hole().and_then(|h| h.name()), Some("Greeting"));
/// assert_eq!(tokens[3].as_text().map(|t| t.text().into_owned()), Some(" {!}".to_string()));
/// ```
pub fn parse(template: &str) -> Tokens<'_> {
    Tokens {
        template,
        pos: 0,
        emitted: false,
    }
}

/// Iterator returned by [`parse`].
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    template: &'a str,
    pos: usize,
    emitted: bool,
}

impl Iterator for Tokens<'_> {
    type Item = TemplateToken;

    fn next(&mut self) -> Option<TemplateToken> {
        let rest = &self.template[self.pos..];
        if rest.is_empty() {
            if self.emitted {
                return None;
            }
            self.emitted = true;
            return Some(TemplateToken::Text(TextToken::new("")));
        }
        self.emitted = true;

        let mut scan = 0;
        while let Some(offset) = rest[scan..].find('{') {
            let at = scan + offset;
            if rest[at + 1..].starts_with('{') {
                scan = at + 2;
                continue;
            }
            if let Some(hole) = HOLE.captures(&rest[at..]).and_then(|caps| hole(&caps)) {
                if at > 0 {
                    self.pos += at;
                    return Some(TemplateToken::Text(TextToken::new(&rest[..at])));
                }
                self.pos += hole.raw.len();
                return Some(TemplateToken::Hole(hole));
            }
            scan = at + 1;
        }

        self.pos = self.template.len();
        Some(TemplateToken::Text(TextToken::new(rest)))
    }
}

/// Builds a hole from a grammar match; `None` when the index overflows.
fn hole(caps: &Captures<'_>) -> Option<HoleToken> {
    let index = match caps.name("index") {
        Some(m) => Some(m.as_str().parse::<usize>().ok()?),
        None => None,
    };
    let hint = caps
        .name("hint")
        .and_then(|m| m.as_str().chars().next())
        .map_or(ConversionHint::Default, ConversionHint::from_char);
    let alignment = caps
        .name("alignment")
        .and_then(|m| m.as_str().trim().parse::<i32>().ok())
        .unwrap_or(0);
    let format = caps
        .name("format")
        .map(|m| m.as_str().trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string);

    Some(HoleToken {
        raw: caps[0].to_string(),
        name: caps.name("name").map(|m| m.as_str().to_string()),
        index,
        hint,
        alignment,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(template: &str) -> Vec<TemplateToken> {
        parse(template).collect()
    }

    fn single_hole(template: &str) -> HoleToken {
        let tokens = tokens(template);
        assert_eq!(tokens.len(), 1, "{:?}", tokens);
        tokens[0].as_hole().cloned().expect("hole")
    }

    fn is_single_text(template: &str) -> bool {
        let tokens = tokens(template);
        tokens.len() == 1 && tokens[0].as_text().map(TextToken::raw) == Some(template)
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(is_single_text(""));
        assert!(is_single_text("   "));
        assert!(is_single_text("no holes here"));
    }

    #[test]
    fn test_escaped_braces_are_text() {
        assert!(is_single_text("{{ Hello, World ! }}"));
        assert!(is_single_text("{{0}}"));
    }

    #[test]
    fn test_malformed_holes_are_text() {
        assert!(is_single_text("{123 Hello World!}"));
        assert!(is_single_text("{   }"));
        assert!(is_single_text("{}"));
        assert!(is_single_text("{Name"));
        assert!(is_single_text("{99999999999999999999999999}"));
    }

    #[test]
    fn test_name_and_index() {
        let hole = single_hole("{Hello}");
        assert_eq!(hole.name(), Some("Hello"));
        assert_eq!(hole.index(), None);

        let hole = single_hole("{12}");
        assert_eq!(hole.index(), Some(12));
        assert_eq!(hole.name(), None);

        assert_eq!(single_hole("{123_Hello}").name(), Some("123_Hello"));
        assert_eq!(single_hole("{ _123_Hello}").name(), Some("_123_Hello"));
    }

    #[test]
    fn test_hints() {
        assert_eq!(single_hole("{@User}").hint(), ConversionHint::Destructure);
        assert_eq!(single_hole("{$User}").hint(), ConversionHint::Stringify);
        assert_eq!(single_hole("{?Invalid}").hint(), ConversionHint::Default);
        assert_eq!(single_hole("{User}").hint(), ConversionHint::Default);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(single_hole("{Hello,10}").alignment(), 10);
        assert_eq!(single_hole("{Hello, -5}").alignment(), -5);
        assert_eq!(single_hole("{Hello,+3}").alignment(), 3);
        assert_eq!(single_hole("{Hello,  -aa}").alignment(), 0);
    }

    #[test]
    fn test_format() {
        assert_eq!(single_hole("{Time:hh:mm}").format(), Some("hh:mm"));
        assert_eq!(single_hole("{Amount,8:C2}").format(), Some("C2"));
        assert_eq!(single_hole("{Amount:   }").format(), None);
    }

    #[test]
    fn test_text_runs_are_merged() {
        let tokens = tokens("a { b {{ c }} {Name} d");
        let raws: Vec<_> = tokens.iter().map(TemplateToken::raw).collect();
        assert_eq!(raws, vec!["a { b {{ c }} ", "{Name}", " d"]);
    }

    #[test]
    fn test_adjacent_holes() {
        let tokens = tokens("{A}{B}");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.as_hole().is_some()));
    }
}
