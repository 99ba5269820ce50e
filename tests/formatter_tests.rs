use serde::Serialize;
use serde_capture::{
    to_json_string, to_token, JsonFormatter, Property, Scalar, Structure, Token, TokenFormatter,
    TokenMap,
};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

#[derive(Serialize)]
struct Sample {
    name: &'static str,
    count: u32,
    ratio: f64,
    on: bool,
}

#[test]
fn test_json_structure() {
    let sample = Sample {
        name: "x \"y\"",
        count: 2,
        ratio: 0.25,
        on: false,
    };
    assert_eq!(
        to_json_string(&to_token(&sample)),
        r#""Sample": { "name": "x \"y\"", "count": 2, "ratio": 0.25, "on": false }"#
    );
}

#[test]
fn test_json_mapping_is_key_value_list() {
    let mut map = BTreeMap::new();
    map.insert(1, "one");
    map.insert(2, "two");
    assert_eq!(
        to_json_string(&to_token(&map)),
        r#"[{"key": 1, "value": "one"}, {"key": 2, "value": "two"}]"#
    );
}

#[test]
fn test_json_anonymous_and_empty_structures() {
    let anonymous = Structure::new(
        None,
        vec![Property::new("a", Token::Scalar(Scalar::Int(1))).unwrap()],
    );
    assert_eq!(to_json_string(&Token::Structure(anonymous)), r#"{ "a": 1 }"#);

    let empty = Structure::new(Some("Empty".to_string()), Vec::new());
    assert_eq!(to_json_string(&Token::Structure(empty)), r#""Empty": {  }"#);
}

#[test]
fn test_json_textual_scalars_are_quoted() {
    let values = vec![
        Token::Scalar(Scalar::Char('c')),
        Token::Scalar(Scalar::Bytes(vec![0x0A, 0xFF])),
        Token::Scalar(Scalar::Uuid(uuid::Uuid::nil())),
        Token::Scalar(Scalar::UInt(3)),
        Token::null(),
    ];
    assert_eq!(
        to_json_string(&Token::Sequence(values)),
        r#"["c", "0x0AFF", "00000000-0000-0000-0000-000000000000", 3, null]"#
    );
}

#[test]
fn test_display_forms() {
    let mut map = TokenMap::new();
    map.insert(Scalar::from("k"), Token::Sequence(vec![Token::text("v")]));
    assert_eq!(Token::Mapping(map).to_string(), r#"{"k": ["v"]}"#);

    let property = Property::new("p", Token::text("q")).unwrap();
    assert_eq!(Token::from(property).to_string(), r#"p: "q""#);
}

/// Counts every node it visits, writing nothing.
#[derive(Default)]
struct NodeCounter {
    nodes: usize,
}

impl TokenFormatter for NodeCounter {
    fn format_scalar(&mut self, _scalar: &Scalar) -> fmt::Result {
        self.nodes += 1;
        Ok(())
    }

    fn format_sequence(&mut self, elements: &[Token]) -> fmt::Result {
        self.nodes += 1;
        elements.iter().try_for_each(|e| e.render(self))
    }

    fn format_mapping(&mut self, map: &TokenMap) -> fmt::Result {
        self.nodes += 1;
        map.values().try_for_each(|v| v.render(self))
    }

    fn format_structure(&mut self, structure: &Structure) -> fmt::Result {
        self.nodes += 1;
        structure
            .properties()
            .iter()
            .try_for_each(|p| self.format_property(p))
    }

    fn format_property(&mut self, property: &Property) -> fmt::Result {
        property.value().render(self)
    }
}

#[test]
fn test_custom_formatter() {
    let sample = Sample {
        name: "n",
        count: 1,
        ratio: 1.0,
        on: true,
    };
    let mut counter = NodeCounter::default();
    to_token(&vec![sample]).render(&mut counter).unwrap();
    assert_eq!(counter.nodes, 6);
}

#[test]
fn test_json_formatter_into_inner() {
    let mut formatter = JsonFormatter::new(String::from(">"));
    to_token(&[1, 2]).render(&mut formatter).unwrap();
    let mut out = formatter.into_inner();
    out.write_char('<').unwrap();
    assert_eq!(out, ">[1, 2]<");
}
