use serde::Serialize;
use serde_capture::template::{parse, Template, TemplateBinder, TemplateToken, NOT_BOUND};
use serde_capture::{
    bind, Capture, ConversionConfig, ConversionEngine, ConversionHint, ConversionLimits,
    ConversionType, Scalar, Token,
};

#[derive(Serialize)]
struct Order {
    id: u32,
    lines: Vec<&'static str>,
}

fn kinds(template: &str) -> Vec<&'static str> {
    parse(template)
        .map(|t| match t {
            TemplateToken::Text(_) => "text",
            TemplateToken::Hole(_) => "hole",
            TemplateToken::Bound(_) => "bound",
        })
        .collect()
}

#[test]
fn test_plain_text_is_one_token() {
    assert_eq!(kinds("no holes here"), vec!["text"]);
    assert_eq!(kinds(""), vec!["text"]);
}

#[test]
fn test_holes_and_text_alternate() {
    assert_eq!(kinds("{A}{B} and {C}."), vec!["hole", "hole", "text", "hole", "text"]);
}

#[test]
fn test_hole_parts() {
    let template = Template::parse("{ @Order,-8:N2 } {$0} {#Name}");
    let holes: Vec<_> = template.holes().collect();
    assert_eq!(holes.len(), 3);

    assert_eq!(holes[0].name(), Some("Order"));
    assert_eq!(holes[0].hint(), ConversionHint::Destructure);
    assert_eq!(holes[0].alignment(), -8);
    assert_eq!(holes[0].format(), Some("N2"));

    assert_eq!(holes[1].index(), Some(0));
    assert_eq!(holes[1].name(), None);
    assert_eq!(holes[1].hint(), ConversionHint::Stringify);

    assert_eq!(holes[2].hint(), ConversionHint::Default);
}

#[test]
fn test_malformed_holes_are_text() {
    for template in ["{", "{}", "{ }", "{a b}", "{@}", "{Name", "x}"] {
        let tokens: Vec<_> = parse(template).collect();
        assert_eq!(tokens.len(), 1, "template {:?}", template);
        assert_eq!(tokens[0].raw(), template);
        assert!(tokens[0].as_text().is_some());
    }
}

#[test]
fn test_escaped_braces() {
    let tokens: Vec<_> = parse("{{A}} {B}").collect();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].as_text().unwrap().text(), "{A} ");
    assert_eq!(tokens[1].as_hole().unwrap().name(), Some("B"));
}

#[test]
fn test_bind_named_holes() {
    let order = Order {
        id: 7,
        lines: vec!["tea", "milk"],
    };
    let bound = bind("Order {@Order} placed by {User}", &[&order, &"ada"]);
    assert_eq!(
        bound.to_string(),
        r#"Order Order { id: 7, lines: ["tea", "milk"] } placed by ada"#
    );

    let props: Vec<_> = bound.properties().collect();
    assert_eq!(props[0].name(), "Order");
    assert!(props[0].value().as_structure().is_some());
    assert_eq!(props[1].name(), "User");
    assert_eq!(props[1].value(), &Token::text("ada"));
}

#[test]
fn test_bind_indexed_out_of_order() {
    let bound = bind("{1} then {0}", &[&"first", &"second"]);
    assert_eq!(bound.to_string(), "second then first");
}

#[test]
fn test_missing_argument_binds_placeholder() {
    let bound = bind("{A} {B}", &[&1]);
    let b = bound.tokens()[2].as_bound().unwrap();
    assert!(!b.is_bound());
    assert_eq!(b.property().name(), "B");
    assert_eq!(b.value(), &Token::text(NOT_BOUND));
    assert_eq!(bound.to_string(), "1 {B}");
}

#[test]
fn test_extra_arguments_are_ignored() {
    let bound = bind("{A}", &[&1, &2, &3]);
    assert_eq!(bound.properties().count(), 1);
    assert_eq!(bound.to_string(), "1");
}

#[test]
fn test_stringify_hint() {
    let order = Order {
        id: 1,
        lines: vec![],
    };
    let bound = bind("{$Order}", &[&order]);
    let value = bound.properties().next().unwrap().value();
    assert_eq!(value, &Token::text("Order { id: 1, lines: [] }"));
}

#[test]
fn test_default_conversion_type_applies_to_plain_holes() {
    let config = ConversionConfig::new().with_conversion_type(ConversionType::Stringify);
    let binder = TemplateBinder::new(config).unwrap();
    let bound = binder.bind("{N} {@N}", &[&vec![1, 2]]);
    let values: Vec<_> = bound.properties().map(|p| p.value().clone()).collect();
    assert_eq!(values[0], Token::text("[1, 2]"));
    assert!(values[1].as_sequence().is_some());
}

#[test]
fn test_stringify_respects_string_limit() {
    let limits = ConversionLimits::new().with_string_limit(5);
    let engine = ConversionEngine::new(ConversionConfig::new().with_limits(limits)).unwrap();
    let binder = TemplateBinder::with_engine(engine);
    let bound = binder.bind("{$V}", &[&vec![100, 200, 300]]);
    assert_eq!(bound.properties().next().unwrap().value(), &Token::text("[100,…"));
}

#[test]
fn test_stringify_keeps_null() {
    let bound = bind("{$V}", &[&None::<u8>]);
    assert!(bound.properties().next().unwrap().value().is_null());
}

#[test]
fn test_bind_parsed_template_twice() {
    let template = Template::parse("{Count} items");
    let binder = TemplateBinder::default();
    assert_eq!(binder.bind_template(&template, &[&1]).to_string(), "1 items");
    assert_eq!(binder.bind_template(&template, &[&2]).to_string(), "2 items");
}

#[test]
fn test_dynamic_argument_list() {
    let values: Vec<Box<dyn Capture>> = vec![Box::new(1.5f64), Box::new("x")];
    let args: Vec<&dyn Capture> = values.iter().map(|b| b.as_ref()).collect();
    let bound = bind("{A}/{B}", &args);
    let first = bound.properties().next().unwrap().value();
    assert_eq!(first, &Token::Scalar(Scalar::Float(1.5)));
    assert_eq!(bound.to_string(), "1.5/x");
}

#[test]
fn test_bound_template_keeps_text() {
    let bound = bind("Hello {{ {Name} }}", &[&"bob"]);
    assert_eq!(bound.text(), "Hello {{ {Name} }}");
    assert_eq!(bound.to_string(), "Hello { bob }");
}
