//! Parsing and binding message templates.
//!
//! Run with: cargo run --example bind_message

use serde::Serialize;
use serde_capture::template::{Template, TemplateBinder, TemplateToken};
use serde_capture::{
    to_json_string, Cache, ConversionConfig, ConversionLimits, ConversionType,
};
use std::error::Error;
use std::sync::Arc;

#[derive(Serialize)]
struct Order {
    id: u32,
    items: Vec<&'static str>,
    total: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let order = Order {
        id: 1042,
        items: vec!["coffee", "bagel"],
        total: 7.25,
    };

    let binder = TemplateBinder::default();
    let bound = binder.bind(
        "{User} placed {@Order} ({$Order}) in {Elapsed,6} ms {{ok}}",
        &[&"alice", &order, &34],
    );

    println!("Message:\n  {}\n", bound);
    println!("Properties:");
    for property in bound.properties() {
        println!("  {} = {}", property.name(), to_json_string(property.value()));
    }

    // Unbound holes keep their text
    let partial = binder.bind("{0} of {1}", &[&3]);
    println!("\nPartial: {}", partial);

    // Parse once, bind many times
    let cache: Cache<String, Arc<Template>> = Cache::new(64)?;
    let text = "Processed batch {Batch} with {Count} records";
    for batch in 0..3 {
        let template = cache.fetch(text.to_string(), || Arc::new(Template::parse(text)));
        println!("{}", binder.bind_template(&template, &[&batch, &(batch * 100)]));
    }

    // Stringify by default, with a short string limit
    let config = ConversionConfig::new()
        .with_conversion_type(ConversionType::Stringify)
        .with_limits(ConversionLimits::new().with_string_limit(12));
    let terse = TemplateBinder::new(config)?;
    println!("\nTerse: {}", terse.bind("{Order}", &[&Order { id: 1, items: vec![], total: 0.0 }]));

    println!("\nTokens:");
    for token in Template::parse("Hello {Name,-8}!").tokens() {
        match token {
            TemplateToken::Text(t) => println!("  text  {:?}", t.text()),
            TemplateToken::Hole(h) => println!("  hole  {:?} align={}", h.name(), h.alignment()),
            TemplateToken::Bound(b) => println!("  bound {}", b.raw()),
        }
    }

    Ok(())
}
