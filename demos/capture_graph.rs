//! How limits shape the captured tree for deep, wide and cyclic values.
//!
//! Run with: cargo run --example capture_graph

use serde::Serialize;
use serde_capture::{
    to_json_string, ConversionConfig, ConversionEngine, ConversionLimits, Identifier, Interval,
    Timestamp,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::rc::Rc;
use std::time::Duration;

#[derive(Serialize)]
struct Node {
    name: String,
    next: Option<Rc<RefCell<Node>>>,
}

#[derive(Serialize)]
struct Event {
    id: Identifier,
    at: Timestamp,
    took: Interval,
    payload: Vec<u8>,
    labels: BTreeMap<String, String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let limits = ConversionLimits::new()
        .with_depth_limit(3)
        .with_item_limit(4)
        .with_string_limit(16)
        .with_byte_array_limit(8);
    let engine = ConversionEngine::new(ConversionConfig::new().with_limits(limits))?;

    // A two-node cycle stops at the depth limit
    let a = Rc::new(RefCell::new(Node {
        name: "a".to_string(),
        next: None,
    }));
    let b = Rc::new(RefCell::new(Node {
        name: "b".to_string(),
        next: Some(Rc::clone(&a)),
    }));
    a.borrow_mut().next = Some(Rc::clone(&b));
    let cycle = engine.convert(&*a.borrow());
    println!("Cycle:\n  {}\n", cycle);
    a.borrow_mut().next = None;

    // Wide collections keep the first items
    println!("Wide:\n  {}\n", engine.convert(&(0..100).collect::<Vec<_>>()));

    // Long strings are truncated
    println!("Long:\n  {}\n", engine.convert(&"a rather long log line that goes on"));

    let event = Event {
        id: Identifier(uuid::Uuid::nil()),
        at: Timestamp(chrono::DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")?),
        took: Interval(Duration::from_millis(1250)),
        payload: (0..32).collect(),
        labels: [("env", "prod"), ("region", "eu-west-1")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    };
    let token = engine.convert(&event);
    println!("Event:\n  {}", token);
    println!("  {}", to_json_string(&token));

    Ok(())
}
