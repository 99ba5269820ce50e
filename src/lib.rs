//! # serde_capture
//!
//! Bounded capture of arbitrary `Serialize` values into a typed token tree, and
//! message templates that bind such values for structured logging.
//!
//! ## What it does
//!
//! Given any value, the [`ConversionEngine`] produces a [`Token`] tree that is
//! safe to hand to a formatter no matter what the value looks like:
//!
//! - **Depth-limited**: nesting past the depth limit collapses to null, so even
//!   cyclic `Rc` graphs terminate
//! - **Size-limited**: sequences, maps and structs keep at most `item_limit`
//!   children; long strings and byte arrays are truncated
//! - **Fault-isolated**: a failing `Serialize` impl or conversion policy is
//!   logged and replaced, never propagated
//!
//! Templates such as `"User {Name} placed {@Order}"` are parsed into text and
//! holes, and a [`TemplateBinder`] converts the arguments for each hole.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_capture = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Capturing a value
//!
//! ```rust
//! use serde::Serialize;
//! use serde_capture::{to_json_string, to_token};
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let user = User { id: 7, name: "Ada".into(), tags: vec!["admin".into()] };
//! let token = to_token(&user);
//!
//! assert_eq!(token.to_string(), r#"User { id: 7, name: "Ada", tags: ["admin"] }"#);
//! assert_eq!(to_json_string(&token), r#""User": { "id": 7, "name": "Ada", "tags": ["admin"] }"#);
//! ```
//!
//! ### Binding a template
//!
//! ```rust
//! use serde_capture::bind;
//!
//! let bound = bind("{User} has {Count} new messages", &[&"ada", &3]);
//! assert_eq!(bound.to_string(), "ada has 3 new messages");
//!
//! let names: Vec<_> = bound.properties().map(|p| p.name()).collect();
//! assert_eq!(names, vec!["User", "Count"]);
//! ```
//!
//! ### Limits
//!
//! ```rust
//! use serde_capture::{to_token_with_config, ConversionConfig, ConversionLimits};
//!
//! let limits = ConversionLimits::new().with_item_limit(3).with_string_limit(4);
//! let config = ConversionConfig::new().with_limits(limits);
//!
//! let token = to_token_with_config(&vec!["abcdefgh"; 10], config).unwrap();
//! assert_eq!(token.to_string(), r#"["abcd…", "abcd…", "abcd…"]"#);
//! ```
//!
//! ## Logging
//!
//! Recovered faults are reported through [`tracing`]: policy failures at
//! `error`, member failures and unbound holes at `warn`. The crate installs no
//! subscriber.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`bind_message.rs`** - parsing, binding and rendering templates
//! - **`capture_graph.rs`** - limits on deep, wide and cyclic values
//!
//! Run one with: `cargo run --example <name>`

pub mod cache;
pub mod capture;
pub mod config;
pub mod converter;
pub mod error;
pub mod format;
pub mod map;
pub mod markers;
pub mod policy;
mod probe;
pub mod template;
pub mod token;

pub use cache::Cache;
pub use capture::{Capture, Capturer};
pub use config::{ConversionConfig, ConversionLimits, ConversionType, MAX_DEPTH_LIMIT};
pub use converter::{
    ConversionEngine, ConversionHint, ConverterFactory, LimitedConverter, PropertyConverter,
    ScalarConverter,
};
pub use error::{Error, Result};
pub use format::{to_json_string, JsonFormatter, TokenFormatter};
pub use map::TokenMap;
pub use markers::{Callable, Identifier, Interval, Locator, Timestamp, TypeInfo};
pub use policy::{Candidate, ConversionPolicy};
pub use template::{BoundTemplate, Template, TemplateBinder};
pub use token::{Property, Scalar, Structure, Token};

/// Converts any `T: Serialize` with the default configuration.
///
/// # Examples
///
/// ```rust
/// use serde_capture::{to_token, Scalar, Token};
///
/// assert_eq!(to_token(&42), Token::Scalar(Scalar::Int(42)));
/// assert_eq!(to_token(&None::<u8>), Token::null());
/// ```
pub fn to_token<T>(value: &T) -> Token
where
    T: ?Sized + Capture,
{
    ConversionEngine::default().convert(value)
}

/// Converts any `T: Serialize` with a custom configuration.
///
/// # Errors
///
/// Returns an error if the configuration is rejected by
/// [`ConversionEngine::new`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_token_with_config<T>(value: &T, config: ConversionConfig) -> Result<Token>
where
    T: ?Sized + Capture,
{
    Ok(ConversionEngine::new(config)?.convert(value))
}

/// Parses `template` and binds `args` with the default configuration.
pub fn bind(template: &str, args: &[&dyn Capture]) -> BoundTemplate {
    TemplateBinder::default().bind(template, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_to_token_structure() {
        let token = to_token(&Point { x: 1, y: 2 });
        let s = token.as_structure().unwrap();
        assert_eq!(s.type_name(), Some("Point"));
        assert_eq!(s.get("y"), Some(&Token::Scalar(Scalar::Int(2))));
    }

    #[test]
    fn test_bind_convenience() {
        let p = Point { x: 1, y: 2 };
        let bound = bind("at {@P}", &[&p]);
        assert_eq!(bound.to_string(), "at Point { x: 1, y: 2 }");
    }

    #[test]
    fn test_token_serializes_with_type_tag() {
        let token = to_token(&Point { x: 1, y: 2 });
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json, serde_json::json!({ "$type": "Point", "x": 1, "y": 2 }));
    }
}
