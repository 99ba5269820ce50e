//! Marker newtypes for values serde cannot describe on its own.
//!
//! serde flattens timestamps, identifiers and URLs into plain strings and has no
//! notion of function references or type descriptors. The markers here carry
//! those kinds through `Serialize` under reserved newtype names, so the capturer
//! can recover them as typed scalars. Every other serializer just sees the
//! payload: a string, or an integer for [`Interval`].
//!
//! ## Examples
//!
//! ```rust
//! use serde_capture::{to_token, Identifier, Scalar, Token, TypeInfo};
//! use uuid::Uuid;
//!
//! let id = Uuid::nil();
//! assert_eq!(to_token(&Identifier(id)), Token::Scalar(Scalar::Uuid(id)));
//!
//! let token = to_token(&TypeInfo::of::<Vec<u8>>());
//! assert_eq!(token.to_string(), "alloc::vec::Vec<u8>");
//!
//! assert_eq!(serde_json::to_string(&Identifier(id)).unwrap(), "\"00000000-0000-0000-0000-000000000000\"");
//! ```

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

pub(crate) const TYPE_INFO: &str = "$serde_capture::TypeInfo";
pub(crate) const CALLABLE: &str = "$serde_capture::Callable";
pub(crate) const TIMESTAMP: &str = "$serde_capture::Timestamp";
pub(crate) const INTERVAL: &str = "$serde_capture::Interval";
pub(crate) const IDENTIFIER: &str = "$serde_capture::Identifier";
pub(crate) const LOCATOR: &str = "$serde_capture::Locator";

/// A type descriptor, captured as its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    name: String,
}

impl TypeInfo {
    /// Describes `T` by its fully qualified name.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        TypeInfo {
            name: std::any::type_name::<T>().to_string(),
        }
    }

    /// Describes a member or type by an explicit name.
    pub fn named(name: impl Into<String>) -> Self {
        TypeInfo { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Serialize for TypeInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(TYPE_INFO, &self.name)
    }
}

/// A function reference, captured as its signature text.
///
/// # Examples
///
/// ```rust
/// use serde_capture::{to_token, Callable};
///
/// fn handler(_: u32) -> bool { true }
///
/// let token = to_token(&Callable::of(&handler));
/// assert!(token.to_string().ends_with("handler"));
///
/// let token = to_token(&Callable::named("fn(u32) -> bool"));
/// assert_eq!(token.to_string(), "fn(u32) -> bool");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Callable {
    signature: String,
}

impl Callable {
    /// Describes a function item or closure by its type name.
    #[must_use]
    pub fn of<F: ?Sized>(_function: &F) -> Self {
        Callable {
            signature: std::any::type_name::<F>().to_string(),
        }
    }

    pub fn named(signature: impl Into<String>) -> Self {
        Callable {
            signature: signature.into(),
        }
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl Serialize for Callable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(CALLABLE, &self.signature)
    }
}

/// A point in time, captured as [`Scalar::DateTime`](crate::Scalar::DateTime).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timestamp(pub DateTime<FixedOffset>);

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(TIMESTAMP, &self.0.to_rfc3339())
    }
}

/// A time interval, captured as [`Scalar::Duration`](crate::Scalar::Duration).
///
/// Serializes as whole nanoseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval(pub Duration);

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(INTERVAL, &self.0.as_nanos())
    }
}

/// A unique identifier, captured as [`Scalar::Uuid`](crate::Scalar::Uuid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identifier(pub Uuid);

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(IDENTIFIER, &self.0.hyphenated().to_string())
    }
}

/// A URI, captured as [`Scalar::Url`](crate::Scalar::Url).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locator(pub Url);

impl Serialize for Locator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(LOCATOR, self.0.as_str())
    }
}

/// Rebuilds a duration from whole nanoseconds.
pub(crate) fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_serialize_as_payload() {
        let interval = Interval(Duration::from_millis(1500));
        assert_eq!(serde_json::to_string(&interval).unwrap(), "1500000000");

        let url = Url::parse("https://example.com/a").unwrap();
        assert_eq!(
            serde_json::to_string(&Locator(url)).unwrap(),
            "\"https://example.com/a\""
        );
    }

    #[test]
    fn test_duration_from_nanos() {
        let d = Duration::new(3, 250);
        assert_eq!(duration_from_nanos(d.as_nanos()), d);
    }

    #[test]
    fn test_callable_of_closure() {
        let add = |a: i32, b: i32| a + b;
        assert!(Callable::of(&add).signature().contains("{{closure}}"));
    }
}
