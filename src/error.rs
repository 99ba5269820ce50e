//! Error types for capture, conversion and template binding.
//!
//! Conversion, parsing and binding never fail from the caller's point of view:
//! faults inside a single value are recovered locally and logged. The errors in
//! this module surface in two places only:
//!
//! - **Construction**: invalid limits, empty property names, zero-capacity caches
//! - **Policy internals**: a [`ConversionPolicy`](crate::ConversionPolicy) reports a
//!   failure that the engine swallows, logs, and steps past
//!
//! ## Examples
//!
//! ```rust
//! use serde_capture::{ConversionConfig, ConversionEngine, ConversionLimits, Error};
//!
//! let limits = ConversionLimits::default().with_depth_limit(100_000);
//! let result = ConversionEngine::new(ConversionConfig::new().with_limits(limits));
//! assert!(matches!(result, Err(Error::InvalidConfig(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all errors produced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A property was constructed without a usable name
    #[error("Invalid property: {0}")]
    InvalidProperty(String),

    /// A cache was constructed with an unusable capacity
    #[error("Invalid cache capacity {capacity}: capacity must be at least 1")]
    InvalidCapacity { capacity: usize },

    /// A conversion policy failed while handling a value
    #[error("Policy '{policy}' failed: {msg}")]
    Policy { policy: String, msg: String },

    /// A value used a serde shape the capturer cannot accept in that position
    #[error("Unsupported value: {0}")]
    Unsupported(String),

    /// Custom error, usually raised by a `Serialize` implementation
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a configuration error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_capture::Error;
    ///
    /// let err = Error::invalid_config("depth limit too large");
    /// assert!(err.to_string().contains("depth limit"));
    /// ```
    pub fn invalid_config(msg: &str) -> Self {
        Error::InvalidConfig(msg.to_string())
    }

    /// Creates an invalid property error.
    pub fn invalid_property(msg: &str) -> Self {
        Error::InvalidProperty(msg.to_string())
    }

    /// Creates a policy failure carrying the policy identity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_capture::Error;
    ///
    /// let err = Error::policy("RedactPolicy", "secret lookup failed");
    /// assert_eq!(err.to_string(), "Policy 'RedactPolicy' failed: secret lookup failed");
    /// ```
    pub fn policy(policy: &str, msg: &str) -> Self {
        Error::Policy {
            policy: policy.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported value error.
    pub fn unsupported(msg: &str) -> Self {
        Error::Unsupported(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
