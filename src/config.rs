//! Configuration for conversion.
//!
//! This module provides the types that bound and steer a conversion:
//!
//! - [`ConversionLimits`]: numeric limits on bytes, strings, items and depth
//! - [`ConversionType`]: the conversion used when a hole carries no hint
//! - [`ConversionConfig`]: limits, conversion type and the ordered policy list
//!
//! A configuration is consumed once when an engine is built and is never
//! mutated afterwards.
//!
//! ## Examples
//!
//! ```rust
//! use serde_capture::{ConversionConfig, ConversionLimits, ConversionEngine, to_token_with_config};
//!
//! let limits = ConversionLimits::new()
//!     .with_item_limit(2)
//!     .with_depth_limit(3);
//! let config = ConversionConfig::new().with_limits(limits);
//!
//! let token = to_token_with_config(&vec![1, 2, 3, 4], config).unwrap();
//! assert_eq!(token.as_sequence().unwrap().len(), 2);
//! ```
//!
//! Limits are plain serde data, so they can come from any serde format:
//!
//! ```rust
//! use serde_capture::ConversionLimits;
//!
//! let limits: ConversionLimits = serde_json::from_str(r#"{ "string_limit": 32 }"#).unwrap();
//! assert_eq!(limits.string_limit, 32);
//! assert_eq!(limits.item_limit, 1000);
//! ```

use crate::policy::ConversionPolicy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Largest accepted `depth_limit`.
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Numeric conversion limits. For the byte, string and item limits, 0 means
/// "no limit".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionLimits {
    /// Byte sequences longer than this render as a hex preview.
    pub byte_array_limit: usize,
    /// Strings longer than this many characters are truncated with `…`.
    pub string_limit: usize,
    /// Maximum children per sequence, mapping or structure.
    pub item_limit: usize,
    /// Maximum nesting depth before values collapse to null.
    pub depth_limit: usize,
}

impl Default for ConversionLimits {
    fn default() -> Self {
        ConversionLimits {
            byte_array_limit: 1024,
            string_limit: 0,
            item_limit: 1000,
            depth_limit: 10,
        }
    }
}

impl ConversionLimits {
    /// Creates the default limits (1024 bytes, unlimited strings, 1000 items, depth 10).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_capture::ConversionLimits;
    ///
    /// let limits = ConversionLimits::new();
    /// assert_eq!(limits.byte_array_limit, 1024);
    /// assert_eq!(limits.depth_limit, 10);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_byte_array_limit(mut self, limit: usize) -> Self {
        self.byte_array_limit = limit;
        self
    }

    #[must_use]
    pub fn with_string_limit(mut self, limit: usize) -> Self {
        self.string_limit = limit;
        self
    }

    #[must_use]
    pub fn with_item_limit(mut self, limit: usize) -> Self {
        self.item_limit = limit;
        self
    }

    #[must_use]
    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = limit;
        self
    }

    /// `true` when `count` children may be kept.
    #[inline]
    pub(crate) fn admits(&self, count: usize) -> bool {
        self.item_limit == 0 || count < self.item_limit
    }

    /// Caps an iterator at the item limit.
    pub(crate) fn cap(&self) -> usize {
        if self.item_limit == 0 {
            usize::MAX
        } else {
            self.item_limit
        }
    }
}

/// How an argument is converted when its hole carries no hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConversionType {
    /// Full policy chain, producing structures, sequences and mappings.
    #[default]
    Destructure,
    /// Always a single text scalar.
    Stringify,
}

/// Complete engine configuration.
///
/// # Examples
///
/// ```rust
/// use serde_capture::{ConversionConfig, ConversionLimits, ConversionType};
///
/// let config = ConversionConfig::new()
///     .with_limits(ConversionLimits::new().with_string_limit(64))
///     .with_conversion_type(ConversionType::Stringify);
/// assert_eq!(config.conversion_type, ConversionType::Stringify);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConversionConfig {
    pub limits: ConversionLimits,
    pub conversion_type: ConversionType,
    /// Explicit policy list; `None` selects the nine default policies.
    pub policies: Option<Vec<Arc<dyn ConversionPolicy>>>,
    /// Policies tried before the main list, in insertion order.
    pub additional: Vec<Arc<dyn ConversionPolicy>>,
}

impl ConversionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limits(mut self, limits: ConversionLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_conversion_type(mut self, conversion_type: ConversionType) -> Self {
        self.conversion_type = conversion_type;
        self
    }

    /// Replaces the default policy list entirely.
    #[must_use]
    pub fn with_policies(mut self, policies: Vec<Arc<dyn ConversionPolicy>>) -> Self {
        self.policies = Some(policies);
        self
    }

    /// Adds a policy that runs before the main list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_capture::policy::{Candidate, ConversionPolicy};
    /// use serde_capture::{bind, ConversionConfig, LimitedConverter, Result, Token};
    /// use std::sync::Arc;
    ///
    /// #[derive(Debug)]
    /// struct Redact;
    ///
    /// impl ConversionPolicy for Redact {
    ///     fn try_convert(&self, _: &LimitedConverter<'_>, candidate: &Candidate<'_>) -> Result<Option<Token>> {
    ///         match candidate {
    ///             Candidate::Str(s) if s.starts_with("sk-") => Ok(Some(Token::text("***"))),
    ///             _ => Ok(None),
    ///         }
    ///     }
    /// }
    ///
    /// let config = ConversionConfig::new().with_additional_policy(Arc::new(Redact));
    /// let token = serde_capture::to_token_with_config(&"sk-123", config).unwrap();
    /// assert_eq!(token.to_string(), "***");
    /// ```
    #[must_use]
    pub fn with_additional_policy(mut self, policy: Arc<dyn ConversionPolicy>) -> Self {
        self.additional.push(policy);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = ConversionLimits::default();
        assert_eq!(limits.byte_array_limit, 1024);
        assert_eq!(limits.string_limit, 0);
        assert_eq!(limits.item_limit, 1000);
        assert_eq!(limits.depth_limit, 10);
    }

    #[test]
    fn test_item_limit_zero_is_unlimited() {
        let limits = ConversionLimits::new().with_item_limit(0);
        assert!(limits.admits(1_000_000));
        assert_eq!(limits.cap(), usize::MAX);

        let limits = ConversionLimits::new().with_item_limit(2);
        assert!(limits.admits(1));
        assert!(!limits.admits(2));
    }

    #[test]
    fn test_limits_roundtrip_through_json() {
        let limits = ConversionLimits::new().with_depth_limit(4);
        let json = serde_json::to_string(&limits).unwrap();
        let back: ConversionLimits = serde_json::from_str(&json).unwrap();
        assert_eq!(back, limits);
    }
}
