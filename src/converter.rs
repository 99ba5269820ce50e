//! Converters: the policy dispatcher and its stringifying sibling.
//!
//! - [`ConversionEngine`]: structural conversion through the ordered policy chain
//! - [`ScalarConverter`]: always produces one text scalar
//! - [`LimitedConverter`]: an engine handle pinned to a recursion depth, given
//!   to policies for nested conversion
//! - [`ConverterFactory`]: picks a converter for a [`ConversionHint`]
//!
//! Conversion never fails from the caller's point of view. A policy error is
//! logged and the next policy is tried; a value no policy accepts falls back to
//! its textual form.
//!
//! ## Examples
//!
//! ```rust
//! use serde_capture::{ConversionEngine, ConversionHint, ConverterFactory, PropertyConverter};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User { name: String, admin: bool }
//!
//! let user = User { name: "Ada".into(), admin: true };
//! let factory = ConverterFactory::new(ConversionEngine::default());
//!
//! let structural = factory.for_hint(ConversionHint::Destructure).convert(&user);
//! assert_eq!(structural.to_string(), "User { name: \"Ada\", admin: true }");
//!
//! let text = factory.for_hint(ConversionHint::Stringify).convert(&user);
//! assert_eq!(text.as_scalar().and_then(|s| s.as_str()), Some("User { name: \"Ada\", admin: true }"));
//! ```

use crate::capture::{Capture, Capturer};
use crate::config::MAX_DEPTH_LIMIT;
use crate::policy::{default_policies, Candidate, ConversionPolicy, StringPolicy};
use crate::{ConversionConfig, ConversionLimits, ConversionType, Error, Result, Scalar, Token};
use std::sync::Arc;
use tracing::{debug, error};

/// Per-hole directive selecting a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ConversionHint {
    /// Use the configured [`ConversionType`].
    #[default]
    Default,
    /// `$`: a single text scalar.
    Stringify,
    /// `@`: the full policy chain.
    Destructure,
}

impl ConversionHint {
    /// Maps a hole's hint character.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        match c {
            '@' => ConversionHint::Destructure,
            '$' => ConversionHint::Stringify,
            _ => ConversionHint::Default,
        }
    }

    /// Resolves `Default` against the configured conversion type.
    #[must_use]
    pub fn resolve(self, default: ConversionType) -> ConversionType {
        match self {
            ConversionHint::Default => default,
            ConversionHint::Stringify => ConversionType::Stringify,
            ConversionHint::Destructure => ConversionType::Destructure,
        }
    }
}

/// Converts one argument into a token.
pub trait PropertyConverter {
    fn convert(&self, value: &dyn Capture) -> Token;
}

#[derive(Debug)]
struct EngineState {
    limits: ConversionLimits,
    conversion_type: ConversionType,
    policies: Vec<Arc<dyn ConversionPolicy>>,
}

/// The structural converter: a depth-limited dispatcher over an ordered
/// policy list.
///
/// Cloning is cheap; clones share configuration and policies.
///
/// # Examples
///
/// ```rust
/// use serde_capture::{ConversionConfig, ConversionEngine, ConversionLimits, Scalar, Token};
///
/// let engine = ConversionEngine::new(
///     ConversionConfig::new().with_limits(ConversionLimits::new().with_depth_limit(1)),
/// ).unwrap();
///
/// let nested = vec![vec![vec![1]]];
/// let token = engine.convert(&nested);
/// assert_eq!(token, Token::Sequence(vec![Token::Sequence(vec![Token::null()])]));
/// ```
#[derive(Clone, Debug)]
pub struct ConversionEngine {
    state: Arc<EngineState>,
}

impl ConversionEngine {
    /// Builds an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `depth_limit` exceeds
    /// [`MAX_DEPTH_LIMIT`](crate::MAX_DEPTH_LIMIT).
    pub fn new(config: ConversionConfig) -> Result<Self> {
        if config.limits.depth_limit > MAX_DEPTH_LIMIT {
            return Err(Error::invalid_config(&format!(
                "depth limit {} exceeds the maximum of {}",
                config.limits.depth_limit, MAX_DEPTH_LIMIT
            )));
        }
        Ok(Self::from_checked(config))
    }

    fn from_checked(config: ConversionConfig) -> Self {
        let ConversionConfig {
            limits,
            conversion_type,
            policies,
            additional,
        } = config;

        let mut chain = additional;
        chain.extend(policies.unwrap_or_else(|| default_policies(&limits)));

        ConversionEngine {
            state: Arc::new(EngineState {
                limits,
                conversion_type,
                policies: chain,
            }),
        }
    }

    #[must_use]
    pub fn limits(&self) -> &ConversionLimits {
        &self.state.limits
    }

    #[must_use]
    pub fn conversion_type(&self) -> ConversionType {
        self.state.conversion_type
    }

    /// The effective policy chain, in evaluation order.
    #[must_use]
    pub fn policies(&self) -> &[Arc<dyn ConversionPolicy>] {
        &self.state.policies
    }

    /// Converts a value at the configured depth limit.
    pub fn convert<T: Capture + ?Sized>(&self, value: &T) -> Token {
        self.convert_at(value, self.root_depth())
    }

    fn root_depth(&self) -> i32 {
        // bounded by MAX_DEPTH_LIMIT at construction
        i32::try_from(self.state.limits.depth_limit).unwrap_or(i32::MAX)
    }

    /// Converts a value with `depth` levels remaining. Below zero the result
    /// is the null scalar and the value is not inspected.
    pub fn convert_at<T: Capture + ?Sized>(&self, value: &T, depth: i32) -> Token {
        match self.try_convert_at(value, depth) {
            Ok(token) => token,
            Err(err) => {
                debug!(error = %err, "value could not be captured");
                Token::text(format!("Capturing the value failed: {}", err))
            }
        }
    }

    /// Like [`convert_at`](Self::convert_at), but reports a failing
    /// `Serialize` impl instead of describing it.
    pub(crate) fn try_convert_at<T: Capture + ?Sized>(&self, value: &T, depth: i32) -> Result<Token> {
        if depth < 0 {
            return Ok(Token::null());
        }
        value.capture(Capturer::new(self, depth))
    }

    /// Runs the policy chain. The first policy producing a token wins.
    pub(crate) fn dispatch(
        &self,
        converter: &LimitedConverter<'_>,
        candidate: Candidate<'_>,
    ) -> Token {
        for policy in &self.state.policies {
            match policy.try_convert(converter, &candidate) {
                Ok(Some(token)) => return token,
                Ok(None) => {}
                Err(err) => {
                    error!(
                        policy = policy.name(),
                        value = %candidate,
                        error = %err,
                        "conversion policy failed"
                    );
                }
            }
        }
        Token::Scalar(Scalar::Text(candidate.to_string()))
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::from_checked(ConversionConfig::default())
    }
}

impl PropertyConverter for ConversionEngine {
    fn convert(&self, value: &dyn Capture) -> Token {
        self.convert_at(value, self.root_depth())
    }
}

/// An engine handle pinned to a remaining depth.
///
/// Policies receive one already decremented for the candidate's children.
#[derive(Clone, Copy, Debug)]
pub struct LimitedConverter<'e> {
    engine: &'e ConversionEngine,
    depth: i32,
}

impl<'e> LimitedConverter<'e> {
    pub fn new(engine: &'e ConversionEngine, depth: i32) -> Self {
        LimitedConverter { engine, depth }
    }

    /// Converts a nested value at this converter's depth.
    pub fn convert<T: Capture + ?Sized>(&self, value: &T) -> Token {
        self.engine.convert_at(value, self.depth)
    }

    pub(crate) fn try_convert<T: Capture + ?Sized>(&self, value: &T) -> Result<Token> {
        self.engine.try_convert_at(value, self.depth)
    }

    #[must_use]
    pub fn depth(&self) -> i32 {
        self.depth
    }

    #[must_use]
    pub fn limits(&self) -> &'e ConversionLimits {
        self.engine.limits()
    }

    #[must_use]
    pub fn engine(&self) -> &'e ConversionEngine {
        self.engine
    }
}

/// The stringifying converter.
///
/// The value is converted structurally, rendered with `Display`, and the text
/// goes through the string policy so the string limit still applies. Absent
/// values stay null.
///
/// # Examples
///
/// ```rust
/// use serde_capture::{ConversionEngine, PropertyConverter, Scalar, ScalarConverter, Token};
///
/// let converter = ScalarConverter::new(ConversionEngine::default());
/// assert_eq!(converter.convert(&vec![1, 2]), Token::text("[1, 2]"));
/// assert_eq!(converter.convert(&None::<u8>), Token::Scalar(Scalar::Null));
/// ```
#[derive(Clone, Debug)]
pub struct ScalarConverter {
    engine: ConversionEngine,
    strings: StringPolicy,
}

impl ScalarConverter {
    #[must_use]
    pub fn new(engine: ConversionEngine) -> Self {
        let strings = StringPolicy::new(engine.limits().string_limit);
        ScalarConverter { engine, strings }
    }
}

impl PropertyConverter for ScalarConverter {
    fn convert(&self, value: &dyn Capture) -> Token {
        let token = self.engine.convert_at(value, self.engine.root_depth());
        if token.is_null() {
            return token;
        }

        let text = token.to_string();
        let converter = LimitedConverter::new(&self.engine, self.engine.root_depth() - 1);
        let truncated = {
            let candidate = Candidate::Str(&text);
            self.strings.try_convert(&converter, &candidate)
        };
        match truncated {
            Ok(Some(token)) => token,
            Ok(None) => Token::text(text),
            Err(err) => {
                error!(
                    policy = self.strings.name(),
                    value = %text,
                    error = %err,
                    "conversion policy failed"
                );
                Token::text(text)
            }
        }
    }
}

/// Selects a converter per conversion hint.
#[derive(Clone, Debug)]
pub struct ConverterFactory {
    structural: ConversionEngine,
    stringify: ScalarConverter,
}

impl ConverterFactory {
    #[must_use]
    pub fn new(engine: ConversionEngine) -> Self {
        ConverterFactory {
            stringify: ScalarConverter::new(engine.clone()),
            structural: engine,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &ConversionEngine {
        &self.structural
    }

    /// The converter for `hint`; `Default` follows the engine's configured
    /// conversion type.
    #[must_use]
    pub fn for_hint(&self, hint: ConversionHint) -> &dyn PropertyConverter {
        match hint.resolve(self.structural.conversion_type()) {
            ConversionType::Destructure => &self.structural,
            ConversionType::Stringify => &self.stringify,
        }
    }
}

impl Default for ConverterFactory {
    fn default() -> Self {
        Self::new(ConversionEngine::default())
    }
}
