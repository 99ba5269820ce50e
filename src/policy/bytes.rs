use super::{Candidate, ConversionPolicy};
use crate::{LimitedConverter, Result, Scalar, Token};
use std::fmt::Write;

/// Bytes shown in the preview of an oversized sequence.
const PREVIEW_LEN: usize = 16;

/// Converts byte sequences to byte scalars.
///
/// Past the byte limit the result is a text preview: the first 16 bytes in
/// upper-case hex followed by the total length.
///
/// Only non-empty `u8` sequences reach this policy as bytes: an empty
/// `Vec<u8>` is captured as an empty sequence. Values emitted through
/// `serialize_bytes` (for example `serde_bytes::ByteBuf`) arrive as bytes at
/// any length, including zero.
///
/// # Examples
///
/// ```rust
/// use serde_capture::{to_token_with_config, ConversionConfig, ConversionLimits};
///
/// let config = ConversionConfig::new().with_limits(ConversionLimits::new().with_byte_array_limit(4));
/// let token = to_token_with_config(&vec![0xABu8; 20], config).unwrap();
/// assert_eq!(
///     token.to_string(),
///     "0x: ABABABABABABABABABABABABABABABAB... (20 bytes)"
/// );
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BytesPolicy {
    limit: usize,
}

impl BytesPolicy {
    /// `limit` counts bytes; 0 means no limit.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        BytesPolicy { limit }
    }

    fn preview(bytes: &[u8], len: usize) -> String {
        let mut out = String::with_capacity(4 + PREVIEW_LEN * 2 + 24);
        out.push_str("0x: ");
        for b in bytes.iter().take(PREVIEW_LEN) {
            let _ = write!(out, "{:02X}", b);
        }
        let _ = write!(out, "... ({} bytes)", len);
        out
    }
}

impl ConversionPolicy for BytesPolicy {
    fn try_convert(
        &self,
        _converter: &LimitedConverter<'_>,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Token>> {
        let Candidate::Bytes { bytes, len } = candidate else {
            return Ok(None);
        };

        if self.limit > 0 && *len > self.limit {
            return Ok(Some(Token::text(Self::preview(bytes, *len))));
        }
        Ok(Some(Token::Scalar(Scalar::Bytes(bytes.to_vec()))))
    }
}
