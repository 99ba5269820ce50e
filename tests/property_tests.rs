//! Property-based tests for the invariants that must hold on any input:
//! parsing is total and lossless, and limits are exact.

use proptest::prelude::*;
use serde_capture::template::{parse, TemplateToken};
use serde_capture::{
    bind, Capture, ConversionConfig, ConversionEngine, ConversionLimits, Scalar, Token,
};

fn engine(limits: ConversionLimits) -> ConversionEngine {
    ConversionEngine::new(ConversionConfig::new().with_limits(limits)).unwrap()
}

/// Template-ish text: mostly braces, word characters and hole punctuation.
fn template_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("{".to_string()),
            Just("}".to_string()),
            Just("{{".to_string()),
            Just("@".to_string()),
            Just(",".to_string()),
            Just(":".to_string()),
            "[a-zA-Z0-9_ -]{0,4}",
            any::<char>().prop_map(String::from),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_parse_reconstructs_input(text in template_text()) {
        let rebuilt: String = parse(&text).map(|t| t.raw().to_string()).collect();
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn prop_parse_never_yields_adjacent_text(text in template_text()) {
        let tokens: Vec<_> = parse(&text).collect();
        prop_assert!(!tokens.is_empty());
        for pair in tokens.windows(2) {
            let both_text = matches!(pair, [TemplateToken::Text(_), TemplateToken::Text(_)]);
            prop_assert!(!both_text);
        }
    }

    #[test]
    fn prop_bind_is_total(text in template_text(), n in 0usize..4) {
        let args: Vec<i32> = (0..n as i32).collect();
        let refs: Vec<&dyn Capture> = args.iter().map(|a| a as &dyn Capture).collect();
        let bound = bind(&text, &refs);
        prop_assert_eq!(bound.text(), text.as_str());
        let _ = bound.to_string();
    }

    #[test]
    fn prop_item_limit_is_exact(len in 0usize..60, limit in 1usize..20) {
        let values: Vec<u32> = (0..len as u32).collect();
        let token = engine(ConversionLimits::new().with_item_limit(limit)).convert(&values);
        let elements = token.as_sequence().unwrap();
        prop_assert_eq!(elements.len(), len.min(limit));
        for (i, element) in elements.iter().enumerate() {
            prop_assert_eq!(element, &Token::Scalar(Scalar::UInt(i as u64)));
        }
    }

    #[test]
    fn prop_string_limit_truncates_by_chars(text in "\\PC{0,40}", limit in 1usize..20) {
        let token = engine(ConversionLimits::new().with_string_limit(limit)).convert(&text);
        let out = token.as_scalar().and_then(Scalar::as_str).unwrap();
        let chars = text.chars().count();
        if chars > limit {
            prop_assert_eq!(out.chars().count(), limit + 1);
            prop_assert!(out.ends_with('…'));
            let kept: String = text.chars().take(limit).collect();
            prop_assert!(out.starts_with(&kept));
        } else {
            prop_assert_eq!(out, text.as_str());
        }
    }

    #[test]
    fn prop_byte_limit(bytes in prop::collection::vec(any::<u8>(), 1..80), limit in 1usize..40) {
        let token = engine(ConversionLimits::new().with_byte_array_limit(limit)).convert(&bytes);
        if bytes.len() > limit {
            let text = token.as_scalar().and_then(Scalar::as_str).unwrap();
            prop_assert!(text.starts_with("0x: "));
            let suffix = format!("... ({} bytes)", bytes.len());
            prop_assert!(text.ends_with(&suffix));
        } else {
            prop_assert_eq!(token.as_scalar().and_then(Scalar::as_bytes), Some(&bytes[..]));
        }
    }

    #[test]
    fn prop_depth_is_bounded(depth in 0usize..6, nesting in 0usize..12) {
        let mut value = serde_json::json!(1);
        for _ in 0..nesting {
            value = serde_json::json!([value]);
        }
        let token = engine(ConversionLimits::new().with_depth_limit(depth)).convert(&value);
        prop_assert!(token.depth() <= depth + 1);
    }
}
