//! Property tests: totality and span round-trips over arbitrary input.

use msbuild_analysis::documents;
use msbuild_analysis::expressions::{parse_condition, parse_value};

use proptest::prelude::*;

proptest! {
    // Any text at all can be analyzed without panicking.
    #[test]
    fn test_document_parse_is_total(text in ".*") {
        let document = documents::parse(&text);
        let _ = document.project();
        for issue in document.issues() {
            prop_assert!(issue.span.start <= issue.span.end);
            prop_assert!(issue.span.end <= text.len());
        }
    }

    // A parsed condition renders back to exactly its source text and spans
    // the whole input.
    #[test]
    fn test_condition_round_trips(text in r#"[A-Za-z0-9_$@()'"!= .\\|]{0,40}"#) {
        let mut issues = Vec::new();
        match parse_condition(&text, 0, &mut issues) {
            Some(expression) => {
                prop_assert_eq!(expression.text(), text.clone());
                let span = expression.span().expect("non-empty parse has a span");
                prop_assert_eq!(span.start, 0);
                prop_assert_eq!(span.end, text.len());
            }
            None => prop_assert!(text.is_empty()),
        }
    }

    // The value language has the same round-trip guarantee.
    #[test]
    fn test_value_round_trips(text in r#"[A-Za-z0-9_$@()'"!= .\\|]{0,40}"#) {
        let mut issues = Vec::new();
        match parse_value(&text, 0, &mut issues) {
            Some(expression) => {
                prop_assert_eq!(expression.text(), text.clone());
            }
            None => prop_assert!(text.is_empty()),
        }
    }

    // Expression issues are anchored inside (or immediately after) the
    // input, wherever the attribute offset puts it.
    #[test]
    fn test_expression_issues_respect_the_offset(
        text in r#"[A-Za-z$@()'"!=]{0,20}"#,
        offset in 0usize..1000,
    ) {
        let mut issues = Vec::new();
        let _ = parse_condition(&text, offset, &mut issues);
        for issue in &issues {
            prop_assert!(issue.span.start >= offset);
            prop_assert!(issue.span.end <= offset + text.len());
        }
    }
}
