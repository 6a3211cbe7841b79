//! Integration tests for the condition and value expression languages.

use msbuild_analysis::expressions::{
    parse_condition, parse_value, Expression, OperatorKind,
};
use msbuild_analysis::issues::{Issue, IssueKind};
use msbuild_analysis::span::Span;

use pretty_assertions::assert_eq;

fn condition(text: &str) -> (Option<Expression>, Vec<Issue>) {
    let mut issues = Vec::new();
    let expression = parse_condition(text, 0, &mut issues);
    (expression, issues)
}

fn kinds(issues: &[Issue]) -> Vec<IssueKind> {
    issues.iter().map(|i| i.kind).collect()
}

// =============================================================================
// Realistic condition shapes
// =============================================================================

#[test]
fn test_typical_configuration_condition() {
    let source = "'$(Configuration)|$(Platform)' == 'Debug|AnyCPU'";
    let (expression, issues) = condition(source);
    assert!(issues.is_empty());
    let Some(Expression::Binary(binary)) = expression else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.operator.kind, OperatorKind::Equals);
    assert_eq!(binary.left.text(), "'$(Configuration)|$(Platform)' ");
    assert_eq!(binary.right.text(), " 'Debug|AnyCPU'");
}

#[test]
fn test_empty_string_comparison() {
    let (expression, issues) = condition("'$(OutputPath)' != ''");
    assert!(issues.is_empty());
    let Some(Expression::Binary(binary)) = expression else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.operator.kind, OperatorKind::NotEquals);
}

#[test]
fn test_negated_property() {
    let (expression, issues) = condition("!$(SkipBuild)");
    assert!(issues.is_empty());
    let Some(Expression::Prefix(prefix)) = expression else {
        panic!("expected a prefix expression");
    };
    assert!(matches!(prefix.operand.as_ref(), Expression::Property(_)));
}

#[test]
fn test_item_reference_in_value() {
    let mut issues = Vec::new();
    let source = "@(Compile->'%(FullPath)')";
    let expression = parse_value(source, 0, &mut issues).unwrap();
    // The transform syntax is not modeled: its punctuation is flagged as
    // invalid name characters, but the source still round-trips.
    assert!(issues
        .iter()
        .any(|i| i.kind == IssueKind::InvalidItemNameCharacter));
    assert_eq!(expression.text(), source);
}

// =============================================================================
// Precedence and associativity
// =============================================================================

#[test]
fn test_equality_is_left_associative() {
    let (expression, issues) = condition("A==B!=C");
    assert!(issues.is_empty());
    let Some(Expression::Binary(outer)) = expression else {
        panic!("expected a binary expression");
    };
    assert_eq!(outer.operator.kind, OperatorKind::NotEquals);
    let Expression::Binary(inner) = outer.left.as_ref() else {
        panic!("expected (A==B) on the left");
    };
    assert_eq!(inner.operator.kind, OperatorKind::Equals);
}

#[test]
fn test_double_negation() {
    let (expression, issues) = condition("!!true");
    assert!(issues.is_empty());
    let Some(Expression::Prefix(outer)) = expression else {
        panic!("expected a prefix expression");
    };
    assert!(matches!(outer.operand.as_ref(), Expression::Prefix(_)));
}

#[test]
fn test_negation_binds_before_equality() {
    let (expression, issues) = condition("!A==!B");
    assert!(issues.is_empty());
    let Some(Expression::Binary(binary)) = expression else {
        panic!("expected a binary expression");
    };
    assert!(matches!(binary.left.as_ref(), Expression::Prefix(_)));
    assert!(matches!(binary.right.as_ref(), Expression::Prefix(_)));
}

// =============================================================================
// Recovery
// =============================================================================

#[test]
fn test_bare_reference_opening() {
    let (expression, issues) = condition("$(");
    assert_eq!(
        kinds(&issues),
        vec![
            IssueKind::MissingPropertyName,
            IssueKind::MissingRightParenthesis
        ]
    );
    assert_eq!(issues[0].span, Span::empty(2));
    assert_eq!(issues[1].span, Span::empty(2));
    assert_eq!(expression.unwrap().text(), "$(");
}

#[test]
fn test_unterminated_quote_runs_to_end_of_input() {
    let (expression, issues) = condition("'$(Configuration)==x");
    assert_eq!(kinds(&issues), vec![IssueKind::MissingEndQuote]);
    // Everything after the quote is body text, operators included.
    let expression = expression.unwrap();
    assert!(matches!(expression, Expression::QuotedString(_)));
    assert_eq!(expression.text(), "'$(Configuration)==x");
}

#[test]
fn test_every_malformed_operator_still_yields_a_tree() {
    for source in ["==", "!=", "=", "!", "A=", "=B", "A====B"] {
        let (expression, issues) = condition(source);
        let expression = expression.unwrap_or_else(|| panic!("no tree for {:?}", source));
        assert_eq!(expression.text(), source, "round trip of {:?}", source);
        assert!(!issues.is_empty(), "no issues for {:?}", source);
    }
}

#[test]
fn test_lone_equals_is_promoted_to_equality() {
    let (expression, issues) = condition("$(A) = 'x'");
    assert_eq!(kinds(&issues), vec![IssueKind::ExpectedSecondEqualsSign]);
    let Some(Expression::Binary(binary)) = expression else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.operator.kind, OperatorKind::Equals);
    assert_eq!(binary.operator.text, "=");
}
