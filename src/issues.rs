//! Diagnostic issues
//!
//! Every defect found in the analyzed text is reported as an [`Issue`]: a
//! kind, a human-readable message, and the exact source [`Span`] the message
//! is about. Issues are always appended to a caller-owned sink and never
//! thrown; the same underlying defect may legitimately produce issues from
//! more than one rule, and no de-duplication is performed.
//!
//! Issues are built through the named factory functions in this module so
//! every producer of a kind agrees on its wording.

use crate::span::Span;
use serde::Serialize;
use std::fmt;

/// The kind of a diagnostic issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    // Document-level kinds
    /// A document can only contain one root element.
    DocumentCanHaveOneRootElement,
    /// The root element of a project file must be named `Project`.
    ExpectedProjectElement,

    // XML-layer kinds
    /// A start tag was never closed with `>` or `/>`.
    MissingTagRightAngleBracket,
    /// An element's end tag never appeared.
    MissingEndTag,
    /// An end tag named a different element than the one it closes.
    ExpectedEndTagName,
    /// An end tag appeared with no matching open element.
    UnexpectedEndTag,
    /// An attribute's `=` was not followed by a quoted value.
    ExpectedAttributeValue,
    /// A `<` that does not begin a recognizable tag.
    InvalidTag,

    // Validator kinds
    /// A mandatory attribute is absent.
    MissingRequiredAttribute,
    /// An attribute name is not in the element's schema.
    InvalidAttribute,
    /// Two mutually exclusive attributes are both present.
    AttributeCantBeDefinedWith,
    /// A child element of a disallowed kind.
    InvalidChildElement,
    /// Text content inside an element that forbids it.
    NoTextSegmentsAllowed,
    /// More than one child of a kind constrained to at most one.
    AtMostOneChildElement,
    /// A child constrained to the last position appears elsewhere.
    InvalidLastChildElement,
    /// A required child kind is entirely absent.
    MissingRequiredChildElement,

    // Expression-parser kinds
    /// `$` was not followed by `(`.
    MissingPropertyName,
    /// `$(` was immediately closed with no name.
    ExpectedPropertyName,
    /// A character inside `$(...)` is not a valid name character.
    InvalidPropertyNameCharacter,
    /// `@` was not followed by `(`.
    MissingItemName,
    /// `@(` was immediately closed with no name.
    ExpectedItemName,
    /// A character inside `@(...)` is not a valid name character.
    InvalidItemNameCharacter,
    /// A `$(` or `@(` reference was never closed.
    MissingRightParenthesis,
    /// A prefix operator has no operand.
    MissingExpression,
    /// A binary operator has nothing to its left.
    ExpectedLeftExpression,
    /// A binary operator has nothing to its right.
    MissingRightExpression,
    /// A `=` at end of input with no second `=`.
    MissingSecondEqualsSign,
    /// A `=` followed by something other than a second `=`.
    ExpectedSecondEqualsSign,
    /// A quoted string was never closed.
    MissingEndQuote,
}

/// A single diagnostic: kind, human-readable message, and source span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// What category of defect this is.
    pub kind: IssueKind,
    /// Human-readable description, suitable for direct editor display.
    pub message: String,
    /// The exact source range the message is about.
    pub span: Span,
}

impl Issue {
    /// Create an issue. Prefer the named factory functions below.
    pub fn new(kind: IssueKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.span, self.message)
    }
}

// ---------------------------------------------------------------------------
// Document-level factories
// ---------------------------------------------------------------------------

/// A second (or later) root element in the document.
pub fn document_can_have_one_root_element(span: Span) -> Issue {
    Issue::new(
        IssueKind::DocumentCanHaveOneRootElement,
        "A document can only have one root element.",
        span,
    )
}

/// The root element is not named `Project`.
pub fn expected_project_element(span: Span) -> Issue {
    Issue::new(
        IssueKind::ExpectedProjectElement,
        "Expected the root element to be a \"Project\" element.",
        span,
    )
}

// ---------------------------------------------------------------------------
// XML-layer factories
// ---------------------------------------------------------------------------

/// A tag that reached end of input before `>` or `/>`.
pub fn missing_tag_right_angle_bracket(span: Span) -> Issue {
    Issue::new(
        IssueKind::MissingTagRightAngleBracket,
        "Missing tag right angle bracket (\">\").",
        span,
    )
}

/// An element whose end tag never appeared.
pub fn missing_end_tag(name: &str, span: Span) -> Issue {
    Issue::new(
        IssueKind::MissingEndTag,
        format!("Missing end tag (\"</{}>\").", name),
        span,
    )
}

/// An end tag that names a different element than the open one.
pub fn expected_end_tag_name(expected: &str, actual: &str, span: Span) -> Issue {
    Issue::new(
        IssueKind::ExpectedEndTagName,
        format!("Expected end tag \"</{}>\" but found \"</{}>\".", expected, actual),
        span,
    )
}

/// An end tag with no matching open element.
pub fn unexpected_end_tag(name: &str, span: Span) -> Issue {
    Issue::new(
        IssueKind::UnexpectedEndTag,
        format!("Unexpected end tag (\"</{}>\").", name),
        span,
    )
}

/// An attribute `=` not followed by a quoted value.
pub fn expected_attribute_value(name: &str, span: Span) -> Issue {
    Issue::new(
        IssueKind::ExpectedAttributeValue,
        format!("Expected a quoted value for the \"{}\" attribute.", name),
        span,
    )
}

/// A `<` that does not begin a recognizable tag.
pub fn invalid_tag(span: Span) -> Issue {
    Issue::new(IssueKind::InvalidTag, "Invalid tag.", span)
}

// ---------------------------------------------------------------------------
// Validator factories
// ---------------------------------------------------------------------------

/// A mandatory attribute that is absent from an element.
pub fn missing_required_attribute(attribute_name: &str, span: Span) -> Issue {
    Issue::new(
        IssueKind::MissingRequiredAttribute,
        format!("Missing required attribute: \"{}\".", attribute_name),
        span,
    )
}

/// An attribute name outside the element's closed schema.
pub fn invalid_attribute(element_name: &str, attribute_name: &str, span: Span) -> Issue {
    Issue::new(
        IssueKind::InvalidAttribute,
        format!(
            "\"{}\" is not a valid attribute of a \"{}\" element.",
            attribute_name, element_name
        ),
        span,
    )
}

/// One direction of a mutually exclusive attribute pair.
pub fn attribute_cant_be_defined_with(
    attribute_name: &str,
    other_attribute_name: &str,
    span: Span,
) -> Issue {
    Issue::new(
        IssueKind::AttributeCantBeDefinedWith,
        format!(
            "The \"{}\" attribute can't be defined with the \"{}\" attribute.",
            attribute_name, other_attribute_name
        ),
        span,
    )
}

/// A child element of a kind the parent does not allow.
pub fn invalid_child_element(element_name: &str, child_name: &str, span: Span) -> Issue {
    Issue::new(
        IssueKind::InvalidChildElement,
        format!(
            "\"{}\" is not a valid child element of a \"{}\" element.",
            child_name, element_name
        ),
        span,
    )
}

/// Text content inside an element that forbids body text.
pub fn no_text_segments_allowed(element_name: &str, span: Span) -> Issue {
    Issue::new(
        IssueKind::NoTextSegmentsAllowed,
        format!("A \"{}\" element can't contain text.", element_name),
        span,
    )
}

/// A second child of a kind constrained to at most one.
pub fn at_most_one_child_element(element_name: &str, child_name: &str, span: Span) -> Issue {
    Issue::new(
        IssueKind::AtMostOneChildElement,
        format!(
            "A \"{}\" element can have at most one \"{}\" child element.",
            element_name, child_name
        ),
        span,
    )
}

/// A last-position-only child that is not last.
pub fn invalid_last_child_element(element_name: &str, child_name: &str, span: Span) -> Issue {
    Issue::new(
        IssueKind::InvalidLastChildElement,
        format!(
            "A \"{}\" child element must be the last child element of its \"{}\" element.",
            child_name, element_name
        ),
        span,
    )
}

/// A required child kind that never appears.
pub fn missing_required_child_element(element_name: &str, child_name: &str, span: Span) -> Issue {
    Issue::new(
        IssueKind::MissingRequiredChildElement,
        format!(
            "A \"{}\" element must have at least one \"{}\" child element.",
            element_name, child_name
        ),
        span,
    )
}

// ---------------------------------------------------------------------------
// Expression-parser factories
// ---------------------------------------------------------------------------

/// A `$` with no `(` after it.
pub fn missing_property_name(span: Span) -> Issue {
    Issue::new(IssueKind::MissingPropertyName, "Missing property name.", span)
}

/// A `$(` closed with no name inside.
pub fn expected_property_name(span: Span) -> Issue {
    Issue::new(IssueKind::ExpectedPropertyName, "Expected a property name.", span)
}

/// A character inside `$(...)` outside `[A-Za-z0-9_]`.
pub fn invalid_property_name_character(character: char, span: Span) -> Issue {
    Issue::new(
        IssueKind::InvalidPropertyNameCharacter,
        format!("\"{}\" is not a valid property name character.", character),
        span,
    )
}

/// An `@` with no `(` after it.
pub fn missing_item_name(span: Span) -> Issue {
    Issue::new(IssueKind::MissingItemName, "Missing item name.", span)
}

/// An `@(` closed with no name inside.
pub fn expected_item_name(span: Span) -> Issue {
    Issue::new(IssueKind::ExpectedItemName, "Expected an item name.", span)
}

/// A character inside `@(...)` outside `[A-Za-z0-9_]`.
pub fn invalid_item_name_character(character: char, span: Span) -> Issue {
    Issue::new(
        IssueKind::InvalidItemNameCharacter,
        format!("\"{}\" is not a valid item name character.", character),
        span,
    )
}

/// A `$(` or `@(` that was never closed.
pub fn missing_right_parenthesis(span: Span) -> Issue {
    Issue::new(
        IssueKind::MissingRightParenthesis,
        "Missing right parenthesis (\")\").",
        span,
    )
}

/// A prefix operator with nothing to operate on.
pub fn missing_expression(span: Span) -> Issue {
    Issue::new(IssueKind::MissingExpression, "Missing expression.", span)
}

/// A binary operator with nothing to its left.
pub fn expected_left_expression(span: Span) -> Issue {
    Issue::new(
        IssueKind::ExpectedLeftExpression,
        "Expected an expression to the left of the operator.",
        span,
    )
}

/// A binary operator with nothing to its right.
pub fn missing_right_expression(span: Span) -> Issue {
    Issue::new(
        IssueKind::MissingRightExpression,
        "Missing expression to the right of the operator.",
        span,
    )
}

/// A `=` at end of input with no second `=`.
pub fn missing_second_equals_sign(span: Span) -> Issue {
    Issue::new(
        IssueKind::MissingSecondEqualsSign,
        "Missing second equals sign (\"=\").",
        span,
    )
}

/// A `=` followed by something other than a second `=`.
pub fn expected_second_equals_sign(span: Span) -> Issue {
    Issue::new(
        IssueKind::ExpectedSecondEqualsSign,
        "Expected a second equals sign (\"=\").",
        span,
    )
}

/// A quoted string that was never closed.
pub fn missing_end_quote(quote: char, span: Span) -> Issue {
    Issue::new(
        IssueKind::MissingEndQuote,
        format!("Missing end quote ({}).", quote),
        span,
    )
}
