//! Condition and value expression parsing
//!
//! MSBuild attribute values carry a small expression language: unquoted
//! text, quoted strings, `$(Property)` and `@(Item)` references, and
//! implicit concatenation of adjacent terms. `Condition` attributes
//! additionally support the prefix `!` operator and the `==`/`!=` binary
//! operators. [`parse_condition`] handles the full language while
//! [`parse_value`] treats the operator characters as ordinary text.
//!
//! Parsing never fails: malformed input produces a best-effort tree plus
//! issues, and every produced node renders back to exactly the source
//! substring it covers. Spans are document-anchored through the `offset`
//! argument, so issues and nodes from an attribute value land on the right
//! place in the enclosing file without a separate translation pass.

use crate::issues::{self, Issue};
use crate::span::Span;

/// Precedence of the prefix `!` operator.
const PRECEDENCE_NEGATE: u8 = 3;
/// Precedence of implicit concatenation between adjacent terms.
const PRECEDENCE_CONCATENATE: u8 = 2;
/// Precedence of the `==`/`!=` binary operators.
const PRECEDENCE_EQUALITY: u8 = 1;

/// The kind of an explicit operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// Prefix `!`.
    Negate,
    /// Binary `==` (also produced, with an issue, by a single `=`).
    Equals,
    /// Binary `!=`.
    NotEquals,
}

impl OperatorKind {
    /// The binding precedence of this operator kind (higher binds tighter).
    pub fn precedence(&self) -> u8 {
        match self {
            OperatorKind::Negate => PRECEDENCE_NEGATE,
            OperatorKind::Equals | OperatorKind::NotEquals => PRECEDENCE_EQUALITY,
        }
    }
}

/// An operator occurrence: its kind, precedence, and source location.
///
/// Built from absent input it is degenerate: no span, zero length, renders
/// to the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// The operator kind.
    pub kind: OperatorKind,
    /// The source range of the operator token, absent when degenerate.
    pub span: Option<Span>,
    /// The source text of the operator token (`"="` stays `"="`).
    pub text: String,
    /// The binding precedence.
    pub precedence: u8,
}

impl Operator {
    /// An operator parsed from source text.
    pub fn new(kind: OperatorKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span: Some(span),
            text: text.into(),
            precedence: kind.precedence(),
        }
    }

    /// A degenerate operator built from absent input.
    pub fn empty(kind: OperatorKind) -> Self {
        Self {
            kind,
            span: None,
            text: String::new(),
            precedence: kind.precedence(),
        }
    }

    /// The number of source bytes the operator covers (0 when degenerate).
    pub fn length(&self) -> usize {
        self.span.map_or(0, |s| s.length())
    }
}

/// A run of unquoted characters.
///
/// Built from absent/empty input it is degenerate: no span, zero length,
/// renders to the empty string. Degenerate nodes stand in for missing
/// operands so consumers never see an absent child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnquotedString {
    /// The source range of the run, absent when degenerate.
    pub span: Option<Span>,
    /// The text of the run.
    pub text: String,
}

impl UnquotedString {
    /// A degenerate node built from absent input.
    pub fn empty() -> Self {
        Self {
            span: None,
            text: String::new(),
        }
    }
}

/// A quoted string term: `'...'` or `"..."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedString {
    /// The quote character used.
    pub quote: char,
    /// The source range of the opening quote.
    pub start_quote_span: Span,
    /// The expression between the quotes, if the string is non-empty.
    pub inner: Option<Box<Expression>>,
    /// The source range of the closing quote; absent when unterminated.
    pub end_quote_span: Option<Span>,
}

/// A `$(Name)` property reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyReference {
    /// The source range of the `$`.
    pub dollar_span: Span,
    /// The source range of the `(`, when present.
    pub left_parenthesis_span: Option<Span>,
    /// The source range of the raw name run, when present.
    pub name_span: Option<Span>,
    /// The raw name text, including any invalid characters that were
    /// reported and skipped.
    pub name_text: String,
    /// The source range of the `)`, when present.
    pub right_parenthesis_span: Option<Span>,
}

/// An `@(Name)` item reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReference {
    /// The source range of the `@`.
    pub at_span: Span,
    /// The source range of the `(`, when present.
    pub left_parenthesis_span: Option<Span>,
    /// The source range of the raw name run, when present.
    pub name_span: Option<Span>,
    /// The raw name text, including any invalid characters that were
    /// reported and skipped.
    pub name_text: String,
    /// The source range of the `)`, when present.
    pub right_parenthesis_span: Option<Span>,
}

/// Two adjacent terms joined with no separator. Left-associative: `abc`
/// built from three terms nests as `(a + b) + c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concatenate {
    /// The earlier term.
    pub left: Box<Expression>,
    /// The later term.
    pub right: Box<Expression>,
}

/// A binary operator application (`==` or `!=`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    /// The left operand, degenerate when the operator had nothing to its
    /// left.
    pub left: Box<Expression>,
    /// The operator.
    pub operator: Operator,
    /// The right operand, degenerate when the operator had nothing to its
    /// right.
    pub right: Box<Expression>,
}

/// A prefix operator application (`!`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    /// The operator.
    pub operator: Operator,
    /// The operand, degenerate when the operator had nothing to negate.
    pub operand: Box<Expression>,
}

/// A parsed expression tree. Each node owns its children exclusively and
/// renders back to exactly the source substring it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A run of unquoted characters.
    UnquotedString(UnquotedString),
    /// A quoted string.
    QuotedString(QuotedString),
    /// A `$(Name)` property reference.
    Property(PropertyReference),
    /// An `@(Name)` item reference.
    Item(ItemReference),
    /// Two adjacent terms.
    Concatenate(Concatenate),
    /// A binary operator application.
    Binary(Binary),
    /// A prefix operator application.
    Prefix(Prefix),
}

impl Expression {
    /// A degenerate expression standing in for a missing operand.
    pub fn empty() -> Self {
        Expression::UnquotedString(UnquotedString::empty())
    }

    /// The byte offset where the expression starts, absent when degenerate.
    pub fn start_index(&self) -> Option<usize> {
        match self {
            Expression::UnquotedString(e) => e.span.map(|s| s.start),
            Expression::QuotedString(e) => Some(e.start_quote_span.start),
            Expression::Property(e) => Some(e.dollar_span.start),
            Expression::Item(e) => Some(e.at_span.start),
            Expression::Concatenate(e) => e.left.start_index().or_else(|| e.right.start_index()),
            Expression::Binary(e) => e
                .left
                .start_index()
                .or_else(|| e.operator.span.map(|s| s.start))
                .or_else(|| e.right.start_index()),
            Expression::Prefix(e) => e
                .operator
                .span
                .map(|s| s.start)
                .or_else(|| e.operand.start_index()),
        }
    }

    /// The byte offset just past the expression, absent when degenerate.
    pub fn after_end_index(&self) -> Option<usize> {
        match self {
            Expression::UnquotedString(e) => e.span.map(|s| s.end),
            Expression::QuotedString(e) => e
                .end_quote_span
                .map(|s| s.end)
                .or_else(|| e.inner.as_ref().and_then(|i| i.after_end_index()))
                .or(Some(e.start_quote_span.end)),
            Expression::Property(e) => Some(
                e.right_parenthesis_span
                    .map(|s| s.end)
                    .or_else(|| e.name_span.map(|s| s.end))
                    .or_else(|| e.left_parenthesis_span.map(|s| s.end))
                    .unwrap_or(e.dollar_span.end),
            ),
            Expression::Item(e) => Some(
                e.right_parenthesis_span
                    .map(|s| s.end)
                    .or_else(|| e.name_span.map(|s| s.end))
                    .or_else(|| e.left_parenthesis_span.map(|s| s.end))
                    .unwrap_or(e.at_span.end),
            ),
            Expression::Concatenate(e) => {
                e.right.after_end_index().or_else(|| e.left.after_end_index())
            }
            Expression::Binary(e) => e
                .right
                .after_end_index()
                .or_else(|| e.operator.span.map(|s| s.end))
                .or_else(|| e.left.after_end_index()),
            Expression::Prefix(e) => e
                .operand
                .after_end_index()
                .or_else(|| e.operator.span.map(|s| s.end)),
        }
    }

    /// The source range the expression covers, absent when degenerate.
    pub fn span(&self) -> Option<Span> {
        match (self.start_index(), self.after_end_index()) {
            (Some(start), Some(end)) => Some(Span::new(start, end)),
            _ => None,
        }
    }

    /// The number of source bytes covered (0 when degenerate).
    pub fn length(&self) -> usize {
        self.span().map_or(0, |s| s.length())
    }

    /// Whether `index` falls inside the expression.
    pub fn contains_index(&self, index: usize) -> bool {
        self.span().is_some_and(|s| s.contains_index(index))
    }

    /// Render the expression back to its exact source text.
    pub fn text(&self) -> String {
        match self {
            Expression::UnquotedString(e) => e.text.clone(),
            Expression::QuotedString(e) => {
                let mut out = String::new();
                out.push(e.quote);
                if let Some(inner) = &e.inner {
                    out.push_str(&inner.text());
                }
                if e.end_quote_span.is_some() {
                    out.push(e.quote);
                }
                out
            }
            Expression::Property(e) => {
                let mut out = String::from("$");
                if e.left_parenthesis_span.is_some() {
                    out.push('(');
                }
                out.push_str(&e.name_text);
                if e.right_parenthesis_span.is_some() {
                    out.push(')');
                }
                out
            }
            Expression::Item(e) => {
                let mut out = String::from("@");
                if e.left_parenthesis_span.is_some() {
                    out.push('(');
                }
                out.push_str(&e.name_text);
                if e.right_parenthesis_span.is_some() {
                    out.push(')');
                }
                out
            }
            Expression::Concatenate(e) => format!("{}{}", e.left.text(), e.right.text()),
            Expression::Binary(e) => {
                format!("{}{}{}", e.left.text(), e.operator.text, e.right.text())
            }
            Expression::Prefix(e) => format!("{}{}", e.operator.text, e.operand.text()),
        }
    }
}

/// Parse `text` with the condition language (prefix `!`, binary `==`/`!=`).
///
/// `offset` is the byte offset of `text` within the enclosing document;
/// every span in the result and in the appended issues is anchored there.
/// Empty input yields `None` and no issues.
pub fn parse_condition(text: &str, offset: usize, issues: &mut Vec<Issue>) -> Option<Expression> {
    Parser::new(text, offset, issues).parse(Language::Condition, None)
}

/// Parse `text` with the value language (no boolean operators; `!` and `=`
/// are ordinary characters).
pub fn parse_value(text: &str, offset: usize, issues: &mut Vec<Issue>) -> Option<Expression> {
    Parser::new(text, offset, issues).parse(Language::Value, None)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    Condition,
    Value,
}

// A pending operation waiting for its right-hand side: either an explicit
// operator or the implicit concatenation between adjacent terms.
#[derive(Debug)]
enum Frame {
    Prefix(Operator),
    Binary {
        left: Expression,
        operator: Operator,
    },
    Concatenate {
        left: Expression,
    },
}

impl Frame {
    fn precedence(&self) -> u8 {
        match self {
            Frame::Prefix(op) => op.precedence,
            Frame::Binary { operator, .. } => operator.precedence,
            Frame::Concatenate { .. } => PRECEDENCE_CONCATENATE,
        }
    }
}

struct Parser<'b> {
    chars: Vec<(usize, char)>,
    position: usize,
    base: usize,
    end: usize,
    issues: &'b mut Vec<Issue>,
}

impl<'b> Parser<'b> {
    fn new(text: &str, offset: usize, issues: &'b mut Vec<Issue>) -> Self {
        Self {
            chars: text.char_indices().collect(),
            position: 0,
            base: offset,
            end: offset + text.len(),
            issues,
        }
    }

    // The document-anchored byte offset of the current character (or of the
    // end of input).
    fn offset(&self) -> usize {
        self.chars
            .get(self.position)
            .map_or(self.end, |&(o, _)| self.base + o)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).map(|&(_, c)| c)
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.get(self.position + 1).map(|&(_, c)| c)
    }

    // Consume the current character, returning its document-anchored span.
    fn bump(&mut self) -> Span {
        let start = self.offset();
        self.position += 1;
        Span::new(start, self.offset())
    }

    // The single scan over the input: a stack of pending-operation frames
    // plus the operand currently being built. A new operator first closes
    // every frame whose precedence is greater than or equal to its own
    // (an empty stack always loses), which gives left-associativity for
    // equal-precedence chains and immediate-operand binding for prefixes.
    fn parse(&mut self, language: Language, stop: Option<char>) -> Option<Expression> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut current: Option<Expression> = None;

        while let Some(c) = self.peek() {
            if stop == Some(c) {
                break;
            }
            if language == Language::Condition && c == '!' && self.peek_second() != Some('=') {
                // Prefix negate: nests, closing nothing.
                let span = self.bump();
                if current.is_some() {
                    // `a!b`: the prefix result will concatenate onto what
                    // came before.
                    self.close_frames(&mut stack, &mut current, PRECEDENCE_CONCATENATE);
                    stack.push(Frame::Concatenate {
                        left: current.take().unwrap_or_else(Expression::empty),
                    });
                }
                stack.push(Frame::Prefix(Operator::new(OperatorKind::Negate, span, "!")));
            } else if language == Language::Condition && (c == '=' || c == '!') {
                let operator = self.lex_binary_operator();
                self.close_frames(&mut stack, &mut current, PRECEDENCE_EQUALITY);
                let left = match current.take() {
                    Some(left) => left,
                    None => {
                        self.issues.push(issues::expected_left_expression(
                            operator.span.unwrap_or(Span::empty(self.base)),
                        ));
                        Expression::empty()
                    }
                };
                stack.push(Frame::Binary { left, operator });
            } else {
                let term = self.parse_term(language, stop);
                if current.is_some() {
                    self.close_frames(&mut stack, &mut current, PRECEDENCE_CONCATENATE);
                    stack.push(Frame::Concatenate {
                        left: current.take().unwrap_or_else(Expression::empty),
                    });
                }
                current = Some(term);
                // A prefix operator binds exactly the term to its right.
                while matches!(stack.last(), Some(Frame::Prefix(_))) {
                    self.close_one(&mut stack, &mut current);
                }
            }
        }

        self.close_frames(&mut stack, &mut current, 0);
        current
    }

    fn close_frames(
        &mut self,
        stack: &mut Vec<Frame>,
        current: &mut Option<Expression>,
        precedence: u8,
    ) {
        while stack
            .last()
            .is_some_and(|frame| frame.precedence() >= precedence)
        {
            self.close_one(stack, current);
        }
    }

    fn close_one(&mut self, stack: &mut Vec<Frame>, current: &mut Option<Expression>) {
        let Some(frame) = stack.pop() else {
            return;
        };
        let combined = match frame {
            Frame::Prefix(operator) => {
                let operand = match current.take() {
                    Some(operand) => operand,
                    None => {
                        self.issues.push(issues::missing_expression(
                            operator.span.unwrap_or(Span::empty(self.base)),
                        ));
                        Expression::empty()
                    }
                };
                Expression::Prefix(Prefix {
                    operator,
                    operand: Box::new(operand),
                })
            }
            Frame::Binary { left, operator } => {
                let right = match current.take() {
                    Some(right) => right,
                    None => {
                        let anchor = operator.span.map_or(self.end, |s| s.end);
                        self.issues
                            .push(issues::missing_right_expression(Span::empty(anchor)));
                        Expression::empty()
                    }
                };
                Expression::Binary(Binary {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                })
            }
            Frame::Concatenate { left } => {
                let right = current.take().unwrap_or_else(Expression::empty);
                Expression::Concatenate(Concatenate {
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }
        };
        *current = Some(combined);
    }

    // Current character is `=` or a `!` known to be followed by `=`.
    fn lex_binary_operator(&mut self) -> Operator {
        let c = self.peek().unwrap_or('=');
        let first = self.bump();
        if c == '!' {
            let second = self.bump();
            return Operator::new(OperatorKind::NotEquals, first.merge(second), "!=");
        }
        match self.peek() {
            Some('=') => {
                let second = self.bump();
                Operator::new(OperatorKind::Equals, first.merge(second), "==")
            }
            Some(_) => {
                // A lone `=` still behaves as equality.
                self.issues.push(issues::expected_second_equals_sign(
                    Span::new(self.offset(), self.offset_after_current()),
                ));
                Operator::new(OperatorKind::Equals, first, "=")
            }
            None => {
                self.issues
                    .push(issues::missing_second_equals_sign(Span::empty(self.end)));
                Operator::new(OperatorKind::Equals, first, "=")
            }
        }
    }

    fn offset_after_current(&self) -> usize {
        self.chars
            .get(self.position + 1)
            .map_or(self.end, |&(o, _)| self.base + o)
    }

    fn parse_term(&mut self, language: Language, stop: Option<char>) -> Expression {
        match self.peek() {
            Some(q @ ('\'' | '"')) => self.parse_quoted_string(q),
            Some('$') => self.parse_reference(ReferenceKind::Property, stop),
            Some('@') => self.parse_reference(ReferenceKind::Item, stop),
            _ => self.parse_unquoted_run(language, stop),
        }
    }

    fn parse_quoted_string(&mut self, quote: char) -> Expression {
        let start_quote_span = self.bump();
        // Quote bodies use the value language; operators apply only outside
        // quotes.
        let inner = self.parse(Language::Value, Some(quote));

        let end_quote_span = match self.peek() {
            Some(c) if c == quote => Some(self.bump()),
            _ => {
                self.issues
                    .push(issues::missing_end_quote(quote, start_quote_span));
                None
            }
        };
        Expression::QuotedString(QuotedString {
            quote,
            start_quote_span,
            inner: inner.map(Box::new),
            end_quote_span,
        })
    }

    fn parse_reference(&mut self, kind: ReferenceKind, stop: Option<char>) -> Expression {
        let sigil_span = self.bump();

        if self.peek() != Some('(') {
            self.issues.push(match kind {
                ReferenceKind::Property => issues::missing_property_name(Span::empty(self.offset())),
                ReferenceKind::Item => issues::missing_item_name(Span::empty(self.offset())),
            });
            return kind.build(sigil_span, None, None, String::new(), None);
        }
        let left_parenthesis_span = Some(self.bump());

        let mut name_text = String::new();
        let mut name_span: Option<Span> = None;
        let right_parenthesis_span = loop {
            match self.peek() {
                Some(')') => break Some(self.bump()),
                None => {
                    break None;
                }
                Some(c) if stop == Some(c) => {
                    break None;
                }
                Some(c) => {
                    let span = self.bump();
                    if !(c.is_ascii_alphanumeric() || c == '_') {
                        self.issues.push(match kind {
                            ReferenceKind::Property => {
                                issues::invalid_property_name_character(c, span)
                            }
                            ReferenceKind::Item => issues::invalid_item_name_character(c, span),
                        });
                    }
                    name_text.push(c);
                    name_span = Some(name_span.map_or(span, |s| s.merge(span)));
                }
            }
        };

        if name_text.is_empty() {
            match right_parenthesis_span {
                Some(span) => self.issues.push(match kind {
                    ReferenceKind::Property => issues::expected_property_name(span),
                    ReferenceKind::Item => issues::expected_item_name(span),
                }),
                None => self.issues.push(match kind {
                    ReferenceKind::Property => {
                        issues::missing_property_name(Span::empty(self.offset()))
                    }
                    ReferenceKind::Item => issues::missing_item_name(Span::empty(self.offset())),
                }),
            }
        }
        if right_parenthesis_span.is_none() {
            self.issues
                .push(issues::missing_right_parenthesis(Span::empty(self.offset())));
        }

        kind.build(
            sigil_span,
            left_parenthesis_span,
            name_span,
            name_text,
            right_parenthesis_span,
        )
    }

    fn parse_unquoted_run(&mut self, language: Language, stop: Option<char>) -> Expression {
        let start = self.offset();
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if stop == Some(c) || is_term_boundary(language, c) {
                break;
            }
            self.bump();
            text.push(c);
        }
        let end = self.offset();
        Expression::UnquotedString(UnquotedString {
            span: Some(Span::new(start, end)),
            text,
        })
    }
}

fn is_term_boundary(language: Language, c: char) -> bool {
    match c {
        '\'' | '"' | '$' | '@' => true,
        '!' | '=' => language == Language::Condition,
        _ => false,
    }
}

#[derive(Debug, Clone, Copy)]
enum ReferenceKind {
    Property,
    Item,
}

impl ReferenceKind {
    fn build(
        self,
        sigil_span: Span,
        left_parenthesis_span: Option<Span>,
        name_span: Option<Span>,
        name_text: String,
        right_parenthesis_span: Option<Span>,
    ) -> Expression {
        match self {
            ReferenceKind::Property => Expression::Property(PropertyReference {
                dollar_span: sigil_span,
                left_parenthesis_span,
                name_span,
                name_text,
                right_parenthesis_span,
            }),
            ReferenceKind::Item => Expression::Item(ItemReference {
                at_span: sigil_span,
                left_parenthesis_span,
                name_span,
                name_text,
                right_parenthesis_span,
            }),
        }
    }
}
