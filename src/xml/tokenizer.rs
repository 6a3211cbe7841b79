//! Tolerant XML tokenizer
//!
//! Assembles [`Lex`] tokens into a [`Segment`] tree plus an issue list.
//! Malformed input never fails the parse: missing brackets, missing end
//! tags, mismatched end-tag names, and unterminated attribute values are all
//! recovered with an [`Issue`] and a best-effort tree, which is what lets
//! the analyzer diagnose exactly the documents an editor user is in the
//! middle of typing.

use crate::error::{Error, Result};
use crate::issues::{self, Issue};
use crate::span::Span;
use crate::xml::lex::{Lex, LexKind, Lexer};
use crate::xml::segments::{
    Segment, XmlAttribute, XmlElement, XmlEmptyElement, XmlEndTag, XmlName, XmlQuotedString,
    XmlText, XmlUnrecognizedTag,
};

/// The generic parse result: top-level segments plus XML-layer issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// Top-level segments in document order.
    pub segments: Vec<Segment>,
    /// XML-layer issues in document order.
    pub issues: Vec<Issue>,
}

impl XmlDocument {
    /// The top-level full and empty element segments, in document order.
    pub fn root_elements(&self) -> Vec<&Segment> {
        self.segments.iter().filter(|s| s.is_element()).collect()
    }
}

/// Parse `text` into a tolerant segment tree.
pub fn parse(text: &str) -> XmlDocument {
    let mut tokenizer = Tokenizer::new(text);
    tokenizer.next();
    let (segments, _) = tokenizer.parse_segments(None);
    let mut issues = tokenizer.issues;

    // Every root element after the first is flagged.
    for extra in segments.iter().filter(|s| s.is_element()).skip(1) {
        issues.push(issues::document_can_have_one_root_element(extra.span()));
    }

    XmlDocument { segments, issues }
}

/// Builds segments from a token stream, accumulating issues as it goes.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    lexer: Lexer<'a>,
    issues: Vec<Issue>,
    // Names of the elements whose bodies are currently being parsed,
    // outermost first. Used to tell a mistyped end tag from an end tag that
    // closes an outer element.
    open_names: Vec<String>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned before the first token of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            lexer: Lexer::new(text),
            issues: Vec::new(),
            open_names: Vec::new(),
        }
    }

    /// Advance to the next token and return it.
    pub fn next(&mut self) -> Option<&Lex> {
        self.lexer.next()
    }

    /// The token the tokenizer is currently on, if any.
    pub fn current(&self) -> Option<&Lex> {
        self.lexer.current()
    }

    /// The issues collected so far.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Read one attribute (`name` or `name="value"`) starting at the current
    /// token.
    ///
    /// The tokenizer must be positioned on a [`LexKind::Name`] token;
    /// calling this anywhere else is a caller bug and returns
    /// [`Error::Contract`].
    pub fn read_attribute(&mut self) -> Result<XmlAttribute> {
        match self.current() {
            Some(token) if token.kind == LexKind::Name => Ok(self.read_attribute_at_name()),
            other => Err(Error::Contract(format!(
                "read_attribute requires the current token to be a name, not {:?}",
                other.map(|t| t.kind)
            ))),
        }
    }

    fn source_end(&self) -> usize {
        self.lexer.source().len()
    }

    fn text_of(&self, span: Span) -> String {
        self.lexer.source()[span.start..span.end].to_string()
    }

    fn current_kind(&self) -> Option<LexKind> {
        self.current().map(|t| t.kind)
    }

    // Parses segments until end of input or an end tag that terminates the
    // enclosing element. Returns the consumed end tag, if any; `None` with
    // `enclosing` set means the element was left open.
    fn parse_segments(&mut self, enclosing: Option<&str>) -> (Vec<Segment>, Option<XmlEndTag>) {
        let mut segments = Vec::new();

        loop {
            let Some(kind) = self.current_kind() else {
                return (segments, None);
            };
            match kind {
                LexKind::Comment | LexKind::Declaration | LexKind::CData => {
                    self.next();
                }
                LexKind::LeftAngleBracket => {
                    if self.lexer.peek().map(|t| t.kind) == Some(LexKind::ForwardSlash) {
                        match self.parse_end_tag(enclosing) {
                            EndTagOutcome::Closes(end_tag) => return (segments, Some(end_tag)),
                            EndTagOutcome::ClosesOuter => return (segments, None),
                            EndTagOutcome::Stray(segment) => segments.push(segment),
                        }
                    } else if self.lexer.peek().map(|t| t.kind) == Some(LexKind::Name) {
                        segments.push(self.parse_tag());
                    } else {
                        segments.push(self.parse_unrecognized_tag());
                    }
                }
                _ => segments.push(self.parse_text_run()),
            }
        }
    }

    // Current token is `<` and the next is a name: parse a start tag or an
    // empty-element tag.
    fn parse_tag(&mut self) -> Segment {
        let tag_start = self.current().map(|t| t.span.start).unwrap_or_default();
        self.next();
        let name_token = self.current().cloned();
        let name = match name_token {
            Some(token) => XmlName {
                span: token.span,
                text: self.text_of(token.span),
            },
            None => {
                // Unreachable in practice: parse_tag is only entered with a
                // name peeked.
                let span = Span::new(tag_start, self.source_end());
                self.issues.push(issues::invalid_tag(span));
                return Segment::UnrecognizedTag(XmlUnrecognizedTag {
                    span,
                    text: self.text_of(span),
                });
            }
        };
        self.next();

        let mut attributes = Vec::new();
        loop {
            match self.current_kind() {
                Some(LexKind::Whitespace) | Some(LexKind::NewLine) => {
                    self.next();
                }
                Some(LexKind::Name) => {
                    attributes.push(self.read_attribute_at_name());
                }
                Some(LexKind::ForwardSlash)
                    if self.lexer.peek().map(|t| t.kind) == Some(LexKind::RightAngleBracket) =>
                {
                    let end = self.lexer.peek().map(|t| t.span.end).unwrap_or_default();
                    self.next();
                    self.next();
                    return Segment::EmptyElement(XmlEmptyElement {
                        span: Span::new(tag_start, end),
                        name,
                        attributes,
                    });
                }
                Some(LexKind::RightAngleBracket) => {
                    let start_tag_span =
                        Span::new(tag_start, self.current().map(|t| t.span.end).unwrap_or_default());
                    self.next();
                    return self.parse_element_body(start_tag_span, name, attributes);
                }
                Some(_) => {
                    // Stray punctuation inside the tag; skip it.
                    self.next();
                }
                None => {
                    let span = Span::new(tag_start, self.source_end());
                    self.issues
                        .push(issues::missing_tag_right_angle_bracket(span));
                    return Segment::UnrecognizedTag(XmlUnrecognizedTag {
                        span,
                        text: self.text_of(span),
                    });
                }
            }
        }
    }

    fn parse_element_body(
        &mut self,
        start_tag_span: Span,
        name: XmlName,
        attributes: Vec<XmlAttribute>,
    ) -> Segment {
        let enclosing_name = name.text.clone();
        self.open_names.push(enclosing_name.clone());
        let (body, end_tag) = self.parse_segments(Some(&enclosing_name));
        self.open_names.pop();

        let span_end = match &end_tag {
            Some(end) => end.span.end,
            None => {
                self.issues
                    .push(issues::missing_end_tag(&name.text, name.span));
                body.last().map(|s| s.span().end).unwrap_or(start_tag_span.end)
            }
        };

        Segment::Element(XmlElement {
            span: Span::new(start_tag_span.start, span_end),
            start_tag_span,
            name,
            attributes,
            body,
            end_tag,
        })
    }

    // Current token is `<` and the next is `/`.
    fn parse_end_tag(&mut self, enclosing: Option<&str>) -> EndTagOutcome {
        let mark = self.lexer.mark();
        let issue_mark = self.issues.len();
        let tag_start = self.current().map(|t| t.span.start).unwrap_or_default();
        self.next(); // past `<`
        self.next(); // past `/`

        let name = match self.current() {
            Some(token) if token.kind == LexKind::Name => {
                let name = XmlName {
                    span: token.span,
                    text: self.text_of(token.span),
                };
                self.next();
                name
            }
            _ => {
                // `</` with no name: swallow through `>` as an unrecognized
                // tag.
                let span = self.consume_through_right_angle(tag_start);
                self.issues.push(issues::invalid_tag(span));
                return EndTagOutcome::Stray(Segment::UnrecognizedTag(XmlUnrecognizedTag {
                    span,
                    text: self.text_of(span),
                }));
            }
        };

        while matches!(
            self.current_kind(),
            Some(LexKind::Whitespace) | Some(LexKind::NewLine)
        ) {
            self.next();
        }
        let tag_end = match self.current_kind() {
            Some(LexKind::RightAngleBracket) => {
                let end = self.current().map(|t| t.span.end).unwrap_or_default();
                self.next();
                end
            }
            _ => {
                let end = self
                    .current()
                    .map(|t| t.span.start)
                    .unwrap_or(self.source_end());
                self.issues
                    .push(issues::missing_tag_right_angle_bracket(Span::new(
                        tag_start, end,
                    )));
                end
            }
        };
        let end_tag = XmlEndTag {
            span: Span::new(tag_start, tag_end),
            name,
        };

        if let Some(enclosing_name) = enclosing {
            if end_tag.name.matches(enclosing_name) {
                return EndTagOutcome::Closes(end_tag);
            }
            // An end tag for an element further up the stack leaves the
            // current element open; anything else closes the current element
            // under protest.
            let closes_outer = self
                .open_names
                .iter()
                .rev()
                .skip(1)
                .any(|open| open.eq_ignore_ascii_case(&end_tag.name.text));
            if closes_outer {
                // The outer level re-parses this tag, so drop anything
                // reported during the speculative parse.
                self.issues.truncate(issue_mark);
                self.lexer.restore(mark);
                return EndTagOutcome::ClosesOuter;
            }
            self.issues.push(issues::expected_end_tag_name(
                enclosing_name,
                &end_tag.name.text,
                end_tag.name.span,
            ));
            return EndTagOutcome::Closes(end_tag);
        }

        // Top level: no element to close.
        self.issues
            .push(issues::unexpected_end_tag(&end_tag.name.text, end_tag.span));
        EndTagOutcome::Stray(Segment::UnrecognizedTag(XmlUnrecognizedTag {
            span: end_tag.span,
            text: self.text_of(end_tag.span),
        }))
    }

    // Current token is `<` followed by something that cannot start a tag.
    fn parse_unrecognized_tag(&mut self) -> Segment {
        let start = self.current().map(|t| t.span.start).unwrap_or_default();
        let span = self.consume_through_right_angle(start);
        self.issues.push(issues::invalid_tag(span));
        Segment::UnrecognizedTag(XmlUnrecognizedTag {
            span,
            text: self.text_of(span),
        })
    }

    // Consumes tokens from the current position through the next `>`
    // (inclusive), stopping short at a line ending or end of input.
    fn consume_through_right_angle(&mut self, start: usize) -> Span {
        let mut end = start;
        loop {
            match self.current() {
                None => break,
                Some(token) if token.kind == LexKind::NewLine => break,
                Some(token) if token.kind == LexKind::RightAngleBracket => {
                    end = token.span.end;
                    self.next();
                    break;
                }
                Some(token) => {
                    end = token.span.end;
                    self.next();
                }
            }
        }
        Span::new(start, end.max(start))
    }

    // Consumes a text run: everything up to the next tag-opening token,
    // breaking after each line ending so every line is its own run.
    fn parse_text_run(&mut self) -> Segment {
        let start = self.current().map(|t| t.span.start).unwrap_or_default();
        let mut end = start;
        loop {
            match self.current() {
                None => break,
                Some(token)
                    if matches!(
                        token.kind,
                        LexKind::LeftAngleBracket
                            | LexKind::Comment
                            | LexKind::Declaration
                            | LexKind::CData
                    ) =>
                {
                    break;
                }
                Some(token) if token.kind == LexKind::NewLine => {
                    end = token.span.end;
                    self.next();
                    break;
                }
                Some(token) => {
                    end = token.span.end;
                    self.next();
                }
            }
        }
        let span = Span::new(start, end.max(start));
        Segment::Text(XmlText {
            span,
            text: self.text_of(span),
        })
    }

    // Current token is a name: read `name` or `name="value"`.
    fn read_attribute_at_name(&mut self) -> XmlAttribute {
        let name_token = self.current().cloned();
        let name_span = name_token.map(|t| t.span).unwrap_or(Span::empty(0));
        let name = XmlName {
            span: name_span,
            text: self.text_of(name_span),
        };
        self.next();

        // `name` followed by whitespace and another name is two valueless
        // attributes, so only commit past the whitespace when a `=` shows up.
        let mark = self.lexer.mark();
        while matches!(
            self.current_kind(),
            Some(LexKind::Whitespace) | Some(LexKind::NewLine)
        ) {
            self.next();
        }
        if self.current_kind() != Some(LexKind::EqualsSign) {
            self.lexer.restore(mark);
            return XmlAttribute {
                span: name.span,
                name,
                value: None,
            };
        }
        self.next();
        while matches!(
            self.current_kind(),
            Some(LexKind::Whitespace) | Some(LexKind::NewLine)
        ) {
            self.next();
        }

        let value = match self.current_kind() {
            Some(quote_kind @ (LexKind::SingleQuote | LexKind::DoubleQuote)) => {
                Some(self.read_quoted_value(quote_kind))
            }
            _ => {
                let at = self
                    .current()
                    .map(|t| t.span)
                    .unwrap_or(Span::empty(self.source_end()));
                self.issues
                    .push(issues::expected_attribute_value(&name.text, at));
                None
            }
        };

        let span_end = value.as_ref().map(|v| v.span.end).unwrap_or(name.span.end);
        XmlAttribute {
            span: Span::new(name.span.start, span_end),
            name,
            value,
        }
    }

    // Current token is the opening quote of an attribute value.
    fn read_quoted_value(&mut self, quote_kind: LexKind) -> XmlQuotedString {
        let open_span = self.current().map(|t| t.span).unwrap_or(Span::empty(0));
        let quote = if quote_kind == LexKind::SingleQuote {
            '\''
        } else {
            '"'
        };
        self.next();

        let mut end = open_span.end;
        loop {
            match self.current() {
                Some(token) if token.kind == quote_kind => {
                    let span = Span::new(open_span.start, token.span.end);
                    let text = self.text_of(Span::new(open_span.end, token.span.start));
                    self.next();
                    return XmlQuotedString {
                        span,
                        quote,
                        text,
                        closed: true,
                    };
                }
                // Attribute values do not span lines; an unterminated value
                // stops at the line ending.
                Some(token) if token.kind == LexKind::NewLine => break,
                None => break,
                Some(token) => {
                    end = token.span.end;
                    self.next();
                }
            }
        }

        self.issues.push(issues::missing_end_quote(quote, open_span));
        XmlQuotedString {
            span: Span::new(open_span.start, end),
            quote,
            text: self.text_of(Span::new(open_span.end, end)),
            closed: false,
        }
    }
}

enum EndTagOutcome {
    /// The end tag closes the enclosing element and was consumed.
    Closes(XmlEndTag),
    /// The end tag closes an element further up; nothing was consumed.
    ClosesOuter,
    /// The end tag matched nothing; it became an unrecognized-tag segment.
    Stray(Segment),
}
