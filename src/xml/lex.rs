//! Low-level lexer for the generic XML layer
//!
//! The lexer turns source text into a flat sequence of category tokens with
//! byte-offset spans. It knows nothing about tag structure; the
//! [`Tokenizer`](super::Tokenizer) assembles tokens into segments. Comments,
//! processing declarations, and CDATA sections are each captured as a single
//! token here so the tokenizer can consume them without inspecting their
//! content.

use crate::span::Span;
use once_cell::sync::Lazy;
use regex::Regex;

// XML name character classes (simplified to the ASCII + common ranges that
// appear in project files).
static NAME_START_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}]").unwrap());

static NAME_CHAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\-\.0-9:\u{B7}]").unwrap()
});

/// Whether `c` can begin an XML name.
pub fn is_name_start_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    NAME_START_CHAR.is_match(c.encode_utf8(&mut buf))
}

/// Whether `c` can continue an XML name.
pub fn is_name_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    NAME_CHAR.is_match(c.encode_utf8(&mut buf))
}

/// The category of a low-level token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexKind {
    /// `<`
    LeftAngleBracket,
    /// `>`
    RightAngleBracket,
    /// `/`
    ForwardSlash,
    /// `=`
    EqualsSign,
    /// `'`
    SingleQuote,
    /// `"`
    DoubleQuote,
    /// A run of spaces or tabs.
    Whitespace,
    /// A `\n` or `\r\n` line ending.
    NewLine,
    /// A run of XML name characters.
    Name,
    /// A `<!-- ... -->` comment (possibly unterminated).
    Comment,
    /// A `<? ... ?>` or `<! ... >` declaration (possibly unterminated).
    Declaration,
    /// A `<![CDATA[ ... ]]>` section (possibly unterminated).
    CData,
    /// Any other run of characters.
    Text,
}

/// One low-level token: a category plus the span it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lex {
    /// The token category.
    pub kind: LexKind,
    /// The byte range the token covers.
    pub span: Span,
}

impl Lex {
    fn new(kind: LexKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }
}

/// Tokenizes source text into [`Lex`] tokens.
///
/// All tokens are produced eagerly at construction; `next`/`current`/`peek`
/// are cursor operations over the token sequence, which also lets the
/// tokenizer save and restore positions during error recovery.
#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Lex>,
    // Index of the current token; usize::MAX before the first next() call.
    position: Option<usize>,
}

impl<'a> Lexer<'a> {
    /// Lex `source` into a token cursor positioned before the first token.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: lex_all(source),
            position: None,
        }
    }

    /// The source text being lexed.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Advance to the next token and return it.
    pub fn next(&mut self) -> Option<&Lex> {
        let next = self.position.map_or(0, |p| p + 1);
        self.position = Some(next);
        self.tokens.get(next)
    }

    /// The token the cursor is currently on, if any.
    pub fn current(&self) -> Option<&Lex> {
        self.tokens.get(self.position?)
    }

    /// The token after the current one, without advancing.
    pub fn peek(&self) -> Option<&Lex> {
        self.tokens.get(self.position.map_or(0, |p| p + 1))
    }

    /// The source text covered by `token`.
    pub fn text(&self, token: &Lex) -> &'a str {
        &self.source[token.span.start..token.span.end]
    }

    /// Save the cursor position for a later [`restore`](Self::restore).
    pub fn mark(&self) -> Option<usize> {
        self.position
    }

    /// Restore a cursor position previously returned by [`mark`](Self::mark).
    pub fn restore(&mut self, mark: Option<usize>) {
        self.position = mark;
    }
}

fn lex_all(source: &str) -> Vec<Lex> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let len = source.len();
    let mut tokens = Vec::new();
    let mut i = 0;

    // Byte offset of the character at chars[index], or end of input.
    let offset = |index: usize| chars.get(index).map_or(len, |&(o, _)| o);

    while let Some(&(start, c)) = chars.get(i) {
        match c {
            '<' => {
                // Comments, declarations, and CDATA are captured whole so the
                // tokenizer never has to look inside them.
                if source[start..].starts_with("<!--") {
                    let end = source[start..]
                        .find("-->")
                        .map_or(len, |p| start + p + "-->".len());
                    tokens.push(Lex::new(LexKind::Comment, start, end));
                    while offset(i) < end {
                        i += 1;
                    }
                } else if source[start..].starts_with("<![CDATA[") {
                    let end = source[start..]
                        .find("]]>")
                        .map_or(len, |p| start + p + "]]>".len());
                    tokens.push(Lex::new(LexKind::CData, start, end));
                    while offset(i) < end {
                        i += 1;
                    }
                } else if source[start..].starts_with("<?") || source[start..].starts_with("<!") {
                    let end = source[start..].find('>').map_or(len, |p| start + p + 1);
                    tokens.push(Lex::new(LexKind::Declaration, start, end));
                    while offset(i) < end {
                        i += 1;
                    }
                } else {
                    tokens.push(Lex::new(LexKind::LeftAngleBracket, start, start + 1));
                    i += 1;
                }
            }
            '>' => {
                tokens.push(Lex::new(LexKind::RightAngleBracket, start, start + 1));
                i += 1;
            }
            '/' => {
                tokens.push(Lex::new(LexKind::ForwardSlash, start, start + 1));
                i += 1;
            }
            '=' => {
                tokens.push(Lex::new(LexKind::EqualsSign, start, start + 1));
                i += 1;
            }
            '\'' => {
                tokens.push(Lex::new(LexKind::SingleQuote, start, start + 1));
                i += 1;
            }
            '"' => {
                tokens.push(Lex::new(LexKind::DoubleQuote, start, start + 1));
                i += 1;
            }
            '\n' => {
                tokens.push(Lex::new(LexKind::NewLine, start, start + 1));
                i += 1;
            }
            '\r' => {
                let end = if matches!(chars.get(i + 1), Some(&(_, '\n'))) {
                    i += 2;
                    offset(i)
                } else {
                    i += 1;
                    offset(i)
                };
                tokens.push(Lex::new(LexKind::NewLine, start, end));
            }
            ' ' | '\t' => {
                while matches!(chars.get(i), Some(&(_, ' ')) | Some(&(_, '\t'))) {
                    i += 1;
                }
                tokens.push(Lex::new(LexKind::Whitespace, start, offset(i)));
            }
            c if is_name_start_char(c) => {
                i += 1;
                while matches!(chars.get(i), Some(&(_, nc)) if is_name_char(nc)) {
                    i += 1;
                }
                tokens.push(Lex::new(LexKind::Name, start, offset(i)));
            }
            _ => {
                // Anything else groups into a text run up to the next
                // recognized character.
                i += 1;
                while matches!(chars.get(i), Some(&(_, tc)) if !is_lex_boundary(tc)) {
                    i += 1;
                }
                tokens.push(Lex::new(LexKind::Text, start, offset(i)));
            }
        }
    }

    tokens
}

fn is_lex_boundary(c: char) -> bool {
    matches!(
        c,
        '<' | '>' | '/' | '=' | '\'' | '"' | '\n' | '\r' | ' ' | '\t'
    ) || is_name_start_char(c)
}
