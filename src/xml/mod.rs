//! Generic, tolerant XML layer
//!
//! This layer turns raw text into a tree of [`Segment`]s with byte-offset
//! spans and an issue list, recovering from every malformation it meets. It
//! has no MSBuild knowledge; the typed element model in
//! [`crate::elements`] is built on top of it.

pub mod lex;
pub mod segments;
pub mod tokenizer;

pub use lex::{Lex, LexKind, Lexer};
pub use segments::{
    Segment, XmlAttribute, XmlElement, XmlEmptyElement, XmlEndTag, XmlName, XmlQuotedString,
    XmlText, XmlUnrecognizedTag,
};
pub use tokenizer::{parse, Tokenizer, XmlDocument};
