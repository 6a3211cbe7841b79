//! Generic XML segments
//!
//! Segments are the tolerant parse tree the tokenizer produces: full
//! elements, empty elements, unrecognized tags, and text runs, each with a
//! byte-offset span. The model is deliberately generic; everything
//! MSBuild-specific lives in the element overlay built on top of it.

use crate::span::Span;

/// A name token inside a tag (element name or attribute name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlName {
    /// The byte range the name covers.
    pub span: Span,
    /// The name text.
    pub text: String,
}

impl XmlName {
    /// Whether the name matches `other` case-insensitively.
    pub fn matches(&self, other: &str) -> bool {
        self.text.eq_ignore_ascii_case(other)
    }

    /// Whether `index` falls inside the name.
    pub fn contains_index(&self, index: usize) -> bool {
        self.span.contains_index(index)
    }
}

/// A quoted string (attribute value), quotes included in the span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlQuotedString {
    /// The byte range including the quotes (the end quote only if present).
    pub span: Span,
    /// The quote character used (`'` or `"`).
    pub quote: char,
    /// The text between the quotes.
    pub text: String,
    /// Whether the closing quote was present.
    pub closed: bool,
}

impl XmlQuotedString {
    /// The byte range of the text between the quotes.
    pub fn inner_span(&self) -> Span {
        let start = self.span.start + 1;
        let end = if self.closed {
            self.span.end - 1
        } else {
            self.span.end
        };
        Span::new(start, end.max(start))
    }
}

/// One attribute of a start tag or empty-element tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// From the start of the name through the end of the value (or the name
    /// if there is no value).
    pub span: Span,
    /// The attribute name.
    pub name: XmlName,
    /// The quoted value, if one was present.
    pub value: Option<XmlQuotedString>,
}

impl XmlAttribute {
    /// Whether `index` falls inside the attribute's `name="value"` text.
    pub fn contains_index(&self, index: usize) -> bool {
        self.span.contains_index(index)
    }
}

/// An element's end tag (`</Name>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlEndTag {
    /// The byte range from `<` through `>`.
    pub span: Span,
    /// The name inside the end tag.
    pub name: XmlName,
}

/// A full element: start tag, body segments, and (usually) an end tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// From the start tag's `<` through the end tag's `>` (or as far as the
    /// element got before input ran out).
    pub span: Span,
    /// The byte range of the start tag, `<` through `>`.
    pub start_tag_span: Span,
    /// The element name in the start tag.
    pub name: XmlName,
    /// Attributes in document order, duplicates preserved.
    pub attributes: Vec<XmlAttribute>,
    /// The segments between the start and end tags.
    pub body: Vec<Segment>,
    /// The end tag, absent when the element was never closed.
    pub end_tag: Option<XmlEndTag>,
}

/// An empty element (`<Name ... />`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlEmptyElement {
    /// The byte range from `<` through `/>`.
    pub span: Span,
    /// The element name.
    pub name: XmlName,
    /// Attributes in document order, duplicates preserved.
    pub attributes: Vec<XmlAttribute>,
}

/// A `<` that did not begin a recognizable tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlUnrecognizedTag {
    /// The byte range from `<` through the closing `>` or as far as the tag
    /// got.
    pub span: Span,
    /// The raw source text of the tag.
    pub text: String,
}

/// A run of character data (one line's worth at most).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlText {
    /// The byte range the run covers.
    pub span: Span,
    /// The text of the run.
    pub text: String,
}

impl XmlText {
    /// Whether the run is entirely whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// One segment of a document or element body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A full element with a start tag and body.
    Element(XmlElement),
    /// An empty element (`<Name/>`).
    EmptyElement(XmlEmptyElement),
    /// A `<` that did not begin a recognizable tag.
    UnrecognizedTag(XmlUnrecognizedTag),
    /// A run of character data.
    Text(XmlText),
}

impl Segment {
    /// The byte range the segment covers.
    pub fn span(&self) -> Span {
        match self {
            Segment::Element(e) => e.span,
            Segment::EmptyElement(e) => e.span,
            Segment::UnrecognizedTag(t) => t.span,
            Segment::Text(t) => t.span,
        }
    }

    /// Whether `index` falls inside the segment.
    pub fn contains_index(&self, index: usize) -> bool {
        self.span().contains_index(index)
    }

    /// The segment's element name, for full and empty elements only.
    pub fn name(&self) -> Option<&XmlName> {
        match self {
            Segment::Element(e) => Some(&e.name),
            Segment::EmptyElement(e) => Some(&e.name),
            Segment::UnrecognizedTag(_) | Segment::Text(_) => None,
        }
    }

    /// Whether the segment is a full or empty element.
    pub fn is_element(&self) -> bool {
        matches!(self, Segment::Element(_) | Segment::EmptyElement(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quoted_string_inner_span() {
        let closed = XmlQuotedString {
            span: Span::new(10, 17),
            quote: '"',
            text: "value".to_string(),
            closed: true,
        };
        assert_eq!(closed.inner_span(), Span::new(11, 16));

        let open = XmlQuotedString {
            span: Span::new(10, 16),
            quote: '"',
            text: "value".to_string(),
            closed: false,
        };
        assert_eq!(open.inner_span(), Span::new(11, 16));
    }

    #[test]
    fn test_empty_quoted_string_inner_span() {
        let empty = XmlQuotedString {
            span: Span::new(5, 6),
            quote: '\'',
            text: String::new(),
            closed: false,
        };
        assert_eq!(empty.inner_span(), Span::new(6, 6));
    }

    #[test]
    fn test_name_matches_case_insensitively() {
        let name = XmlName {
            span: Span::new(1, 8),
            text: "Project".to_string(),
        };
        assert!(name.matches("PROJECT"));
        assert!(name.matches("project"));
        assert!(!name.matches("Target"));
    }

    #[test]
    fn test_text_whitespace() {
        let blank = XmlText {
            span: Span::new(0, 3),
            text: "  \n".to_string(),
        };
        assert!(blank.is_whitespace());

        let words = XmlText {
            span: Span::new(0, 5),
            text: " abc ".to_string(),
        };
        assert!(!words.is_whitespace());
    }

    #[test]
    fn test_segment_name() {
        let text = Segment::Text(XmlText {
            span: Span::new(0, 1),
            text: "x".to_string(),
        });
        assert!(text.name().is_none());
        assert!(!text.is_element());
    }
}
