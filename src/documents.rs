//! Project document assembly
//!
//! [`parse`] runs the whole pipeline over one source text: the XML layer
//! builds the tolerant segment tree, every root element named `Project` is
//! wrapped as a typed element and validated, and the result is a
//! [`Document`] holding the tree plus one combined issue list. XML-layer
//! issues always precede validator issues.

use crate::elements::{Element, ElementType};
use crate::issues::{self, Issue};
use crate::span::Span;
use crate::validators;
use crate::xml::tokenizer::{self, XmlDocument};

/// One analyzed project file: the XML tree and every issue found in it.
///
/// Built once per source text and never mutated; re-analysis builds a new
/// `Document`.
#[derive(Debug)]
pub struct Document {
    xml: XmlDocument,
    issues: Vec<Issue>,
}

impl Document {
    /// The underlying XML tree.
    pub fn xml(&self) -> &XmlDocument {
        &self.xml
    }

    /// The first root element named `Project`, as a typed view.
    pub fn project(&self) -> Option<Element<'_>> {
        self.xml
            .root_elements()
            .into_iter()
            .find(|segment| segment.name().is_some_and(|n| n.matches("Project")))
            .map(|segment| Element::new(segment, ElementType::Project))
    }

    /// Every issue in the document: XML-layer issues first, then validator
    /// issues, each group in document order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

/// Analyze `text` as an MSBuild project file.
pub fn parse(text: &str) -> Document {
    let xml = tokenizer::parse(text);
    let mut issues = xml.issues.clone();

    let mut found_project = false;
    for root in xml.root_elements() {
        if root.name().is_some_and(|n| n.matches("Project")) {
            found_project = true;
            let element = Element::new(root, ElementType::Project);
            validators::validate(&element, &mut issues);
        }
    }
    if !found_project {
        let span = xml
            .root_elements()
            .first()
            .map_or(Span::empty(0), |segment| segment.span());
        issues.push(issues::expected_project_element(span));
    }

    Document { xml, issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::IssueKind;
    use pretty_assertions::assert_eq;

    fn kinds(document: &Document) -> Vec<IssueKind> {
        document.issues().iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_valid_project() {
        let document = parse(
            r#"<Project Xmlns="http://schemas.microsoft.com/developer/msbuild/2003"></Project>"#,
        );
        assert_eq!(document.issues(), &[]);
        let project = document.project().expect("project root should be found");
        assert_eq!(project.element_type(), ElementType::Project);
    }

    #[test]
    fn test_project_name_is_case_insensitive() {
        let document = parse(r#"<PROJECT Xmlns="x"/>"#);
        assert!(document.project().is_some());
        assert_eq!(document.issues(), &[]);
    }

    #[test]
    fn test_empty_document() {
        let document = parse("");
        assert!(document.project().is_none());
        assert_eq!(kinds(&document), vec![IssueKind::ExpectedProjectElement]);
        assert_eq!(document.issues()[0].span, Span::empty(0));
    }

    #[test]
    fn test_misnamed_root() {
        let source = "<Package></Package>";
        let document = parse(source);
        assert!(document.project().is_none());
        assert_eq!(kinds(&document), vec![IssueKind::ExpectedProjectElement]);
        // Anchored at the whole root element.
        assert_eq!(document.issues()[0].span, Span::new(0, source.len()));
    }

    #[test]
    fn test_every_project_root_is_validated() {
        let document = parse("<project/><project/>");
        assert_eq!(
            kinds(&document),
            vec![
                IssueKind::DocumentCanHaveOneRootElement,
                IssueKind::MissingRequiredAttribute,
                IssueKind::MissingRequiredAttribute
            ]
        );
        // One missing Xmlns per root, in document order.
        assert_eq!(document.issues()[1].span, Span::new(1, 8));
        assert_eq!(document.issues()[2].span, Span::new(11, 18));
    }

    #[test]
    fn test_xml_issues_precede_validator_issues() {
        let document = parse("<Project>");
        let kinds = kinds(&document);
        let xml_position = kinds
            .iter()
            .position(|k| *k == IssueKind::MissingEndTag)
            .expect("the unclosed root should be reported");
        let validator_position = kinds
            .iter()
            .position(|k| *k == IssueKind::MissingRequiredAttribute)
            .expect("the missing Xmlns should be reported");
        assert!(xml_position < validator_position);
    }

    #[test]
    fn test_validation_runs_over_the_whole_tree() {
        let document = parse(
            r#"<Project Xmlns="x"><Choose><When/></Choose></Project>"#,
        );
        assert_eq!(kinds(&document), vec![IssueKind::MissingRequiredAttribute]);
        assert_eq!(
            document.issues()[0].message,
            r#"Missing required attribute: "Condition"."#
        );
    }

    #[test]
    fn test_totality_over_arbitrary_text() {
        for source in ["<", "<<>>", "</>", "<a b=", "$(", "plain text", "<Project", "\"'"] {
            let document = parse(source);
            let _ = document.project();
            let _ = document.issues();
        }
    }
}
