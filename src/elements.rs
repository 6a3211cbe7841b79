//! Typed MSBuild element overlay
//!
//! The XML layer produces generic segments; this module wraps them in
//! MSBuild-aware views. An [`Element`] borrows a segment, carries its
//! [`ElementType`] discriminant, and types its children contextually (an
//! `ItemGroup` child is an `Item` whatever its tag says, an unknown child
//! of a `Target` is treated as a `Task`, and so on). Views are cheap to
//! build and never own the tree.
//!
//! The strict segment queries at the bottom operate over already
//! materialized segment slices. They take non-optional references, so the
//! "absent input" contract violation the overlay must reject is simply
//! unrepresentable at the call site.

use once_cell::unsync::OnceCell;

use crate::expressions::{self, Expression};
use crate::span::Span;
use crate::xml::segments::{Segment, XmlAttribute, XmlName, XmlQuotedString, XmlText};

// ============================================================
// Element types
// ============================================================

/// The closed set of MSBuild element kinds.
///
/// `Unrecognized` covers every tag this model has no schema for; inside a
/// `Target` such tags are typed `Task` instead, since custom tasks are
/// indistinguishable from typos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// The `<Project>` root element.
    Project,
    /// A `<Choose>` conditional block.
    Choose,
    /// A `<When>` branch of a `Choose`.
    When,
    /// The `<Otherwise>` branch of a `Choose`.
    Otherwise,
    /// An `<Import>` of another project file.
    Import,
    /// An `<ImportGroup>` of imports.
    ImportGroup,
    /// An item inside an `ItemGroup` or `ItemDefinitionGroup`.
    Item,
    /// An `<ItemGroup>`.
    ItemGroup,
    /// An `<ItemDefinitionGroup>` of item defaults.
    ItemDefinitionGroup,
    /// A metadata child of an item.
    ItemMetadata,
    /// An `<OnError>` handler inside a target.
    OnError,
    /// An `<Output>` of a task.
    Output,
    /// A `<Parameter>` of an inline task.
    Parameter,
    /// A `<ParameterGroup>` of an inline task.
    ParameterGroup,
    /// The `<ProjectExtensions>` free-form block.
    ProjectExtensions,
    /// A property inside a `PropertyGroup`.
    Property,
    /// A `<PropertyGroup>`.
    PropertyGroup,
    /// A `<Target>`.
    Target,
    /// A task invocation inside a target.
    Task,
    /// The `<Task>` body of an inline `UsingTask`.
    TaskBody,
    /// A `<UsingTask>` registration.
    UsingTask,
    /// Any tag this model has no schema for.
    Unrecognized,
}

impl ElementType {
    /// The canonical element name for this type.
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Project => "Project",
            ElementType::Choose => "Choose",
            ElementType::When => "When",
            ElementType::Otherwise => "Otherwise",
            ElementType::Import => "Import",
            ElementType::ImportGroup => "ImportGroup",
            ElementType::Item => "Item",
            ElementType::ItemGroup => "ItemGroup",
            ElementType::ItemDefinitionGroup => "ItemDefinitionGroup",
            ElementType::ItemMetadata => "ItemMetadata",
            ElementType::OnError => "OnError",
            ElementType::Output => "Output",
            ElementType::Parameter => "Parameter",
            ElementType::ParameterGroup => "ParameterGroup",
            ElementType::ProjectExtensions => "ProjectExtensions",
            ElementType::Property => "Property",
            ElementType::PropertyGroup => "PropertyGroup",
            ElementType::Target => "Target",
            ElementType::Task => "Task",
            ElementType::TaskBody => "TaskBody",
            ElementType::UsingTask => "UsingTask",
            ElementType::Unrecognized => "Unrecognized",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The type a direct child of `parent` gets for the tag name `name`.
///
/// Container types coerce: every `ItemGroup`/`ItemDefinitionGroup` child is
/// an `Item`, every `PropertyGroup` child a `Property`, every `Item` child
/// an `ItemMetadata`, every `ParameterGroup` child a `Parameter`. A
/// `Target` child with an unknown name is a `Task`. Everything else matches
/// by canonical name, case-insensitively, or falls back to `Unrecognized`.
pub fn child_type(parent: ElementType, name: &str) -> ElementType {
    fn named(name: &str, candidates: &[ElementType]) -> Option<ElementType> {
        candidates
            .iter()
            .copied()
            .find(|t| name.eq_ignore_ascii_case(t.name()))
    }

    match parent {
        ElementType::Project => named(
            name,
            &[
                ElementType::Choose,
                ElementType::Import,
                ElementType::ImportGroup,
                ElementType::ItemDefinitionGroup,
                ElementType::ItemGroup,
                ElementType::ProjectExtensions,
                ElementType::PropertyGroup,
                ElementType::Target,
                ElementType::UsingTask,
            ],
        )
        .unwrap_or(ElementType::Unrecognized),
        ElementType::Choose => named(name, &[ElementType::When, ElementType::Otherwise])
            .unwrap_or(ElementType::Unrecognized),
        ElementType::When | ElementType::Otherwise => named(
            name,
            &[
                ElementType::Choose,
                ElementType::ItemGroup,
                ElementType::PropertyGroup,
            ],
        )
        .unwrap_or(ElementType::Unrecognized),
        ElementType::ImportGroup => {
            named(name, &[ElementType::Import]).unwrap_or(ElementType::Unrecognized)
        }
        ElementType::ItemGroup | ElementType::ItemDefinitionGroup => ElementType::Item,
        ElementType::Item => ElementType::ItemMetadata,
        ElementType::PropertyGroup => ElementType::Property,
        ElementType::ParameterGroup => ElementType::Parameter,
        ElementType::Target => named(
            name,
            &[
                ElementType::ItemGroup,
                ElementType::PropertyGroup,
                ElementType::OnError,
            ],
        )
        .unwrap_or(ElementType::Task),
        ElementType::Task => {
            named(name, &[ElementType::Output]).unwrap_or(ElementType::Unrecognized)
        }
        // The inline task body element is spelled `<Task>` in source.
        ElementType::UsingTask => {
            if name.eq_ignore_ascii_case("Task") {
                ElementType::TaskBody
            } else {
                named(name, &[ElementType::ParameterGroup])
                    .unwrap_or(ElementType::Unrecognized)
            }
        }
        ElementType::ItemMetadata
        | ElementType::Import
        | ElementType::OnError
        | ElementType::Output
        | ElementType::Parameter
        | ElementType::ProjectExtensions
        | ElementType::Property
        | ElementType::TaskBody
        | ElementType::Unrecognized => ElementType::Unrecognized,
    }
}

// ============================================================
// Attribute view
// ============================================================

/// A view over one XML attribute, with a lazily parsed value expression.
#[derive(Debug)]
pub struct Attribute<'a> {
    xml: &'a XmlAttribute,
    expression: OnceCell<Option<Expression>>,
}

impl<'a> Attribute<'a> {
    /// Wrap an XML attribute.
    pub fn new(xml: &'a XmlAttribute) -> Self {
        Self {
            xml,
            expression: OnceCell::new(),
        }
    }

    /// The attribute name.
    pub fn name(&self) -> &'a XmlName {
        &self.xml.name
    }

    /// The quoted value, if one was present.
    pub fn value(&self) -> Option<&'a XmlQuotedString> {
        self.xml.value.as_ref()
    }

    /// The text between the value's quotes, if a value was present.
    pub fn value_text(&self) -> Option<&'a str> {
        self.xml.value.as_ref().map(|v| v.text.as_str())
    }

    /// The value parsed with the value language, at document-anchored
    /// offsets. Parsed once on first use; parse issues are not collected
    /// here (the validator re-parses condition values with its own sink).
    pub fn expression(&self) -> Option<&Expression> {
        self.expression
            .get_or_init(|| {
                self.xml.value.as_ref().and_then(|value| {
                    let mut issues = Vec::new();
                    expressions::parse_value(&value.text, value.inner_span().start, &mut issues)
                })
            })
            .as_ref()
    }

    /// The range of the whole `name="value"` text.
    pub fn span(&self) -> Span {
        self.xml.span
    }

    /// Whether `index` falls inside the attribute.
    pub fn contains_index(&self, index: usize) -> bool {
        self.xml.contains_index(index)
    }
}

// ============================================================
// Element view
// ============================================================

/// A typed view over one element-like segment.
#[derive(Debug)]
pub struct Element<'a> {
    segment: &'a Segment,
    element_type: ElementType,
    attributes: OnceCell<Vec<Attribute<'a>>>,
}

impl<'a> Element<'a> {
    /// Wrap `segment` with the declared type.
    pub fn new(segment: &'a Segment, element_type: ElementType) -> Self {
        Self {
            segment,
            element_type,
            attributes: OnceCell::new(),
        }
    }

    /// The element's type discriminant.
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// The underlying generic segment.
    pub fn segment(&self) -> &'a Segment {
        self.segment
    }

    /// The start tag's name segment, when the underlying segment has one.
    pub fn name(&self) -> Option<&'a XmlName> {
        self.segment.name()
    }

    /// The source tag name text, falling back to the canonical type name
    /// for segments without one.
    pub fn name_text(&self) -> &str {
        self.name()
            .map_or_else(|| self.element_type.name(), |n| n.text.as_str())
    }

    /// The tag name segments: start and end tag names for a full element,
    /// the single name for an empty element, none for anything else.
    pub fn names(&self) -> Vec<&'a XmlName> {
        match self.segment {
            Segment::Element(element) => {
                let mut names = vec![&element.name];
                if let Some(end_tag) = &element.end_tag {
                    names.push(&end_tag.name);
                }
                names
            }
            Segment::EmptyElement(element) => vec![&element.name],
            Segment::UnrecognizedTag(_) | Segment::Text(_) => Vec::new(),
        }
    }

    /// All attributes in document order, duplicates preserved.
    pub fn attributes(&self) -> &[Attribute<'a>] {
        self.attributes.get_or_init(|| {
            let xml_attributes = match self.segment {
                Segment::Element(element) => element.attributes.as_slice(),
                Segment::EmptyElement(element) => element.attributes.as_slice(),
                Segment::UnrecognizedTag(_) | Segment::Text(_) => &[],
            };
            xml_attributes.iter().map(Attribute::new).collect()
        })
    }

    /// The first attribute whose name matches `name` case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<&Attribute<'a>> {
        self.attributes()
            .iter()
            .find(|attribute| attribute.name().matches(name))
    }

    /// The `Condition` attribute, when present.
    pub fn condition(&self) -> Option<&Attribute<'a>> {
        self.attribute("Condition")
    }

    /// The `Label` attribute, when present.
    pub fn label(&self) -> Option<&Attribute<'a>> {
        self.attribute("Label")
    }

    /// The `Xmlns` attribute of a `Project`, when present.
    pub fn xmlns(&self) -> Option<&Attribute<'a>> {
        self.attribute("Xmlns")
    }

    /// The `Project` attribute of an `Import`, when present.
    pub fn project(&self) -> Option<&Attribute<'a>> {
        self.attribute("Project")
    }

    /// The `Include` attribute of an `Item`, when present.
    pub fn include(&self) -> Option<&Attribute<'a>> {
        self.attribute("Include")
    }

    /// The `Name` attribute of a `Target`, when present. Distinct from
    /// [`Element::name`], which is the tag name segment.
    pub fn name_attribute(&self) -> Option<&Attribute<'a>> {
        self.attribute("Name")
    }

    /// The `TaskName` attribute of a `UsingTask`, when present.
    pub fn task_name(&self) -> Option<&Attribute<'a>> {
        self.attribute("TaskName")
    }

    /// The `ExecuteTargets` attribute of an `OnError`, when present.
    pub fn execute_targets(&self) -> Option<&Attribute<'a>> {
        self.attribute("ExecuteTargets")
    }

    /// The `TaskParameter` attribute of an `Output`, when present.
    pub fn task_parameter(&self) -> Option<&Attribute<'a>> {
        self.attribute("TaskParameter")
    }

    /// The `ItemName` attribute of an `Output`, when present.
    pub fn item_name(&self) -> Option<&Attribute<'a>> {
        self.attribute("ItemName")
    }

    /// The `PropertyName` attribute of an `Output`, when present.
    pub fn property_name(&self) -> Option<&Attribute<'a>> {
        self.attribute("PropertyName")
    }

    /// The `AssemblyFile` attribute of a `UsingTask`, when present.
    pub fn assembly_file(&self) -> Option<&Attribute<'a>> {
        self.attribute("AssemblyFile")
    }

    /// The `AssemblyName` attribute of a `UsingTask`, when present.
    pub fn assembly_name(&self) -> Option<&Attribute<'a>> {
        self.attribute("AssemblyName")
    }

    /// The range the whole element covers.
    pub fn span(&self) -> Span {
        self.segment.span()
    }

    /// Whether `index` falls inside the element, using the underlying
    /// segment's own containment rule.
    pub fn contains_index(&self, index: usize) -> bool {
        self.segment.contains_index(index)
    }

    /// Whichever start or end tag name segment contains `index`.
    pub fn get_containing_name(&self, index: usize) -> Option<&'a XmlName> {
        self.names()
            .into_iter()
            .find(|name| name.contains_index(index))
    }

    /// The direct child elements, typed contextually. Empty elements and
    /// unrecognized tags have none.
    pub fn child_elements(&self) -> Vec<Element<'a>> {
        let Segment::Element(element) = self.segment else {
            return Vec::new();
        };
        child_element_segments(&element.body)
            .into_iter()
            .map(|segment| {
                let name = segment.name().map_or("", |n| n.text.as_str());
                Element::new(segment, child_type(self.element_type, name))
            })
            .collect()
    }

    /// The text runs in the element's body.
    pub fn text_segments(&self) -> Vec<&'a XmlText> {
        match self.segment {
            Segment::Element(element) => text_segments(&element.body),
            _ => Vec::new(),
        }
    }
}

// ============================================================
// Strict segment queries
// ============================================================

/// The Text segments of `segments`, in order.
pub fn text_segments(segments: &[Segment]) -> Vec<&XmlText> {
    segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Text(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// The tag-shaped segments of `segments`: full elements, empty elements,
/// and unrecognized tags, in order.
pub fn tag_segments(segments: &[Segment]) -> Vec<&Segment> {
    segments
        .iter()
        .filter(|segment| !matches!(segment, Segment::Text(_)))
        .collect()
}

/// The element segments of `segments`, excluding unrecognized tags.
pub fn child_element_segments(segments: &[Segment]) -> Vec<&Segment> {
    segments.iter().filter(|s| s.is_element()).collect()
}

/// The name segment of a full or empty element, `None` for anything else.
pub fn element_name(segment: &Segment) -> Option<&XmlName> {
    segment.name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::tokenizer;
    use pretty_assertions::assert_eq;

    fn first_root(document: &crate::xml::tokenizer::XmlDocument) -> &Segment {
        document
            .root_elements()
            .into_iter()
            .next()
            .expect("document should have a root element")
    }

    #[test]
    fn test_child_type_containers_coerce() {
        assert_eq!(child_type(ElementType::ItemGroup, "Compile"), ElementType::Item);
        assert_eq!(
            child_type(ElementType::ItemDefinitionGroup, "ClCompile"),
            ElementType::Item
        );
        assert_eq!(
            child_type(ElementType::PropertyGroup, "OutputPath"),
            ElementType::Property
        );
        assert_eq!(child_type(ElementType::Item, "HintPath"), ElementType::ItemMetadata);
        assert_eq!(
            child_type(ElementType::ParameterGroup, "Color"),
            ElementType::Parameter
        );
    }

    #[test]
    fn test_child_type_target_is_lenient() {
        assert_eq!(child_type(ElementType::Target, "ItemGroup"), ElementType::ItemGroup);
        assert_eq!(child_type(ElementType::Target, "OnError"), ElementType::OnError);
        assert_eq!(child_type(ElementType::Target, "Csc"), ElementType::Task);
        assert_eq!(child_type(ElementType::Target, "MyCustomTask"), ElementType::Task);
    }

    #[test]
    fn test_child_type_is_case_insensitive() {
        assert_eq!(child_type(ElementType::Project, "target"), ElementType::Target);
        assert_eq!(child_type(ElementType::Choose, "WHEN"), ElementType::When);
    }

    #[test]
    fn test_using_task_body_is_spelled_task() {
        assert_eq!(child_type(ElementType::UsingTask, "Task"), ElementType::TaskBody);
        assert_eq!(
            child_type(ElementType::UsingTask, "ParameterGroup"),
            ElementType::ParameterGroup
        );
    }

    #[test]
    fn test_child_type_unknown_is_unrecognized() {
        assert_eq!(child_type(ElementType::Project, "Steak"), ElementType::Unrecognized);
        assert_eq!(child_type(ElementType::Choose, "Import"), ElementType::Unrecognized);
    }

    #[test]
    fn test_names_for_full_and_empty_elements() {
        let document = tokenizer::parse("<Project></Project>");
        let element = Element::new(first_root(&document), ElementType::Project);
        let names: Vec<&str> = element.names().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(names, vec!["Project", "Project"]);

        let document = tokenizer::parse("<Project/>");
        let element = Element::new(first_root(&document), ElementType::Project);
        assert_eq!(element.names().len(), 1);
    }

    #[test]
    fn test_names_for_unclosed_element() {
        let document = tokenizer::parse("<Project>");
        let element = Element::new(first_root(&document), ElementType::Project);
        assert_eq!(element.names().len(), 1);
    }

    #[test]
    fn test_duplicate_attributes_first_wins() {
        let document = tokenizer::parse(r#"<Project a="1" a="2" a="3"/>"#);
        let element = Element::new(first_root(&document), ElementType::Project);
        assert_eq!(element.attributes().len(), 3);
        let first = element.attribute("a").expect("attribute should exist");
        assert_eq!(first.value_text(), Some("1"));
    }

    #[test]
    fn test_attribute_lookup_is_case_insensitive() {
        let document = tokenizer::parse(r#"<Project XMLNS="x"/>"#);
        let element = Element::new(first_root(&document), ElementType::Project);
        assert!(element.attribute("Xmlns").is_some());
    }

    #[test]
    fn test_named_attribute_accessors() {
        let document = tokenizer::parse(
            r#"<Target name="Build" condition="true" NAME="Clean"/>"#,
        );
        let element = Element::new(first_root(&document), ElementType::Target);
        let name = element.name_attribute().expect("attribute should exist");
        assert_eq!(name.value_text(), Some("Build"));
        assert!(element.condition().is_some());
        assert!(element.include().is_none());

        let document = tokenizer::parse(
            r#"<UsingTask TaskName="MakeHole" AssemblyFile="a.dll"/>"#,
        );
        let element = Element::new(first_root(&document), ElementType::UsingTask);
        assert!(element.task_name().is_some());
        assert!(element.assembly_file().is_some());
        assert!(element.assembly_name().is_none());
    }

    #[test]
    fn test_attribute_expression_is_document_anchored() {
        let source = r#"<Import Project="$(A)"/>"#;
        let document = tokenizer::parse(source);
        let element = Element::new(first_root(&document), ElementType::Import);
        let attribute = element.attribute("Project").expect("attribute should exist");
        let expression = attribute.expression().expect("value should parse");
        let span = expression.span().expect("expression should have a span");
        assert_eq!(&source[span.start..span.end], "$(A)");
    }

    #[test]
    fn test_get_containing_name() {
        let source = "<Project></Project>";
        let document = tokenizer::parse(source);
        let element = Element::new(first_root(&document), ElementType::Project);
        // Inside the start tag name.
        assert!(element.get_containing_name(2).is_some());
        // Inside the end tag name.
        assert!(element.get_containing_name(12).is_some());
        // On the `<` itself.
        assert!(element.get_containing_name(0).is_none());
    }

    #[test]
    fn test_child_elements_are_typed_contextually() {
        let source = "<Project><ItemGroup><Compile/></ItemGroup><Unknown/></Project>";
        let document = tokenizer::parse(source);
        let project = Element::new(first_root(&document), ElementType::Project);
        let children = project.child_elements();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].element_type(), ElementType::ItemGroup);
        assert_eq!(children[1].element_type(), ElementType::Unrecognized);

        let items = children[0].child_elements();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].element_type(), ElementType::Item);
        assert_eq!(items[0].name_text(), "Compile");
    }

    #[test]
    fn test_text_segments_one_per_line() {
        let source = "<Property>a\nb</Property>";
        let document = tokenizer::parse(source);
        let element = Element::new(first_root(&document), ElementType::Property);
        let texts: Vec<&str> = element
            .text_segments()
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        // Each run carries through its line break.
        assert_eq!(texts, vec!["a\n", "b"]);
    }

    #[test]
    fn test_strict_queries_partition_segments() {
        let source = "<a>text<b/><123></a>";
        let document = tokenizer::parse(source);
        let Segment::Element(root) = first_root(&document) else {
            panic!("expected a full element");
        };
        assert_eq!(text_segments(&root.body).len(), 1);
        assert_eq!(tag_segments(&root.body).len(), 2);
        assert_eq!(child_element_segments(&root.body).len(), 1);
        assert_eq!(
            element_name(child_element_segments(&root.body)[0]).map(|n| n.text.as_str()),
            Some("b")
        );
    }
}
