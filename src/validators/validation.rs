//! Schema-driven validation walk
//!
//! Walks a typed element tree pre-order and appends issues to the caller's
//! sink. Nothing here throws and nothing de-duplicates; overlapping issues
//! from different rules are all kept. Per element the checks run in a
//! fixed order: attributes in document order (unknown names, exclusive
//! pairs, condition parsing), then missing required attributes, body text,
//! child constraints, and finally recursion into each child.

use crate::elements::{Element, ElementType};
use crate::expressions;
use crate::issues::{self, Issue};
use crate::span::Span;
use crate::validators::rules::{self, AttributePolicy, ChildPolicy, ElementSchema};
use crate::validators::tasks;

/// Validate `element` and everything beneath it.
pub fn validate(element: &Element<'_>, issues: &mut Vec<Issue>) {
    let element_type = element.element_type();
    if element_type == ElementType::Unrecognized {
        return;
    }

    let children = element.child_elements();
    if element_type == ElementType::Task {
        validate_task(element, &children, issues);
    } else if let Some(schema) = rules::schema(element_type) {
        check_attributes(
            element,
            |name| schema.attribute_policy.allows(name),
            schema.exclusive_attributes,
            issues,
        );
        check_required_attributes(element, schema.required_attributes, issues);
        if !schema.allows_text {
            check_text(element, issues);
        }
        check_children(element, &children, schema, issues);
    }

    for child in &children {
        validate(child, issues);
    }
}

// Tasks get their schema from the built-in table. An unknown name may be a
// custom task, so it accepts any attribute and requires none; a known name
// is held to its closed parameter list.
fn validate_task(element: &Element<'_>, children: &[Element<'_>], issues: &mut Vec<Issue>) {
    let built_in = tasks::built_in_task(element.name_text());
    check_attributes(
        element,
        |name| match built_in {
            Some(schema) => schema.allows_attribute(name),
            None => true,
        },
        &[],
        issues,
    );
    if let Some(schema) = built_in {
        check_required_attributes(element, schema.required_attributes, issues);
    }
    check_text(element, issues);
    check_children(element, children, &TASK_SCHEMA, issues);
}

// Children and cardinality rules shared by every task.
static TASK_SCHEMA: ElementSchema = ElementSchema {
    required_attributes: &[],
    attribute_policy: AttributePolicy::Open,
    exclusive_attributes: &[],
    allows_text: false,
    child_policy: ChildPolicy::Typed,
    required_children: &[],
    at_most_one_children: &[],
    last_only_children: &[],
};

fn check_attributes(
    element: &Element<'_>,
    allows: impl Fn(&str) -> bool,
    exclusive: &[(&str, &str)],
    issues: &mut Vec<Issue>,
) {
    for attribute in element.attributes() {
        let name = &attribute.name().text;
        if !allows(name) {
            issues.push(issues::invalid_attribute(
                element.name_text(),
                name,
                attribute.span(),
            ));
        }
        for &(first, second) in exclusive {
            let other = if name.eq_ignore_ascii_case(first) {
                second
            } else if name.eq_ignore_ascii_case(second) {
                first
            } else {
                continue;
            };
            if element.attribute(other).is_some() {
                issues.push(issues::attribute_cant_be_defined_with(
                    name,
                    other,
                    attribute.span(),
                ));
            }
        }
        if attribute.name().matches("Condition") {
            if let Some(value) = attribute.value() {
                expressions::parse_condition(&value.text, value.inner_span().start, issues);
            }
        }
    }
}

fn check_required_attributes(
    element: &Element<'_>,
    required: &[&str],
    issues: &mut Vec<Issue>,
) {
    for name in required {
        if element.attribute(name).is_none() {
            issues.push(issues::missing_required_attribute(name, anchor_span(element)));
        }
    }
}

fn check_text(element: &Element<'_>, issues: &mut Vec<Issue>) {
    for text in element.text_segments() {
        if !text.is_whitespace() {
            issues.push(issues::no_text_segments_allowed(
                element.name_text(),
                text.span,
            ));
        }
    }
}

fn check_children(
    element: &Element<'_>,
    children: &[Element<'_>],
    schema: &ElementSchema,
    issues: &mut Vec<Issue>,
) {
    let mut seen: Vec<ElementType> = Vec::new();
    for (index, child) in children.iter().enumerate() {
        let child_type = child.element_type();
        let allowed = match schema.child_policy {
            ChildPolicy::None => false,
            ChildPolicy::Typed => child_type != ElementType::Unrecognized,
            ChildPolicy::Any => true,
        };
        if !allowed {
            issues.push(issues::invalid_child_element(
                element.name_text(),
                child.name_text(),
                child.span(),
            ));
        }
        if schema.at_most_one_children.contains(&child_type) && seen.contains(&child_type) {
            issues.push(issues::at_most_one_child_element(
                element.name_text(),
                child.name_text(),
                child.span(),
            ));
        }
        if schema.last_only_children.contains(&child_type) && index + 1 != children.len() {
            issues.push(issues::invalid_last_child_element(
                element.name_text(),
                child.name_text(),
                child.span(),
            ));
        }
        seen.push(child_type);
    }
    for required in schema.required_children {
        if !children.iter().any(|c| c.element_type() == *required) {
            issues.push(issues::missing_required_child_element(
                element.name_text(),
                required.name(),
                anchor_span(element),
            ));
        }
    }
}

// Issues about the element as a whole anchor on the start tag's name.
fn anchor_span(element: &Element<'_>) -> Span {
    element.name().map_or_else(|| element.span(), |n| n.span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::IssueKind;
    use crate::xml::tokenizer;
    use pretty_assertions::assert_eq;

    fn validate_project(source: &str) -> Vec<Issue> {
        let document = tokenizer::parse(source);
        let root = document
            .root_elements()
            .into_iter()
            .next()
            .expect("source should have a root element");
        let element = Element::new(root, ElementType::Project);
        let mut issues = Vec::new();
        validate(&element, &mut issues);
        issues
    }

    fn kinds(issues: &[Issue]) -> Vec<IssueKind> {
        issues.iter().map(|i| i.kind).collect()
    }

    const PROJECT_OPEN: &str =
        r#"<Project Xmlns="http://schemas.microsoft.com/developer/msbuild/2003">"#;

    fn wrap(body: &str) -> String {
        format!("{}{}</Project>", PROJECT_OPEN, body)
    }

    #[test]
    fn test_valid_project_has_no_issues() {
        let issues = validate_project(&wrap(
            "<PropertyGroup><OutputPath>bin</OutputPath></PropertyGroup>",
        ));
        assert_eq!(issues, Vec::new());
    }

    #[test]
    fn test_missing_xmlns() {
        let issues = validate_project("<Project/>");
        assert_eq!(kinds(&issues), vec![IssueKind::MissingRequiredAttribute]);
        assert_eq!(issues[0].message, r#"Missing required attribute: "Xmlns"."#);
        // Anchored on the element name.
        assert_eq!(issues[0].span, Span::new(1, 8));
    }

    #[test]
    fn test_when_without_condition() {
        let source = wrap("<Choose><When/></Choose>");
        let issues = validate_project(&source);
        assert_eq!(kinds(&issues), vec![IssueKind::MissingRequiredAttribute]);
        assert_eq!(
            issues[0].message,
            r#"Missing required attribute: "Condition"."#
        );
        let span = issues[0].span;
        assert_eq!(&source[span.start..span.end], "When");
    }

    #[test]
    fn test_output_exclusive_attributes() {
        let source = wrap(
            r#"<Target Name="t"><Csc><Output ItemName="" PropertyName="" TaskParameter=""/></Csc></Target>"#,
        );
        let issues = validate_project(&source);
        assert_eq!(
            kinds(&issues),
            vec![
                IssueKind::AttributeCantBeDefinedWith,
                IssueKind::AttributeCantBeDefinedWith
            ]
        );
        // Each issue spans its own name="value" text.
        assert_eq!(
            &source[issues[0].span.start..issues[0].span.end],
            r#"ItemName="""#
        );
        assert_eq!(
            &source[issues[1].span.start..issues[1].span.end],
            r#"PropertyName="""#
        );
    }

    #[test]
    fn test_invalid_attribute() {
        let issues = validate_project(&wrap(r#"<PropertyGroup Include="a"/>"#));
        assert_eq!(kinds(&issues), vec![IssueKind::InvalidAttribute]);
        assert_eq!(
            issues[0].message,
            r#""Include" is not a valid attribute of a "PropertyGroup" element."#
        );
    }

    #[test]
    fn test_invalid_child_element() {
        let issues = validate_project(&wrap("<Steak/>"));
        assert_eq!(kinds(&issues), vec![IssueKind::InvalidChildElement]);
        assert_eq!(
            issues[0].message,
            r#""Steak" is not a valid child element of a "Project" element."#
        );
    }

    #[test]
    fn test_no_text_allowed() {
        let issues = validate_project(&wrap("hello"));
        assert_eq!(kinds(&issues), vec![IssueKind::NoTextSegmentsAllowed]);
    }

    #[test]
    fn test_whitespace_text_is_fine() {
        let issues = validate_project(&wrap("\n  "));
        assert_eq!(issues, Vec::new());
    }

    #[test]
    fn test_one_issue_per_text_run() {
        // Text interrupted by a line break produces one issue per run.
        let issues = validate_project(&wrap("line one\nline two"));
        assert_eq!(
            kinds(&issues),
            vec![
                IssueKind::NoTextSegmentsAllowed,
                IssueKind::NoTextSegmentsAllowed
            ]
        );
    }

    #[test]
    fn test_choose_requires_when() {
        let issues = validate_project(&wrap("<Choose></Choose>"));
        assert_eq!(kinds(&issues), vec![IssueKind::MissingRequiredChildElement]);
        assert_eq!(
            issues[0].message,
            r#"A "Choose" element must have at least one "When" child element."#
        );
    }

    #[test]
    fn test_otherwise_must_be_last_and_single() {
        let source = wrap(
            r#"<Choose><Otherwise/><When Condition="true"/><Otherwise/></Choose>"#,
        );
        let issues = validate_project(&source);
        assert_eq!(
            kinds(&issues),
            vec![
                IssueKind::InvalidLastChildElement,
                IssueKind::AtMostOneChildElement
            ]
        );
    }

    #[test]
    fn test_project_extensions_at_most_one() {
        let issues = validate_project(&wrap("<ProjectExtensions/><ProjectExtensions/>"));
        assert_eq!(kinds(&issues), vec![IssueKind::AtMostOneChildElement]);
    }

    #[test]
    fn test_on_error_must_be_last_in_target() {
        let issues = validate_project(&wrap(
            r#"<Target Name="t"><OnError ExecuteTargets="e"/><Message/></Target>"#,
        ));
        assert_eq!(kinds(&issues), vec![IssueKind::InvalidLastChildElement]);
    }

    #[test]
    fn test_condition_values_are_parsed_in_place() {
        let source = wrap(r#"<PropertyGroup Condition="$("/>"#);
        let issues = validate_project(&source);
        assert_eq!(
            kinds(&issues),
            vec![
                IssueKind::MissingPropertyName,
                IssueKind::MissingRightParenthesis
            ]
        );
        // Anchored in document coordinates, just past the `$(` inside the
        // attribute value.
        let value_start = source.find(r#""$("#).unwrap() + 1;
        assert_eq!(issues[0].span, Span::empty(value_start + 2));
    }

    #[test]
    fn test_unknown_task_accepts_any_attribute() {
        let issues = validate_project(&wrap(
            r#"<Target Name="t"><MyTask Anything="x" Condition="true"/></Target>"#,
        ));
        assert_eq!(issues, Vec::new());
    }

    #[test]
    fn test_built_in_task_schema_is_closed() {
        let issues = validate_project(&wrap(
            r#"<Target Name="t"><Copy Frobnicate="x"/></Target>"#,
        ));
        assert_eq!(
            kinds(&issues),
            vec![
                IssueKind::InvalidAttribute,
                IssueKind::MissingRequiredAttribute
            ]
        );
        assert_eq!(
            issues[1].message,
            r#"Missing required attribute: "SourceFiles"."#
        );
    }

    #[test]
    fn test_built_in_task_lookup_is_case_insensitive() {
        let issues = validate_project(&wrap(
            r#"<Target Name="t"><copy SourceFiles="a" DestinationFolder="b"/></Target>"#,
        ));
        assert_eq!(issues, Vec::new());
    }

    #[test]
    fn test_task_output_child_is_allowed() {
        let issues = validate_project(&wrap(
            r#"<Target Name="t"><Csc><Output TaskParameter="p" ItemName="i"/></Csc></Target>"#,
        ));
        assert_eq!(issues, Vec::new());
    }

    #[test]
    fn test_using_task_exclusive_assembly_attributes() {
        let issues = validate_project(&wrap(
            r#"<UsingTask TaskName="T" AssemblyFile="f" AssemblyName="n"/>"#,
        ));
        assert_eq!(
            kinds(&issues),
            vec![
                IssueKind::AttributeCantBeDefinedWith,
                IssueKind::AttributeCantBeDefinedWith
            ]
        );
    }

    #[test]
    fn test_import_allows_no_children() {
        let issues = validate_project(&wrap(
            r#"<Import Project="p"><ImportGroup/></Import>"#,
        ));
        assert_eq!(kinds(&issues), vec![IssueKind::InvalidChildElement]);
    }

    #[test]
    fn test_item_groups_type_their_children() {
        let issues = validate_project(&wrap("<ItemGroup><Compile/></ItemGroup>"));
        // A group child is an Item and must carry Include.
        assert_eq!(kinds(&issues), vec![IssueKind::MissingRequiredAttribute]);
        assert_eq!(
            issues[0].message,
            r#"Missing required attribute: "Include"."#
        );
    }

    #[test]
    fn test_metadata_text_is_allowed() {
        let issues = validate_project(&wrap(
            r#"<ItemGroup><Compile Include="a.cs"><Visible>false</Visible></Compile></ItemGroup>"#,
        ));
        assert_eq!(issues, Vec::new());
    }

    #[test]
    fn test_duplicate_issues_are_not_deduplicated() {
        let issues = validate_project(&wrap("<Steak/><Steak/>"));
        assert_eq!(
            kinds(&issues),
            vec![
                IssueKind::InvalidChildElement,
                IssueKind::InvalidChildElement
            ]
        );
    }
}
