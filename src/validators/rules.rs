//! Per-element validation schemas
//!
//! One static [`ElementSchema`] per MSBuild element type: which attributes
//! are required, which are allowed, which pairs exclude each other, whether
//! body text is permitted, and how children are constrained. `Task` and
//! `Unrecognized` have no schema here; tasks are resolved against the
//! built-in task table and unrecognized elements are never checked.

use crate::elements::ElementType;

/// How an element constrains its attribute names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributePolicy {
    /// Only the listed names are allowed.
    Closed(&'static [&'static str]),
    /// Any attribute name is accepted.
    Open,
}

impl AttributePolicy {
    /// Whether `name` is acceptable under this policy (case-insensitive).
    pub fn allows(&self, name: &str) -> bool {
        match self {
            AttributePolicy::Closed(names) => {
                names.iter().any(|n| n.eq_ignore_ascii_case(name))
            }
            AttributePolicy::Open => true,
        }
    }
}

/// How an element constrains its child elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildPolicy {
    /// No children of any kind.
    None,
    /// Children the contextual typing recognizes; unrecognized ones are
    /// flagged.
    Typed,
    /// Anything goes (free-form content).
    Any,
}

/// The validation schema for one element type.
#[derive(Debug, Clone, Copy)]
pub struct ElementSchema {
    /// Attributes that must be present.
    pub required_attributes: &'static [&'static str],
    /// Which attribute names are acceptable.
    pub attribute_policy: AttributePolicy,
    /// Pairs of attributes that may not appear together.
    pub exclusive_attributes: &'static [(&'static str, &'static str)],
    /// Whether non-whitespace body text is permitted.
    pub allows_text: bool,
    /// How child elements are constrained.
    pub child_policy: ChildPolicy,
    /// Child types of which at least one must be present.
    pub required_children: &'static [ElementType],
    /// Child types of which at most one may be present.
    pub at_most_one_children: &'static [ElementType],
    /// Child types that may only appear as the last child element.
    pub last_only_children: &'static [ElementType],
}

const NO_ATTRIBUTES: &[&str] = &[];
const NO_PAIRS: &[(&str, &str)] = &[];
const NO_CHILDREN: &[ElementType] = &[];

impl ElementSchema {
    const fn closed(
        required_attributes: &'static [&'static str],
        allowed_attributes: &'static [&'static str],
    ) -> Self {
        Self {
            required_attributes,
            attribute_policy: AttributePolicy::Closed(allowed_attributes),
            exclusive_attributes: NO_PAIRS,
            allows_text: false,
            child_policy: ChildPolicy::Typed,
            required_children: NO_CHILDREN,
            at_most_one_children: NO_CHILDREN,
            last_only_children: NO_CHILDREN,
        }
    }
}

const PROJECT: ElementSchema = ElementSchema {
    at_most_one_children: &[ElementType::ProjectExtensions],
    ..ElementSchema::closed(
        &["Xmlns"],
        &[
            "Xmlns",
            "ToolsVersion",
            "DefaultTargets",
            "InitialTargets",
            "TreatAsLocalProperty",
        ],
    )
};

const CHOOSE: ElementSchema = ElementSchema {
    required_children: &[ElementType::When],
    at_most_one_children: &[ElementType::Otherwise],
    last_only_children: &[ElementType::Otherwise],
    ..ElementSchema::closed(NO_ATTRIBUTES, NO_ATTRIBUTES)
};

const WHEN: ElementSchema = ElementSchema::closed(&["Condition"], &["Condition"]);

const OTHERWISE: ElementSchema = ElementSchema::closed(NO_ATTRIBUTES, NO_ATTRIBUTES);

const IMPORT: ElementSchema = ElementSchema {
    child_policy: ChildPolicy::None,
    ..ElementSchema::closed(&["Project"], &["Project", "Condition", "Sdk"])
};

const IMPORT_GROUP: ElementSchema =
    ElementSchema::closed(NO_ATTRIBUTES, &["Condition", "Label"]);

const ITEM: ElementSchema = ElementSchema::closed(
    &["Include"],
    &[
        "Include",
        "Exclude",
        "Condition",
        "Remove",
        "Update",
        "KeepMetadata",
        "RemoveMetadata",
        "KeepDuplicates",
    ],
);

const ITEM_GROUP: ElementSchema =
    ElementSchema::closed(NO_ATTRIBUTES, &["Condition", "Label"]);

const ITEM_DEFINITION_GROUP: ElementSchema =
    ElementSchema::closed(NO_ATTRIBUTES, &["Condition", "Label"]);

const ITEM_METADATA: ElementSchema = ElementSchema {
    allows_text: true,
    child_policy: ChildPolicy::Any,
    ..ElementSchema::closed(NO_ATTRIBUTES, &["Condition"])
};

const ON_ERROR: ElementSchema = ElementSchema {
    child_policy: ChildPolicy::None,
    ..ElementSchema::closed(&["ExecuteTargets"], &["ExecuteTargets", "Condition"])
};

const OUTPUT: ElementSchema = ElementSchema {
    exclusive_attributes: &[("ItemName", "PropertyName")],
    child_policy: ChildPolicy::None,
    ..ElementSchema::closed(
        &["TaskParameter"],
        &["TaskParameter", "ItemName", "PropertyName", "Condition"],
    )
};

const PARAMETER: ElementSchema = ElementSchema {
    child_policy: ChildPolicy::None,
    ..ElementSchema::closed(NO_ATTRIBUTES, &["ParameterType", "Output", "Required"])
};

const PARAMETER_GROUP: ElementSchema = ElementSchema::closed(NO_ATTRIBUTES, NO_ATTRIBUTES);

const PROJECT_EXTENSIONS: ElementSchema = ElementSchema {
    allows_text: true,
    child_policy: ChildPolicy::Any,
    ..ElementSchema::closed(NO_ATTRIBUTES, NO_ATTRIBUTES)
};

const PROPERTY: ElementSchema = ElementSchema {
    allows_text: true,
    child_policy: ChildPolicy::Any,
    ..ElementSchema::closed(NO_ATTRIBUTES, &["Condition"])
};

const PROPERTY_GROUP: ElementSchema =
    ElementSchema::closed(NO_ATTRIBUTES, &["Condition", "Label"]);

const TARGET: ElementSchema = ElementSchema {
    last_only_children: &[ElementType::OnError],
    ..ElementSchema::closed(
        &["Name"],
        &[
            "Name",
            "Condition",
            "Inputs",
            "Outputs",
            "DependsOnTargets",
            "BeforeTargets",
            "AfterTargets",
            "Returns",
            "KeepDuplicateOutputs",
            "Label",
        ],
    )
};

const TASK_BODY: ElementSchema = ElementSchema {
    allows_text: true,
    child_policy: ChildPolicy::Any,
    ..ElementSchema::closed(NO_ATTRIBUTES, &["Evaluate"])
};

const USING_TASK: ElementSchema = ElementSchema {
    exclusive_attributes: &[("AssemblyFile", "AssemblyName")],
    at_most_one_children: &[ElementType::ParameterGroup, ElementType::TaskBody],
    ..ElementSchema::closed(
        &["TaskName"],
        &[
            "TaskName",
            "AssemblyFile",
            "AssemblyName",
            "Condition",
            "TaskFactory",
            "Architecture",
            "Runtime",
        ],
    )
};

/// The schema for `element_type`, or `None` for tasks and unrecognized
/// elements.
pub fn schema(element_type: ElementType) -> Option<&'static ElementSchema> {
    match element_type {
        ElementType::Project => Some(&PROJECT),
        ElementType::Choose => Some(&CHOOSE),
        ElementType::When => Some(&WHEN),
        ElementType::Otherwise => Some(&OTHERWISE),
        ElementType::Import => Some(&IMPORT),
        ElementType::ImportGroup => Some(&IMPORT_GROUP),
        ElementType::Item => Some(&ITEM),
        ElementType::ItemGroup => Some(&ITEM_GROUP),
        ElementType::ItemDefinitionGroup => Some(&ITEM_DEFINITION_GROUP),
        ElementType::ItemMetadata => Some(&ITEM_METADATA),
        ElementType::OnError => Some(&ON_ERROR),
        ElementType::Output => Some(&OUTPUT),
        ElementType::Parameter => Some(&PARAMETER),
        ElementType::ParameterGroup => Some(&PARAMETER_GROUP),
        ElementType::ProjectExtensions => Some(&PROJECT_EXTENSIONS),
        ElementType::Property => Some(&PROPERTY),
        ElementType::PropertyGroup => Some(&PROPERTY_GROUP),
        ElementType::Target => Some(&TARGET),
        ElementType::TaskBody => Some(&TASK_BODY),
        ElementType::UsingTask => Some(&USING_TASK),
        ElementType::Task | ElementType::Unrecognized => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attribute_policy_is_case_insensitive() {
        let policy = AttributePolicy::Closed(&["Condition", "Label"]);
        assert!(policy.allows("condition"));
        assert!(policy.allows("LABEL"));
        assert!(!policy.allows("Include"));
    }

    #[test]
    fn test_open_policy_allows_anything() {
        assert!(AttributePolicy::Open.allows("Whatever"));
    }

    #[test]
    fn test_project_schema() {
        let schema = schema(ElementType::Project).unwrap();
        assert_eq!(schema.required_attributes, &["Xmlns"]);
        assert_eq!(
            schema.at_most_one_children,
            &[ElementType::ProjectExtensions]
        );
        assert!(!schema.allows_text);
    }

    #[test]
    fn test_choose_schema_constrains_otherwise() {
        let schema = schema(ElementType::Choose).unwrap();
        assert_eq!(schema.required_children, &[ElementType::When]);
        assert_eq!(schema.at_most_one_children, &[ElementType::Otherwise]);
        assert_eq!(schema.last_only_children, &[ElementType::Otherwise]);
    }

    #[test]
    fn test_output_schema_exclusive_pair() {
        let schema = schema(ElementType::Output).unwrap();
        assert_eq!(schema.exclusive_attributes, &[("ItemName", "PropertyName")]);
        assert_eq!(schema.child_policy, ChildPolicy::None);
    }

    #[test]
    fn test_text_bearing_schemas() {
        assert!(schema(ElementType::Property).unwrap().allows_text);
        assert!(schema(ElementType::ItemMetadata).unwrap().allows_text);
        assert!(!schema(ElementType::PropertyGroup).unwrap().allows_text);
    }

    #[test]
    fn test_tasks_have_no_static_schema() {
        assert!(schema(ElementType::Task).is_none());
        assert!(schema(ElementType::Unrecognized).is_none());
    }
}
