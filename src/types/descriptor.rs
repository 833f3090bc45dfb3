//! Static, schema-derived metadata for every node type.
//!
//! Each node type exposes one `TypeDescriptor` listing its fields in declared
//! order. The validation engine and the visitor both work from this metadata
//! instead of per-type code.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Complex,
    Backbone,
    Resource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// 0..1
    Optional,
    /// 1..1
    Required,
    /// 0..*
    List,
    /// 1..*
    RequiredList,
}

impl Cardinality {
    pub const fn is_list(self) -> bool {
        matches!(self, Self::List | Self::RequiredList)
    }

    pub const fn is_required(self) -> bool {
        matches!(self, Self::Required | Self::RequiredList)
    }
}

/// How a field's content is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    /// Raw attribute such as `id` or `Extension.url`; never counts as a child.
    Attribute,
    /// The `value` payload of a primitive element.
    Value,
    /// A nested element, backbone element or resource.
    Child,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindingStrength {
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "extensible")]
    Extensible,
    #[serde(rename = "preferred")]
    Preferred,
    #[serde(rename = "example")]
    Example,
}

impl fmt::Display for BindingStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Extensible => write!(f, "extensible"),
            Self::Preferred => write!(f, "preferred"),
            Self::Example => write!(f, "example"),
        }
    }
}

/// A value-set binding with the enumeration it embeds.
///
/// `codes` may be empty when the value set is too large to embed; such
/// bindings are resolved through a terminology service when one is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingDescriptor {
    pub name: &'static str,
    pub strength: BindingStrength,
    pub value_set: &'static str,
    pub system: Option<&'static str>,
    pub codes: &'static [&'static str],
}

impl BindingDescriptor {
    pub const fn new(
        name: &'static str,
        strength: BindingStrength,
        value_set: &'static str,
    ) -> Self {
        Self {
            name,
            strength,
            value_set,
            system: None,
            codes: &[],
        }
    }

    pub const fn system(self, system: &'static str) -> Self {
        Self {
            system: Some(system),
            ..self
        }
    }

    pub const fn codes(self, codes: &'static [&'static str]) -> Self {
        Self { codes, ..self }
    }

    /// The canonical URL without a `|version` suffix.
    pub fn value_set_url(&self) -> &'static str {
        match self.value_set.split_once('|') {
            Some((url, _)) => url,
            None => self.value_set,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintSeverity {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warning")]
    Warning,
}

/// A FHIRPath invariant declared on a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintDescriptor {
    pub key: &'static str,
    pub severity: ConstraintSeverity,
    pub human: &'static str,
    pub expression: &'static str,
}

impl ConstraintDescriptor {
    pub const fn error(key: &'static str, human: &'static str, expression: &'static str) -> Self {
        Self {
            key,
            severity: ConstraintSeverity::Error,
            human,
            expression,
        }
    }

    pub const fn warning(
        key: &'static str,
        human: &'static str,
        expression: &'static str,
    ) -> Self {
        Self {
            key,
            severity: ConstraintSeverity::Warning,
            human,
            expression,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub role: FieldRole,
    pub cardinality: Cardinality,
    /// Permitted type names of a choice field; empty for non-choice fields.
    pub choice_types: &'static [&'static str],
    /// Allowed target resource types of a reference field.
    pub reference_targets: &'static [&'static str],
    pub binding: Option<&'static BindingDescriptor>,
    pub summary: bool,
}

impl FieldDescriptor {
    const fn with(name: &'static str, role: FieldRole, cardinality: Cardinality) -> Self {
        Self {
            name,
            role,
            cardinality,
            choice_types: &[],
            reference_targets: &[],
            binding: None,
            summary: false,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self::with(name, FieldRole::Child, Cardinality::Optional)
    }

    pub const fn required(name: &'static str) -> Self {
        Self::with(name, FieldRole::Child, Cardinality::Required)
    }

    pub const fn list(name: &'static str) -> Self {
        Self::with(name, FieldRole::Child, Cardinality::List)
    }

    pub const fn required_list(name: &'static str) -> Self {
        Self::with(name, FieldRole::Child, Cardinality::RequiredList)
    }

    pub const fn attribute(name: &'static str) -> Self {
        Self::with(name, FieldRole::Attribute, Cardinality::Optional)
    }

    pub const fn required_attribute(name: &'static str) -> Self {
        Self::with(name, FieldRole::Attribute, Cardinality::Required)
    }

    pub const fn value() -> Self {
        Self::with("value", FieldRole::Value, Cardinality::Optional)
    }

    pub const fn choice(self, types: &'static [&'static str]) -> Self {
        Self {
            choice_types: types,
            ..self
        }
    }

    pub const fn references(self, targets: &'static [&'static str]) -> Self {
        Self {
            reference_targets: targets,
            ..self
        }
    }

    pub const fn bound(self, binding: &'static BindingDescriptor) -> Self {
        Self {
            binding: Some(binding),
            ..self
        }
    }

    pub const fn summary(self) -> Self {
        Self {
            summary: true,
            ..self
        }
    }

    pub const fn is_choice(&self) -> bool {
        !self.choice_types.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub kind: TypeKind,
    pub fields: &'static [FieldDescriptor],
    pub constraints: &'static [ConstraintDescriptor],
}

impl TypeDescriptor {
    pub const fn new(name: &'static str, kind: TypeKind, fields: &'static [FieldDescriptor]) -> Self {
        Self {
            name,
            kind,
            fields,
            constraints: &[],
        }
    }

    pub const fn constraints(self, constraints: &'static [ConstraintDescriptor]) -> Self {
        Self {
            constraints,
            ..self
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    pub fn is_resource(&self) -> bool {
        self.kind == TypeKind::Resource
    }
}

// Fields shared by every element, backbone element and resource.
pub const ID: FieldDescriptor = FieldDescriptor::attribute("id");
pub const EXTENSION: FieldDescriptor = FieldDescriptor::list("extension");
pub const MODIFIER_EXTENSION: FieldDescriptor = FieldDescriptor::list("modifierExtension").summary();

pub static ALL_LANGUAGES: BindingDescriptor = BindingDescriptor::new(
    "Language",
    BindingStrength::Required,
    "http://hl7.org/fhir/ValueSet/all-languages|4.0.1",
)
.system("urn:ietf:bcp:47");

pub const RESOURCE_ID: FieldDescriptor = FieldDescriptor::attribute("id").summary();
pub const META: FieldDescriptor = FieldDescriptor::optional("meta").summary();
pub const IMPLICIT_RULES: FieldDescriptor = FieldDescriptor::optional("implicitRules").summary();
pub const LANGUAGE: FieldDescriptor = FieldDescriptor::optional("language").bound(&ALL_LANGUAGES);
pub const TEXT: FieldDescriptor = FieldDescriptor::optional("text");
pub const CONTAINED: FieldDescriptor = FieldDescriptor::list("contained");
