use std::any::Any;

use crate::error::BuildResult;
use crate::model::base::{ElementBase, ElementBaseBuilder, element_node};
use crate::model::{FhirString, Identifier, Uri};
use crate::types::descriptor::{EXTENSION, ID};
use crate::types::{
    ConstraintDescriptor, Field, FieldDescriptor, FieldValue, TypeDescriptor, TypeKind, Visitable,
};
use crate::validation::NodeBuilder;

pub static REFERENCE: TypeDescriptor =
    TypeDescriptor::new("Reference", TypeKind::Complex, &REFERENCE_FIELDS).constraints(&[
        ConstraintDescriptor::error(
            "ref-1",
            "SHALL have a contained resource if a local reference is provided",
            "reference.startsWith('#').not() or (reference.substring(1).trace('url') in %rootResource.contained.id.trace('ids'))",
        ),
    ]);

static REFERENCE_FIELDS: [FieldDescriptor; 6] = [
    ID,
    EXTENSION,
    FieldDescriptor::optional("reference").summary(),
    FieldDescriptor::optional("type").summary(),
    FieldDescriptor::optional("identifier").summary(),
    FieldDescriptor::optional("display").summary(),
];

/// A pointer to another resource. Never dereferenced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    element: ElementBase,
    reference: Option<FhirString>,
    r#type: Option<Uri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
}

impl Reference {
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    pub fn to_builder(&self) -> ReferenceBuilder {
        ReferenceBuilder::from(self)
    }

    pub fn reference(&self) -> Option<&FhirString> {
        self.reference.as_ref()
    }

    pub fn r#type(&self) -> Option<&Uri> {
        self.r#type.as_ref()
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    /// The literal reference text, e.g. `Patient/123` or `#med1`.
    pub fn literal(&self) -> Option<&str> {
        self.reference.as_ref().and_then(|reference| reference.as_str())
    }

    /// The explicit `Reference.type` value.
    pub fn declared_type(&self) -> Option<&str> {
        self.r#type.as_ref().and_then(|uri| uri.as_str())
    }

    /// True for `#id` and bare `#` references into the containing resource.
    pub fn is_local(&self) -> bool {
        self.literal().is_some_and(|literal| literal.starts_with('#'))
    }
}

impl Visitable for Reference {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &REFERENCE
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension] = self.element.field_values();
        Field::zip(
            &REFERENCE_FIELDS,
            [
                id,
                extension,
                FieldValue::node(self.reference.as_ref()),
                FieldValue::node(self.r#type.as_ref()),
                FieldValue::node(self.identifier.as_ref()),
                FieldValue::node(self.display.as_ref()),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ReferenceBuilder {
    element: ElementBaseBuilder,
    reference: Option<FhirString>,
    r#type: Option<Uri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
}

impl ReferenceBuilder {
    pub fn reference(mut self, reference: impl Into<Option<FhirString>>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Option<Uri>>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn identifier(mut self, identifier: impl Into<Option<Identifier>>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn display(mut self, display: impl Into<Option<FhirString>>) -> Self {
        self.display = display.into();
        self
    }
}

impl NodeBuilder for ReferenceBuilder {
    type Node = Reference;

    fn assemble(&self) -> BuildResult<Reference> {
        Ok(Reference {
            element: self.element.finish(REFERENCE.name)?,
            reference: self.reference.clone(),
            r#type: self.r#type.clone(),
            identifier: self.identifier.clone(),
            display: self.display.clone(),
        })
    }
}

impl From<&Reference> for ReferenceBuilder {
    fn from(node: &Reference) -> Self {
        Self {
            element: ElementBaseBuilder::from(&node.element),
            reference: node.reference.clone(),
            r#type: node.r#type.clone(),
            identifier: node.identifier.clone(),
            display: node.display.clone(),
        }
    }
}

element_node!(Reference, ReferenceBuilder);
