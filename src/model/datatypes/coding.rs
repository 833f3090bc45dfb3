use std::any::Any;

use crate::error::BuildResult;
use crate::model::base::{ElementBase, ElementBaseBuilder, element_node};
use crate::model::{Boolean, Code, FhirString, Uri};
use crate::types::descriptor::{EXTENSION, ID};
use crate::types::{Field, FieldDescriptor, FieldValue, TypeDescriptor, TypeKind, Visitable};
use crate::validation::{NodeBuilder, StagedList};

pub static CODING: TypeDescriptor = TypeDescriptor::new("Coding", TypeKind::Complex, &CODING_FIELDS);

static CODING_FIELDS: [FieldDescriptor; 7] = [
    ID,
    EXTENSION,
    FieldDescriptor::optional("system").summary(),
    FieldDescriptor::optional("version").summary(),
    FieldDescriptor::optional("code").summary(),
    FieldDescriptor::optional("display").summary(),
    FieldDescriptor::optional("userSelected").summary(),
];

/// A reference to a code defined by a terminology system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coding {
    element: ElementBase,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
}

impl Coding {
    pub fn builder() -> CodingBuilder {
        CodingBuilder::default()
    }

    pub fn to_builder(&self) -> CodingBuilder {
        CodingBuilder::from(self)
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn version(&self) -> Option<&FhirString> {
        self.version.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    pub fn user_selected(&self) -> Option<&Boolean> {
        self.user_selected.as_ref()
    }

    pub(crate) fn system_value(&self) -> Option<&str> {
        self.system.as_ref().and_then(|system| system.as_str())
    }

    pub(crate) fn code_value(&self) -> Option<&str> {
        self.code.as_ref().and_then(|code| code.as_str())
    }
}

impl Visitable for Coding {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &CODING
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension] = self.element.field_values();
        Field::zip(
            &CODING_FIELDS,
            [
                id,
                extension,
                FieldValue::node(self.system.as_ref()),
                FieldValue::node(self.version.as_ref()),
                FieldValue::node(self.code.as_ref()),
                FieldValue::node(self.display.as_ref()),
                FieldValue::node(self.user_selected.as_ref()),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodingBuilder {
    element: ElementBaseBuilder,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
}

impl CodingBuilder {
    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn version(mut self, version: impl Into<Option<FhirString>>) -> Self {
        self.version = version.into();
        self
    }

    pub fn code(mut self, code: impl Into<Option<Code>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn display(mut self, display: impl Into<Option<FhirString>>) -> Self {
        self.display = display.into();
        self
    }

    pub fn user_selected(mut self, user_selected: impl Into<Option<Boolean>>) -> Self {
        self.user_selected = user_selected.into();
        self
    }
}

impl NodeBuilder for CodingBuilder {
    type Node = Coding;

    fn assemble(&self) -> BuildResult<Coding> {
        Ok(Coding {
            element: self.element.finish(CODING.name)?,
            system: self.system.clone(),
            version: self.version.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            user_selected: self.user_selected.clone(),
        })
    }
}

impl From<&Coding> for CodingBuilder {
    fn from(node: &Coding) -> Self {
        Self {
            element: ElementBaseBuilder::from(&node.element),
            system: node.system.clone(),
            version: node.version.clone(),
            code: node.code.clone(),
            display: node.display.clone(),
            user_selected: node.user_selected.clone(),
        }
    }
}

element_node!(Coding, CodingBuilder);

pub static CODEABLE_CONCEPT: TypeDescriptor =
    TypeDescriptor::new("CodeableConcept", TypeKind::Complex, &CODEABLE_CONCEPT_FIELDS);

static CODEABLE_CONCEPT_FIELDS: [FieldDescriptor; 4] = [
    ID,
    EXTENSION,
    FieldDescriptor::list("coding").summary(),
    FieldDescriptor::optional("text").summary(),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeableConcept {
    element: ElementBase,
    coding: Vec<Coding>,
    text: Option<FhirString>,
}

impl CodeableConcept {
    pub fn builder() -> CodeableConceptBuilder {
        CodeableConceptBuilder::default()
    }

    pub fn to_builder(&self) -> CodeableConceptBuilder {
        CodeableConceptBuilder::from(self)
    }

    pub fn coding(&self) -> &[Coding] {
        &self.coding
    }

    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }
}

impl Visitable for CodeableConcept {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &CODEABLE_CONCEPT
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension] = self.element.field_values();
        Field::zip(
            &CODEABLE_CONCEPT_FIELDS,
            [
                id,
                extension,
                FieldValue::list(&self.coding),
                FieldValue::node(self.text.as_ref()),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodeableConceptBuilder {
    element: ElementBaseBuilder,
    coding: StagedList<Coding>,
    text: Option<FhirString>,
}

impl CodeableConceptBuilder {
    pub fn add_coding(mut self, coding: impl Into<Option<Coding>>) -> Self {
        self.coding.push(coding);
        self
    }

    pub fn coding<I>(mut self, coding: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Coding>>,
    {
        self.coding.replace(coding);
        self
    }

    pub fn text(mut self, text: impl Into<Option<FhirString>>) -> Self {
        self.text = text.into();
        self
    }
}

impl NodeBuilder for CodeableConceptBuilder {
    type Node = CodeableConcept;

    fn assemble(&self) -> BuildResult<CodeableConcept> {
        Ok(CodeableConcept {
            element: self.element.finish(CODEABLE_CONCEPT.name)?,
            coding: self.coding.finish(CODEABLE_CONCEPT.name, "coding")?,
            text: self.text.clone(),
        })
    }
}

impl From<&CodeableConcept> for CodeableConceptBuilder {
    fn from(node: &CodeableConcept) -> Self {
        Self {
            element: ElementBaseBuilder::from(&node.element),
            coding: StagedList::from(&node.coding),
            text: node.text.clone(),
        }
    }
}

element_node!(CodeableConcept, CodeableConceptBuilder);
