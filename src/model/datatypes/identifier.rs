use std::any::Any;

use crate::error::BuildResult;
use crate::model::base::{ElementBase, ElementBaseBuilder, element_node};
use crate::model::{Code, CodeableConcept, FhirString, Period, Reference, Uri};
use crate::types::descriptor::{EXTENSION, ID};
use crate::types::{
    BindingDescriptor, BindingStrength, Field, FieldDescriptor, FieldValue, TypeDescriptor,
    TypeKind, Visitable,
};
use crate::validation::NodeBuilder;

pub static IDENTIFIER_USE: BindingDescriptor = BindingDescriptor::new(
    "IdentifierUse",
    BindingStrength::Required,
    "http://hl7.org/fhir/ValueSet/identifier-use|4.0.1",
)
.system("http://hl7.org/fhir/identifier-use")
.codes(&["usual", "official", "temp", "secondary", "old"]);

pub static IDENTIFIER_TYPE: BindingDescriptor = BindingDescriptor::new(
    "IdentifierType",
    BindingStrength::Extensible,
    "http://hl7.org/fhir/ValueSet/identifier-type",
)
.system("http://terminology.hl7.org/CodeSystem/v2-0203")
.codes(&[
    "DL", "PPN", "BRN", "MR", "MCN", "EN", "TAX", "NIIP", "PRN", "MD", "DR", "ACSN", "UDI",
    "SNO", "SB", "PLAC", "FILL", "JHN",
]);

pub static IDENTIFIER: TypeDescriptor =
    TypeDescriptor::new("Identifier", TypeKind::Complex, &IDENTIFIER_FIELDS);

static IDENTIFIER_FIELDS: [FieldDescriptor; 8] = [
    ID,
    EXTENSION,
    FieldDescriptor::optional("use").bound(&IDENTIFIER_USE).summary(),
    FieldDescriptor::optional("type").bound(&IDENTIFIER_TYPE).summary(),
    FieldDescriptor::optional("system").summary(),
    FieldDescriptor::optional("value").summary(),
    FieldDescriptor::optional("period").summary(),
    FieldDescriptor::optional("assigner")
        .references(&["Organization"])
        .summary(),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    element: ElementBase,
    r#use: Option<Code>,
    r#type: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Box<Reference>>,
}

impl Identifier {
    pub fn builder() -> IdentifierBuilder {
        IdentifierBuilder::default()
    }

    pub fn to_builder(&self) -> IdentifierBuilder {
        IdentifierBuilder::from(self)
    }

    pub fn r#use(&self) -> Option<&Code> {
        self.r#use.as_ref()
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn value(&self) -> Option<&FhirString> {
        self.value.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn assigner(&self) -> Option<&Reference> {
        self.assigner.as_deref()
    }
}

impl Visitable for Identifier {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &IDENTIFIER
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension] = self.element.field_values();
        Field::zip(
            &IDENTIFIER_FIELDS,
            [
                id,
                extension,
                FieldValue::node(self.r#use.as_ref()),
                FieldValue::node(self.r#type.as_ref()),
                FieldValue::node(self.system.as_ref()),
                FieldValue::node(self.value.as_ref()),
                FieldValue::node(self.period.as_ref()),
                FieldValue::node(self.assigner.as_deref()),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IdentifierBuilder {
    element: ElementBaseBuilder,
    r#use: Option<Code>,
    r#type: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Box<Reference>>,
}

impl IdentifierBuilder {
    pub fn r#use(mut self, r#use: impl Into<Option<Code>>) -> Self {
        self.r#use = r#use.into();
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Option<CodeableConcept>>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn value(mut self, value: impl Into<Option<FhirString>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn period(mut self, period: impl Into<Option<Period>>) -> Self {
        self.period = period.into();
        self
    }

    pub fn assigner(mut self, assigner: impl Into<Option<Reference>>) -> Self {
        self.assigner = assigner.into().map(Box::new);
        self
    }
}

impl NodeBuilder for IdentifierBuilder {
    type Node = Identifier;

    fn assemble(&self) -> BuildResult<Identifier> {
        Ok(Identifier {
            element: self.element.finish(IDENTIFIER.name)?,
            r#use: self.r#use.clone(),
            r#type: self.r#type.clone(),
            system: self.system.clone(),
            value: self.value.clone(),
            period: self.period.clone(),
            assigner: self.assigner.clone(),
        })
    }
}

impl From<&Identifier> for IdentifierBuilder {
    fn from(node: &Identifier) -> Self {
        Self {
            element: ElementBaseBuilder::from(&node.element),
            r#use: node.r#use.clone(),
            r#type: node.r#type.clone(),
            system: node.system.clone(),
            value: node.value.clone(),
            period: node.period.clone(),
            assigner: node.assigner.clone(),
        }
    }
}

element_node!(Identifier, IdentifierBuilder);
