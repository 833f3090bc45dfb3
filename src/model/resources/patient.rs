use std::any::Any;

use crate::error::BuildResult;
use crate::model::base::{
    BackboneBase, BackboneBaseBuilder, ResourceBase, ResourceBaseBuilder, backbone_node,
    resource_node,
};
use crate::model::{Boolean, Code, Date, DateTime, Identifier, Reference};
use crate::types::descriptor::{
    CONTAINED, EXTENSION, ID, IMPLICIT_RULES, LANGUAGE, META, MODIFIER_EXTENSION, RESOURCE_ID,
    TEXT,
};
use crate::types::{
    BindingDescriptor, BindingStrength, ChoiceValue, ConstraintDescriptor, Field, FieldDescriptor,
    FieldValue, TypeDescriptor, TypeKind, Visitable,
};
use crate::validation::{NodeBuilder, StagedList, require};

pub static ADMINISTRATIVE_GENDER: BindingDescriptor = BindingDescriptor::new(
    "AdministrativeGender",
    BindingStrength::Required,
    "http://hl7.org/fhir/ValueSet/administrative-gender|4.0.1",
)
.system("http://hl7.org/fhir/administrative-gender")
.codes(&["male", "female", "other", "unknown"]);

pub static LINK_TYPE: BindingDescriptor = BindingDescriptor::new(
    "LinkType",
    BindingStrength::Required,
    "http://hl7.org/fhir/ValueSet/link-type|4.0.1",
)
.system("http://hl7.org/fhir/link-type")
.codes(&["replaced-by", "replaces", "refer", "seealso"]);

pub(crate) const DOM_6: ConstraintDescriptor = ConstraintDescriptor::warning(
    "dom-6",
    "A resource should have narrative for robust management",
    "text.`div`.exists()",
);

pub static PATIENT: TypeDescriptor =
    TypeDescriptor::new("Patient", TypeKind::Resource, &PATIENT_FIELDS).constraints(&[DOM_6]);

static PATIENT_FIELDS: [FieldDescriptor; 16] = [
    RESOURCE_ID,
    META,
    IMPLICIT_RULES,
    LANGUAGE,
    TEXT,
    CONTAINED,
    EXTENSION,
    MODIFIER_EXTENSION,
    FieldDescriptor::list("identifier").summary(),
    FieldDescriptor::optional("active").summary(),
    FieldDescriptor::optional("gender")
        .bound(&ADMINISTRATIVE_GENDER)
        .summary(),
    FieldDescriptor::optional("birthDate").summary(),
    FieldDescriptor::optional("deceased")
        .choice(&["boolean", "dateTime"])
        .summary(),
    FieldDescriptor::optional("managingOrganization")
        .references(&["Organization"])
        .summary(),
    FieldDescriptor::list("generalPractitioner").references(&[
        "Organization",
        "Practitioner",
        "PractitionerRole",
    ]),
    FieldDescriptor::list("link").summary(),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatientDeceased {
    Boolean(Boolean),
    DateTime(DateTime),
}

impl ChoiceValue for PatientDeceased {
    fn as_node(&self) -> &dyn Visitable {
        match self {
            Self::Boolean(value) => value,
            Self::DateTime(value) => value,
        }
    }
}

impl From<Boolean> for PatientDeceased {
    fn from(value: Boolean) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime> for PatientDeceased {
    fn from(value: DateTime) -> Self {
        Self::DateTime(value)
    }
}

/// Demographics of a person receiving care.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Patient {
    resource: ResourceBase,
    identifier: Vec<Identifier>,
    active: Option<Boolean>,
    gender: Option<Code>,
    birth_date: Option<Date>,
    deceased: Option<PatientDeceased>,
    managing_organization: Option<Reference>,
    general_practitioner: Vec<Reference>,
    link: Vec<PatientLink>,
}

impl Patient {
    pub fn builder() -> PatientBuilder {
        PatientBuilder::default()
    }

    pub fn to_builder(&self) -> PatientBuilder {
        PatientBuilder::from(self)
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn active(&self) -> Option<&Boolean> {
        self.active.as_ref()
    }

    pub fn gender(&self) -> Option<&Code> {
        self.gender.as_ref()
    }

    pub fn birth_date(&self) -> Option<&Date> {
        self.birth_date.as_ref()
    }

    pub fn deceased(&self) -> Option<&PatientDeceased> {
        self.deceased.as_ref()
    }

    pub fn managing_organization(&self) -> Option<&Reference> {
        self.managing_organization.as_ref()
    }

    pub fn general_practitioner(&self) -> &[Reference] {
        &self.general_practitioner
    }

    pub fn link(&self) -> &[PatientLink] {
        &self.link
    }
}

impl Visitable for Patient {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &PATIENT
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, meta, implicit_rules, language, text, contained, extension, modifier_extension] =
            self.resource.field_values();
        Field::zip(
            &PATIENT_FIELDS,
            [
                id,
                meta,
                implicit_rules,
                language,
                text,
                contained,
                extension,
                modifier_extension,
                FieldValue::list(&self.identifier),
                FieldValue::node(self.active.as_ref()),
                FieldValue::node(self.gender.as_ref()),
                FieldValue::node(self.birth_date.as_ref()),
                FieldValue::choice(self.deceased.as_ref()),
                FieldValue::node(self.managing_organization.as_ref()),
                FieldValue::list(&self.general_practitioner),
                FieldValue::list(&self.link),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PatientBuilder {
    resource: ResourceBaseBuilder,
    identifier: StagedList<Identifier>,
    active: Option<Boolean>,
    gender: Option<Code>,
    birth_date: Option<Date>,
    deceased: Option<PatientDeceased>,
    managing_organization: Option<Reference>,
    general_practitioner: StagedList<Reference>,
    link: StagedList<PatientLink>,
}

impl PatientBuilder {
    pub fn add_identifier(mut self, identifier: impl Into<Option<Identifier>>) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn identifier<I>(mut self, identifier: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Identifier>>,
    {
        self.identifier.replace(identifier);
        self
    }

    pub fn active(mut self, active: impl Into<Option<Boolean>>) -> Self {
        self.active = active.into();
        self
    }

    pub fn gender(mut self, gender: impl Into<Option<Code>>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn birth_date(mut self, birth_date: impl Into<Option<Date>>) -> Self {
        self.birth_date = birth_date.into();
        self
    }

    pub fn deceased(mut self, deceased: impl Into<PatientDeceased>) -> Self {
        self.deceased = Some(deceased.into());
        self
    }

    pub fn clear_deceased(mut self) -> Self {
        self.deceased = None;
        self
    }

    pub fn managing_organization(mut self, organization: impl Into<Option<Reference>>) -> Self {
        self.managing_organization = organization.into();
        self
    }

    pub fn add_general_practitioner(mut self, practitioner: impl Into<Option<Reference>>) -> Self {
        self.general_practitioner.push(practitioner);
        self
    }

    pub fn general_practitioner<I>(mut self, practitioners: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Reference>>,
    {
        self.general_practitioner.replace(practitioners);
        self
    }

    pub fn add_link(mut self, link: impl Into<Option<PatientLink>>) -> Self {
        self.link.push(link);
        self
    }

    pub fn link<I>(mut self, links: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<PatientLink>>,
    {
        self.link.replace(links);
        self
    }
}

impl NodeBuilder for PatientBuilder {
    type Node = Patient;

    fn assemble(&self) -> BuildResult<Patient> {
        let owner = PATIENT.name;
        Ok(Patient {
            resource: self.resource.finish(owner)?,
            identifier: self.identifier.finish(owner, "identifier")?,
            active: self.active.clone(),
            gender: self.gender.clone(),
            birth_date: self.birth_date.clone(),
            deceased: self.deceased.clone(),
            managing_organization: self.managing_organization.clone(),
            general_practitioner: self
                .general_practitioner
                .finish(owner, "generalPractitioner")?,
            link: self.link.finish(owner, "link")?,
        })
    }
}

impl From<&Patient> for PatientBuilder {
    fn from(node: &Patient) -> Self {
        Self {
            resource: ResourceBaseBuilder::from(&node.resource),
            identifier: StagedList::from(&node.identifier),
            active: node.active.clone(),
            gender: node.gender.clone(),
            birth_date: node.birth_date.clone(),
            deceased: node.deceased.clone(),
            managing_organization: node.managing_organization.clone(),
            general_practitioner: StagedList::from(&node.general_practitioner),
            link: StagedList::from(&node.link),
        }
    }
}

resource_node!(Patient, PatientBuilder);

pub static PATIENT_LINK: TypeDescriptor =
    TypeDescriptor::new("Patient.Link", TypeKind::Backbone, &PATIENT_LINK_FIELDS);

static PATIENT_LINK_FIELDS: [FieldDescriptor; 5] = [
    ID,
    EXTENSION,
    MODIFIER_EXTENSION,
    FieldDescriptor::required("other")
        .references(&["Patient", "RelatedPerson"])
        .summary(),
    FieldDescriptor::required("type").bound(&LINK_TYPE).summary(),
];

/// Link to another patient resource that concerns the same actual person.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatientLink {
    backbone: BackboneBase,
    other: Reference,
    r#type: Code,
}

impl PatientLink {
    pub fn builder() -> PatientLinkBuilder {
        PatientLinkBuilder::default()
    }

    pub fn to_builder(&self) -> PatientLinkBuilder {
        PatientLinkBuilder::from(self)
    }

    pub fn other(&self) -> &Reference {
        &self.other
    }

    pub fn r#type(&self) -> &Code {
        &self.r#type
    }
}

impl Visitable for PatientLink {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &PATIENT_LINK
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension, modifier_extension] = self.backbone.field_values();
        Field::zip(
            &PATIENT_LINK_FIELDS,
            [
                id,
                extension,
                modifier_extension,
                FieldValue::one(&self.other),
                FieldValue::one(&self.r#type),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PatientLinkBuilder {
    backbone: BackboneBaseBuilder,
    other: Option<Reference>,
    r#type: Option<Code>,
}

impl PatientLinkBuilder {
    pub fn other(mut self, other: impl Into<Option<Reference>>) -> Self {
        self.other = other.into();
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Option<Code>>) -> Self {
        self.r#type = r#type.into();
        self
    }
}

impl NodeBuilder for PatientLinkBuilder {
    type Node = PatientLink;

    fn assemble(&self) -> BuildResult<PatientLink> {
        let owner = PATIENT_LINK.name;
        Ok(PatientLink {
            backbone: self.backbone.finish(owner)?,
            other: require(&self.other, owner, "other")?,
            r#type: require(&self.r#type, owner, "type")?,
        })
    }
}

impl From<&PatientLink> for PatientLinkBuilder {
    fn from(node: &PatientLink) -> Self {
        Self {
            backbone: BackboneBaseBuilder::from(&node.backbone),
            other: Some(node.other.clone()),
            r#type: Some(node.r#type.clone()),
        }
    }
}

backbone_node!(PatientLink, PatientLinkBuilder);
