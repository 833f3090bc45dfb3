use std::any::Any;

use crate::error::BuildResult;
use crate::model::base::{
    BackboneBase, BackboneBaseBuilder, ResourceBase, ResourceBaseBuilder, backbone_node,
    resource_node,
};
use crate::model::resources::patient::DOM_6;
use crate::model::{
    Code, CodeableConcept, DataValue, DateTime, Identifier, Instant, Period, Reference,
};
use crate::types::descriptor::{
    CONTAINED, EXTENSION, ID, IMPLICIT_RULES, LANGUAGE, META, MODIFIER_EXTENSION, RESOURCE_ID,
    TEXT,
};
use crate::types::{
    BindingDescriptor, BindingStrength, ChoiceValue, ConstraintDescriptor, Field, FieldDescriptor,
    FieldValue, TypeDescriptor, TypeKind, Visitable,
};
use crate::validation::{NodeBuilder, StagedList, require};

pub static OBSERVATION_STATUS: BindingDescriptor = BindingDescriptor::new(
    "ObservationStatus",
    BindingStrength::Required,
    "http://hl7.org/fhir/ValueSet/observation-status|4.0.1",
)
.system("http://hl7.org/fhir/observation-status")
.codes(&[
    "registered",
    "preliminary",
    "final",
    "amended",
    "corrected",
    "cancelled",
    "entered-in-error",
    "unknown",
]);

pub static OBSERVATION_CATEGORY: BindingDescriptor = BindingDescriptor::new(
    "ObservationCategory",
    BindingStrength::Preferred,
    "http://hl7.org/fhir/ValueSet/observation-category",
)
.system("http://terminology.hl7.org/CodeSystem/observation-category")
.codes(&[
    "social-history",
    "vital-signs",
    "imaging",
    "laboratory",
    "procedure",
    "survey",
    "exam",
    "therapy",
    "activity",
]);

pub static OBSERVATION_CODE: BindingDescriptor = BindingDescriptor::new(
    "ObservationCode",
    BindingStrength::Example,
    "http://hl7.org/fhir/ValueSet/observation-codes",
);

pub static DATA_ABSENT_REASON: BindingDescriptor = BindingDescriptor::new(
    "ObservationValueAbsentReason",
    BindingStrength::Extensible,
    "http://hl7.org/fhir/ValueSet/data-absent-reason",
)
.system("http://terminology.hl7.org/CodeSystem/data-absent-reason")
.codes(&[
    "unknown",
    "asked-unknown",
    "temp-unknown",
    "not-asked",
    "asked-declined",
    "masked",
    "not-applicable",
    "unsupported",
    "as-text",
    "error",
    "not-a-number",
    "negative-infinity",
    "positive-infinity",
    "not-performed",
    "not-permitted",
]);

/// Too large to embed; resolved through a terminology service when supplied.
pub static OBSERVATION_INTERPRETATION: BindingDescriptor = BindingDescriptor::new(
    "ObservationInterpretation",
    BindingStrength::Extensible,
    "http://hl7.org/fhir/ValueSet/observation-interpretation",
);

const OBSERVATION_VALUE_TYPES: &[&str] = &[
    "Quantity",
    "CodeableConcept",
    "string",
    "boolean",
    "integer",
    "Range",
    "dateTime",
    "Period",
];

pub static OBSERVATION: TypeDescriptor =
    TypeDescriptor::new("Observation", TypeKind::Resource, &OBSERVATION_FIELDS).constraints(&[
        ConstraintDescriptor::error(
            "obs-6",
            "dataAbsentReason SHALL only be present if Observation.value[x] is not present",
            "dataAbsentReason.empty() or value.empty()",
        ),
        ConstraintDescriptor::error(
            "obs-7",
            "If Observation.code is the same as an Observation.component.code then the value element associated with the code SHALL NOT be present",
            "value.empty() or component.code.where(coding.intersect(%resource.code.coding).exists()).empty()",
        ),
        DOM_6,
    ]);

static OBSERVATION_FIELDS: [FieldDescriptor; 23] = [
    RESOURCE_ID,
    META,
    IMPLICIT_RULES,
    LANGUAGE,
    TEXT,
    CONTAINED,
    EXTENSION,
    MODIFIER_EXTENSION,
    FieldDescriptor::list("identifier"),
    FieldDescriptor::required("status")
        .bound(&OBSERVATION_STATUS)
        .summary(),
    FieldDescriptor::list("category").bound(&OBSERVATION_CATEGORY),
    FieldDescriptor::required("code")
        .bound(&OBSERVATION_CODE)
        .summary(),
    FieldDescriptor::optional("subject")
        .references(&["Patient", "Group", "Device", "Location"])
        .summary(),
    FieldDescriptor::optional("encounter")
        .references(&["Encounter"])
        .summary(),
    FieldDescriptor::optional("effective")
        .choice(&["dateTime", "Period", "instant"])
        .summary(),
    FieldDescriptor::optional("issued").summary(),
    FieldDescriptor::list("performer")
        .references(&[
            "Practitioner",
            "PractitionerRole",
            "Organization",
            "CareTeam",
            "Patient",
            "RelatedPerson",
        ])
        .summary(),
    FieldDescriptor::optional("value")
        .choice(OBSERVATION_VALUE_TYPES)
        .summary(),
    FieldDescriptor::optional("dataAbsentReason").bound(&DATA_ABSENT_REASON),
    FieldDescriptor::list("interpretation").bound(&OBSERVATION_INTERPRETATION),
    FieldDescriptor::list("hasMember")
        .references(&["Observation", "QuestionnaireResponse", "MolecularSequence"])
        .summary(),
    FieldDescriptor::list("derivedFrom")
        .references(&[
            "DocumentReference",
            "ImagingStudy",
            "Media",
            "QuestionnaireResponse",
            "Observation",
            "MolecularSequence",
        ])
        .summary(),
    FieldDescriptor::list("component").summary(),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObservationEffective {
    DateTime(DateTime),
    Period(Period),
    Instant(Instant),
}

impl ChoiceValue for ObservationEffective {
    fn as_node(&self) -> &dyn Visitable {
        match self {
            Self::DateTime(value) => value,
            Self::Period(value) => value,
            Self::Instant(value) => value,
        }
    }
}

impl From<DateTime> for ObservationEffective {
    fn from(value: DateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<Period> for ObservationEffective {
    fn from(value: Period) -> Self {
        Self::Period(value)
    }
}

impl From<Instant> for ObservationEffective {
    fn from(value: Instant) -> Self {
        Self::Instant(value)
    }
}

/// Measurements and simple assertions made about a subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Observation {
    resource: ResourceBase,
    identifier: Vec<Identifier>,
    status: Code,
    category: Vec<CodeableConcept>,
    code: CodeableConcept,
    subject: Option<Reference>,
    encounter: Option<Reference>,
    effective: Option<ObservationEffective>,
    issued: Option<Instant>,
    performer: Vec<Reference>,
    value: Option<DataValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<CodeableConcept>,
    has_member: Vec<Reference>,
    derived_from: Vec<Reference>,
    component: Vec<ObservationComponent>,
}

impl Observation {
    pub fn builder() -> ObservationBuilder {
        ObservationBuilder::default()
    }

    pub fn to_builder(&self) -> ObservationBuilder {
        ObservationBuilder::from(self)
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn status(&self) -> &Code {
        &self.status
    }

    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    pub fn code(&self) -> &CodeableConcept {
        &self.code
    }

    pub fn subject(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    pub fn encounter(&self) -> Option<&Reference> {
        self.encounter.as_ref()
    }

    pub fn effective(&self) -> Option<&ObservationEffective> {
        self.effective.as_ref()
    }

    pub fn issued(&self) -> Option<&Instant> {
        self.issued.as_ref()
    }

    pub fn performer(&self) -> &[Reference] {
        &self.performer
    }

    pub fn value(&self) -> Option<&DataValue> {
        self.value.as_ref()
    }

    pub fn data_absent_reason(&self) -> Option<&CodeableConcept> {
        self.data_absent_reason.as_ref()
    }

    pub fn interpretation(&self) -> &[CodeableConcept] {
        &self.interpretation
    }

    pub fn has_member(&self) -> &[Reference] {
        &self.has_member
    }

    pub fn derived_from(&self) -> &[Reference] {
        &self.derived_from
    }

    pub fn component(&self) -> &[ObservationComponent] {
        &self.component
    }
}

impl Visitable for Observation {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &OBSERVATION
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, meta, implicit_rules, language, text, contained, extension, modifier_extension] =
            self.resource.field_values();
        Field::zip(
            &OBSERVATION_FIELDS,
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
                FieldValue::one(&self.status),
                FieldValue::list(&self.category),
                FieldValue::one(&self.code),
                FieldValue::node(self.subject.as_ref()),
                FieldValue::node(self.encounter.as_ref()),
                FieldValue::choice(self.effective.as_ref()),
                FieldValue::node(self.issued.as_ref()),
                FieldValue::list(&self.performer),
                FieldValue::choice(self.value.as_ref()),
                FieldValue::node(self.data_absent_reason.as_ref()),
                FieldValue::list(&self.interpretation),
                FieldValue::list(&self.has_member),
                FieldValue::list(&self.derived_from),
                FieldValue::list(&self.component),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ObservationBuilder {
    resource: ResourceBaseBuilder,
    identifier: StagedList<Identifier>,
    status: Option<Code>,
    category: StagedList<CodeableConcept>,
    code: Option<CodeableConcept>,
    subject: Option<Reference>,
    encounter: Option<Reference>,
    effective: Option<ObservationEffective>,
    issued: Option<Instant>,
    performer: StagedList<Reference>,
    value: Option<DataValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: StagedList<CodeableConcept>,
    has_member: StagedList<Reference>,
    derived_from: StagedList<Reference>,
    component: StagedList<ObservationComponent>,
}

impl ObservationBuilder {
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

    pub fn status(mut self, status: impl Into<Option<Code>>) -> Self {
        self.status = status.into();
        self
    }

    pub fn add_category(mut self, category: impl Into<Option<CodeableConcept>>) -> Self {
        self.category.push(category);
        self
    }

    pub fn category<I>(mut self, category: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<CodeableConcept>>,
    {
        self.category.replace(category);
        self
    }

    pub fn code(mut self, code: impl Into<Option<CodeableConcept>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<Option<Reference>>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn encounter(mut self, encounter: impl Into<Option<Reference>>) -> Self {
        self.encounter = encounter.into();
        self
    }

    pub fn effective(mut self, effective: impl Into<ObservationEffective>) -> Self {
        self.effective = Some(effective.into());
        self
    }

    pub fn clear_effective(mut self) -> Self {
        self.effective = None;
        self
    }

    pub fn issued(mut self, issued: impl Into<Option<Instant>>) -> Self {
        self.issued = issued.into();
        self
    }

    pub fn add_performer(mut self, performer: impl Into<Option<Reference>>) -> Self {
        self.performer.push(performer);
        self
    }

    pub fn performer<I>(mut self, performer: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Reference>>,
    {
        self.performer.replace(performer);
        self
    }

    pub fn value(mut self, value: impl Into<DataValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }

    pub fn data_absent_reason(mut self, reason: impl Into<Option<CodeableConcept>>) -> Self {
        self.data_absent_reason = reason.into();
        self
    }

    pub fn add_interpretation(
        mut self,
        interpretation: impl Into<Option<CodeableConcept>>,
    ) -> Self {
        self.interpretation.push(interpretation);
        self
    }

    pub fn interpretation<I>(mut self, interpretation: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<CodeableConcept>>,
    {
        self.interpretation.replace(interpretation);
        self
    }

    pub fn add_has_member(mut self, member: impl Into<Option<Reference>>) -> Self {
        self.has_member.push(member);
        self
    }

    pub fn has_member<I>(mut self, members: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Reference>>,
    {
        self.has_member.replace(members);
        self
    }

    pub fn add_derived_from(mut self, source: impl Into<Option<Reference>>) -> Self {
        self.derived_from.push(source);
        self
    }

    pub fn derived_from<I>(mut self, sources: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Reference>>,
    {
        self.derived_from.replace(sources);
        self
    }

    pub fn add_component(mut self, component: impl Into<Option<ObservationComponent>>) -> Self {
        self.component.push(component);
        self
    }

    pub fn component<I>(mut self, components: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<ObservationComponent>>,
    {
        self.component.replace(components);
        self
    }
}

impl NodeBuilder for ObservationBuilder {
    type Node = Observation;

    fn assemble(&self) -> BuildResult<Observation> {
        let owner = OBSERVATION.name;
        Ok(Observation {
            resource: self.resource.finish(owner)?,
            identifier: self.identifier.finish(owner, "identifier")?,
            status: require(&self.status, owner, "status")?,
            category: self.category.finish(owner, "category")?,
            code: require(&self.code, owner, "code")?,
            subject: self.subject.clone(),
            encounter: self.encounter.clone(),
            effective: self.effective.clone(),
            issued: self.issued.clone(),
            performer: self.performer.finish(owner, "performer")?,
            value: self.value.clone(),
            data_absent_reason: self.data_absent_reason.clone(),
            interpretation: self.interpretation.finish(owner, "interpretation")?,
            has_member: self.has_member.finish(owner, "hasMember")?,
            derived_from: self.derived_from.finish(owner, "derivedFrom")?,
            component: self.component.finish(owner, "component")?,
        })
    }
}

impl From<&Observation> for ObservationBuilder {
    fn from(node: &Observation) -> Self {
        Self {
            resource: ResourceBaseBuilder::from(&node.resource),
            identifier: StagedList::from(&node.identifier),
            status: Some(node.status.clone()),
            category: StagedList::from(&node.category),
            code: Some(node.code.clone()),
            subject: node.subject.clone(),
            encounter: node.encounter.clone(),
            effective: node.effective.clone(),
            issued: node.issued.clone(),
            performer: StagedList::from(&node.performer),
            value: node.value.clone(),
            data_absent_reason: node.data_absent_reason.clone(),
            interpretation: StagedList::from(&node.interpretation),
            has_member: StagedList::from(&node.has_member),
            derived_from: StagedList::from(&node.derived_from),
            component: StagedList::from(&node.component),
        }
    }
}

resource_node!(Observation, ObservationBuilder);

pub static OBSERVATION_COMPONENT: TypeDescriptor = TypeDescriptor::new(
    "Observation.Component",
    TypeKind::Backbone,
    &OBSERVATION_COMPONENT_FIELDS,
);

static OBSERVATION_COMPONENT_FIELDS: [FieldDescriptor; 7] = [
    ID,
    EXTENSION,
    MODIFIER_EXTENSION,
    FieldDescriptor::required("code")
        .bound(&OBSERVATION_CODE)
        .summary(),
    FieldDescriptor::optional("value")
        .choice(OBSERVATION_VALUE_TYPES)
        .summary(),
    FieldDescriptor::optional("dataAbsentReason").bound(&DATA_ABSENT_REASON),
    FieldDescriptor::list("interpretation").bound(&OBSERVATION_INTERPRETATION),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationComponent {
    backbone: BackboneBase,
    code: CodeableConcept,
    value: Option<DataValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<CodeableConcept>,
}

impl ObservationComponent {
    pub fn builder() -> ObservationComponentBuilder {
        ObservationComponentBuilder::default()
    }

    pub fn to_builder(&self) -> ObservationComponentBuilder {
        ObservationComponentBuilder::from(self)
    }

    pub fn code(&self) -> &CodeableConcept {
        &self.code
    }

    pub fn value(&self) -> Option<&DataValue> {
        self.value.as_ref()
    }

    pub fn data_absent_reason(&self) -> Option<&CodeableConcept> {
        self.data_absent_reason.as_ref()
    }

    pub fn interpretation(&self) -> &[CodeableConcept] {
        &self.interpretation
    }
}

impl Visitable for ObservationComponent {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &OBSERVATION_COMPONENT
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension, modifier_extension] = self.backbone.field_values();
        Field::zip(
            &OBSERVATION_COMPONENT_FIELDS,
            [
                id,
                extension,
                modifier_extension,
                FieldValue::one(&self.code),
                FieldValue::choice(self.value.as_ref()),
                FieldValue::node(self.data_absent_reason.as_ref()),
                FieldValue::list(&self.interpretation),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ObservationComponentBuilder {
    backbone: BackboneBaseBuilder,
    code: Option<CodeableConcept>,
    value: Option<DataValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: StagedList<CodeableConcept>,
}

impl ObservationComponentBuilder {
    pub fn code(mut self, code: impl Into<Option<CodeableConcept>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn value(mut self, value: impl Into<DataValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }

    pub fn data_absent_reason(mut self, reason: impl Into<Option<CodeableConcept>>) -> Self {
        self.data_absent_reason = reason.into();
        self
    }

    pub fn add_interpretation(
        mut self,
        interpretation: impl Into<Option<CodeableConcept>>,
    ) -> Self {
        self.interpretation.push(interpretation);
        self
    }

    pub fn interpretation<I>(mut self, interpretation: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<CodeableConcept>>,
    {
        self.interpretation.replace(interpretation);
        self
    }
}

impl NodeBuilder for ObservationComponentBuilder {
    type Node = ObservationComponent;

    fn assemble(&self) -> BuildResult<ObservationComponent> {
        let owner = OBSERVATION_COMPONENT.name;
        Ok(ObservationComponent {
            backbone: self.backbone.finish(owner)?,
            code: require(&self.code, owner, "code")?,
            value: self.value.clone(),
            data_absent_reason: self.data_absent_reason.clone(),
            interpretation: self.interpretation.finish(owner, "interpretation")?,
        })
    }
}

impl From<&ObservationComponent> for ObservationComponentBuilder {
    fn from(node: &ObservationComponent) -> Self {
        Self {
            backbone: BackboneBaseBuilder::from(&node.backbone),
            code: Some(node.code.clone()),
            value: node.value.clone(),
            data_absent_reason: node.data_absent_reason.clone(),
            interpretation: StagedList::from(&node.interpretation),
        }
    }
}

backbone_node!(ObservationComponent, ObservationComponentBuilder);
