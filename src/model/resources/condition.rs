use std::any::Any;

use crate::error::BuildResult;
use crate::model::base::{
    BackboneBase, BackboneBaseBuilder, ResourceBase, ResourceBaseBuilder, backbone_node,
    resource_node,
};
use crate::model::resources::patient::DOM_6;
use crate::model::{CodeableConcept, DateTime, FhirString, Identifier, Period, Range, Reference};
use crate::types::descriptor::{
    CONTAINED, EXTENSION, ID, IMPLICIT_RULES, LANGUAGE, META, MODIFIER_EXTENSION, RESOURCE_ID,
    TEXT,
};
use crate::types::{
    BindingDescriptor, BindingStrength, ChoiceValue, ConstraintDescriptor, Field, FieldDescriptor,
    FieldValue, TypeDescriptor, TypeKind, Visitable,
};
use crate::validation::{NodeBuilder, StagedList, require};

pub static CONDITION_CLINICAL: BindingDescriptor = BindingDescriptor::new(
    "ConditionClinicalStatus",
    BindingStrength::Required,
    "http://hl7.org/fhir/ValueSet/condition-clinical|4.0.1",
)
.system("http://terminology.hl7.org/CodeSystem/condition-clinical")
.codes(&[
    "active",
    "recurrence",
    "relapse",
    "inactive",
    "remission",
    "resolved",
]);

pub static CONDITION_VER_STATUS: BindingDescriptor = BindingDescriptor::new(
    "ConditionVerificationStatus",
    BindingStrength::Required,
    "http://hl7.org/fhir/ValueSet/condition-ver-status|4.0.1",
)
.system("http://terminology.hl7.org/CodeSystem/condition-ver-status")
.codes(&[
    "unconfirmed",
    "provisional",
    "differential",
    "confirmed",
    "refuted",
    "entered-in-error",
]);

pub static CONDITION_CATEGORY: BindingDescriptor = BindingDescriptor::new(
    "ConditionCategory",
    BindingStrength::Extensible,
    "http://hl7.org/fhir/ValueSet/condition-category",
)
.system("http://terminology.hl7.org/CodeSystem/condition-category")
.codes(&["problem-list-item", "encounter-diagnosis"]);

pub static CONDITION_SEVERITY: BindingDescriptor = BindingDescriptor::new(
    "ConditionSeverity",
    BindingStrength::Preferred,
    "http://hl7.org/fhir/ValueSet/condition-severity",
)
.system("http://snomed.info/sct")
.codes(&["24484000", "6736007", "255604002"]);

pub static CONDITION_CODE: BindingDescriptor = BindingDescriptor::new(
    "ConditionKind",
    BindingStrength::Example,
    "http://hl7.org/fhir/ValueSet/condition-code",
);

pub static BODY_SITE: BindingDescriptor = BindingDescriptor::new(
    "BodySite",
    BindingStrength::Example,
    "http://hl7.org/fhir/ValueSet/body-site",
);

pub static STAGE_SUMMARY: BindingDescriptor = BindingDescriptor::new(
    "ConditionStage",
    BindingStrength::Example,
    "http://hl7.org/fhir/ValueSet/condition-stage",
);

pub static STAGE_TYPE: BindingDescriptor = BindingDescriptor::new(
    "ConditionStageType",
    BindingStrength::Example,
    "http://hl7.org/fhir/ValueSet/condition-stage-type",
);

pub static CONDITION: TypeDescriptor =
    TypeDescriptor::new("Condition", TypeKind::Resource, &CONDITION_FIELDS).constraints(&[
        ConstraintDescriptor::error(
            "con-3",
            "Condition.clinicalStatus SHALL be present if verificationStatus is not entered-in-error and category is problem-list-item",
            "clinicalStatus.exists() or verificationStatus.coding.where(system='http://terminology.hl7.org/CodeSystem/condition-ver-status' and code = 'entered-in-error').exists() or category.select($this='problem-list-item').empty()",
        ),
        ConstraintDescriptor::error(
            "con-5",
            "Condition.clinicalStatus SHALL NOT be present if verification Status is entered-in-error",
            "verificationStatus.coding.where(system='http://terminology.hl7.org/CodeSystem/condition-ver-status' and code='entered-in-error').empty() or clinicalStatus.empty()",
        ),
        DOM_6,
    ]);

static CONDITION_FIELDS: [FieldDescriptor; 22] = [
    RESOURCE_ID,
    META,
    IMPLICIT_RULES,
    LANGUAGE,
    TEXT,
    CONTAINED,
    EXTENSION,
    MODIFIER_EXTENSION,
    FieldDescriptor::list("identifier").summary(),
    FieldDescriptor::optional("clinicalStatus")
        .bound(&CONDITION_CLINICAL)
        .summary(),
    FieldDescriptor::optional("verificationStatus")
        .bound(&CONDITION_VER_STATUS)
        .summary(),
    FieldDescriptor::list("category").bound(&CONDITION_CATEGORY),
    FieldDescriptor::optional("severity").bound(&CONDITION_SEVERITY),
    FieldDescriptor::optional("code")
        .bound(&CONDITION_CODE)
        .summary(),
    FieldDescriptor::list("bodySite").bound(&BODY_SITE).summary(),
    FieldDescriptor::required("subject")
        .references(&["Patient", "Group"])
        .summary(),
    FieldDescriptor::optional("encounter")
        .references(&["Encounter"])
        .summary(),
    FieldDescriptor::optional("onset")
        .choice(&["dateTime", "Period", "Range", "string"])
        .summary(),
    FieldDescriptor::optional("recordedDate").summary(),
    FieldDescriptor::optional("recorder")
        .references(&["Practitioner", "PractitionerRole", "Patient", "RelatedPerson"])
        .summary(),
    FieldDescriptor::optional("asserter")
        .references(&["Practitioner", "PractitionerRole", "Patient", "RelatedPerson"])
        .summary(),
    FieldDescriptor::list("stage"),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionOnset {
    DateTime(DateTime),
    Period(Period),
    Range(Range),
    String(FhirString),
}

impl ChoiceValue for ConditionOnset {
    fn as_node(&self) -> &dyn Visitable {
        match self {
            Self::DateTime(value) => value,
            Self::Period(value) => value,
            Self::Range(value) => value,
            Self::String(value) => value,
        }
    }
}

impl From<DateTime> for ConditionOnset {
    fn from(value: DateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<Period> for ConditionOnset {
    fn from(value: Period) -> Self {
        Self::Period(value)
    }
}

impl From<Range> for ConditionOnset {
    fn from(value: Range) -> Self {
        Self::Range(value)
    }
}

impl From<FhirString> for ConditionOnset {
    fn from(value: FhirString) -> Self {
        Self::String(value)
    }
}

/// A clinical condition, problem or diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Condition {
    resource: ResourceBase,
    identifier: Vec<Identifier>,
    clinical_status: Option<CodeableConcept>,
    verification_status: Option<CodeableConcept>,
    category: Vec<CodeableConcept>,
    severity: Option<CodeableConcept>,
    code: Option<CodeableConcept>,
    body_site: Vec<CodeableConcept>,
    subject: Reference,
    encounter: Option<Reference>,
    onset: Option<ConditionOnset>,
    recorded_date: Option<DateTime>,
    recorder: Option<Reference>,
    asserter: Option<Reference>,
    stage: Vec<ConditionStage>,
}

impl Condition {
    pub fn builder() -> ConditionBuilder {
        ConditionBuilder::default()
    }

    pub fn to_builder(&self) -> ConditionBuilder {
        ConditionBuilder::from(self)
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn clinical_status(&self) -> Option<&CodeableConcept> {
        self.clinical_status.as_ref()
    }

    pub fn verification_status(&self) -> Option<&CodeableConcept> {
        self.verification_status.as_ref()
    }

    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    pub fn severity(&self) -> Option<&CodeableConcept> {
        self.severity.as_ref()
    }

    pub fn code(&self) -> Option<&CodeableConcept> {
        self.code.as_ref()
    }

    pub fn body_site(&self) -> &[CodeableConcept] {
        &self.body_site
    }

    pub fn subject(&self) -> &Reference {
        &self.subject
    }

    pub fn encounter(&self) -> Option<&Reference> {
        self.encounter.as_ref()
    }

    pub fn onset(&self) -> Option<&ConditionOnset> {
        self.onset.as_ref()
    }

    pub fn recorded_date(&self) -> Option<&DateTime> {
        self.recorded_date.as_ref()
    }

    pub fn recorder(&self) -> Option<&Reference> {
        self.recorder.as_ref()
    }

    pub fn asserter(&self) -> Option<&Reference> {
        self.asserter.as_ref()
    }

    pub fn stage(&self) -> &[ConditionStage] {
        &self.stage
    }
}

impl Visitable for Condition {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &CONDITION
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, meta, implicit_rules, language, text, contained, extension, modifier_extension] =
            self.resource.field_values();
        Field::zip(
            &CONDITION_FIELDS,
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
                FieldValue::node(self.clinical_status.as_ref()),
                FieldValue::node(self.verification_status.as_ref()),
                FieldValue::list(&self.category),
                FieldValue::node(self.severity.as_ref()),
                FieldValue::node(self.code.as_ref()),
                FieldValue::list(&self.body_site),
                FieldValue::one(&self.subject),
                FieldValue::node(self.encounter.as_ref()),
                FieldValue::choice(self.onset.as_ref()),
                FieldValue::node(self.recorded_date.as_ref()),
                FieldValue::node(self.recorder.as_ref()),
                FieldValue::node(self.asserter.as_ref()),
                FieldValue::list(&self.stage),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConditionBuilder {
    resource: ResourceBaseBuilder,
    identifier: StagedList<Identifier>,
    clinical_status: Option<CodeableConcept>,
    verification_status: Option<CodeableConcept>,
    category: StagedList<CodeableConcept>,
    severity: Option<CodeableConcept>,
    code: Option<CodeableConcept>,
    body_site: StagedList<CodeableConcept>,
    subject: Option<Reference>,
    encounter: Option<Reference>,
    onset: Option<ConditionOnset>,
    recorded_date: Option<DateTime>,
    recorder: Option<Reference>,
    asserter: Option<Reference>,
    stage: StagedList<ConditionStage>,
}

impl ConditionBuilder {
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

    pub fn clinical_status(mut self, status: impl Into<Option<CodeableConcept>>) -> Self {
        self.clinical_status = status.into();
        self
    }

    pub fn verification_status(mut self, status: impl Into<Option<CodeableConcept>>) -> Self {
        self.verification_status = status.into();
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

    pub fn severity(mut self, severity: impl Into<Option<CodeableConcept>>) -> Self {
        self.severity = severity.into();
        self
    }

    pub fn code(mut self, code: impl Into<Option<CodeableConcept>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn add_body_site(mut self, body_site: impl Into<Option<CodeableConcept>>) -> Self {
        self.body_site.push(body_site);
        self
    }

    pub fn body_site<I>(mut self, body_site: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<CodeableConcept>>,
    {
        self.body_site.replace(body_site);
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

    pub fn onset(mut self, onset: impl Into<ConditionOnset>) -> Self {
        self.onset = Some(onset.into());
        self
    }

    pub fn clear_onset(mut self) -> Self {
        self.onset = None;
        self
    }

    pub fn recorded_date(mut self, recorded_date: impl Into<Option<DateTime>>) -> Self {
        self.recorded_date = recorded_date.into();
        self
    }

    pub fn recorder(mut self, recorder: impl Into<Option<Reference>>) -> Self {
        self.recorder = recorder.into();
        self
    }

    pub fn asserter(mut self, asserter: impl Into<Option<Reference>>) -> Self {
        self.asserter = asserter.into();
        self
    }

    pub fn add_stage(mut self, stage: impl Into<Option<ConditionStage>>) -> Self {
        self.stage.push(stage);
        self
    }

    pub fn stage<I>(mut self, stage: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<ConditionStage>>,
    {
        self.stage.replace(stage);
        self
    }
}

impl NodeBuilder for ConditionBuilder {
    type Node = Condition;

    fn assemble(&self) -> BuildResult<Condition> {
        let owner = CONDITION.name;
        Ok(Condition {
            resource: self.resource.finish(owner)?,
            identifier: self.identifier.finish(owner, "identifier")?,
            clinical_status: self.clinical_status.clone(),
            verification_status: self.verification_status.clone(),
            category: self.category.finish(owner, "category")?,
            severity: self.severity.clone(),
            code: self.code.clone(),
            body_site: self.body_site.finish(owner, "bodySite")?,
            subject: require(&self.subject, owner, "subject")?,
            encounter: self.encounter.clone(),
            onset: self.onset.clone(),
            recorded_date: self.recorded_date.clone(),
            recorder: self.recorder.clone(),
            asserter: self.asserter.clone(),
            stage: self.stage.finish(owner, "stage")?,
        })
    }
}

impl From<&Condition> for ConditionBuilder {
    fn from(node: &Condition) -> Self {
        Self {
            resource: ResourceBaseBuilder::from(&node.resource),
            identifier: StagedList::from(&node.identifier),
            clinical_status: node.clinical_status.clone(),
            verification_status: node.verification_status.clone(),
            category: StagedList::from(&node.category),
            severity: node.severity.clone(),
            code: node.code.clone(),
            body_site: StagedList::from(&node.body_site),
            subject: Some(node.subject.clone()),
            encounter: node.encounter.clone(),
            onset: node.onset.clone(),
            recorded_date: node.recorded_date.clone(),
            recorder: node.recorder.clone(),
            asserter: node.asserter.clone(),
            stage: StagedList::from(&node.stage),
        }
    }
}

resource_node!(Condition, ConditionBuilder);

pub static CONDITION_STAGE: TypeDescriptor =
    TypeDescriptor::new("Condition.Stage", TypeKind::Backbone, &CONDITION_STAGE_FIELDS)
        .constraints(&[ConstraintDescriptor::error(
            "con-1",
            "Stage SHALL have summary or assessment",
            "summary.exists() or assessment.exists()",
        )]);

static CONDITION_STAGE_FIELDS: [FieldDescriptor; 6] = [
    ID,
    EXTENSION,
    MODIFIER_EXTENSION,
    FieldDescriptor::optional("summary").bound(&STAGE_SUMMARY),
    FieldDescriptor::list("assessment").references(&[
        "ClinicalImpression",
        "DiagnosticReport",
        "Observation",
    ]),
    FieldDescriptor::optional("type").bound(&STAGE_TYPE),
];

/// Clinical stage or grade of a condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConditionStage {
    backbone: BackboneBase,
    summary: Option<CodeableConcept>,
    assessment: Vec<Reference>,
    r#type: Option<CodeableConcept>,
}

impl ConditionStage {
    pub fn builder() -> ConditionStageBuilder {
        ConditionStageBuilder::default()
    }

    pub fn to_builder(&self) -> ConditionStageBuilder {
        ConditionStageBuilder::from(self)
    }

    pub fn summary(&self) -> Option<&CodeableConcept> {
        self.summary.as_ref()
    }

    pub fn assessment(&self) -> &[Reference] {
        &self.assessment
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }
}

impl Visitable for ConditionStage {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &CONDITION_STAGE
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension, modifier_extension] = self.backbone.field_values();
        Field::zip(
            &CONDITION_STAGE_FIELDS,
            [
                id,
                extension,
                modifier_extension,
                FieldValue::node(self.summary.as_ref()),
                FieldValue::list(&self.assessment),
                FieldValue::node(self.r#type.as_ref()),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConditionStageBuilder {
    backbone: BackboneBaseBuilder,
    summary: Option<CodeableConcept>,
    assessment: StagedList<Reference>,
    r#type: Option<CodeableConcept>,
}

impl ConditionStageBuilder {
    pub fn summary(mut self, summary: impl Into<Option<CodeableConcept>>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn add_assessment(mut self, assessment: impl Into<Option<Reference>>) -> Self {
        self.assessment.push(assessment);
        self
    }

    pub fn assessment<I>(mut self, assessment: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Reference>>,
    {
        self.assessment.replace(assessment);
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Option<CodeableConcept>>) -> Self {
        self.r#type = r#type.into();
        self
    }
}

impl NodeBuilder for ConditionStageBuilder {
    type Node = ConditionStage;

    fn assemble(&self) -> BuildResult<ConditionStage> {
        let owner = CONDITION_STAGE.name;
        Ok(ConditionStage {
            backbone: self.backbone.finish(owner)?,
            summary: self.summary.clone(),
            assessment: self.assessment.finish(owner, "assessment")?,
            r#type: self.r#type.clone(),
        })
    }
}

impl From<&ConditionStage> for ConditionStageBuilder {
    fn from(node: &ConditionStage) -> Self {
        Self {
            backbone: BackboneBaseBuilder::from(&node.backbone),
            summary: node.summary.clone(),
            assessment: StagedList::from(&node.assessment),
            r#type: node.r#type.clone(),
        }
    }
}

backbone_node!(ConditionStage, ConditionStageBuilder);
