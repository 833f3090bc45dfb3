use std::any::Any;

use crate::core::ValidationConfig;
use crate::error::{BuildResult, StructuralError};
use crate::model::base::{ElementBase, ElementBaseBuilder, element_node};
use crate::model::{Canonical, Code, Coding, Id, Instant, Uri};
use crate::types::descriptor::{EXTENSION, ID};
use crate::types::{
    BindingDescriptor, BindingStrength, Field, FieldDescriptor, FieldValue, TypeDescriptor,
    TypeKind, Visitable,
};
use crate::validation::{NodeBuilder, StagedList, primitive as syntax, require};

pub static SECURITY_LABELS: BindingDescriptor = BindingDescriptor::new(
    "SecurityLabels",
    BindingStrength::Extensible,
    "http://hl7.org/fhir/ValueSet/security-labels",
);

pub static COMMON_TAGS: BindingDescriptor = BindingDescriptor::new(
    "Tags",
    BindingStrength::Example,
    "http://hl7.org/fhir/ValueSet/common-tags",
);

pub static META: TypeDescriptor = TypeDescriptor::new("Meta", TypeKind::Complex, &META_FIELDS);

static META_FIELDS: [FieldDescriptor; 8] = [
    ID,
    EXTENSION,
    FieldDescriptor::optional("versionId").summary(),
    FieldDescriptor::optional("lastUpdated").summary(),
    FieldDescriptor::optional("source").summary(),
    FieldDescriptor::list("profile").summary(),
    FieldDescriptor::list("security").bound(&SECURITY_LABELS).summary(),
    FieldDescriptor::list("tag").bound(&COMMON_TAGS).summary(),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Meta {
    element: ElementBase,
    version_id: Option<Id>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Canonical>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
}

impl Meta {
    pub fn builder() -> MetaBuilder {
        MetaBuilder::default()
    }

    pub fn to_builder(&self) -> MetaBuilder {
        MetaBuilder::from(self)
    }

    pub fn version_id(&self) -> Option<&Id> {
        self.version_id.as_ref()
    }

    pub fn last_updated(&self) -> Option<&Instant> {
        self.last_updated.as_ref()
    }

    pub fn source(&self) -> Option<&Uri> {
        self.source.as_ref()
    }

    pub fn profile(&self) -> &[Canonical] {
        &self.profile
    }

    pub fn security(&self) -> &[Coding] {
        &self.security
    }

    pub fn tag(&self) -> &[Coding] {
        &self.tag
    }
}

impl Visitable for Meta {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &META
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension] = self.element.field_values();
        Field::zip(
            &META_FIELDS,
            [
                id,
                extension,
                FieldValue::node(self.version_id.as_ref()),
                FieldValue::node(self.last_updated.as_ref()),
                FieldValue::node(self.source.as_ref()),
                FieldValue::list(&self.profile),
                FieldValue::list(&self.security),
                FieldValue::list(&self.tag),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MetaBuilder {
    element: ElementBaseBuilder,
    version_id: Option<Id>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: StagedList<Canonical>,
    security: StagedList<Coding>,
    tag: StagedList<Coding>,
}

impl MetaBuilder {
    pub fn version_id(mut self, version_id: impl Into<Option<Id>>) -> Self {
        self.version_id = version_id.into();
        self
    }

    pub fn last_updated(mut self, last_updated: impl Into<Option<Instant>>) -> Self {
        self.last_updated = last_updated.into();
        self
    }

    pub fn source(mut self, source: impl Into<Option<Uri>>) -> Self {
        self.source = source.into();
        self
    }

    pub fn add_profile(mut self, profile: impl Into<Option<Canonical>>) -> Self {
        self.profile.push(profile);
        self
    }

    pub fn profile<I>(mut self, profile: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Canonical>>,
    {
        self.profile.replace(profile);
        self
    }

    pub fn add_security(mut self, security: impl Into<Option<Coding>>) -> Self {
        self.security.push(security);
        self
    }

    pub fn security<I>(mut self, security: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Coding>>,
    {
        self.security.replace(security);
        self
    }

    pub fn add_tag(mut self, tag: impl Into<Option<Coding>>) -> Self {
        self.tag.push(tag);
        self
    }

    pub fn tag<I>(mut self, tag: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Coding>>,
    {
        self.tag.replace(tag);
        self
    }
}

impl NodeBuilder for MetaBuilder {
    type Node = Meta;

    fn assemble(&self) -> BuildResult<Meta> {
        Ok(Meta {
            element: self.element.finish(META.name)?,
            version_id: self.version_id.clone(),
            last_updated: self.last_updated.clone(),
            source: self.source.clone(),
            profile: self.profile.finish(META.name, "profile")?,
            security: self.security.finish(META.name, "security")?,
            tag: self.tag.finish(META.name, "tag")?,
        })
    }
}

impl From<&Meta> for MetaBuilder {
    fn from(node: &Meta) -> Self {
        Self {
            element: ElementBaseBuilder::from(&node.element),
            version_id: node.version_id.clone(),
            last_updated: node.last_updated.clone(),
            source: node.source.clone(),
            profile: StagedList::from(&node.profile),
            security: StagedList::from(&node.security),
            tag: StagedList::from(&node.tag),
        }
    }
}

element_node!(Meta, MetaBuilder);

pub static NARRATIVE_STATUS: BindingDescriptor = BindingDescriptor::new(
    "NarrativeStatus",
    BindingStrength::Required,
    "http://hl7.org/fhir/ValueSet/narrative-status|4.0.1",
)
.system("http://hl7.org/fhir/narrative-status")
.codes(&["generated", "extensions", "additional", "empty"]);

pub static NARRATIVE: TypeDescriptor =
    TypeDescriptor::new("Narrative", TypeKind::Complex, &NARRATIVE_FIELDS);

static NARRATIVE_FIELDS: [FieldDescriptor; 4] = [
    ID,
    EXTENSION,
    FieldDescriptor::required("status").bound(&NARRATIVE_STATUS),
    FieldDescriptor::required("div"),
];

/// Human-readable xhtml summary of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Narrative {
    element: ElementBase,
    status: Code,
    div: String,
}

impl Narrative {
    pub fn builder() -> NarrativeBuilder {
        NarrativeBuilder::default()
    }

    pub fn to_builder(&self) -> NarrativeBuilder {
        NarrativeBuilder::from(self)
    }

    pub fn status(&self) -> &Code {
        &self.status
    }

    pub fn div(&self) -> &str {
        &self.div
    }
}

impl Visitable for Narrative {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &NARRATIVE
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension] = self.element.field_values();
        Field::zip(
            &NARRATIVE_FIELDS,
            [
                id,
                extension,
                FieldValue::one(&self.status),
                FieldValue::text(Some(self.div.as_str())),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn check_intrinsic(&self, config: &ValidationConfig) -> BuildResult<()> {
        syntax::check_xhtml_div(&self.div, config).map_err(|message| {
            StructuralError::InvalidPrimitive {
                owner: NARRATIVE.name,
                message,
            }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NarrativeBuilder {
    element: ElementBaseBuilder,
    status: Option<Code>,
    div: Option<String>,
}

impl NarrativeBuilder {
    pub fn status(mut self, status: impl Into<Option<Code>>) -> Self {
        self.status = status.into();
        self
    }

    pub fn div(mut self, div: impl Into<String>) -> Self {
        self.div = Some(div.into());
        self
    }
}

impl NodeBuilder for NarrativeBuilder {
    type Node = Narrative;

    fn assemble(&self) -> BuildResult<Narrative> {
        Ok(Narrative {
            element: self.element.finish(NARRATIVE.name)?,
            status: require(&self.status, NARRATIVE.name, "status")?,
            div: require(&self.div, NARRATIVE.name, "div")?,
        })
    }
}

impl From<&Narrative> for NarrativeBuilder {
    fn from(node: &Narrative) -> Self {
        Self {
            element: ElementBaseBuilder::from(&node.element),
            status: Some(node.status.clone()),
            div: Some(node.div.clone()),
        }
    }
}

element_node!(Narrative, NarrativeBuilder);
