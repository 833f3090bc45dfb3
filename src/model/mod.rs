//! Typed FHIR R4 model nodes and their builders.
//!
//! Every node is immutable once built. Changing a node means deriving a
//! builder from it with `to_builder()` and building a new one.

pub mod base;
pub mod datatypes;
pub mod datetime;
pub mod primitive;
pub mod resources;

pub use base::{
    BackboneBase, BackboneBaseBuilder, BackboneElementBuilder, ElementBase, ElementBaseBuilder,
    ElementBuilder, ResourceBase, ResourceBaseBuilder, ResourceBuilder,
};
pub use datatypes::{
    CodeableConcept, CodeableConceptBuilder, Coding, CodingBuilder, DATA_ABSENT_REASON_URL,
    DataValue, Extension, ExtensionBuilder, Identifier, IdentifierBuilder, Meta, MetaBuilder,
    Narrative, NarrativeBuilder, Period, PeriodBuilder, Quantity, QuantityBuilder, Range,
    RangeBuilder, Reference, ReferenceBuilder,
};
pub use datetime::{PartialDate, PartialDateTime};
pub use primitive::{
    Boolean, Canonical, Code, Date, DateTime, FhirDecimal, FhirString, Id, Instant, Integer,
    Markdown, PositiveInt, Primitive, PrimitiveBuilder, PrimitiveKind, UnsignedInt, Uri,
};
pub use resources::{
    Condition, ConditionBuilder, ConditionOnset, ConditionStage, ConditionStageBuilder,
    ContainedResource, Observation, ObservationBuilder, ObservationComponent,
    ObservationComponentBuilder, ObservationEffective, Patient, PatientBuilder, PatientDeceased,
    PatientLink, PatientLinkBuilder, SuppliedItem, SuppliedItemBuilder, SuppliedItemItem,
    SupplyDelivery, SupplyDeliveryBuilder, SupplyDeliveryOccurrence,
};
