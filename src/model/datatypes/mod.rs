pub mod coding;
pub mod extension;
pub mod general;
pub mod identifier;
pub mod meta;
pub mod reference;

pub use coding::{CodeableConcept, CodeableConceptBuilder, Coding, CodingBuilder};
pub use extension::{DATA_ABSENT_REASON_URL, DataValue, Extension, ExtensionBuilder};
pub use general::{Period, PeriodBuilder, Quantity, QuantityBuilder, Range, RangeBuilder};
pub use identifier::{Identifier, IdentifierBuilder};
pub use meta::{Meta, MetaBuilder, Narrative, NarrativeBuilder};
pub use reference::{Reference, ReferenceBuilder};
