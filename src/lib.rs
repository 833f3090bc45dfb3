//! # OctoFHIR FHIR Model
//!
//! Immutable FHIR R4 model nodes that are structurally validated when they
//! are built, plus a depth-first traversal framework over the built trees.
//!
//! ## Features
//!
//! - **Builders**: copy-on-write staging, atomic `build()`, trusted mode
//! - **Cardinality**: required fields, required lists, null list entries
//! - **Choice types**: last write wins, permitted alternatives enforced
//! - **References**: literal and declared target types checked against the
//!   field's allowed targets, `#id` resolved against contained resources
//! - **Bindings**: REQUIRED failures are errors, weaker strengths advisories
//! - **Visitors**: pre/start/visit/end/post hooks with subtree skipping
//! - **Terminology**: pluggable value-set membership with an LRU cache
//!
//! ## Quick Start
//!
//! ```rust
//! use octofhir_fhirmodel::prelude::*;
//! use octofhir_fhirmodel::*;
//!
//! # fn main() -> std::result::Result<(), StructuralError> {
//! let patient = Patient::builder()
//!     .id("example")
//!     .gender(Code::of("female"))
//!     .add_identifier(
//!         Identifier::builder()
//!             .system(Uri::of("http://hospital.example.org/mrn"))
//!             .value(FhirString::of("12345"))
//!             .build()?,
//!     )
//!     .build()?;
//! assert_eq!(patient.identifier().len(), 1);
//!
//! let invalid = Patient::builder().gender(Code::of("woman")).build();
//! assert!(matches!(invalid, Err(StructuralError::BindingViolation { .. })));
//!
//! let identifiers = collect::<Identifier>(&patient);
//! assert_eq!(identifiers.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;
pub mod model;
pub mod terminology;
pub mod types;
pub mod validation;
pub mod visitor;

pub use core::{BuildOptions, ValidationConfig};
pub use error::{BuildResult, FhirModelError, Result, StructuralError};
pub use model::*;
#[cfg(feature = "lru-cache")]
pub use terminology::CachingTerminology;
pub use terminology::{InMemoryTerminology, TerminologyService};
pub use types::{
    BindingDescriptor, BindingStrength, Cardinality, ChoiceValue, ConstraintDescriptor,
    ConstraintSeverity, Field, FieldDescriptor, FieldRole, FieldValue, HasChildren,
    HasExtensions, HasId, Narratable, PrimitiveValue, ResourceNode, TypeDescriptor, TypeKind,
    Visitable, is_abstract_resource_type, is_resource_type,
};
pub use validation::{
    AdvisoryKind, AdvisoryWarning, BindingMismatch, Built, ConstraintEvaluator, NodeBuilder,
    ReferenceTarget, check_binding, choice_element_name, literal_target, validate,
};
pub use visitor::{
    CollectingVisitor, Location, VisitFlow, Visitor, collect, fingerprint, summary_fields, walk,
};

/// Builder and node traits needed to call the shared setters and accessors.
pub mod prelude {
    pub use crate::model::{BackboneElementBuilder, ElementBuilder, ResourceBuilder};
    pub use crate::types::{HasChildren, HasExtensions, HasId, Narratable, ResourceNode};
    pub use crate::validation::NodeBuilder;
}
