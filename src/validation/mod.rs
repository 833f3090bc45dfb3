//! Build-time structural validation.
//!
//! Each builder assembles its node first and then hands the finished node to
//! [`validate`], which runs the checks declared by the node's
//! [`TypeDescriptor`](crate::types::TypeDescriptor): cardinality, choice
//! membership, reference targets, value-set bindings, intrinsic primitive
//! syntax, `ele-1`, declared constraints and, for resources, the contained
//! resource rules. A hard failure yields a [`StructuralError`] and no node;
//! everything softer comes back as [`AdvisoryWarning`]s.

pub mod binding;
pub mod cardinality;
pub mod choice;
pub mod constraint;
pub mod contained;
pub mod primitive;
pub mod reference;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::BuildOptions;
use crate::error::{BuildResult, StructuralError};
use crate::types::node::children_present;
use crate::types::{BindingStrength, FieldValue, PrimitiveValue, TypeKind, Visitable};

pub use binding::{BindingMismatch, check_binding, is_valid_language_tag, is_valid_ucum_code};
pub use cardinality::{StagedList, require};
pub use choice::choice_element_name;
pub use constraint::ConstraintEvaluator;
pub use reference::{ReferenceTarget, literal_target};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdvisoryKind {
    /// A non-required binding was not satisfied.
    Binding { strength: BindingStrength },
    /// A warning-severity constraint evaluated to false.
    Constraint { key: String },
    /// The constraint evaluator could not evaluate a constraint.
    Unevaluated { key: String },
}

/// A non-fatal finding. The build that produced it succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryWarning {
    pub kind: AdvisoryKind,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl AdvisoryWarning {
    pub fn binding(
        owner: &str,
        field: &str,
        strength: BindingStrength,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: AdvisoryKind::Binding { strength },
            owner: owner.to_string(),
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    pub fn constraint(owner: &str, key: &str, message: impl Into<String>) -> Self {
        Self {
            kind: AdvisoryKind::Constraint {
                key: key.to_string(),
            },
            owner: owner.to_string(),
            field: None,
            message: message.into(),
        }
    }

    pub fn unevaluated(owner: &str, key: &str, message: impl Into<String>) -> Self {
        Self {
            kind: AdvisoryKind::Unevaluated {
                key: key.to_string(),
            },
            owner: owner.to_string(),
            field: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}.{}: {}", self.owner, field, self.message),
            None => write!(f, "{}: {}", self.owner, self.message),
        }
    }
}

/// A successfully built node together with the advisories its build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Built<T> {
    pub node: T,
    pub warnings: Vec<AdvisoryWarning>,
}

impl<T> Built<T> {
    pub fn node(&self) -> &T {
        &self.node
    }

    pub fn warnings(&self) -> &[AdvisoryWarning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_node(self) -> T {
        self.node
    }

    /// Emits every advisory through `tracing` and returns the node.
    pub fn logged(self) -> T {
        for warning in &self.warnings {
            tracing::warn!(
                owner = %warning.owner,
                field = warning.field.as_deref().unwrap_or(""),
                "{}",
                warning.message
            );
        }
        self.node
    }
}

/// Staging side of a node type.
///
/// `assemble` only moves staged values into a node, failing on the
/// invariants the node's Rust type cannot represent (absent required fields,
/// null list entries). The provided `build_with` then runs [`validate`].
/// `build` borrows the builder, so a failed build can be fixed and retried.
pub trait NodeBuilder {
    type Node: Visitable;

    fn assemble(&self) -> BuildResult<Self::Node>;

    fn build_with(&self, options: &BuildOptions<'_>) -> BuildResult<Built<Self::Node>> {
        let node = self.assemble()?;
        let warnings = validate(&node, options)?;
        Ok(Built { node, warnings })
    }

    /// Builds with default options and logs any advisories at `warn`.
    fn build(&self) -> BuildResult<Self::Node> {
        self.build_with(&BuildOptions::default()).map(Built::logged)
    }
}

/// Runs every check that applies to `node` itself. Children are expected to
/// have been validated by their own builders, except for primitives, whose
/// intrinsic syntax is re-checked here because `Primitive::of` skips it.
pub fn validate(
    node: &dyn Visitable,
    options: &BuildOptions<'_>,
) -> BuildResult<Vec<AdvisoryWarning>> {
    let owner = node.type_name();
    if options.is_trusted() {
        tracing::debug!(owner, "validation disabled, skipping structural checks");
        return Ok(Vec::new());
    }

    let config = &options.config;
    node.check_intrinsic(config)?;

    let mut warnings = Vec::new();
    let fields = node.fields();
    for field in &fields {
        cardinality::check_cardinality(owner, field)?;
        choice::check_choice(owner, field)?;
        if config.check_reference_types {
            reference::check_field(owner, field)?;
        }
        if let Some(binding) = field.descriptor.binding {
            binding::check_field(owner, field, binding, options, &mut warnings)?;
        }
        for child in field.value.nodes() {
            if child.kind() == TypeKind::Primitive {
                child.check_intrinsic(config)?;
            }
        }
    }

    if node.descriptor().is_resource() {
        let id = fields.iter().find(|field| field.name() == "id");
        if let Some(FieldValue::Primitive(PrimitiveValue::Text(id))) = id.map(|field| &field.value)
        {
            primitive::check_id(id)
                .map_err(|message| StructuralError::InvalidPrimitive { owner, message })?;
        }
    } else if !children_present(node) {
        return Err(StructuralError::ValueOrChildren { owner });
    }

    constraint::check_constraints(node, options, &mut warnings)?;

    if node.descriptor().is_resource() {
        contained::check_resource(node, config)?;
    }

    Ok(warnings)
}
