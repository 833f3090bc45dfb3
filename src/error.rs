use thiserror::Error;

/// Crate-level failures that are not tied to building a node.
#[derive(Error, Debug)]
pub enum FhirModelError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Parsing error: {message}")]
    Parsing { message: String },

    #[error("Constraint evaluation error: {message}")]
    Evaluation { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FhirModelError {
    pub fn configuration_error(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn parsing_error(message: impl Into<String>) -> Self {
        Self::Parsing {
            message: message.into(),
        }
    }

    pub fn evaluation_error(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }
}

/// A fatal schema violation detected while building a node. No node is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Missing required element: '{field}' on {owner}")]
    MissingRequired {
        owner: &'static str,
        field: &'static str,
    },

    #[error("Repeating element: '{field}' on {owner} requires at least one element")]
    EmptyRequiredList {
        owner: &'static str,
        field: &'static str,
    },

    #[error("Repeating element: '{field}' on {owner} does not permit null elements (index {index})")]
    NullListElement {
        owner: &'static str,
        field: &'static str,
        index: usize,
    },

    #[error("Invalid type: {actual} for choice element: '{field}' on {owner} must be one of: {permitted}")]
    ChoiceTypeMismatch {
        owner: &'static str,
        field: &'static str,
        actual: String,
        permitted: String,
    },

    #[error(
        "Resource type found in reference value: '{actual}' for element: '{field}' on {owner} must be one of: {allowed}"
    )]
    ReferenceTypeMismatch {
        owner: &'static str,
        field: &'static str,
        actual: String,
        allowed: String,
    },

    #[error(
        "Resource type found in reference value: '{actual}' for element: '{field}' on {owner} must be a valid resource type name"
    )]
    UnknownResourceType {
        owner: &'static str,
        field: &'static str,
        actual: String,
    },

    #[error(
        "Resource type found in reference value: '{literal}' for element: '{field}' on {owner} does not match Reference.type: {declared}"
    )]
    ReferenceTypeConflict {
        owner: &'static str,
        field: &'static str,
        literal: String,
        declared: String,
    },

    #[error("Element '{field}' on {owner}: {code} is not a valid code for value set '{value_set}'")]
    BindingViolation {
        owner: &'static str,
        field: &'static str,
        value_set: String,
        code: String,
    },

    #[error("ele-1: All FHIR elements must have a @value or children ({owner})")]
    ValueOrChildren { owner: &'static str },

    #[error("Invalid {owner} value: {message}")]
    InvalidPrimitive {
        owner: &'static str,
        message: String,
    },

    #[error("dom-2: contained resource {resource} on {owner} must not contain nested resources")]
    NestedContained {
        owner: &'static str,
        resource: &'static str,
    },

    #[error("{key}: {human} ({owner})")]
    ConstraintViolation {
        owner: &'static str,
        key: &'static str,
        human: &'static str,
    },
}

impl StructuralError {
    /// Type name of the node whose build failed.
    pub fn owner(&self) -> &'static str {
        match self {
            Self::MissingRequired { owner, .. }
            | Self::EmptyRequiredList { owner, .. }
            | Self::NullListElement { owner, .. }
            | Self::ChoiceTypeMismatch { owner, .. }
            | Self::ReferenceTypeMismatch { owner, .. }
            | Self::UnknownResourceType { owner, .. }
            | Self::ReferenceTypeConflict { owner, .. }
            | Self::BindingViolation { owner, .. }
            | Self::ValueOrChildren { owner }
            | Self::InvalidPrimitive { owner, .. }
            | Self::NestedContained { owner, .. }
            | Self::ConstraintViolation { owner, .. } => owner,
        }
    }

    /// Field responsible for the failure, when the failure is field-scoped.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequired { field, .. }
            | Self::EmptyRequiredList { field, .. }
            | Self::NullListElement { field, .. }
            | Self::ChoiceTypeMismatch { field, .. }
            | Self::ReferenceTypeMismatch { field, .. }
            | Self::UnknownResourceType { field, .. }
            | Self::ReferenceTypeConflict { field, .. }
            | Self::BindingViolation { field, .. } => Some(field),
            Self::NestedContained { .. } => Some("contained"),
            Self::ValueOrChildren { .. }
            | Self::InvalidPrimitive { .. }
            | Self::ConstraintViolation { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FhirModelError>;

pub type BuildResult<T> = std::result::Result<T, StructuralError>;
