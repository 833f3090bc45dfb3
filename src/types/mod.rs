pub mod descriptor;
pub mod node;
pub mod registry;

pub use descriptor::{
    BindingDescriptor, BindingStrength, Cardinality, ConstraintDescriptor, ConstraintSeverity,
    FieldDescriptor, FieldRole, TypeDescriptor, TypeKind,
};
pub use node::{
    ChoiceValue, Field, FieldValue, HasChildren, HasExtensions, HasId, Narratable,
    PrimitiveValue, ResourceNode, Visitable,
};
pub use registry::{is_abstract_resource_type, is_resource_type};
