use rust_decimal::Decimal;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use crate::core::ValidationConfig;
use crate::error::BuildResult;
use crate::model::{ContainedResource, Extension, Meta, Narrative};
use crate::types::descriptor::{FieldDescriptor, FieldRole, TypeDescriptor, TypeKind};

/// Uniform, read-only view over a built node.
///
/// Implementations return their fields in the exact order of
/// `descriptor().fields`, which is the order traversal and fingerprinting
/// depend on.
pub trait Visitable: Any + Send + Sync + fmt::Debug + 'static {
    fn descriptor(&self) -> &'static TypeDescriptor;

    fn fields(&self) -> Vec<Field<'_>>;

    fn as_any(&self) -> &dyn Any;

    /// Checks that only depend on the node's own payload (primitive syntax,
    /// narrative markup). Run whenever the node is built or adopted by a parent.
    fn check_intrinsic(&self, _config: &ValidationConfig) -> BuildResult<()> {
        Ok(())
    }
}

impl dyn Visitable {
    pub fn type_name(&self) -> &'static str {
        self.descriptor().name
    }

    pub fn kind(&self) -> TypeKind {
        self.descriptor().kind
    }

    pub fn downcast_ref<T: Visitable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Visitable>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn has_children(&self) -> bool {
        children_present(self)
    }
}

/// A field paired with its declaration.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub descriptor: &'static FieldDescriptor,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    /// Pairs declarations with values; the array lengths must agree.
    pub fn zip<const N: usize>(
        descriptors: &'static [FieldDescriptor; N],
        values: [FieldValue<'a>; N],
    ) -> Vec<Field<'a>> {
        descriptors
            .iter()
            .zip(values)
            .map(|(descriptor, value)| Field { descriptor, value })
            .collect()
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }
}

#[derive(Clone)]
pub enum FieldValue<'a> {
    Absent,
    Primitive(PrimitiveValue<'a>),
    Node(&'a dyn Visitable),
    List(Vec<&'a dyn Visitable>),
}

impl<'a> FieldValue<'a> {
    pub fn node<T: Visitable>(value: Option<&'a T>) -> Self {
        match value {
            Some(node) => Self::Node(node),
            None => Self::Absent,
        }
    }

    pub fn one<T: Visitable>(value: &'a T) -> Self {
        Self::Node(value)
    }

    pub fn list<T: Visitable>(values: &'a [T]) -> Self {
        Self::List(values.iter().map(|value| value as &dyn Visitable).collect())
    }

    pub fn text(value: Option<&'a str>) -> Self {
        match value {
            Some(text) => Self::Primitive(PrimitiveValue::Text(Cow::Borrowed(text))),
            None => Self::Absent,
        }
    }

    pub fn choice<C: ChoiceValue>(value: Option<&'a C>) -> Self {
        match value {
            Some(choice) => Self::Node(choice.as_node()),
            None => Self::Absent,
        }
    }

    pub fn is_present(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::List(items) => !items.is_empty(),
            Self::Primitive(_) | Self::Node(_) => true,
        }
    }

    /// Every node held by the field, in order.
    pub fn nodes(&self) -> Vec<&'a dyn Visitable> {
        match self {
            Self::Node(node) => vec![*node],
            Self::List(items) => items.clone(),
            Self::Absent | Self::Primitive(_) => Vec::new(),
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "Absent"),
            Self::Primitive(value) => f.debug_tuple("Primitive").field(value).finish(),
            Self::Node(node) => write!(f, "Node({})", node.type_name()),
            Self::List(items) => write!(f, "List(len={})", items.len()),
        }
    }
}

/// Raw primitive payload as seen by visitors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveValue<'a> {
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    Text(Cow<'a, str>),
}

impl fmt::Display for PrimitiveValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

/// One populated alternative of a choice field.
pub trait ChoiceValue {
    fn as_node(&self) -> &dyn Visitable;

    fn type_name(&self) -> &'static str {
        self.as_node().type_name()
    }
}

pub trait HasId {
    fn id(&self) -> Option<&str>;
}

pub trait HasExtensions {
    fn extension(&self) -> &[Extension];

    fn modifier_extension(&self) -> &[Extension] {
        &[]
    }

    fn extensions_by_url<'s>(&'s self, url: &'s str) -> impl Iterator<Item = &'s Extension> + 's {
        self.extension()
            .iter()
            .chain(self.modifier_extension())
            .filter(move |extension| extension.url() == url)
    }
}

/// True when any field other than a raw attribute is populated.
pub trait HasChildren {
    fn has_children(&self) -> bool;
}

impl<T: Visitable> HasChildren for T {
    fn has_children(&self) -> bool {
        children_present(self)
    }
}

pub(crate) fn children_present(node: &dyn Visitable) -> bool {
    node.fields()
        .iter()
        .any(|field| field.descriptor.role != FieldRole::Attribute && field.value.is_present())
}

pub trait Narratable {
    fn text(&self) -> Option<&Narrative>;
}

pub trait ResourceNode: Visitable + HasId + HasExtensions + Narratable {
    fn meta(&self) -> Option<&Meta>;

    fn implicit_rules(&self) -> Option<&str>;

    fn language(&self) -> Option<&str>;

    fn contained(&self) -> &[ContainedResource];
}
