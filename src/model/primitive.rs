use chrono::{FixedOffset, SecondsFormat};
use rust_decimal::Decimal;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::core::ValidationConfig;
use crate::error::{BuildResult, StructuralError};
use crate::model::base::{ElementBase, ElementBaseBuilder};
use crate::model::datetime::{PartialDate, PartialDateTime};
use crate::model::{ElementBuilder, Extension};
use crate::validation::{NodeBuilder, primitive as syntax};
use crate::types::descriptor::{EXTENSION, ID};
use crate::types::{
    Field, FieldDescriptor, FieldValue, HasExtensions, HasId, PrimitiveValue, TypeDescriptor,
    TypeKind, Visitable,
};

static PRIMITIVE_FIELDS: [FieldDescriptor; 3] = [ID, EXTENSION, FieldDescriptor::value()];

/// Marker describing one FHIR primitive type.
pub trait PrimitiveKind:
    fmt::Debug + Clone + Copy + Default + PartialEq + Eq + Hash + Send + Sync + 'static
{
    type Value: fmt::Debug + Clone + PartialEq + Eq + Hash + Send + Sync + 'static;

    fn descriptor() -> &'static TypeDescriptor;

    fn payload(value: &Self::Value) -> PrimitiveValue<'_>;

    fn check(_value: &Self::Value, _config: &ValidationConfig) -> Result<(), String> {
        Ok(())
    }
}

/// A primitive element: an optional value plus the common element fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Primitive<K: PrimitiveKind> {
    element: ElementBase,
    value: Option<K::Value>,
    kind: PhantomData<K>,
}

impl<K: PrimitiveKind> Primitive<K> {
    /// A bare value with no id or extensions. Lexical checks run when the
    /// value is adopted by a parent node.
    pub fn of(value: impl Into<K::Value>) -> Self {
        Self {
            element: ElementBase::default(),
            value: Some(value.into()),
            kind: PhantomData,
        }
    }

    pub fn builder() -> PrimitiveBuilder<K> {
        PrimitiveBuilder::default()
    }

    pub fn to_builder(&self) -> PrimitiveBuilder<K> {
        PrimitiveBuilder::from(self)
    }

    pub fn value(&self) -> Option<&K::Value> {
        self.value.as_ref()
    }
}

impl<K: PrimitiveKind<Value = String>> Primitive<K> {
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<K: PrimitiveKind> Visitable for Primitive<K> {
    fn descriptor(&self) -> &'static TypeDescriptor {
        K::descriptor()
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension] = self.element.field_values();
        let value = match &self.value {
            Some(value) => FieldValue::Primitive(K::payload(value)),
            None => FieldValue::Absent,
        };
        Field::zip(&PRIMITIVE_FIELDS, [id, extension, value])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn check_intrinsic(&self, config: &ValidationConfig) -> BuildResult<()> {
        match &self.value {
            Some(value) => {
                K::check(value, config).map_err(|message| StructuralError::InvalidPrimitive {
                    owner: K::descriptor().name,
                    message,
                })
            }
            None => Ok(()),
        }
    }
}

impl<K: PrimitiveKind> HasId for Primitive<K> {
    fn id(&self) -> Option<&str> {
        self.element.id.as_deref()
    }
}

impl<K: PrimitiveKind> HasExtensions for Primitive<K> {
    fn extension(&self) -> &[Extension] {
        &self.element.extension
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimitiveBuilder<K: PrimitiveKind> {
    element: ElementBaseBuilder,
    value: Option<K::Value>,
    kind: PhantomData<K>,
}

impl<K: PrimitiveKind> Default for PrimitiveBuilder<K> {
    fn default() -> Self {
        Self {
            element: ElementBaseBuilder::default(),
            value: None,
            kind: PhantomData,
        }
    }
}

impl<K: PrimitiveKind> PrimitiveBuilder<K> {
    pub fn value(mut self, value: impl Into<K::Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }
}

impl<K: PrimitiveKind> ElementBuilder for PrimitiveBuilder<K> {
    fn element_mut(&mut self) -> &mut ElementBaseBuilder {
        &mut self.element
    }
}

impl<K: PrimitiveKind> NodeBuilder for PrimitiveBuilder<K> {
    type Node = Primitive<K>;

    fn assemble(&self) -> BuildResult<Primitive<K>> {
        Ok(Primitive {
            element: self.element.finish(K::descriptor().name)?,
            value: self.value.clone(),
            kind: PhantomData,
        })
    }
}

impl<K: PrimitiveKind> From<&Primitive<K>> for PrimitiveBuilder<K> {
    fn from(node: &Primitive<K>) -> Self {
        Self {
            element: ElementBaseBuilder::from(&node.element),
            value: node.value.clone(),
            kind: PhantomData,
        }
    }
}

macro_rules! primitive_kind {
    ($kind:ident, $descriptor:ident, $name:literal) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $kind;

        pub static $descriptor: TypeDescriptor =
            TypeDescriptor::new($name, TypeKind::Primitive, &PRIMITIVE_FIELDS);
    };
}

fn text(value: &str) -> PrimitiveValue<'_> {
    PrimitiveValue::Text(Cow::Borrowed(value))
}

primitive_kind!(BooleanKind, BOOLEAN, "boolean");

impl PrimitiveKind for BooleanKind {
    type Value = bool;

    fn descriptor() -> &'static TypeDescriptor {
        &BOOLEAN
    }

    fn payload(value: &bool) -> PrimitiveValue<'_> {
        PrimitiveValue::Boolean(*value)
    }
}

primitive_kind!(IntegerKind, INTEGER, "integer");

impl PrimitiveKind for IntegerKind {
    type Value = i32;

    fn descriptor() -> &'static TypeDescriptor {
        &INTEGER
    }

    fn payload(value: &i32) -> PrimitiveValue<'_> {
        PrimitiveValue::Integer(i64::from(*value))
    }
}

primitive_kind!(PositiveIntKind, POSITIVE_INT, "positiveInt");

impl PrimitiveKind for PositiveIntKind {
    type Value = u32;

    fn descriptor() -> &'static TypeDescriptor {
        &POSITIVE_INT
    }

    fn payload(value: &u32) -> PrimitiveValue<'_> {
        PrimitiveValue::Integer(i64::from(*value))
    }

    fn check(value: &u32, _config: &ValidationConfig) -> Result<(), String> {
        syntax::check_positive_int(*value)
    }
}

primitive_kind!(UnsignedIntKind, UNSIGNED_INT, "unsignedInt");

impl PrimitiveKind for UnsignedIntKind {
    type Value = u32;

    fn descriptor() -> &'static TypeDescriptor {
        &UNSIGNED_INT
    }

    fn payload(value: &u32) -> PrimitiveValue<'_> {
        PrimitiveValue::Integer(i64::from(*value))
    }
}

primitive_kind!(DecimalKind, DECIMAL, "decimal");

impl PrimitiveKind for DecimalKind {
    type Value = Decimal;

    fn descriptor() -> &'static TypeDescriptor {
        &DECIMAL
    }

    fn payload(value: &Decimal) -> PrimitiveValue<'_> {
        PrimitiveValue::Decimal(*value)
    }
}

primitive_kind!(StringKind, STRING, "string");

impl PrimitiveKind for StringKind {
    type Value = String;

    fn descriptor() -> &'static TypeDescriptor {
        &STRING
    }

    fn payload(value: &String) -> PrimitiveValue<'_> {
        text(value)
    }

    fn check(value: &String, config: &ValidationConfig) -> Result<(), String> {
        syntax::check_string(value, config)
    }
}

primitive_kind!(MarkdownKind, MARKDOWN, "markdown");

impl PrimitiveKind for MarkdownKind {
    type Value = String;

    fn descriptor() -> &'static TypeDescriptor {
        &MARKDOWN
    }

    fn payload(value: &String) -> PrimitiveValue<'_> {
        text(value)
    }

    fn check(value: &String, config: &ValidationConfig) -> Result<(), String> {
        syntax::check_string(value, config)
    }
}

primitive_kind!(CodeKind, CODE, "code");

impl PrimitiveKind for CodeKind {
    type Value = String;

    fn descriptor() -> &'static TypeDescriptor {
        &CODE
    }

    fn payload(value: &String) -> PrimitiveValue<'_> {
        text(value)
    }

    fn check(value: &String, config: &ValidationConfig) -> Result<(), String> {
        syntax::check_code(value, config)
    }
}

primitive_kind!(IdKind, ID_TYPE, "id");

impl PrimitiveKind for IdKind {
    type Value = String;

    fn descriptor() -> &'static TypeDescriptor {
        &ID_TYPE
    }

    fn payload(value: &String) -> PrimitiveValue<'_> {
        text(value)
    }

    fn check(value: &String, _config: &ValidationConfig) -> Result<(), String> {
        syntax::check_id(value)
    }
}

primitive_kind!(UriKind, URI, "uri");

impl PrimitiveKind for UriKind {
    type Value = String;

    fn descriptor() -> &'static TypeDescriptor {
        &URI
    }

    fn payload(value: &String) -> PrimitiveValue<'_> {
        text(value)
    }

    fn check(value: &String, config: &ValidationConfig) -> Result<(), String> {
        syntax::check_uri(value, config)
    }
}

primitive_kind!(CanonicalKind, CANONICAL, "canonical");

impl PrimitiveKind for CanonicalKind {
    type Value = String;

    fn descriptor() -> &'static TypeDescriptor {
        &CANONICAL
    }

    fn payload(value: &String) -> PrimitiveValue<'_> {
        text(value)
    }

    fn check(value: &String, config: &ValidationConfig) -> Result<(), String> {
        syntax::check_uri(value, config)
    }
}

primitive_kind!(DateKind, DATE, "date");

impl PrimitiveKind for DateKind {
    type Value = PartialDate;

    fn descriptor() -> &'static TypeDescriptor {
        &DATE
    }

    fn payload(value: &PartialDate) -> PrimitiveValue<'_> {
        PrimitiveValue::Text(Cow::Owned(value.to_string()))
    }

    fn check(value: &PartialDate, _config: &ValidationConfig) -> Result<(), String> {
        syntax::check_date(value)
    }
}

primitive_kind!(DateTimeKind, DATE_TIME, "dateTime");

impl PrimitiveKind for DateTimeKind {
    type Value = PartialDateTime;

    fn descriptor() -> &'static TypeDescriptor {
        &DATE_TIME
    }

    fn payload(value: &PartialDateTime) -> PrimitiveValue<'_> {
        PrimitiveValue::Text(Cow::Owned(value.to_string()))
    }

    fn check(value: &PartialDateTime, _config: &ValidationConfig) -> Result<(), String> {
        syntax::check_date_time(value)
    }
}

primitive_kind!(InstantKind, INSTANT, "instant");

impl PrimitiveKind for InstantKind {
    type Value = chrono::DateTime<FixedOffset>;

    fn descriptor() -> &'static TypeDescriptor {
        &INSTANT
    }

    fn payload(value: &chrono::DateTime<FixedOffset>) -> PrimitiveValue<'_> {
        PrimitiveValue::Text(Cow::Owned(
            value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ))
    }

    fn check(
        value: &chrono::DateTime<FixedOffset>,
        _config: &ValidationConfig,
    ) -> Result<(), String> {
        syntax::check_instant(value)
    }
}

pub type Boolean = Primitive<BooleanKind>;
pub type Integer = Primitive<IntegerKind>;
pub type PositiveInt = Primitive<PositiveIntKind>;
pub type UnsignedInt = Primitive<UnsignedIntKind>;
pub type FhirDecimal = Primitive<DecimalKind>;
pub type FhirString = Primitive<StringKind>;
pub type Markdown = Primitive<MarkdownKind>;
pub type Code = Primitive<CodeKind>;
pub type Id = Primitive<IdKind>;
pub type Uri = Primitive<UriKind>;
pub type Canonical = Primitive<CanonicalKind>;
pub type Date = Primitive<DateKind>;
pub type DateTime = Primitive<DateTimeKind>;
pub type Instant = Primitive<InstantKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HasChildren;

    #[test]
    fn type_names_come_from_the_kind() {
        assert_eq!(Code::of("final").descriptor().name, "code");
        assert_eq!(DateTime::of(PartialDate::Year(2020)).descriptor().name, "dateTime");
        assert_eq!(Boolean::of(true).descriptor().name, "boolean");
    }

    #[test]
    fn value_counts_as_content() {
        assert!(FhirString::of("x").has_children());
        let empty = FhirString::builder().assemble().unwrap();
        assert!(!empty.has_children());
    }

    #[test]
    fn intrinsic_check_uses_kind_rules() {
        let config = ValidationConfig::default();
        assert!(PositiveInt::of(0u32).check_intrinsic(&config).is_err());
        assert!(UnsignedInt::of(0u32).check_intrinsic(&config).is_ok());
        assert!(Id::of("bad id").check_intrinsic(&config).is_err());
    }
}
