use std::any::Any;

use crate::core::ValidationConfig;
use crate::error::{BuildResult, StructuralError};
use crate::model::base::{ElementBase, ElementBaseBuilder, element_node};
use crate::model::{
    Boolean, Canonical, Code, CodeableConcept, Coding, Date, DateTime, FhirDecimal, FhirString,
    Id, Identifier, Instant, Integer, Markdown, Period, PositiveInt, Quantity, Range, Reference,
    UnsignedInt, Uri,
};
use crate::types::descriptor::{EXTENSION, ID};
use crate::types::{
    ChoiceValue, ConstraintDescriptor, Field, FieldDescriptor, FieldValue, TypeDescriptor,
    TypeKind, Visitable,
};
use crate::validation::{NodeBuilder, primitive as syntax, require};

pub const DATA_ABSENT_REASON_URL: &str =
    "http://hl7.org/fhir/StructureDefinition/data-absent-reason";

/// Every type name `DataValue` can carry.
pub const DATA_VALUE_TYPES: &[&str] = &[
    "boolean",
    "integer",
    "positiveInt",
    "unsignedInt",
    "decimal",
    "string",
    "markdown",
    "code",
    "id",
    "uri",
    "canonical",
    "date",
    "dateTime",
    "instant",
    "Coding",
    "CodeableConcept",
    "Identifier",
    "Period",
    "Quantity",
    "Range",
    "Reference",
];

/// An open `value[x]`. Fields that accept only some of these alternatives
/// narrow the set through their descriptor's choice types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataValue {
    Boolean(Boolean),
    Integer(Integer),
    PositiveInt(PositiveInt),
    UnsignedInt(UnsignedInt),
    Decimal(FhirDecimal),
    String(FhirString),
    Markdown(Markdown),
    Code(Code),
    Id(Id),
    Uri(Uri),
    Canonical(Canonical),
    Date(Date),
    DateTime(DateTime),
    Instant(Instant),
    Coding(Coding),
    CodeableConcept(CodeableConcept),
    Identifier(Identifier),
    Period(Period),
    Quantity(Quantity),
    Range(Range),
    Reference(Reference),
}

macro_rules! data_value_variants {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        impl ChoiceValue for DataValue {
            fn as_node(&self) -> &dyn Visitable {
                match self {
                    $(Self::$variant(value) => value as &dyn Visitable,)*
                }
            }
        }

        $(
            impl From<$ty> for DataValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

data_value_variants!(
    Boolean(Boolean),
    Integer(Integer),
    PositiveInt(PositiveInt),
    UnsignedInt(UnsignedInt),
    Decimal(FhirDecimal),
    String(FhirString),
    Markdown(Markdown),
    Code(Code),
    Id(Id),
    Uri(Uri),
    Canonical(Canonical),
    Date(Date),
    DateTime(DateTime),
    Instant(Instant),
    Coding(Coding),
    CodeableConcept(CodeableConcept),
    Identifier(Identifier),
    Period(Period),
    Quantity(Quantity),
    Range(Range),
    Reference(Reference),
);

pub static EXTENSION_TYPE: TypeDescriptor =
    TypeDescriptor::new("Extension", TypeKind::Complex, &EXTENSION_FIELDS).constraints(&[
        ConstraintDescriptor::error(
            "ext-1",
            "Must have either extensions or value[x], not both",
            "extension.exists() != value.exists()",
        ),
    ]);

static EXTENSION_FIELDS: [FieldDescriptor; 4] = [
    ID,
    EXTENSION,
    FieldDescriptor::required_attribute("url"),
    FieldDescriptor::optional("value").choice(DATA_VALUE_TYPES),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension {
    element: ElementBase,
    url: String,
    value: Option<DataValue>,
}

impl Extension {
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    pub fn to_builder(&self) -> ExtensionBuilder {
        ExtensionBuilder::from(self)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn value(&self) -> Option<&DataValue> {
        self.value.as_ref()
    }
}

impl Visitable for Extension {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &EXTENSION_TYPE
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension] = self.element.field_values();
        Field::zip(
            &EXTENSION_FIELDS,
            [
                id,
                extension,
                FieldValue::text(Some(self.url.as_str())),
                FieldValue::choice(self.value.as_ref()),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn check_intrinsic(&self, config: &ValidationConfig) -> BuildResult<()> {
        let checked = if self.url.is_empty() {
            Err("url must not be empty".to_string())
        } else {
            syntax::check_uri(&self.url, config)
        };
        checked.map_err(|message| StructuralError::InvalidPrimitive {
            owner: EXTENSION_TYPE.name,
            message,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExtensionBuilder {
    element: ElementBaseBuilder,
    url: Option<String>,
    value: Option<DataValue>,
}

impl ExtensionBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn value(mut self, value: impl Into<DataValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }
}

impl NodeBuilder for ExtensionBuilder {
    type Node = Extension;

    fn assemble(&self) -> BuildResult<Extension> {
        Ok(Extension {
            element: self.element.finish(EXTENSION_TYPE.name)?,
            url: require(&self.url, EXTENSION_TYPE.name, "url")?,
            value: self.value.clone(),
        })
    }
}

impl From<&Extension> for ExtensionBuilder {
    fn from(node: &Extension) -> Self {
        Self {
            element: ElementBaseBuilder::from(&node.element),
            url: Some(node.url.clone()),
            value: node.value.clone(),
        }
    }
}

element_node!(Extension, ExtensionBuilder);
