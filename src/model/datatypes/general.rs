use std::any::Any;

use crate::error::BuildResult;
use crate::model::base::{ElementBase, ElementBaseBuilder, element_node};
use crate::model::{Code, DateTime, FhirDecimal, FhirString, Uri};
use crate::types::descriptor::{EXTENSION, ID};
use crate::types::{
    BindingDescriptor, BindingStrength, ConstraintDescriptor, Field, FieldDescriptor, FieldValue,
    TypeDescriptor, TypeKind, Visitable,
};
use crate::validation::NodeBuilder;

pub static QUANTITY_COMPARATOR: BindingDescriptor = BindingDescriptor::new(
    "QuantityComparator",
    BindingStrength::Required,
    "http://hl7.org/fhir/ValueSet/quantity-comparator|4.0.1",
)
.system("http://hl7.org/fhir/quantity-comparator")
.codes(&["<", "<=", ">=", ">"]);

pub static QUANTITY: TypeDescriptor =
    TypeDescriptor::new("Quantity", TypeKind::Complex, &QUANTITY_FIELDS).constraints(&[
        ConstraintDescriptor::error(
            "qty-3",
            "If a code for the unit is present, the system SHALL also be present",
            "code.empty() or system.exists()",
        ),
    ]);

static QUANTITY_FIELDS: [FieldDescriptor; 7] = [
    ID,
    EXTENSION,
    FieldDescriptor::optional("value").summary(),
    FieldDescriptor::optional("comparator")
        .bound(&QUANTITY_COMPARATOR)
        .summary(),
    FieldDescriptor::optional("unit").summary(),
    FieldDescriptor::optional("system").summary(),
    FieldDescriptor::optional("code").summary(),
];

/// A measured amount, optionally coded with a unit system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quantity {
    element: ElementBase,
    value: Option<FhirDecimal>,
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

impl Quantity {
    pub fn builder() -> QuantityBuilder {
        QuantityBuilder::default()
    }

    pub fn to_builder(&self) -> QuantityBuilder {
        QuantityBuilder::from(self)
    }

    pub fn value(&self) -> Option<&FhirDecimal> {
        self.value.as_ref()
    }

    pub fn comparator(&self) -> Option<&Code> {
        self.comparator.as_ref()
    }

    pub fn unit(&self) -> Option<&FhirString> {
        self.unit.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub(crate) fn system_value(&self) -> Option<&str> {
        self.system.as_ref().and_then(|system| system.as_str())
    }

    pub(crate) fn code_value(&self) -> Option<&str> {
        self.code.as_ref().and_then(|code| code.as_str())
    }
}

impl Visitable for Quantity {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &QUANTITY
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension] = self.element.field_values();
        Field::zip(
            &QUANTITY_FIELDS,
            [
                id,
                extension,
                FieldValue::node(self.value.as_ref()),
                FieldValue::node(self.comparator.as_ref()),
                FieldValue::node(self.unit.as_ref()),
                FieldValue::node(self.system.as_ref()),
                FieldValue::node(self.code.as_ref()),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QuantityBuilder {
    element: ElementBaseBuilder,
    value: Option<FhirDecimal>,
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

impl QuantityBuilder {
    pub fn value(mut self, value: impl Into<Option<FhirDecimal>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn comparator(mut self, comparator: impl Into<Option<Code>>) -> Self {
        self.comparator = comparator.into();
        self
    }

    pub fn unit(mut self, unit: impl Into<Option<FhirString>>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn code(mut self, code: impl Into<Option<Code>>) -> Self {
        self.code = code.into();
        self
    }
}

impl NodeBuilder for QuantityBuilder {
    type Node = Quantity;

    fn assemble(&self) -> BuildResult<Quantity> {
        Ok(Quantity {
            element: self.element.finish(QUANTITY.name)?,
            value: self.value.clone(),
            comparator: self.comparator.clone(),
            unit: self.unit.clone(),
            system: self.system.clone(),
            code: self.code.clone(),
        })
    }
}

impl From<&Quantity> for QuantityBuilder {
    fn from(node: &Quantity) -> Self {
        Self {
            element: ElementBaseBuilder::from(&node.element),
            value: node.value.clone(),
            comparator: node.comparator.clone(),
            unit: node.unit.clone(),
            system: node.system.clone(),
            code: node.code.clone(),
        }
    }
}

element_node!(Quantity, QuantityBuilder);

pub static RANGE: TypeDescriptor = TypeDescriptor::new("Range", TypeKind::Complex, &RANGE_FIELDS)
    .constraints(&[ConstraintDescriptor::error(
        "rng-2",
        "If present, low SHALL have a lower value than high",
        "low.empty() or high.empty() or (low <= high)",
    )]);

static RANGE_FIELDS: [FieldDescriptor; 4] = [
    ID,
    EXTENSION,
    FieldDescriptor::optional("low").summary(),
    FieldDescriptor::optional("high").summary(),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    element: ElementBase,
    low: Option<Quantity>,
    high: Option<Quantity>,
}

impl Range {
    pub fn builder() -> RangeBuilder {
        RangeBuilder::default()
    }

    pub fn to_builder(&self) -> RangeBuilder {
        RangeBuilder::from(self)
    }

    pub fn low(&self) -> Option<&Quantity> {
        self.low.as_ref()
    }

    pub fn high(&self) -> Option<&Quantity> {
        self.high.as_ref()
    }
}

impl Visitable for Range {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &RANGE
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension] = self.element.field_values();
        Field::zip(
            &RANGE_FIELDS,
            [
                id,
                extension,
                FieldValue::node(self.low.as_ref()),
                FieldValue::node(self.high.as_ref()),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RangeBuilder {
    element: ElementBaseBuilder,
    low: Option<Quantity>,
    high: Option<Quantity>,
}

impl RangeBuilder {
    pub fn low(mut self, low: impl Into<Option<Quantity>>) -> Self {
        self.low = low.into();
        self
    }

    pub fn high(mut self, high: impl Into<Option<Quantity>>) -> Self {
        self.high = high.into();
        self
    }
}

impl NodeBuilder for RangeBuilder {
    type Node = Range;

    fn assemble(&self) -> BuildResult<Range> {
        Ok(Range {
            element: self.element.finish(RANGE.name)?,
            low: self.low.clone(),
            high: self.high.clone(),
        })
    }
}

impl From<&Range> for RangeBuilder {
    fn from(node: &Range) -> Self {
        Self {
            element: ElementBaseBuilder::from(&node.element),
            low: node.low.clone(),
            high: node.high.clone(),
        }
    }
}

element_node!(Range, RangeBuilder);

pub static PERIOD: TypeDescriptor = TypeDescriptor::new("Period", TypeKind::Complex, &PERIOD_FIELDS)
    .constraints(&[ConstraintDescriptor::error(
        "per-1",
        "If present, start SHALL have a lower value than end",
        "start.hasValue().not() or end.hasValue().not() or (start <= end)",
    )]);

static PERIOD_FIELDS: [FieldDescriptor; 4] = [
    ID,
    EXTENSION,
    FieldDescriptor::optional("start").summary(),
    FieldDescriptor::optional("end").summary(),
];

/// A time range defined by start and end date/time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    element: ElementBase,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl Period {
    pub fn builder() -> PeriodBuilder {
        PeriodBuilder::default()
    }

    pub fn to_builder(&self) -> PeriodBuilder {
        PeriodBuilder::from(self)
    }

    pub fn start(&self) -> Option<&DateTime> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&DateTime> {
        self.end.as_ref()
    }
}

impl Visitable for Period {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &PERIOD
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension] = self.element.field_values();
        Field::zip(
            &PERIOD_FIELDS,
            [
                id,
                extension,
                FieldValue::node(self.start.as_ref()),
                FieldValue::node(self.end.as_ref()),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PeriodBuilder {
    element: ElementBaseBuilder,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl PeriodBuilder {
    pub fn start(mut self, start: impl Into<Option<DateTime>>) -> Self {
        self.start = start.into();
        self
    }

    pub fn end(mut self, end: impl Into<Option<DateTime>>) -> Self {
        self.end = end.into();
        self
    }
}

impl NodeBuilder for PeriodBuilder {
    type Node = Period;

    fn assemble(&self) -> BuildResult<Period> {
        Ok(Period {
            element: self.element.finish(PERIOD.name)?,
            start: self.start.clone(),
            end: self.end.clone(),
        })
    }
}

impl From<&Period> for PeriodBuilder {
    fn from(node: &Period) -> Self {
        Self {
            element: ElementBaseBuilder::from(&node.element),
            start: node.start.clone(),
            end: node.end.clone(),
        }
    }
}

element_node!(Period, PeriodBuilder);
