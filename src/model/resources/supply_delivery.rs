use std::any::Any;

use crate::error::BuildResult;
use crate::model::base::{
    BackboneBase, BackboneBaseBuilder, ResourceBase, ResourceBaseBuilder, backbone_node,
    resource_node,
};
use crate::model::resources::patient::DOM_6;
use crate::model::{Code, CodeableConcept, DateTime, Identifier, Period, Quantity, Reference};
use crate::types::descriptor::{
    CONTAINED, EXTENSION, ID, IMPLICIT_RULES, LANGUAGE, META, MODIFIER_EXTENSION, RESOURCE_ID,
    TEXT,
};
use crate::types::{
    BindingDescriptor, BindingStrength, ChoiceValue, Field, FieldDescriptor, FieldValue,
    TypeDescriptor, TypeKind, Visitable,
};
use crate::validation::{NodeBuilder, StagedList};

pub static SUPPLY_DELIVERY_STATUS: BindingDescriptor = BindingDescriptor::new(
    "SupplyDeliveryStatus",
    BindingStrength::Required,
    "http://hl7.org/fhir/ValueSet/supplydelivery-status|4.0.1",
)
.system("http://hl7.org/fhir/supplydelivery-status")
.codes(&["in-progress", "completed", "abandoned", "entered-in-error"]);

pub static SUPPLY_DELIVERY_TYPE: BindingDescriptor = BindingDescriptor::new(
    "SupplyDeliveryType",
    BindingStrength::Required,
    "http://hl7.org/fhir/ValueSet/supplydelivery-type|4.0.1",
)
.system("http://terminology.hl7.org/CodeSystem/supply-item-type")
.codes(&["medication", "device"]);

pub static SUPPLY_ITEM: BindingDescriptor = BindingDescriptor::new(
    "SupplyDeliveryItem",
    BindingStrength::Example,
    "http://hl7.org/fhir/ValueSet/supply-item",
);

pub static SUPPLY_DELIVERY: TypeDescriptor =
    TypeDescriptor::new("SupplyDelivery", TypeKind::Resource, &SUPPLY_DELIVERY_FIELDS)
        .constraints(&[DOM_6]);

static SUPPLY_DELIVERY_FIELDS: [FieldDescriptor; 19] = [
    RESOURCE_ID,
    META,
    IMPLICIT_RULES,
    LANGUAGE,
    TEXT,
    CONTAINED,
    EXTENSION,
    MODIFIER_EXTENSION,
    FieldDescriptor::list("identifier").summary(),
    FieldDescriptor::list("basedOn")
        .references(&["SupplyRequest"])
        .summary(),
    FieldDescriptor::list("partOf")
        .references(&["SupplyDelivery", "Contract"])
        .summary(),
    FieldDescriptor::optional("status")
        .bound(&SUPPLY_DELIVERY_STATUS)
        .summary(),
    FieldDescriptor::optional("patient").references(&["Patient"]),
    FieldDescriptor::optional("type").bound(&SUPPLY_DELIVERY_TYPE),
    FieldDescriptor::optional("suppliedItem"),
    FieldDescriptor::optional("occurrence")
        .choice(&["dateTime", "Period"])
        .summary(),
    FieldDescriptor::optional("supplier").references(&[
        "Practitioner",
        "PractitionerRole",
        "Organization",
    ]),
    FieldDescriptor::optional("destination").references(&["Location"]),
    FieldDescriptor::list("receiver").references(&["Practitioner", "PractitionerRole"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SupplyDeliveryOccurrence {
    DateTime(DateTime),
    Period(Period),
}

impl ChoiceValue for SupplyDeliveryOccurrence {
    fn as_node(&self) -> &dyn Visitable {
        match self {
            Self::DateTime(value) => value,
            Self::Period(value) => value,
        }
    }
}

impl From<DateTime> for SupplyDeliveryOccurrence {
    fn from(value: DateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<Period> for SupplyDeliveryOccurrence {
    fn from(value: Period) -> Self {
        Self::Period(value)
    }
}

/// Record of a supply being delivered to a location or person.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SupplyDelivery {
    resource: ResourceBase,
    identifier: Vec<Identifier>,
    based_on: Vec<Reference>,
    part_of: Vec<Reference>,
    status: Option<Code>,
    patient: Option<Reference>,
    r#type: Option<CodeableConcept>,
    supplied_item: Option<SuppliedItem>,
    occurrence: Option<SupplyDeliveryOccurrence>,
    supplier: Option<Reference>,
    destination: Option<Reference>,
    receiver: Vec<Reference>,
}

impl SupplyDelivery {
    pub fn builder() -> SupplyDeliveryBuilder {
        SupplyDeliveryBuilder::default()
    }

    pub fn to_builder(&self) -> SupplyDeliveryBuilder {
        SupplyDeliveryBuilder::from(self)
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn based_on(&self) -> &[Reference] {
        &self.based_on
    }

    pub fn part_of(&self) -> &[Reference] {
        &self.part_of
    }

    pub fn status(&self) -> Option<&Code> {
        self.status.as_ref()
    }

    pub fn patient(&self) -> Option<&Reference> {
        self.patient.as_ref()
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn supplied_item(&self) -> Option<&SuppliedItem> {
        self.supplied_item.as_ref()
    }

    pub fn occurrence(&self) -> Option<&SupplyDeliveryOccurrence> {
        self.occurrence.as_ref()
    }

    pub fn supplier(&self) -> Option<&Reference> {
        self.supplier.as_ref()
    }

    pub fn destination(&self) -> Option<&Reference> {
        self.destination.as_ref()
    }

    pub fn receiver(&self) -> &[Reference] {
        &self.receiver
    }
}

impl Visitable for SupplyDelivery {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &SUPPLY_DELIVERY
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, meta, implicit_rules, language, text, contained, extension, modifier_extension] =
            self.resource.field_values();
        Field::zip(
            &SUPPLY_DELIVERY_FIELDS,
            [
                id,
                meta,
                implicit_rules,
                language,
                text,
                contained,
                extension,
                modifier_extension,
                FieldValue::list(&self.identifier),
                FieldValue::list(&self.based_on),
                FieldValue::list(&self.part_of),
                FieldValue::node(self.status.as_ref()),
                FieldValue::node(self.patient.as_ref()),
                FieldValue::node(self.r#type.as_ref()),
                FieldValue::node(self.supplied_item.as_ref()),
                FieldValue::choice(self.occurrence.as_ref()),
                FieldValue::node(self.supplier.as_ref()),
                FieldValue::node(self.destination.as_ref()),
                FieldValue::list(&self.receiver),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SupplyDeliveryBuilder {
    resource: ResourceBaseBuilder,
    identifier: StagedList<Identifier>,
    based_on: StagedList<Reference>,
    part_of: StagedList<Reference>,
    status: Option<Code>,
    patient: Option<Reference>,
    r#type: Option<CodeableConcept>,
    supplied_item: Option<SuppliedItem>,
    occurrence: Option<SupplyDeliveryOccurrence>,
    supplier: Option<Reference>,
    destination: Option<Reference>,
    receiver: StagedList<Reference>,
}

impl SupplyDeliveryBuilder {
    pub fn add_identifier(mut self, identifier: impl Into<Option<Identifier>>) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn identifier<I>(mut self, identifier: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Identifier>>,
    {
        self.identifier.replace(identifier);
        self
    }

    pub fn add_based_on(mut self, based_on: impl Into<Option<Reference>>) -> Self {
        self.based_on.push(based_on);
        self
    }

    pub fn based_on<I>(mut self, based_on: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Reference>>,
    {
        self.based_on.replace(based_on);
        self
    }

    pub fn add_part_of(mut self, part_of: impl Into<Option<Reference>>) -> Self {
        self.part_of.push(part_of);
        self
    }

    pub fn part_of<I>(mut self, part_of: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Reference>>,
    {
        self.part_of.replace(part_of);
        self
    }

    pub fn status(mut self, status: impl Into<Option<Code>>) -> Self {
        self.status = status.into();
        self
    }

    pub fn patient(mut self, patient: impl Into<Option<Reference>>) -> Self {
        self.patient = patient.into();
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Option<CodeableConcept>>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn supplied_item(mut self, supplied_item: impl Into<Option<SuppliedItem>>) -> Self {
        self.supplied_item = supplied_item.into();
        self
    }

    pub fn occurrence(mut self, occurrence: impl Into<SupplyDeliveryOccurrence>) -> Self {
        self.occurrence = Some(occurrence.into());
        self
    }

    pub fn clear_occurrence(mut self) -> Self {
        self.occurrence = None;
        self
    }

    pub fn supplier(mut self, supplier: impl Into<Option<Reference>>) -> Self {
        self.supplier = supplier.into();
        self
    }

    pub fn destination(mut self, destination: impl Into<Option<Reference>>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn add_receiver(mut self, receiver: impl Into<Option<Reference>>) -> Self {
        self.receiver.push(receiver);
        self
    }

    pub fn receiver<I>(mut self, receiver: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Reference>>,
    {
        self.receiver.replace(receiver);
        self
    }
}

impl NodeBuilder for SupplyDeliveryBuilder {
    type Node = SupplyDelivery;

    fn assemble(&self) -> BuildResult<SupplyDelivery> {
        let owner = SUPPLY_DELIVERY.name;
        Ok(SupplyDelivery {
            resource: self.resource.finish(owner)?,
            identifier: self.identifier.finish(owner, "identifier")?,
            based_on: self.based_on.finish(owner, "basedOn")?,
            part_of: self.part_of.finish(owner, "partOf")?,
            status: self.status.clone(),
            patient: self.patient.clone(),
            r#type: self.r#type.clone(),
            supplied_item: self.supplied_item.clone(),
            occurrence: self.occurrence.clone(),
            supplier: self.supplier.clone(),
            destination: self.destination.clone(),
            receiver: self.receiver.finish(owner, "receiver")?,
        })
    }
}

impl From<&SupplyDelivery> for SupplyDeliveryBuilder {
    fn from(node: &SupplyDelivery) -> Self {
        Self {
            resource: ResourceBaseBuilder::from(&node.resource),
            identifier: StagedList::from(&node.identifier),
            based_on: StagedList::from(&node.based_on),
            part_of: StagedList::from(&node.part_of),
            status: node.status.clone(),
            patient: node.patient.clone(),
            r#type: node.r#type.clone(),
            supplied_item: node.supplied_item.clone(),
            occurrence: node.occurrence.clone(),
            supplier: node.supplier.clone(),
            destination: node.destination.clone(),
            receiver: StagedList::from(&node.receiver),
        }
    }
}

resource_node!(SupplyDelivery, SupplyDeliveryBuilder);

pub static SUPPLIED_ITEM: TypeDescriptor = TypeDescriptor::new(
    "SupplyDelivery.SuppliedItem",
    TypeKind::Backbone,
    &SUPPLIED_ITEM_FIELDS,
);

static SUPPLIED_ITEM_FIELDS: [FieldDescriptor; 5] = [
    ID,
    EXTENSION,
    MODIFIER_EXTENSION,
    FieldDescriptor::optional("quantity"),
    FieldDescriptor::optional("item")
        .choice(&["CodeableConcept", "Reference"])
        .references(&["Medication", "Substance", "Device"])
        .bound(&SUPPLY_ITEM),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SuppliedItemItem {
    CodeableConcept(CodeableConcept),
    Reference(Reference),
}

impl ChoiceValue for SuppliedItemItem {
    fn as_node(&self) -> &dyn Visitable {
        match self {
            Self::CodeableConcept(value) => value,
            Self::Reference(value) => value,
        }
    }
}

impl From<CodeableConcept> for SuppliedItemItem {
    fn from(value: CodeableConcept) -> Self {
        Self::CodeableConcept(value)
    }
}

impl From<Reference> for SuppliedItemItem {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuppliedItem {
    backbone: BackboneBase,
    quantity: Option<Quantity>,
    item: Option<SuppliedItemItem>,
}

impl SuppliedItem {
    pub fn builder() -> SuppliedItemBuilder {
        SuppliedItemBuilder::default()
    }

    pub fn to_builder(&self) -> SuppliedItemBuilder {
        SuppliedItemBuilder::from(self)
    }

    pub fn quantity(&self) -> Option<&Quantity> {
        self.quantity.as_ref()
    }

    pub fn item(&self) -> Option<&SuppliedItemItem> {
        self.item.as_ref()
    }
}

impl Visitable for SuppliedItem {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &SUPPLIED_ITEM
    }

    fn fields(&self) -> Vec<Field<'_>> {
        let [id, extension, modifier_extension] = self.backbone.field_values();
        Field::zip(
            &SUPPLIED_ITEM_FIELDS,
            [
                id,
                extension,
                modifier_extension,
                FieldValue::node(self.quantity.as_ref()),
                FieldValue::choice(self.item.as_ref()),
            ],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SuppliedItemBuilder {
    backbone: BackboneBaseBuilder,
    quantity: Option<Quantity>,
    item: Option<SuppliedItemItem>,
}

impl SuppliedItemBuilder {
    pub fn quantity(mut self, quantity: impl Into<Option<Quantity>>) -> Self {
        self.quantity = quantity.into();
        self
    }

    pub fn item(mut self, item: impl Into<SuppliedItemItem>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn clear_item(mut self) -> Self {
        self.item = None;
        self
    }
}

impl NodeBuilder for SuppliedItemBuilder {
    type Node = SuppliedItem;

    fn assemble(&self) -> BuildResult<SuppliedItem> {
        Ok(SuppliedItem {
            backbone: self.backbone.finish(SUPPLIED_ITEM.name)?,
            quantity: self.quantity.clone(),
            item: self.item.clone(),
        })
    }
}

impl From<&SuppliedItem> for SuppliedItemBuilder {
    fn from(node: &SuppliedItem) -> Self {
        Self {
            backbone: BackboneBaseBuilder::from(&node.backbone),
            quantity: node.quantity.clone(),
            item: node.item.clone(),
        }
    }
}

backbone_node!(SuppliedItem, SuppliedItemBuilder);
