pub mod condition;
pub mod contained;
pub mod observation;
pub mod patient;
pub mod supply_delivery;

pub use condition::{
    Condition, ConditionBuilder, ConditionOnset, ConditionStage, ConditionStageBuilder,
};
pub use contained::ContainedResource;
pub use observation::{
    Observation, ObservationBuilder, ObservationComponent, ObservationComponentBuilder,
    ObservationEffective,
};
pub use patient::{Patient, PatientBuilder, PatientDeceased, PatientLink, PatientLinkBuilder};
pub use supply_delivery::{
    SuppliedItem, SuppliedItemBuilder, SuppliedItemItem, SupplyDelivery, SupplyDeliveryBuilder,
    SupplyDeliveryOccurrence,
};
