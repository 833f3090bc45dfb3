use std::any::Any;

use crate::core::ValidationConfig;
use crate::error::BuildResult;
use crate::model::{Condition, Observation, Patient, SupplyDelivery};
use crate::types::{Field, HasId, TypeDescriptor, Visitable};

/// A resource held in another resource's `contained` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainedResource {
    Patient(Patient),
    Condition(Condition),
    Observation(Observation),
    SupplyDelivery(SupplyDelivery),
}

impl ContainedResource {
    pub fn resource(&self) -> &dyn Visitable {
        match self {
            Self::Patient(resource) => resource,
            Self::Condition(resource) => resource,
            Self::Observation(resource) => resource,
            Self::SupplyDelivery(resource) => resource,
        }
    }

    pub fn resource_type(&self) -> &'static str {
        self.resource().type_name()
    }
}

impl HasId for ContainedResource {
    fn id(&self) -> Option<&str> {
        match self {
            Self::Patient(resource) => resource.id(),
            Self::Condition(resource) => resource.id(),
            Self::Observation(resource) => resource.id(),
            Self::SupplyDelivery(resource) => resource.id(),
        }
    }
}

// Delegates wholesale, so a contained entry walks and downcasts as the
// resource it wraps.
impl Visitable for ContainedResource {
    fn descriptor(&self) -> &'static TypeDescriptor {
        self.resource().descriptor()
    }

    fn fields(&self) -> Vec<Field<'_>> {
        self.resource().fields()
    }

    fn as_any(&self) -> &dyn Any {
        self.resource().as_any()
    }

    fn check_intrinsic(&self, config: &ValidationConfig) -> BuildResult<()> {
        self.resource().check_intrinsic(config)
    }
}
