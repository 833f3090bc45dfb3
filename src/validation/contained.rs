//! Resource-level rules over the whole tree: `dom-2` and local references.

use std::collections::HashMap;

use crate::core::ValidationConfig;
use crate::error::{BuildResult, StructuralError};
use crate::model::Reference;
use crate::types::{FieldValue, PrimitiveValue, Visitable};
use crate::validation::reference::{ReferenceTarget, allows, literal_target};
use crate::visitor::{Location, VisitFlow, Visitor, walk};

const CONTAINED: &str = "contained";

fn id_of(node: &dyn Visitable) -> Option<String> {
    node.fields()
        .into_iter()
        .find(|field| field.name() == "id")
        .and_then(|field| match field.value {
            FieldValue::Primitive(PrimitiveValue::Text(id)) => Some(id.into_owned()),
            _ => None,
        })
}

struct ContainedChecker<'a> {
    root: &'a dyn Visitable,
    /// contained resource id → resource type
    targets: HashMap<String, &'static str>,
    check_references: bool,
    parents: Vec<&'a dyn Visitable>,
    contained_depth: usize,
    error: Option<StructuralError>,
}

impl<'a> ContainedChecker<'a> {
    fn check_local(&self, at: Location, reference: &Reference) -> BuildResult<()> {
        let Some(ReferenceTarget::Local(id)) = reference.literal().map(literal_target) else {
            return Ok(());
        };
        let Some(parent) = self.parents.last() else {
            return Ok(());
        };
        // `#` names the container, which only exists inside a contained resource
        let resolved = if id.is_empty() {
            (self.contained_depth > 0).then(|| self.root.type_name())
        } else {
            self.targets.get(id).copied()
        };
        let Some(resource_type) = resolved else {
            tracing::trace!(
                owner = parent.type_name(),
                field = at.name,
                reference = id,
                "local reference does not resolve, skipping type check"
            );
            return Ok(());
        };
        let allowed = parent
            .descriptor()
            .field(at.name)
            .map(|field| field.reference_targets)
            .unwrap_or_default();
        if allows(allowed, resource_type) {
            Ok(())
        } else {
            Err(StructuralError::ReferenceTypeMismatch {
                owner: parent.type_name(),
                field: at.name,
                actual: resource_type.to_string(),
                allowed: allowed.join(", "),
            })
        }
    }
}

impl<'a> Visitor<'a> for ContainedChecker<'a> {
    fn pre_visit(&mut self, at: Location, node: &'a dyn Visitable) -> VisitFlow {
        if self.error.is_some() {
            return VisitFlow::Skip;
        }
        if at.name == CONTAINED && self.contained_depth > 0 {
            self.error = Some(StructuralError::NestedContained {
                owner: self.root.type_name(),
                resource: node.type_name(),
            });
            return VisitFlow::Skip;
        }
        if self.check_references
            && let Some(reference) = node.downcast_ref::<Reference>()
            && let Err(err) = self.check_local(at, reference)
        {
            self.error = Some(err);
            return VisitFlow::Skip;
        }
        VisitFlow::Continue
    }

    fn visit_start(&mut self, at: Location, node: &'a dyn Visitable) {
        if at.name == CONTAINED {
            self.contained_depth += 1;
        }
        self.parents.push(node);
    }

    fn post_visit(&mut self, at: Location, _node: &'a dyn Visitable) {
        self.parents.pop();
        if at.name == CONTAINED {
            self.contained_depth -= 1;
        }
    }
}

/// Rejects contained resources that contain resources themselves, and
/// type-checks `#id` references against the contained resource they name.
pub(crate) fn check_resource(root: &dyn Visitable, config: &ValidationConfig) -> BuildResult<()> {
    let targets = root
        .fields()
        .into_iter()
        .filter(|field| field.name() == CONTAINED)
        .flat_map(|field| field.value.nodes())
        .filter_map(|resource| id_of(resource).map(|id| (id, resource.type_name())))
        .collect();

    let mut checker = ContainedChecker {
        root,
        targets,
        check_references: config.check_reference_types,
        parents: Vec::new(),
        contained_depth: 0,
        error: None,
    };
    walk(root, &mut checker);
    checker.error.map_or(Ok(()), Err)
}
