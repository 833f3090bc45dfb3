use crate::core::BuildOptions;
use crate::error::{BuildResult, Result, StructuralError};
use crate::types::{ConstraintDescriptor, ConstraintSeverity, Visitable};
use crate::validation::AdvisoryWarning;

/// Evaluates the FHIRPath invariants declared on a node's type.
///
/// The crate ships no FHIRPath engine; callers plug one in through
/// [`BuildOptions::with_evaluator`]. Closures with the same signature
/// implement the trait.
pub trait ConstraintEvaluator: Send + Sync {
    /// `Ok(true)` when `node` satisfies `constraint`.
    fn evaluate(&self, node: &dyn Visitable, constraint: &ConstraintDescriptor) -> Result<bool>;
}

impl<F> ConstraintEvaluator for F
where
    F: Fn(&dyn Visitable, &ConstraintDescriptor) -> Result<bool> + Send + Sync,
{
    fn evaluate(&self, node: &dyn Visitable, constraint: &ConstraintDescriptor) -> Result<bool> {
        self(node, constraint)
    }
}

pub(crate) fn check_constraints(
    node: &dyn Visitable,
    options: &BuildOptions<'_>,
    warnings: &mut Vec<AdvisoryWarning>,
) -> BuildResult<()> {
    let descriptor = node.descriptor();
    if descriptor.constraints.is_empty() {
        return Ok(());
    }
    let Some(evaluator) = options.evaluator else {
        tracing::trace!(
            owner = descriptor.name,
            count = descriptor.constraints.len(),
            "no constraint evaluator, skipping constraints"
        );
        return Ok(());
    };

    for constraint in descriptor.constraints {
        match evaluator.evaluate(node, constraint) {
            Ok(true) => {}
            Ok(false) => match constraint.severity {
                ConstraintSeverity::Error => {
                    return Err(StructuralError::ConstraintViolation {
                        owner: descriptor.name,
                        key: constraint.key,
                        human: constraint.human,
                    });
                }
                ConstraintSeverity::Warning => warnings.push(AdvisoryWarning::constraint(
                    descriptor.name,
                    constraint.key,
                    format!("{}: {}", constraint.key, constraint.human),
                )),
            },
            Err(err) => warnings.push(AdvisoryWarning::unevaluated(
                descriptor.name,
                constraint.key,
                format!("{}: could not be evaluated: {err}", constraint.key),
            )),
        }
    }
    Ok(())
}
