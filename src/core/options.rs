use std::fmt;

use crate::core::config::ValidationConfig;
use crate::terminology::TerminologyService;
use crate::validation::ConstraintEvaluator;

/// Everything a build needs besides the staged values.
#[derive(Clone, Default)]
pub struct BuildOptions<'a> {
    pub config: ValidationConfig,
    pub terminology: Option<&'a dyn TerminologyService>,
    pub evaluator: Option<&'a dyn ConstraintEvaluator>,
}

impl<'a> BuildOptions<'a> {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            terminology: None,
            evaluator: None,
        }
    }

    /// Options for input that is already known to be valid.
    pub fn trusted() -> Self {
        Self::new(ValidationConfig::disabled())
    }

    pub fn with_terminology(mut self, terminology: &'a dyn TerminologyService) -> Self {
        self.terminology = Some(terminology);
        self
    }

    pub fn with_evaluator(mut self, evaluator: &'a dyn ConstraintEvaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn is_trusted(&self) -> bool {
        !self.config.enabled
    }
}

impl fmt::Debug for BuildOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildOptions")
            .field("config", &self.config)
            .field("terminology", &self.terminology.is_some())
            .field("evaluator", &self.evaluator.is_some())
            .finish()
    }
}
