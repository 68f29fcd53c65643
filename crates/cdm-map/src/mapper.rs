use tracing::{debug, info_span};

use cdm_model::ConstraintMap;

use crate::error::Result;
use crate::time_inputs::add_time_inputs;
use crate::vocabulary::Vocabulary;

/// Translates minimised constraints into the published vocabulary.
#[derive(Debug, Clone)]
pub struct DomainMapper {
    vocabulary: Vocabulary,
}

impl DomainMapper {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Maps one constraint; calendar expansion may yield several.
    pub fn map_constraint(&self, constraint: &ConstraintMap) -> Result<Vec<ConstraintMap>> {
        let translated = self.vocabulary.translate(constraint)?;
        add_time_inputs(translated)
    }

    pub fn map_constraints(&self, constraints: &[ConstraintMap]) -> Result<Vec<ConstraintMap>> {
        let span = info_span!("map", constraints = constraints.len());
        let _guard = span.enter();
        let mut out = Vec::with_capacity(constraints.len());
        for constraint in constraints {
            out.extend(self.map_constraint(constraint)?);
        }
        debug!(input = constraints.len(), output = out.len(), "mapped constraints");
        Ok(out)
    }
}
