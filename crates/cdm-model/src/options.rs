//! Configuration options for constraint minimisation.

use serde::{Deserialize, Serialize};

/// Default cap on refinement rounds.
pub const DEFAULT_MAX_ROUNDS: usize = 200;

/// Default cap on the number of fields the exhaustive search accepts (8! orders).
pub const DEFAULT_MAX_FIELDS: usize = 8;

/// How field orders are chosen for each search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategyKind {
    /// Every permutation of the field set.
    #[default]
    Exhaustive,
    /// One order per field, with that field moved to the trailing position.
    TrailingField,
}

/// Options controlling the search and refinement rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinimiseOptions {
    /// Rounds of encode/re-minimise/decode after round 0.
    pub max_rounds: usize,

    /// Upper bound on field count; larger inputs are rejected before searching.
    pub max_fields: usize,

    /// Stop a search as soon as the best list is at most this long.
    ///
    /// Dataset-specific performance knob; off unless set.
    pub target_constraints: Option<usize>,

    /// Field order search strategy.
    pub strategy: SearchStrategyKind,

    /// Expand the final constraints and compare them with the input records.
    pub verify_lossless: bool,
}

impl Default for MinimiseOptions {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            max_fields: DEFAULT_MAX_FIELDS,
            target_constraints: None,
            strategy: SearchStrategyKind::default(),
            verify_lossless: true,
        }
    }
}

impl MinimiseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_max_fields(mut self, fields: usize) -> Self {
        self.max_fields = fields;
        self
    }

    #[must_use]
    pub fn with_target_constraints(mut self, target: Option<usize>) -> Self {
        self.target_constraints = target;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: SearchStrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_verify_lossless(mut self, enable: bool) -> Self {
        self.verify_lossless = enable;
        self
    }
}
