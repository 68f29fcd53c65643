//! Iterative refinement.
//!
//! Round 0 searches the raw records. Every later round encodes the previous
//! constraints as pseudo-records (one token per field), searches those over
//! the alphabetically sorted field set, and decodes the result. A round is
//! adopted only when it is strictly shorter; the first round that is not
//! ends the refinement, as does reaching `max_rounds`.

use cdm_model::{ConstraintList, FieldName, MinimiseOptions, RecordSet};
use tracing::{debug, info, info_span};

use crate::codec::{decode_constraints, encode_constraints};
use crate::error::Result;
use crate::search::{SearchObserver, minimise};

/// Statistics for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStats {
    pub round: usize,
    /// Records (round 0) or constraints (later rounds) fed into the search.
    pub input_len: usize,
    pub output_len: usize,
    pub orders_evaluated: u64,
    pub best_order: Option<Vec<FieldName>>,
    pub adopted: bool,
}

#[derive(Debug, Clone)]
pub struct Refinement {
    /// Final constraints, in the input record set's field order.
    pub constraints: ConstraintList,
    pub rounds: Vec<RoundStats>,
}

impl Refinement {
    pub fn adopted_rounds(&self) -> usize {
        self.rounds.iter().filter(|round| round.adopted).count()
    }
}

/// Minimises `records` and refines the result until it stops shrinking.
pub fn refine(
    records: &RecordSet,
    options: &MinimiseOptions,
    observer: &dyn SearchObserver,
) -> Result<Refinement> {
    let mut rounds = Vec::new();

    let first = info_span!("round", round = 0).in_scope(|| {
        info!(records = records.len(), "minimising records");
        minimise(records, options, observer)
    })?;
    rounds.push(RoundStats {
        round: 0,
        input_len: records.len(),
        output_len: first.constraints.len(),
        orders_evaluated: first.orders_evaluated,
        best_order: first.best_order,
        adopted: true,
    });
    let mut constraints = first.constraints;

    let mut sorted_fields = records.fields().to_vec();
    sorted_fields.sort();

    for round in 1..=options.max_rounds {
        if constraints.is_empty() {
            break;
        }
        let span = info_span!("round", round);
        let _guard = span.enter();

        let mut encoded = encode_constraints(&constraints)?.reordered(&sorted_fields)?;
        encoded.sort();
        let outcome = minimise(&encoded, options, observer)?;
        let next = decode_constraints(&outcome.constraints)?.reordered(records.fields())?;

        let adopted = next.len() < constraints.len();
        rounds.push(RoundStats {
            round,
            input_len: constraints.len(),
            output_len: next.len(),
            orders_evaluated: outcome.orders_evaluated,
            best_order: outcome.best_order,
            adopted,
        });
        if !adopted {
            info!(
                previous = constraints.len(),
                candidate = next.len(),
                "no further reduction, stopping"
            );
            break;
        }
        info!(
            from = constraints.len(),
            to = next.len(),
            "constraint list reduced"
        );
        constraints = next;
    }

    if options.verify_lossless {
        cdm_validate::check_lossless(records, &constraints)?;
        debug!(constraints = constraints.len(), "lossless check passed");
    }

    Ok(Refinement {
        constraints,
        rounds,
    })
}
