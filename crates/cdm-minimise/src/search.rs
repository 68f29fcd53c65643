//! Field order search.
//!
//! A [`SearchStrategy`] supplies candidate field orders; [`search`] runs each
//! through the single-pass merge and keeps the first order whose constraint
//! list is strictly shorter than the best so far. The starting best is the
//! record count, so an input that no order can compact comes back as
//! singleton constraints.

use cdm_model::{ConstraintList, FieldName, MinimiseOptions, RecordSet, SearchStrategyKind};
use tracing::{debug, trace};

use crate::error::{MinimiseError, Result};
use crate::merge::merge_unchecked;
use crate::permutations::{Permutations, permutation_count};

/// Source of candidate field orders.
///
/// Iteration order is part of the observable behaviour: ties keep the
/// first order found.
pub trait SearchStrategy {
    fn name(&self) -> &'static str;

    /// Number of orders [`SearchStrategy::orders`] yields for `field_count` fields.
    fn order_count(&self, field_count: usize) -> u64;

    /// Candidate orders as permutations of `0..field_count`.
    fn orders(&self, field_count: usize) -> Box<dyn Iterator<Item = Vec<usize>>>;
}

/// Every permutation, in lexicographic index order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSearch;

impl SearchStrategy for ExhaustiveSearch {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn order_count(&self, field_count: usize) -> u64 {
        permutation_count(field_count)
    }

    fn orders(&self, field_count: usize) -> Box<dyn Iterator<Item = Vec<usize>>> {
        Box::new(Permutations::new(field_count))
    }
}

/// One order per field: the field moved to the trailing position, the rest
/// kept in their given order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingFieldSearch;

impl SearchStrategy for TrailingFieldSearch {
    fn name(&self) -> &'static str {
        "trailing_field"
    }

    fn order_count(&self, field_count: usize) -> u64 {
        field_count as u64
    }

    fn orders(&self, field_count: usize) -> Box<dyn Iterator<Item = Vec<usize>>> {
        Box::new((0..field_count).rev().map(move |trailing| {
            (0..field_count)
                .filter(|&idx| idx != trailing)
                .chain(std::iter::once(trailing))
                .collect()
        }))
    }
}

/// Resolves the configured strategy.
pub fn strategy_for(kind: SearchStrategyKind) -> Box<dyn SearchStrategy> {
    match kind {
        SearchStrategyKind::Exhaustive => Box::new(ExhaustiveSearch),
        SearchStrategyKind::TrailingField => Box::new(TrailingFieldSearch),
    }
}

/// Progress and cancellation hook for long searches.
///
/// Purely observational: nothing an observer does changes which order wins,
/// except that cancellation aborts the search with [`MinimiseError::Cancelled`].
pub trait SearchObserver {
    fn search_started(&self, _total_orders: u64) {}

    fn order_evaluated(&self, _index: u64, _order: &[FieldName], _constraints: usize) {}

    fn improved(&self, _index: u64, _order: &[FieldName], _constraints: usize) {}

    fn search_finished(&self, _orders_evaluated: u64) {}

    /// Polled before each order is evaluated.
    fn is_cancelled(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Result of one field order search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub constraints: ConstraintList,
    /// Winning order, `None` when no order beat the singleton baseline.
    pub best_order: Option<Vec<FieldName>>,
    pub orders_evaluated: u64,
    /// The target constraint count was reached before all orders were tried.
    pub stopped_early: bool,
}

/// Searches field orders of `records` with the strategy selected in `options`.
pub fn minimise(
    records: &RecordSet,
    options: &MinimiseOptions,
    observer: &dyn SearchObserver,
) -> Result<SearchOutcome> {
    let strategy = strategy_for(options.strategy);
    search(strategy.as_ref(), records, options, observer)
}

pub fn search(
    strategy: &dyn SearchStrategy,
    records: &RecordSet,
    options: &MinimiseOptions,
    observer: &dyn SearchObserver,
) -> Result<SearchOutcome> {
    let field_count = records.fields().len();
    if field_count == 0 {
        return Err(MinimiseError::EmptyFieldSet);
    }
    if field_count > options.max_fields {
        return Err(MinimiseError::TooManyFields {
            count: field_count,
            max: options.max_fields,
        });
    }

    let mut outcome = SearchOutcome {
        constraints: records.to_singletons(),
        best_order: None,
        orders_evaluated: 0,
        stopped_early: false,
    };
    if records.is_empty() {
        return Ok(outcome);
    }

    observer.search_started(strategy.order_count(field_count));
    let mut best_len = records.len();
    for (index, order) in strategy.orders(field_count).enumerate() {
        if observer.is_cancelled() {
            return Err(MinimiseError::Cancelled);
        }
        let index = index as u64;
        let candidate = merge_unchecked(&order, records)?;
        let names = order_names(records, &order);
        outcome.orders_evaluated += 1;
        trace!(
            strategy = strategy.name(),
            order = ?names,
            constraints = candidate.len(),
            "field order evaluated"
        );
        observer.order_evaluated(index, &names, candidate.len());

        if candidate.len() < best_len {
            debug!(
                order = ?names,
                constraints = candidate.len(),
                previous_best = best_len,
                "field order improved"
            );
            observer.improved(index, &names, candidate.len());
            best_len = candidate.len();
            outcome.constraints = candidate;
            outcome.best_order = Some(names);
            if options
                .target_constraints
                .is_some_and(|target| best_len <= target)
            {
                debug!(constraints = best_len, "target constraint count reached");
                outcome.stopped_early = true;
                break;
            }
        }
    }
    observer.search_finished(outcome.orders_evaluated);

    Ok(outcome)
}

fn order_names(records: &RecordSet, order: &[usize]) -> Vec<FieldName> {
    order
        .iter()
        .map(|&idx| records.fields()[idx].clone())
        .collect()
}
