//! Terminal progress for field order searches.

use std::time::Duration;

use cdm_minimise::SearchObserver;
use cdm_model::FieldName;
use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner} round {prefix} [{bar:30}] {pos}/{len} orders {msg}";

/// Drives an `indicatif` bar from search callbacks; one search per round.
pub struct SearchProgress {
    bar: ProgressBar,
    round: std::cell::Cell<usize>,
}

impl SearchProgress {
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            let bar = ProgressBar::new(0);
            if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
                bar.set_style(style.progress_chars("=> "));
            }
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        } else {
            ProgressBar::hidden()
        };
        Self {
            bar,
            round: std::cell::Cell::new(0),
        }
    }

    pub fn hidden() -> Self {
        Self::new(false)
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl SearchObserver for SearchProgress {
    fn search_started(&self, total_orders: u64) {
        self.bar.set_prefix(self.round.get().to_string());
        self.bar.set_length(total_orders);
        self.bar.set_position(0);
        self.bar.set_message("");
    }

    fn order_evaluated(&self, _index: u64, _order: &[FieldName], _constraints: usize) {
        self.bar.inc(1);
    }

    fn improved(&self, _index: u64, _order: &[FieldName], constraints: usize) {
        self.bar.set_message(format!("best {constraints}"));
    }

    fn search_finished(&self, _orders_evaluated: u64) {
        self.round.set(self.round.get() + 1);
    }
}
