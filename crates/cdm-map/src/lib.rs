//! Publishing minimised constraints in external terms.
//!
//! [`DomainMapper`] renames internal fields, translates their codes through a
//! [`Vocabulary`] and adds the `day` values implied by each constraint's
//! reporting frequency, splitting by month length where needed.

pub mod calendar;
pub mod error;
pub mod mapper;
pub mod time_inputs;
pub mod vocabulary;

pub use calendar::{day_values, expand_by_month_length, feb_years_by_length};
pub use error::{MapError, Result};
pub use mapper::DomainMapper;
pub use time_inputs::add_time_inputs;
pub use vocabulary::{FIELD_RENAMES, Vocabulary, external_name};
