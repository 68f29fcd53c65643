//! Library side of the `cdm-constraints` binary.

pub mod logging;
pub mod output;
pub mod pipeline;
pub mod progress;
