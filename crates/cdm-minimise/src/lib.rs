//! Lossless minimisation of categorical record sets into constraint lists.
//!
//! The pipeline has three layers:
//!
//! - [`merge`]: one sort-and-sweep pass for a fixed field order, widening
//!   only the order's trailing field.
//! - [`search`]: runs the merge for every candidate field order and keeps
//!   the first strictly shortest result.
//! - [`refine`]: re-encodes constraints as pseudo-records with [`codec`]
//!   and searches again until the list stops shrinking.

pub mod codec;
pub mod error;
pub mod merge;
pub mod permutations;
pub mod refine;
pub mod search;

pub use codec::{
    CODEC_VERSION, CodecError, decode_constraints, decode_token, decode_tokens,
    encode_constraints, encode_values,
};
pub use error::{MinimiseError, Result};
pub use merge::merge;
pub use permutations::{Permutations, permutation_count};
pub use refine::{Refinement, RoundStats, refine};
pub use search::{
    ExhaustiveSearch, NoopObserver, SearchObserver, SearchOutcome, SearchStrategy,
    TrailingFieldSearch, minimise, search, strategy_for,
};
