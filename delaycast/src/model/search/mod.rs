//! search over uniform departure shifts of a train's schedule.
mod search_config;
mod search_outcome;
mod variant_search;

pub use search_config::{SearchConfig, SearchParameters, MAX_VARIANTS};
pub use search_outcome::SearchOutcome;
pub use variant_search::{candidate_offsets, run_variants, VariantSearch};
