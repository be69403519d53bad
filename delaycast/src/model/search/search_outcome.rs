use delaycast_core::model::outcome::{Ranking, VariantResult};
use serde::Serialize;

/// result of searching the departure shifts of one train.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub train_id: String,
    /// number of variants simulated, including those without a total delay
    pub variant_count: usize,
    /// simulated variants in candidate order
    pub variants: Vec<VariantResult>,
    pub ranking: Ranking,
    /// the variant with the least total delay, if any variant has one
    pub best: Option<VariantResult>,
}

impl SearchOutcome {
    pub fn new(train_id: &str, variants: Vec<VariantResult>) -> SearchOutcome {
        let ranking = Ranking::new(variants.clone());
        let best = ranking.best().cloned();
        SearchOutcome {
            train_id: train_id.to_string(),
            variant_count: variants.len(),
            variants,
            ranking,
            best,
        }
    }
}
