use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use delaycast_core::model::outcome::{Ranking, StopOutcome, VariantResult};
use serde::Serialize;

use super::AppError;
use crate::model::search::SearchOutcome;

pub const RANKING_FILENAME: &str = "ranking.csv";
pub const BEST_VARIANT_FILENAME: &str = "best_variant.csv";
pub const RESULT_FILENAME: &str = "result.json";
pub const VARIANT_CSV_FILENAME: &str = "variant.csv";
pub const VARIANT_JSON_FILENAME: &str = "variant.json";

/// start time and total delay of one variant.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VariantSummary {
    pub start_time_variant: Option<String>,
    pub total_delay: Option<f64>,
}

impl From<&VariantResult> for VariantSummary {
    fn from(v: &VariantResult) -> Self {
        VariantSummary {
            start_time_variant: v.start_time_variant.map(|t| t.to_rfc3339()),
            total_delay: v.total_delay,
        }
    }
}

/// a row of the ranking file.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub rank: usize,
    pub start_time_variant: Option<String>,
    pub total_delay: Option<f64>,
    pub simulated_stops: usize,
}

/// JSON report of a search: the best variant, every variant in candidate
/// order and the stop by stop trace of the best variant.
#[derive(Serialize, Debug, Clone)]
pub struct SearchReport<'a> {
    pub train_id: &'a str,
    pub variant_count: usize,
    pub best_variant: Option<VariantSummary>,
    pub all_variants: Vec<VariantSummary>,
    pub best_detail: &'a [StopOutcome],
}

impl<'a> From<&'a SearchOutcome> for SearchReport<'a> {
    fn from(outcome: &'a SearchOutcome) -> Self {
        SearchReport {
            train_id: &outcome.train_id,
            variant_count: outcome.variant_count,
            best_variant: outcome.best.as_ref().map(VariantSummary::from),
            all_variants: outcome.variants.iter().map(VariantSummary::from).collect(),
            best_detail: outcome
                .best
                .as_ref()
                .map(|b| b.outcomes.as_slice())
                .unwrap_or_default(),
        }
    }
}

/// JSON report of a single simulated variant.
#[derive(Serialize, Debug, Clone)]
pub struct VariantReport<'a> {
    pub train_id: &'a str,
    pub variant: VariantSummary,
    pub detail: &'a [StopOutcome],
}

/// writes `ranking.csv`, `best_variant.csv` and `result.json` for a search.
pub fn write_search_outputs(outdir: &Path, outcome: &SearchOutcome) -> Result<(), AppError> {
    create_directory(outdir)?;
    write_ranking_csv(&outdir.join(RANKING_FILENAME), &outcome.ranking)?;
    let best_detail = outcome
        .best
        .as_ref()
        .map(|b| b.outcomes.as_slice())
        .unwrap_or_default();
    write_outcomes_csv(&outdir.join(BEST_VARIANT_FILENAME), best_detail)?;
    write_json(&outdir.join(RESULT_FILENAME), &SearchReport::from(outcome))
}

/// writes `variant.csv` and `variant.json` for a single variant.
pub fn write_variant_outputs(
    outdir: &Path,
    train_id: &str,
    variant: &VariantResult,
) -> Result<(), AppError> {
    create_directory(outdir)?;
    write_outcomes_csv(&outdir.join(VARIANT_CSV_FILENAME), &variant.outcomes)?;
    let report = VariantReport {
        train_id,
        variant: VariantSummary::from(variant),
        detail: &variant.outcomes,
    };
    write_json(&outdir.join(VARIANT_JSON_FILENAME), &report)
}

pub fn write_ranking_csv(path: &Path, ranking: &Ranking) -> Result<(), AppError> {
    let rows = ranking.iter().enumerate().map(|(idx, v)| RankingRow {
        rank: idx + 1,
        start_time_variant: v.start_time_variant.map(|t| t.to_rfc3339()),
        total_delay: v.total_delay,
        simulated_stops: v.outcomes.len(),
    });
    write_csv(path, rows)
}

pub fn write_outcomes_csv(path: &Path, outcomes: &[StopOutcome]) -> Result<(), AppError> {
    write_csv(path, outcomes.iter())
}

fn write_csv<T, I>(path: &Path, rows: I) -> Result<(), AppError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| write_error(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| write_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| write_error(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|e| write_error(path, e))
}

fn create_directory(outdir: &Path) -> Result<(), AppError> {
    if outdir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(outdir).map_err(|e| write_error(outdir, e))
}

fn write_error<E: std::fmt::Display>(path: &Path, e: E) -> AppError {
    AppError::WriteError {
        path: PathBuf::from(path),
        message: e.to_string(),
    }
}
