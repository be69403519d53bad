use std::path::Path;

use clap::{Parser, Subcommand};
use delaycast_core::source::SourceConditionsResolver;
use serde::{Deserialize, Serialize};

use super::{output_ops, AppConfig, AppError};
use crate::model::search::VariantSearch;

/// Command line tool predicting how delay accumulates along a train's route
/// and which departure time minimizes it
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct DelaycastApp {
    #[command(subcommand)]
    pub op: DelaycastOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum DelaycastOperation {
    /// simulate a train at a range of shifted departure times and rank them
    /// by total predicted delay
    Search {
        /// TOML file configuring the estimator, data sources and search
        #[arg(short, long)]
        configuration_file: String,

        /// train number to fetch the schedule of
        #[arg(short, long)]
        train_id: String,

        /// step between candidate departures, overrides the configuration (e.g. "15m")
        #[arg(long)]
        shift_interval: Option<String>,

        /// how far past the published departure to search, overrides the configuration (e.g. "4h")
        #[arg(long)]
        shift_window: Option<String>,

        /// worker threads simulating variants. 0 uses one thread per core.
        #[arg(short, long)]
        parallelism: Option<usize>,

        /// location on disk to write output files. if not provided,
        /// use the current working directory.
        #[arg(short, long)]
        output_directory: Option<String>,
    },
    /// simulate a train at its published departure time
    Simulate {
        /// TOML file configuring the estimator and data sources
        #[arg(short, long)]
        configuration_file: String,

        /// train number to fetch the schedule of
        #[arg(short, long)]
        train_id: String,

        /// location on disk to write output files. if not provided,
        /// use the current working directory.
        #[arg(short, long)]
        output_directory: Option<String>,
    },
}

impl DelaycastOperation {
    pub fn run(&self) -> Result<(), AppError> {
        match self {
            DelaycastOperation::Search {
                configuration_file,
                train_id,
                shift_interval,
                shift_window,
                parallelism,
                output_directory,
            } => {
                let mut config = AppConfig::from_file(configuration_file)?;
                if let Some(interval) = shift_interval {
                    config.search.shift_interval = interval.clone();
                }
                if let Some(window) = shift_window {
                    config.search.shift_window = window.clone();
                }
                if let Some(p) = parallelism {
                    config.search.parallelism = *p;
                }
                let params = config.search.build()?;
                let estimator = config.estimator.build()?;
                let sources = config.sources.build()?;
                let resolver = SourceConditionsResolver::new(sources.weather, sources.stations);
                let search = VariantSearch::new(
                    sources.schedules.as_ref(),
                    estimator.as_ref(),
                    &resolver,
                    config.timezone,
                );
                let outcome = search.search_variants(train_id, &params)?;
                let outdir = output_path(output_directory);
                output_ops::write_search_outputs(outdir, &outcome)?;
                log::info!("wrote search results to {}", outdir.display());
                Ok(())
            }
            DelaycastOperation::Simulate {
                configuration_file,
                train_id,
                output_directory,
            } => {
                let config = AppConfig::from_file(configuration_file)?;
                let estimator = config.estimator.build()?;
                let sources = config.sources.build()?;
                let resolver = SourceConditionsResolver::new(sources.weather, sources.stations);
                let search = VariantSearch::new(
                    sources.schedules.as_ref(),
                    estimator.as_ref(),
                    &resolver,
                    config.timezone,
                );
                let variant = search.simulate_original_variant(train_id)?;
                let outdir = output_path(output_directory);
                output_ops::write_variant_outputs(outdir, train_id, &variant)?;
                log::info!("wrote simulation results to {}", outdir.display());
                Ok(())
            }
        }
    }
}

fn output_path(output_directory: &Option<String>) -> &Path {
    match output_directory {
        Some(dir) => Path::new(dir),
        None => Path::new(""),
    }
}
