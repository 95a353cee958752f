//! Reef Survey Pipeline
//!
//! Joins coral-reef monitoring extracts (locations, survey events, benthic
//! frames, rugosity transects, fish counts, juvenile colonies) into
//! analysis-ready tables with time, location and derived measurements.
//!
//! Layout:
//! - `utils/`: Id and date normalization, period handling, frame helpers
//! - `data`: Loading the source extracts with Polars
//! - `pipeline/`: The join pipelines and the `SurveyPipeline` coordinator
//! - `derived`: Heterogeneity, density and colony size
//! - `reporting/`: Severity scores, summaries and CSV export

pub mod config;
pub mod data;
pub mod derived;
pub mod error;
pub mod pipeline;
pub mod reporting;
pub mod schema;
pub mod utils;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use data::{RawTables, SourceTable, SurveyData};
pub use error::{PipelineError, Result};
pub use pipeline::SurveyPipeline;
pub use utils::{Period, PeriodGranularity};
