//! Error types for loading and joining survey tables
//!
//! Only load-time problems are errors. Unmatched join keys, null required
//! fields and undefined ratios are data, not failures, and never surface here.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{table}: source file not found at {path:?}")]
    MissingFile { table: String, path: PathBuf },

    #[error("{table}: failed to read {path:?}: {source}")]
    Read {
        table: String,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("{table}: cannot parse '{value}' in column '{column}' (row {row}) as a date")]
    UnparseableDate {
        table: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("{context}: missing required column '{column}'. Available columns: {available:?}")]
    MissingColumn {
        context: String,
        column: String,
        available: Vec<String>,
    },

    #[error("{context}: column '{column}' has unsupported type {dtype}")]
    UnsupportedType {
        context: String,
        column: String,
        dtype: String,
    },

    #[error("failed to read config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid period granularity '{0}' (expected Y, M or D)")]
    InvalidPeriod(String),

    #[error("failed to write {path:?}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl PipelineError {
    /// True for failures raised while building a `SurveyData`.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingFile { .. }
                | PipelineError::Read { .. }
                | PipelineError::UnparseableDate { .. }
                | PipelineError::MissingColumn { .. }
                | PipelineError::UnsupportedType { .. }
        )
    }
}
