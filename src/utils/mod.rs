//! Utility modules for the survey pipeline
//!
//! - Normalization: Id and date coercion applied to every source table
//! - Period: Calendar periods and survey date parsing
//! - Frame ops: Projection, joins and filters with column validation

pub mod frame_ops;
pub mod normalization;
pub mod period;

// Re-export commonly used types
pub use frame_ops::{drop_nulls_in, inner_join, project};
pub use normalization::{preprocess, NormalizeOptions};
pub use period::{parse_survey_date, Period, PeriodGranularity};
