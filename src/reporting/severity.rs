//! Bleaching severity classes and their ordinal scores

use polars::prelude::*;
use std::fmt;

use crate::error::Result;
use crate::schema::columns::{DISEASE_BLEACHING, SEVERITY};
use crate::utils::frame_ops::{filter_to_values, string_values};

pub const SEVERITY_NUM: &str = "Severity_Num";

/// Recorded bleaching severity of a benthic frame, mildest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    NoCoral,
    Unbleached,
    Low,
    Moderate,
    High,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::NoCoral,
        Severity::Unbleached,
        Severity::Low,
        Severity::Moderate,
        Severity::High,
        Severity::Severe,
    ];

    /// Severity for a recorded label, `None` for anything unrecognized
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label.trim())
    }

    /// Label as recorded in the benthic extract
    pub fn label(&self) -> &'static str {
        match self {
            Severity::NoCoral => "No Coral",
            Severity::Unbleached => "0%",
            Severity::Low => "1-25%",
            Severity::Moderate => "26-50%",
            Severity::High => "51-75%",
            Severity::Severe => "76-100%",
        }
    }

    /// Ordinal score, 0 (no coral) to 5 (76-100% bleached)
    pub fn score(&self) -> i32 {
        match self {
            Severity::NoCoral => 0,
            Severity::Unbleached => 1,
            Severity::Low => 2,
            Severity::Moderate => 3,
            Severity::High => 4,
            Severity::Severe => 5,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Add an Int32 `Severity_Num` column scored from `Severity`
///
/// Null or unknown labels score null.
pub fn with_severity_score(df: &DataFrame) -> Result<DataFrame> {
    let scores: Vec<Option<i32>> = string_values(df, SEVERITY, "severity score")?
        .into_iter()
        .map(|label| label.as_deref().and_then(Severity::parse).map(|s| s.score()))
        .collect();

    let mut scored = df.clone();
    scored.with_column(Series::new(SEVERITY_NUM.into(), scores))?;
    Ok(scored)
}

/// Frames where disease or bleaching was observed
pub fn bleached_only(df: &DataFrame) -> Result<DataFrame> {
    filter_to_values(df, DISEASE_BLEACHING, &["Yes"], "bleached frames")
}
