//! Survey Pipeline - Main coordinator for the output tables
//!
//! Owns the loaded `SurveyData` and exposes one read-only accessor per
//! analysis. Each accessor recomputes its table from the immutable inputs,
//! so repeated calls return equal frames.

pub mod biomass;
pub mod reef_health;

use polars::prelude::*;
use tracing::info;

use crate::config::PipelineConfig;
use crate::data::SurveyData;
use crate::error::Result;

pub use biomass::{fish_density_table, juvenile_size_table};
pub use reef_health::{bleaching_severity_table, bleaching_table, rugosity_table};

/// Main survey pipeline
#[derive(Debug, Clone)]
pub struct SurveyPipeline {
    data: SurveyData,
}

impl SurveyPipeline {
    /// Wrap already-loaded survey data
    pub fn new(data: SurveyData) -> Self {
        SurveyPipeline { data }
    }

    /// Load every source extract named in `config`
    ///
    /// Fails without a partial pipeline if any extract is missing or malformed.
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        info!("Initializing survey pipeline (period: {})", config.period);
        let data = SurveyData::load(config)?;
        Ok(Self::new(data))
    }

    pub fn data(&self) -> &SurveyData {
        &self.data
    }

    /// Time & location vs bleaching
    pub fn get_bleaching_table(&self) -> Result<DataFrame> {
        bleaching_table(&self.data)
    }

    /// Time & location vs bleaching, frames with a recorded severity only
    pub fn get_bleaching_severity_table(&self) -> Result<DataFrame> {
        bleaching_severity_table(&self.data)
    }

    /// Time & location vs rugosity, with `Heterogeneity`
    pub fn get_rugosity_table(&self) -> Result<DataFrame> {
        rugosity_table(&self.data)
    }

    /// Fish density per taxon over time & location
    pub fn get_fish_density_table(&self) -> Result<DataFrame> {
        fish_density_table(&self.data)
    }

    /// Juvenile colony size per taxon over time & location
    pub fn get_juvenile_size_table(&self) -> Result<DataFrame> {
        juvenile_size_table(&self.data)
    }
}
