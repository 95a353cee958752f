//! Pipeline configuration
//!
//! Where the source extracts live, what each one is called, and the period
//! granularity for date columns. Every field has a default, so an empty JSON
//! object (or no file at all) gives the conventional layout.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::SourceTable;
use crate::error::{PipelineError, Result};
use crate::utils::normalization::NormalizeOptions;
use crate::utils::period::PeriodGranularity;

pub const DEFAULT_DATA_DIR: &str = "./records-2300415/";
pub const DATA_DIR_ENV: &str = "REEF_DATA_DIR";
pub const PERIOD_ENV: &str = "REEF_PERIOD";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub period: PeriodGranularity,
    pub files: SourceFiles,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            period: PeriodGranularity::Month,
            files: SourceFiles::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| PipelineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_str(&contents)?)
    }

    /// Defaults overridden by `REEF_DATA_DIR` / `REEF_PERIOD`
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Ok(period) = env::var(PERIOD_ENV) {
            self.period = period.parse()?;
        }
        Ok(self)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_period(mut self, period: PeriodGranularity) -> Self {
        self.period = period;
        self
    }

    /// Full path of a source table's extract
    pub fn path_for(&self, table: SourceTable) -> PathBuf {
        self.data_dir.join(self.files.file_for(table))
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions::with_granularity(self.period)
    }
}

/// File name of each source extract, relative to `data_dir`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceFiles {
    pub locations: String,
    pub events: String,
    pub benthic_cover: String,
    pub rugosity: String,
    pub fish: String,
    pub juvenile_colonies: String,
    pub settlements: String,
    pub surfaces: String,
    pub taxa: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        SourceFiles {
            locations: "tbl_Locations.csv".to_string(),
            events: "tbl_Events.csv".to_string(),
            benthic_cover: "tbl_Benthic_Cover.csv".to_string(),
            rugosity: "tbl_Rugosity.csv".to_string(),
            fish: "tbl_Fish.csv".to_string(),
            juvenile_colonies: "tbl_Juvenile_Colony.csv".to_string(),
            settlements: "tbl_Settlement.csv".to_string(),
            surfaces: "tbl_Surfaces.csv".to_string(),
            taxa: "tlu_Taxon.csv".to_string(),
        }
    }
}

impl SourceFiles {
    pub fn file_for(&self, table: SourceTable) -> &str {
        match table {
            SourceTable::Locations => &self.locations,
            SourceTable::Events => &self.events,
            SourceTable::BenthicCover => &self.benthic_cover,
            SourceTable::Rugosity => &self.rugosity,
            SourceTable::Fish => &self.fish,
            SourceTable::JuvenileColonies => &self.juvenile_colonies,
            SourceTable::Settlements => &self.settlements,
            SourceTable::Surfaces => &self.surfaces,
            SourceTable::Taxa => &self.taxa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.period, PeriodGranularity::Month);
        assert_eq!(
            config.path_for(SourceTable::Taxa),
            PathBuf::from("./records-2300415/").join("tlu_Taxon.csv")
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "data_dir": "/data/reef",
            "period": "Y",
            "files": { "fish": "fish_2023.csv" }
        }"#;

        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/data/reef"));
        assert_eq!(config.period, PeriodGranularity::Year);
        assert_eq!(config.files.fish, "fish_2023.csv");
        assert_eq!(config.files.events, "tbl_Events.csv");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        fs::write(&path, r#"{ "period": "D" }"#).unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.period, PeriodGranularity::Day);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PipelineConfig::load(Path::new("/nonexistent/pipeline.json")).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigIo { .. }));
    }

    #[test]
    fn test_builder_overrides() {
        let config = PipelineConfig::default()
            .with_data_dir("/tmp/extracts")
            .with_period(PeriodGranularity::Year);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/extracts"));
        assert_eq!(config.normalize_options().granularity, PeriodGranularity::Year);
    }
}
