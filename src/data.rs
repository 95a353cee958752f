//! Data Loading and Management
//!
//! Reads the survey extracts with Polars, normalizes ids and dates, and keeps
//! every relation in memory, unchanged, for the life of the pipeline.
//!
//! Loading is all-or-nothing: a missing file, unreadable CSV, bad date or
//! missing key column aborts construction.

use polars::prelude::*;
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::schema::{columns::IND_COUNT, LOCATION};
use crate::utils::frame_ops::{drop_nulls_in, project};
use crate::utils::normalization::{preprocess, NormalizeOptions};
use crate::utils::period::PeriodGranularity;

/// The source extracts of a survey export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTable {
    Locations,
    Events,
    BenthicCover,
    Rugosity,
    Fish,
    JuvenileColonies,
    Settlements,
    Surfaces,
    Taxa,
}

impl SourceTable {
    pub const ALL: [SourceTable; 9] = [
        SourceTable::Locations,
        SourceTable::Events,
        SourceTable::BenthicCover,
        SourceTable::Rugosity,
        SourceTable::Fish,
        SourceTable::JuvenileColonies,
        SourceTable::Settlements,
        SourceTable::Surfaces,
        SourceTable::Taxa,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SourceTable::Locations => "locations",
            SourceTable::Events => "events",
            SourceTable::BenthicCover => "benthic cover",
            SourceTable::Rugosity => "rugosity",
            SourceTable::Fish => "fish",
            SourceTable::JuvenileColonies => "juvenile colonies",
            SourceTable::Settlements => "settlements",
            SourceTable::Surfaces => "surfaces",
            SourceTable::Taxa => "taxa",
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source frames exactly as read, before normalization
#[derive(Debug, Clone)]
pub struct RawTables {
    pub locations: DataFrame,
    pub events: DataFrame,
    pub benthic_cover: DataFrame,
    pub rugosity: DataFrame,
    pub fish: DataFrame,
    pub juvenile_colonies: DataFrame,
    pub settlements: DataFrame,
    pub surfaces: DataFrame,
    pub taxa: DataFrame,
}

impl RawTables {
    /// Read every extract named in `config`
    pub fn read(config: &PipelineConfig) -> Result<Self> {
        let read = |table: SourceTable| read_csv(&config.path_for(table), table);

        Ok(RawTables {
            locations: read(SourceTable::Locations)?,
            events: read(SourceTable::Events)?,
            benthic_cover: read(SourceTable::BenthicCover)?,
            rugosity: read(SourceTable::Rugosity)?,
            fish: read(SourceTable::Fish)?,
            juvenile_colonies: read(SourceTable::JuvenileColonies)?,
            settlements: read(SourceTable::Settlements)?,
            surfaces: read(SourceTable::Surfaces)?,
            taxa: read(SourceTable::Taxa)?,
        })
    }
}

/// Main data holder for the join pipeline
///
/// Every relation is normalized. Locations are already projected to the
/// location schema and juvenile colonies carry only rows with an `Ind_Count`.
#[derive(Debug, Clone)]
pub struct SurveyData {
    locations: DataFrame,
    events: DataFrame,
    benthic_cover: DataFrame,
    rugosity: DataFrame,
    fish: DataFrame,
    juvenile_colonies: DataFrame,
    settlements: DataFrame,
    surfaces: DataFrame,
    taxa: DataFrame,
    granularity: PeriodGranularity,
}

impl SurveyData {
    /// Load all extracts from `config.data_dir`
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        info!("Loading survey tables from {:?}", config.data_dir);
        let raw = RawTables::read(config)?;
        Self::from_raw(raw, &config.normalize_options())
    }

    /// Normalize already-read frames
    pub fn from_raw(raw: RawTables, options: &NormalizeOptions) -> Result<Self> {
        let normalize = |df: &DataFrame, table: SourceTable| preprocess(df, table.name(), options);

        let locations = project(
            &normalize(&raw.locations, SourceTable::Locations)?,
            &LOCATION,
            SourceTable::Locations.name(),
        )?;

        let juvenile_colonies = drop_nulls_in(
            &normalize(&raw.juvenile_colonies, SourceTable::JuvenileColonies)?,
            IND_COUNT,
            SourceTable::JuvenileColonies.name(),
        )?;

        let data = SurveyData {
            locations,
            events: normalize(&raw.events, SourceTable::Events)?,
            benthic_cover: normalize(&raw.benthic_cover, SourceTable::BenthicCover)?,
            rugosity: normalize(&raw.rugosity, SourceTable::Rugosity)?,
            fish: normalize(&raw.fish, SourceTable::Fish)?,
            juvenile_colonies,
            settlements: normalize(&raw.settlements, SourceTable::Settlements)?,
            surfaces: normalize(&raw.surfaces, SourceTable::Surfaces)?,
            taxa: normalize(&raw.taxa, SourceTable::Taxa)?,
            granularity: options.granularity,
        };

        for table in SourceTable::ALL {
            let df = data.table(table);
            info!("  {}: {} rows × {} columns", table, df.height(), df.width());
        }

        Ok(data)
    }

    /// Relation for `table`
    pub fn table(&self, table: SourceTable) -> &DataFrame {
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

    pub fn locations(&self) -> &DataFrame {
        &self.locations
    }

    pub fn events(&self) -> &DataFrame {
        &self.events
    }

    pub fn benthic_cover(&self) -> &DataFrame {
        &self.benthic_cover
    }

    pub fn rugosity(&self) -> &DataFrame {
        &self.rugosity
    }

    pub fn fish(&self) -> &DataFrame {
        &self.fish
    }

    pub fn juvenile_colonies(&self) -> &DataFrame {
        &self.juvenile_colonies
    }

    pub fn settlements(&self) -> &DataFrame {
        &self.settlements
    }

    pub fn surfaces(&self) -> &DataFrame {
        &self.surfaces
    }

    pub fn taxa(&self) -> &DataFrame {
        &self.taxa
    }

    /// Granularity the date columns were truncated to
    pub fn granularity(&self) -> PeriodGranularity {
        self.granularity
    }
}

/// Cell values read as missing, in addition to empty cells
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "#N/A", "#N/A N/A", "#NA", "<NA>", "NULL", "null", "NaN", "-NaN", "nan", "-nan",
    "None", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

/// Load one extract from CSV
///
/// The whole file is scanned for type inference so id columns mixing
/// numbers and text come back as strings.
fn read_csv(path: &Path, table: SourceTable) -> Result<DataFrame> {
    if !path.exists() {
        return Err(PipelineError::MissingFile {
            table: table.name().to_string(),
            path: path.to_path_buf(),
        });
    }

    let read_error = |source: PolarsError| PipelineError::Read {
        table: table.name().to_string(),
        path: path.to_path_buf(),
        source,
    };

    let null_tokens: Vec<PlSmallStr> = MISSING_VALUE_TOKENS
        .iter()
        .map(|&token| PlSmallStr::from_static(token))
        .collect();
    let parse_options = CsvParseOptions::default().with_null_values(Some(NullValues::AllColumns(null_tokens)));

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(read_error)?
        .finish()
        .map_err(read_error)
}
