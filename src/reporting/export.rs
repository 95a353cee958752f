//! CSV export of the output tables

use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::pipeline::SurveyPipeline;
use crate::utils::period::{period_labels, PeriodGranularity};

/// Replace every `Date` column with its period labels (`2019-03`)
pub fn with_period_labels(df: &DataFrame, granularity: PeriodGranularity) -> Result<DataFrame> {
    let mut labelled = df.clone();

    for column in df.get_columns() {
        if column.dtype() != &DataType::Date {
            continue;
        }
        let labels = period_labels(column, granularity, "export")?;
        labelled.with_column(Series::new(column.name().clone(), labels))?;
    }

    Ok(labelled)
}

/// Write one relation as CSV with a header row, creating parent directories
pub fn write_csv(df: &DataFrame, path: &Path, granularity: PeriodGranularity) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut labelled = with_period_labels(df, granularity)?;
    let mut file = File::create(path)?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut labelled)
        .map_err(|source| PipelineError::Export {
            path: path.to_path_buf(),
            source,
        })
}

/// Write all five output tables into `out_dir`, returning the paths written
pub fn export_all(pipeline: &SurveyPipeline, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let granularity = pipeline.data().granularity();

    let tables = [
        ("time_bleaching.csv", pipeline.get_bleaching_table()?),
        ("time_bleaching_severity.csv", pipeline.get_bleaching_severity_table()?),
        ("time_rugosity.csv", pipeline.get_rugosity_table()?),
        ("time_fish_density.csv", pipeline.get_fish_density_table()?),
        ("time_juvenile_size.csv", pipeline.get_juvenile_size_table()?),
    ];

    let mut written = Vec::with_capacity(tables.len());
    for (file_name, table) in &tables {
        let path = out_dir.join(file_name);
        write_csv(table, &path, granularity)?;
        info!("Wrote {} rows to {:?}", table.height(), path);
        written.push(path);
    }

    Ok(written)
}
