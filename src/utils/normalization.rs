//! Type Normalization
//!
//! Brings every source table to the same key and date representation before
//! any join:
//! - Columns whose name contains `ID` become strings, so `42`, `42.0` and
//!   `"42"` all compare equal.
//! - Columns whose name contains `Date` are parsed and truncated to a period
//!   (month by default).
//!
//! A malformed date is fatal for the load. Missing relationships are not
//! handled here at all; the join pipeline simply drops them.

use polars::prelude::*;

use crate::error::{PipelineError, Result};
use crate::utils::period::{epoch_days, parse_survey_date, Period, PeriodGranularity};

/// Which columns the date pass touches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateColumns {
    /// Every column whose name contains `Date`
    #[default]
    All,
    /// Only these columns
    Named(Vec<String>),
}

/// Options for `preprocess`
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    pub granularity: PeriodGranularity,
    pub date_columns: DateColumns,
}

impl NormalizeOptions {
    pub fn with_granularity(granularity: PeriodGranularity) -> Self {
        NormalizeOptions {
            granularity,
            ..Default::default()
        }
    }
}

/// Normalize ids, then dates
pub fn preprocess(df: &DataFrame, table: &str, options: &NormalizeOptions) -> Result<DataFrame> {
    let df = normalize_ids(df)?;
    normalize_dates(&df, table, options.granularity, &options.date_columns)
}

/// Cast every identifier column to its canonical string form
///
/// Float columns (integers with gaps are often read that way) render
/// integral values without the fractional part.
pub fn normalize_ids(df: &DataFrame) -> Result<DataFrame> {
    let exprs: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|c| c.name().contains("ID"))
        .filter_map(|c| id_to_string(c.name().as_str(), c.dtype()))
        .collect();

    if exprs.is_empty() {
        return Ok(df.clone());
    }

    Ok(df.clone().lazy().with_columns(exprs).collect()?)
}

fn id_to_string(name: &str, dtype: &DataType) -> Option<Expr> {
    match dtype {
        DataType::String => None,
        DataType::Float32 | DataType::Float64 => {
            let value = col(name).cast(DataType::Float64);
            let integral = value.clone().cast(DataType::Int64).cast(DataType::Float64).eq(value.clone());
            Some(
                when(integral)
                    .then(value.clone().cast(DataType::Int64).cast(DataType::String))
                    .otherwise(value.cast(DataType::String))
                    .alias(name),
            )
        }
        _ => Some(col(name).cast(DataType::String).alias(name)),
    }
}

/// Parse date columns and truncate them to `granularity`
///
/// The result columns are Polars `Date`s holding the first day of the period.
pub fn normalize_dates(
    df: &DataFrame,
    table: &str,
    granularity: PeriodGranularity,
    selection: &DateColumns,
) -> Result<DataFrame> {
    let targets: Vec<String> = match selection {
        DateColumns::All => df
            .get_column_names()
            .into_iter()
            .filter(|name| name.contains("Date"))
            .map(|name| name.to_string())
            .collect(),
        DateColumns::Named(names) => names.clone(),
    };

    let mut out = df.clone();
    for name in &targets {
        let column = out.column(name).map_err(|_| PipelineError::MissingColumn {
            context: table.to_string(),
            column: name.clone(),
            available: column_names(df),
        })?;
        let truncated = truncate_dates(column, table, granularity)?;
        out.with_column(truncated)?;
    }

    Ok(out)
}

fn truncate_dates(column: &Column, table: &str, granularity: PeriodGranularity) -> Result<Series> {
    let name = column.name().clone();

    let days: Vec<Option<i32>> = match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => parse_survey_date(raw)
                    .map(|date| Some(Period::from_date(date, granularity).epoch_days()))
                    .ok_or_else(|| PipelineError::UnparseableDate {
                        table: table.to_string(),
                        column: name.to_string(),
                        row,
                        value: raw.to_string(),
                    }),
            })
            .collect::<Result<_>>()?,
        _ => epoch_days(column, table)?
            .into_iter()
            .map(|d| {
                d.and_then(|d| Period::from_epoch_days(d, granularity))
                    .map(|p| p.epoch_days())
            })
            .collect(),
    };

    Ok(Series::new(name, days).cast(&DataType::Date)?)
}

pub(crate) fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect()
}
