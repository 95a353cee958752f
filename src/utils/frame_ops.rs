//! Relational helpers with column validation
//!
//! Projection, inner join and null filtering used by every pipeline step.
//! Each takes a `context` string that ends up in error messages and logs
//! (e.g. "fish density: ⋈ taxon").

use polars::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::schema::TableSchema;
use crate::utils::normalization::column_names;

fn require_column<'a>(df: &'a DataFrame, name: &str, context: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| PipelineError::MissingColumn {
        context: context.to_string(),
        column: name.to_string(),
        available: column_names(df),
    })
}

/// Project a DataFrame onto `schema`, in schema order
///
/// Missing required columns are an error; missing optional columns are
/// added as typed nulls so every output has the same shape.
///
/// # Example
/// ```rust,ignore
/// let bleaching = project(&joined, &BLEACHING, "bleaching")?;
/// ```
pub fn project(df: &DataFrame, schema: &TableSchema, context: &str) -> Result<DataFrame> {
    let present: FxHashSet<String> = column_names(df).into_iter().collect();
    let mut filled = df.clone();

    for spec in schema.columns {
        if present.contains(spec.name) {
            continue;
        }
        if spec.required {
            return Err(PipelineError::MissingColumn {
                context: context.to_string(),
                column: spec.name.to_string(),
                available: column_names(df),
            });
        }
        filled.with_column(Series::full_null(spec.name.into(), df.height(), &spec.fill.dtype()))?;
    }

    Ok(filled.select(schema.column_names())?)
}

/// Inner join on a single key column present on both sides
///
/// Non-key columns that appear on both sides are taken from `left`; the
/// right-hand copies are dropped before joining so no suffixed duplicates
/// reach the output. Rows whose key is null never match.
pub fn inner_join(left: &DataFrame, right: &DataFrame, key: &str, context: &str) -> Result<DataFrame> {
    require_column(left, key, context)?;
    require_column(right, key, context)?;

    let left_names: FxHashSet<String> = column_names(left).into_iter().collect();
    let overlapping: Vec<String> = column_names(right)
        .into_iter()
        .filter(|name| name != key && left_names.contains(name))
        .collect();

    let right = if overlapping.is_empty() {
        right.clone()
    } else {
        warn!("{}: keeping left-hand copies of {:?}", context, overlapping);
        right.drop_many(overlapping.iter().map(|s| s.as_str()))
    };

    let joined = left.join(
        &right,
        [key],
        [key],
        JoinArgs::new(JoinType::Inner),
        None,
    )?;

    debug!(
        "{}: {} × {} rows on {} → {} rows",
        context,
        left.height(),
        right.height(),
        key,
        joined.height()
    );

    Ok(joined)
}

/// Keep rows where `column` is neither null nor NaN
pub fn drop_nulls_in(df: &DataFrame, column: &str, context: &str) -> Result<DataFrame> {
    let values = require_column(df, column, context)?;

    let mask: BooleanChunked = match values.dtype() {
        DataType::Float32 | DataType::Float64 => {
            let floats = values.cast(&DataType::Float64)?;
            floats
                .f64()?
                .into_iter()
                .map(|v| v.map_or(false, |x| !x.is_nan()))
                .collect()
        }
        _ => values.as_materialized_series().is_not_null(),
    };

    let filtered = df.filter(&mask)?;
    debug!(
        "{}: dropped {} rows with missing {}",
        context,
        df.height() - filtered.height(),
        column
    );

    Ok(filtered)
}

/// Keep rows whose string `column` equals one of `values`
pub fn filter_to_values(df: &DataFrame, column: &str, values: &[&str], context: &str) -> Result<DataFrame> {
    let column_values = require_column(df, column, context)?;
    let strings = column_values.str().map_err(|_| PipelineError::UnsupportedType {
        context: context.to_string(),
        column: column.to_string(),
        dtype: column_values.dtype().to_string(),
    })?;

    let wanted: FxHashSet<&str> = values.iter().copied().collect();
    let mask: BooleanChunked = strings
        .into_iter()
        .map(|opt| opt.map_or(false, |s| wanted.contains(s)))
        .collect();

    Ok(df.filter(&mask)?)
}

/// Values of a string column
pub fn string_values(df: &DataFrame, column: &str, context: &str) -> Result<Vec<Option<String>>> {
    let column_values = require_column(df, column, context)?;
    let strings = column_values.cast(&DataType::String)?;

    Ok(strings
        .str()?
        .into_iter()
        .map(|opt| opt.map(|s| s.to_string()))
        .collect())
}

/// Values of a numeric column as f64
pub fn float_values(df: &DataFrame, column: &str, context: &str) -> Result<Vec<Option<f64>>> {
    let column_values = require_column(df, column, context)?;
    if !column_values.dtype().is_primitive_numeric() && column_values.dtype() != &DataType::Null {
        return Err(PipelineError::UnsupportedType {
            context: context.to_string(),
            column: column.to_string(),
            dtype: column_values.dtype().to_string(),
        });
    }

    let floats = column_values.cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().collect())
}

/// Column lookup that reports the available columns when it fails
pub fn column<'a>(df: &'a DataFrame, name: &str, context: &str) -> Result<&'a Column> {
    require_column(df, name, context)
}
