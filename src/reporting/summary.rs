//! Per-island and per-period summaries of an output table
//!
//! Null and NaN values are skipped everywhere: an undefined ratio never
//! pulls a mean or median towards NaN.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use crate::error::Result;
use crate::schema::columns::{ISLAND, LATITUDE, LONGITUDE};
use crate::utils::frame_ops::{column, float_values, string_values};
use crate::utils::period::{epoch_days, Period, PeriodGranularity};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IslandStatistics {
    pub island: String,
    pub n: usize,
    pub mean: f64,
    pub median: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodMean {
    pub period: String,
    pub n: usize,
    pub mean: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CenterPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IslandCenter {
    pub island: String,
    pub center: CenterPoint,
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Count, mean and median of `value_column` per island, sorted by island
///
/// Rows without an island or a value are ignored; islands with no values
/// are left out.
pub fn island_statistics(df: &DataFrame, value_column: &str) -> Result<Vec<IslandStatistics>> {
    let islands = string_values(df, ISLAND, "island statistics")?;
    let values = float_values(df, value_column, "island statistics")?;

    let mut grouped: FxHashMap<String, Vec<f64>> = FxHashMap::default();
    for (island, value) in islands.into_iter().zip(values) {
        if let (Some(island), Some(value)) = (island, present(value)) {
            grouped.entry(island).or_default().push(value);
        }
    }

    let mut stats: Vec<IslandStatistics> = grouped
        .into_iter()
        .map(|(island, mut values)| IslandStatistics {
            n: values.len(),
            mean: mean(&values),
            median: median(&mut values),
            island,
        })
        .collect();
    stats.sort_by(|a, b| a.island.cmp(&b.island));

    Ok(stats)
}

/// Mean of `value_column` per period of `date_column`, oldest first
///
/// `granularity` may be coarser than the table's own periods, e.g. yearly
/// means over month-truncated dates.
pub fn period_means(
    df: &DataFrame,
    date_column: &str,
    value_column: &str,
    granularity: PeriodGranularity,
) -> Result<Vec<PeriodMean>> {
    let context = "period means";
    let days = epoch_days(column(df, date_column, context)?, context)?;
    let values = float_values(df, value_column, context)?;

    let mut grouped: BTreeMap<Period, (f64, usize)> = BTreeMap::new();
    for (day, value) in days.into_iter().zip(values) {
        let period = day.and_then(|d| Period::from_epoch_days(d, granularity));
        if let (Some(period), Some(value)) = (period, present(value)) {
            let entry = grouped.entry(period).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    Ok(grouped
        .into_iter()
        .map(|(period, (sum, n))| PeriodMean {
            period: period.to_string(),
            n,
            mean: sum / n as f64,
        })
        .collect())
}

/// Trailing mean of `window` consecutive period means, aligned with `means`
///
/// Entries before the window fills are `None`, as is everything for a zero
/// window. Periods are weighted equally regardless of their row counts.
pub fn rolling_means(means: &[PeriodMean], window: usize) -> Vec<Option<f64>> {
    (0..means.len())
        .map(|end| {
            if window == 0 || end + 1 < window {
                return None;
            }
            let span = &means[end + 1 - window..=end];
            Some(span.iter().map(|m| m.mean).sum::<f64>() / window as f64)
        })
        .collect()
}

fn center_of(latitudes: &[f64], longitudes: &[f64]) -> Option<CenterPoint> {
    if latitudes.is_empty() || longitudes.is_empty() {
        return None;
    }
    Some(CenterPoint {
        latitude: mean(latitudes),
        longitude: mean(longitudes),
    })
}

/// Mean latitude and longitude of a table, `None` when it has no coordinates
pub fn center_point(df: &DataFrame) -> Result<Option<CenterPoint>> {
    let latitudes: Vec<f64> = float_values(df, LATITUDE, "center point")?
        .into_iter()
        .filter_map(present)
        .collect();
    let longitudes: Vec<f64> = float_values(df, LONGITUDE, "center point")?
        .into_iter()
        .filter_map(present)
        .collect();

    Ok(center_of(&latitudes, &longitudes))
}

/// `center_point` per island, sorted by island
pub fn island_centers(df: &DataFrame) -> Result<Vec<IslandCenter>> {
    let islands = string_values(df, ISLAND, "island centers")?;
    let latitudes = float_values(df, LATITUDE, "island centers")?;
    let longitudes = float_values(df, LONGITUDE, "island centers")?;

    let mut grouped: BTreeMap<String, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for ((island, lat), lon) in islands.into_iter().zip(latitudes).zip(longitudes) {
        let Some(island) = island else { continue };
        let entry = grouped.entry(island).or_default();
        entry.0.extend(present(lat));
        entry.1.extend(present(lon));
    }

    Ok(grouped
        .into_iter()
        .filter_map(|(island, (lats, lons))| center_of(&lats, &lons).map(|center| IslandCenter { island, center }))
        .collect())
}
