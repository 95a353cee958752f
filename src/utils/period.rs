//! Calendar periods
//!
//! Survey dates are compared and grouped by the period that contains them,
//! never by the raw timestamp. A period is stored in a Polars `Date` column as
//! its first day (`2019-03` → `2019-03-01`), so equality, ordering and
//! grouping work on the column directly.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PipelineError, Result};

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Timestamps with a UTC offset; the wall-clock date is kept
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%z",
];

// Two-digit-year forms come first: `%Y` would read `19` as year 19.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%y", "%m/%d/%Y"];

/// Earliest year a survey date may carry; anything below came from a short year
const MIN_SURVEY_YEAR: i32 = 1000;

/// Granularity a date is truncated to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum PeriodGranularity {
    #[serde(rename = "Y", alias = "year")]
    Year,
    #[default]
    #[serde(rename = "M", alias = "month")]
    Month,
    #[serde(rename = "D", alias = "day")]
    Day,
}

impl PeriodGranularity {
    pub fn code(&self) -> &'static str {
        match self {
            PeriodGranularity::Year => "Y",
            PeriodGranularity::Month => "M",
            PeriodGranularity::Day => "D",
        }
    }
}

impl fmt::Display for PeriodGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PeriodGranularity {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "year" => Ok(PeriodGranularity::Year),
            "m" | "month" => Ok(PeriodGranularity::Month),
            "d" | "day" => Ok(PeriodGranularity::Day),
            _ => Err(PipelineError::InvalidPeriod(s.to_string())),
        }
    }
}

/// A calendar period identified by its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    start: NaiveDate,
    granularity: PeriodGranularity,
}

impl Period {
    /// Period containing `date`
    pub fn from_date(date: NaiveDate, granularity: PeriodGranularity) -> Self {
        let start = match granularity {
            PeriodGranularity::Year => date.with_ordinal(1),
            PeriodGranularity::Month => date.with_day(1),
            PeriodGranularity::Day => Some(date),
        }
        // Day 1 of a month or year always exists
        .unwrap_or(date);

        Period { start, granularity }
    }

    /// Period containing the date `days` after 1970-01-01 (Polars `Date` physical value)
    pub fn from_epoch_days(days: i32, granularity: PeriodGranularity) -> Option<Self> {
        let date = NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)?;
        Some(Self::from_date(date, granularity))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day of the period as days since 1970-01-01
    pub fn epoch_days(&self) -> i32 {
        self.start.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.granularity {
            PeriodGranularity::Year => write!(f, "{:04}", self.start.year()),
            PeriodGranularity::Month => write!(f, "{:04}-{:02}", self.start.year(), self.start.month()),
            PeriodGranularity::Day => write!(f, "{}", self.start.format("%Y-%m-%d")),
        }
    }
}

/// Parse a raw survey timestamp into its calendar date
///
/// Accepts ISO dates (`2019-03-17`, optionally with a time and a UTC offset),
/// RFC 3339 timestamps, slash-separated ISO dates, US-style `3/17/2019` or
/// `3/17/19` with an optional 24h or AM/PM time, and month-only `2019-03`.
/// Dates that only parse to a year below 1000 are rejected.
pub fn parse_survey_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    let with_offset = DateTime::parse_from_rfc3339(raw)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        })
        .map(|datetime| datetime.naive_local().date());

    with_offset
        .into_iter()
        .chain(
            DATETIME_FORMATS
                .iter()
                .filter_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date()),
        )
        .chain(
            DATE_FORMATS
                .iter()
                .filter_map(|format| NaiveDate::parse_from_str(raw, format).ok()),
        )
        .chain(std::iter::once_with(|| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok()).flatten())
        .find(|date| date.year() >= MIN_SURVEY_YEAR)
}

/// Render a period-valued `Date` column as labels (`2019-03`), keeping nulls
pub fn period_labels(
    column: &Column,
    granularity: PeriodGranularity,
    context: &str,
) -> Result<Vec<Option<String>>> {
    let days = epoch_days(column, context)?;

    Ok(days
        .into_iter()
        .map(|d| d.and_then(|d| Period::from_epoch_days(d, granularity)).map(|p| p.to_string()))
        .collect())
}

/// Physical day values of a `Date` (or `Datetime`) column
pub fn epoch_days(column: &Column, context: &str) -> Result<Vec<Option<i32>>> {
    match column.dtype() {
        DataType::Date | DataType::Datetime(_, _) => {
            let days = column.cast(&DataType::Date)?.cast(&DataType::Int32)?;
            Ok(days.i32()?.into_iter().collect())
        }
        DataType::Null => Ok(vec![None; column.len()]),
        other => Err(PipelineError::UnsupportedType {
            context: context.to_string(),
            column: column.name().to_string(),
            dtype: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_truncation() {
        let period = Period::from_date(date(2019, 3, 17), PeriodGranularity::Month);
        assert_eq!(period.start(), date(2019, 3, 1));
        assert_eq!(period.to_string(), "2019-03");
    }

    #[test]
    fn test_same_month_periods_are_equal() {
        let a = Period::from_date(date(2019, 3, 1), PeriodGranularity::Month);
        let b = Period::from_date(date(2019, 3, 31), PeriodGranularity::Month);
        let c = Period::from_date(date(2019, 4, 1), PeriodGranularity::Month);
        assert_eq!(a, b);
        assert!(a < c);
    }

    #[test]
    fn test_year_and_day_granularity() {
        let d = date(2020, 6, 15);
        assert_eq!(Period::from_date(d, PeriodGranularity::Year).to_string(), "2020");
        assert_eq!(Period::from_date(d, PeriodGranularity::Day).to_string(), "2020-06-15");
    }

    #[test]
    fn test_epoch_days_round_trip() {
        assert_eq!(Period::from_date(date(1970, 1, 1), PeriodGranularity::Day).epoch_days(), 0);

        let period = Period::from_date(date(2020, 6, 1), PeriodGranularity::Month);
        let back = Period::from_epoch_days(period.epoch_days(), PeriodGranularity::Month).unwrap();
        assert_eq!(back, period);
    }

    #[test]
    fn test_parse_survey_date_formats() {
        let expected = date(2019, 3, 17);
        assert_eq!(parse_survey_date("2019-03-17"), Some(expected));
        assert_eq!(parse_survey_date("2019-03-17 08:30:00"), Some(expected));
        assert_eq!(parse_survey_date("2019-03-17T08:30:00"), Some(expected));
        assert_eq!(parse_survey_date("2019/03/17"), Some(expected));
        assert_eq!(parse_survey_date("3/17/2019"), Some(expected));
        assert_eq!(parse_survey_date("3/17/2019 0:00:00"), Some(expected));
        assert_eq!(parse_survey_date("03/17/2019 10:15:00 AM"), Some(expected));
        assert_eq!(parse_survey_date(" 2019-03-17 "), Some(expected));
        assert_eq!(parse_survey_date("2019-03-17T08:30:00Z"), Some(expected));
        assert_eq!(parse_survey_date("2019-03-17T23:30:00-10:00"), Some(expected));
        assert_eq!(parse_survey_date("2019-03-17 08:30:00+10:00"), Some(expected));
        assert_eq!(parse_survey_date("2019-03"), Some(date(2019, 3, 1)));
    }

    #[test]
    fn test_two_digit_years_are_not_year_19() {
        let expected = date(2019, 3, 17);
        assert_eq!(parse_survey_date("3/17/19"), Some(expected));
        assert_eq!(parse_survey_date("3/17/19 0:00:00"), Some(expected));
        assert_eq!(parse_survey_date("3/17/19 10:15 AM"), Some(expected));
        assert_eq!(parse_survey_date("3/17/2019"), Some(expected));
        assert_eq!(parse_survey_date("3/17/2019 0:00:00"), Some(expected));
        // No reading of a short ISO year is accepted
        assert_eq!(parse_survey_date("19-03-17"), None);
    }

    #[test]
    fn test_parse_survey_date_rejects_garbage() {
        assert_eq!(parse_survey_date("not a date"), None);
        assert_eq!(parse_survey_date("2019-13-40"), None);
    }

    #[test]
    fn test_granularity_from_str() {
        assert_eq!("M".parse::<PeriodGranularity>().unwrap(), PeriodGranularity::Month);
        assert_eq!("year".parse::<PeriodGranularity>().unwrap(), PeriodGranularity::Year);
        assert!("week".parse::<PeriodGranularity>().is_err());
    }

    #[test]
    fn test_granularity_serde_codes() {
        let g: PeriodGranularity = serde_json::from_str("\"D\"").unwrap();
        assert_eq!(g, PeriodGranularity::Day);
        assert_eq!(serde_json::to_string(&PeriodGranularity::Month).unwrap(), "\"M\"");
    }
}
