//! Reef health: time & location vs bleaching, time & location vs rugosity
//!
//! Both tables are anchored on Event (the survey visit), joined to the
//! measurement table, and enriched with Location last. Latitude is only
//! filtered once Location is in.

use polars::prelude::*;

use crate::data::SurveyData;
use crate::derived::with_heterogeneity;
use crate::error::Result;
use crate::schema::columns::{EVENT_ID, LATITUDE, LOCATION_ID, SEVERITY};
use crate::schema::{BLEACHING, RUGOSITY_TABLE};
use crate::utils::frame_ops::{drop_nulls_in, inner_join, project};

/// Event ⋈ BenthicCover ⋈ Location, projected to the bleaching columns
fn events_benthic_locations(data: &SurveyData) -> Result<DataFrame> {
    // STEP 1: Event ⋈ BenthicCover
    let events_benthic = inner_join(
        data.events(),
        data.benthic_cover(),
        EVENT_ID,
        "bleaching: events ⋈ benthic cover",
    )?;

    // STEP 2: ⋈ Location
    let with_location = inner_join(
        &events_benthic,
        data.locations(),
        LOCATION_ID,
        "bleaching: ⋈ locations",
    )?;

    project(&with_location, &BLEACHING, "bleaching")
}

/// Benthic frames with time and location, rows without a latitude dropped
pub fn bleaching_table(data: &SurveyData) -> Result<DataFrame> {
    let table = events_benthic_locations(data)?;
    drop_nulls_in(&table, LATITUDE, "bleaching")
}

/// As `bleaching_table`, restricted to frames with a recorded severity
pub fn bleaching_severity_table(data: &SurveyData) -> Result<DataFrame> {
    let table = events_benthic_locations(data)?;
    let table = drop_nulls_in(&table, SEVERITY, "bleaching severity")?;
    drop_nulls_in(&table, LATITUDE, "bleaching severity")
}

/// Rugosity transects with `Heterogeneity`, time and location
///
/// Heterogeneity is computed before Location is joined, while the chain and
/// tape lengths are guaranteed present. Undefined ratios stay in the table.
pub fn rugosity_table(data: &SurveyData) -> Result<DataFrame> {
    // STEP 1: Event ⋈ Rugosity
    let events_rugosity = inner_join(
        data.events(),
        data.rugosity(),
        EVENT_ID,
        "rugosity: events ⋈ rugosity",
    )?;

    // STEP 2: Heterogeneity = Chain_length / Tape_length
    let with_metric = with_heterogeneity(&events_rugosity)?;

    // STEP 3: ⋈ Location
    let with_location = inner_join(&with_metric, data.locations(), LOCATION_ID, "rugosity: ⋈ locations")?;

    let table = project(&with_location, &RUGOSITY_TABLE, "rugosity")?;
    drop_nulls_in(&table, LATITUDE, "rugosity")
}
