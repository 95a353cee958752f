//! Biomass & density change: fish density and juvenile colony size over time
//!
//! Fish: Fish ⋈ Event ⋈ Taxon ⋈ Location.
//! Juveniles: JuvenileColony ⋈ Surface ⋈ Settlement ⋈ Event ⋈ Taxon ⋈ Location.
//!
//! Every hop is an inner join, so a record missing any link in its chain is
//! absent from the output. Each hop is projected to its named intermediate
//! schema before the next join.

use polars::prelude::*;

use crate::data::SurveyData;
use crate::derived::{with_colony_size, with_density};
use crate::error::Result;
use crate::schema::columns::{EVENT_ID, ISLAND, LATITUDE, LOCATION_ID, SETTLEMENT_ID, SURFACE_ID, TAXON_ID, TAXON_NAME};
use crate::schema::{
    FISH_DENSITY, FISH_EVENT, FISH_TAXON, JUVENILE_EVENT, JUVENILE_SETTLEMENT, JUVENILE_SIZE, JUVENILE_SURFACE,
    JUVENILE_TAXON,
};
use crate::utils::frame_ops::{drop_nulls_in, inner_join, project};

/// Fish counts per taxon with `Density`, time and location
pub fn fish_density_table(data: &SurveyData) -> Result<DataFrame> {
    // STEP 1: Fish ⋈ Event
    let fish_events = inner_join(data.fish(), data.events(), EVENT_ID, "fish density: fish ⋈ events")?;
    let fish_events = project(&fish_events, &FISH_EVENT, "fish density: events")?;

    // STEP 2: ⋈ Taxon, unknown taxa out
    let fish_taxa = inner_join(&fish_events, data.taxa(), TAXON_ID, "fish density: ⋈ taxa")?;
    let fish_taxa = project(&fish_taxa, &FISH_TAXON, "fish density: taxa")?;
    let fish_taxa = drop_nulls_in(&fish_taxa, TAXON_NAME, "fish density: taxa")?;

    // STEP 3: Density = Number / Area
    let with_metric = with_density(&fish_taxa)?;

    // STEP 4: ⋈ Location
    let with_location = inner_join(&with_metric, data.locations(), LOCATION_ID, "fish density: ⋈ locations")?;
    let table = project(&with_location, &FISH_DENSITY, "fish density")?;

    let table = drop_nulls_in(&table, ISLAND, "fish density")?;
    drop_nulls_in(&table, LATITUDE, "fish density")
}

/// Juvenile colonies with `Size_mm`, taxon, time and location
pub fn juvenile_size_table(data: &SurveyData) -> Result<DataFrame> {
    // STEP 1: JuvenileColony ⋈ Surface
    let colonies = inner_join(
        data.juvenile_colonies(),
        data.surfaces(),
        SURFACE_ID,
        "juvenile size: colonies ⋈ surfaces",
    )?;
    let colonies = project(&colonies, &JUVENILE_SURFACE, "juvenile size: surfaces")?;

    // STEP 2: ⋈ Settlement
    let colonies = inner_join(&colonies, data.settlements(), SETTLEMENT_ID, "juvenile size: ⋈ settlements")?;
    let colonies = project(&colonies, &JUVENILE_SETTLEMENT, "juvenile size: settlements")?;

    // STEP 3: ⋈ Event
    let colonies = inner_join(&colonies, data.events(), EVENT_ID, "juvenile size: ⋈ events")?;
    let colonies = project(&colonies, &JUVENILE_EVENT, "juvenile size: events")?;

    // STEP 4: ⋈ Taxon
    let colonies = inner_join(&colonies, data.taxa(), TAXON_ID, "juvenile size: ⋈ taxa")?;
    let colonies = project(&colonies, &JUVENILE_TAXON, "juvenile size: taxa")?;

    // STEP 5: Size_mm = Length_mm * Width_mm
    let colonies = with_colony_size(&colonies)?;

    // STEP 6: ⋈ Location
    let colonies = inner_join(&colonies, data.locations(), LOCATION_ID, "juvenile size: ⋈ locations")?;
    let table = project(&colonies, &JUVENILE_SIZE, "juvenile size")?;

    let table = drop_nulls_in(&table, ISLAND, "juvenile size")?;
    let table = drop_nulls_in(&table, TAXON_NAME, "juvenile size")?;
    drop_nulls_in(&table, LATITUDE, "juvenile size")
}
