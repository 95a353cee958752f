//! Output and intermediate table schemas
//!
//! Every projection in the join pipeline goes through one of these named
//! schemas. Required columns must be present (keys, filter columns, metric
//! operands); optional display columns are filled with typed nulls when a
//! source extract does not carry them.

use polars::prelude::DataType;

/// Column names shared by the source tables and the outputs
pub mod columns {
    pub const LOCATION_ID: &str = "Location_ID";
    pub const EVENT_ID: &str = "Event_ID";
    pub const BENTHIC_ID: &str = "Benthic_ID";
    pub const FISH_ID: &str = "Fish_ID";
    pub const TAXON_ID: &str = "Taxon_ID";
    pub const JUV_COLONY_ID: &str = "Juv_Colony_ID";
    pub const SURFACE_ID: &str = "Surface_ID";
    pub const SETTLEMENT_ID: &str = "Settlement_ID";
    pub const SITE_ID: &str = "Site_ID";

    pub const ISLAND: &str = "Island";
    pub const SUBUNIT: &str = "Subunit";
    pub const LOC_NAME: &str = "Loc_Name";
    pub const LOC_TYPE: &str = "Loc_Type";
    pub const LATITUDE: &str = "Latitude";
    pub const LATITUDE_DIR: &str = "Latitude_Dir";
    pub const LONGITUDE: &str = "Longitude";
    pub const LONGITUDE_DIR: &str = "Longitude_Dir";
    pub const GCS: &str = "GCS";
    pub const MANAGEMENT: &str = "Management";
    pub const DEPTH: &str = "Depth";
    pub const LOC_STATUS: &str = "Loc_status";

    pub const START_DATE: &str = "Start_Date";
    pub const ENTERED_DATE: &str = "Entered_Date";
    pub const RUGOSITY: &str = "Rugosity";

    pub const FRAME: &str = "Frame";
    pub const DISEASE_BLEACHING: &str = "Disease_Bleaching";
    pub const SEVERITY: &str = "Severity";

    pub const CHAIN_LENGTH: &str = "Chain_length";
    pub const TAPE_LENGTH: &str = "Tape_length";
    pub const HETEROGENEITY: &str = "Heterogeneity";

    pub const NUMBER: &str = "Number";
    pub const AREA: &str = "Area";
    pub const DENSITY: &str = "Density";

    pub const TAXON_NAME: &str = "Taxon_Name";
    pub const TYPE: &str = "Type";

    pub const GENUS_CODE: &str = "Genus_code";
    pub const IND_COUNT: &str = "Ind_Count";
    pub const LENGTH_MM: &str = "Length_mm";
    pub const WIDTH_MM: &str = "Width_mm";
    pub const SIZE_MM: &str = "Size_mm";
}

use columns::*;

/// Type used to fill an absent optional column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Text,
    Number,
    Period,
}

impl Fill {
    pub fn dtype(&self) -> DataType {
        match self {
            Fill::Text => DataType::String,
            Fill::Number => DataType::Float64,
            Fill::Period => DataType::Date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub fill: Fill,
    pub required: bool,
}

const fn key(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, fill: Fill::Text, required: true }
}

const fn label(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, fill: Fill::Text, required: false }
}

const fn required_label(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, fill: Fill::Text, required: true }
}

const fn number(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, fill: Fill::Number, required: false }
}

const fn measure(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, fill: Fill::Number, required: true }
}

const fn period(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, fill: Fill::Period, required: false }
}

const fn required_period(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, fill: Fill::Period, required: true }
}

/// Ordered column set of a relation
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl TableSchema {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }
}

/// Location columns kept at load time
pub const LOCATION: TableSchema = TableSchema {
    name: "location",
    columns: &[
        key(LOCATION_ID),
        measure(LATITUDE),
        label(LATITUDE_DIR),
        number(LONGITUDE),
        label(LONGITUDE_DIR),
        label(SITE_ID),
        required_label(ISLAND),
        label(SUBUNIT),
        label(LOC_NAME),
        label(LOC_TYPE),
        label(GCS),
        label(MANAGEMENT),
        number(DEPTH),
        label(LOC_STATUS),
    ],
};

pub const BLEACHING: TableSchema = TableSchema {
    name: "bleaching",
    columns: &[
        key(EVENT_ID),
        key(LOCATION_ID),
        required_label(ISLAND),
        label(SUBUNIT),
        label(LOC_NAME),
        measure(LATITUDE),
        label(LATITUDE_DIR),
        number(LONGITUDE),
        label(LONGITUDE_DIR),
        required_period(START_DATE),
        period(ENTERED_DATE),
        label(RUGOSITY),
        label(BENTHIC_ID),
        label(FRAME),
        label(DISEASE_BLEACHING),
        required_label(SEVERITY),
    ],
};

pub const RUGOSITY_TABLE: TableSchema = TableSchema {
    name: "rugosity",
    columns: &[
        key(EVENT_ID),
        key(LOCATION_ID),
        required_label(ISLAND),
        label(SUBUNIT),
        label(LOC_NAME),
        measure(LATITUDE),
        label(LATITUDE_DIR),
        number(LONGITUDE),
        label(LONGITUDE_DIR),
        required_period(START_DATE),
        period(ENTERED_DATE),
        label(RUGOSITY),
        measure(CHAIN_LENGTH),
        measure(TAPE_LENGTH),
        measure(HETEROGENEITY),
    ],
};

/// Fish ⋈ Event
pub const FISH_EVENT: TableSchema = TableSchema {
    name: "fish event",
    columns: &[
        label(FISH_ID),
        key(EVENT_ID),
        key(TAXON_ID),
        key(LOCATION_ID),
        required_period(START_DATE),
        period(ENTERED_DATE),
        measure(NUMBER),
        measure(AREA),
    ],
};

/// Fish ⋈ Event ⋈ Taxon
pub const FISH_TAXON: TableSchema = TableSchema {
    name: "fish taxon",
    columns: &[
        label(FISH_ID),
        key(EVENT_ID),
        key(TAXON_ID),
        required_label(TAXON_NAME),
        label(TYPE),
        key(LOCATION_ID),
        required_period(START_DATE),
        period(ENTERED_DATE),
        measure(NUMBER),
        measure(AREA),
    ],
};

pub const FISH_DENSITY: TableSchema = TableSchema {
    name: "fish density",
    columns: &[
        label(FISH_ID),
        key(EVENT_ID),
        key(TAXON_ID),
        required_label(TAXON_NAME),
        label(TYPE),
        key(LOCATION_ID),
        measure(LATITUDE),
        label(LATITUDE_DIR),
        number(LONGITUDE),
        label(LONGITUDE_DIR),
        required_label(ISLAND),
        label(SUBUNIT),
        label(LOC_NAME),
        required_period(START_DATE),
        period(ENTERED_DATE),
        measure(NUMBER),
        measure(AREA),
        measure(DENSITY),
    ],
};

/// JuvenileColony ⋈ Surface
pub const JUVENILE_SURFACE: TableSchema = TableSchema {
    name: "juvenile surface",
    columns: &[
        label(JUV_COLONY_ID),
        key(SURFACE_ID),
        key(SETTLEMENT_ID),
        key(TAXON_ID),
        label(GENUS_CODE),
        measure(IND_COUNT),
        measure(LENGTH_MM),
        measure(WIDTH_MM),
    ],
};

/// ... ⋈ Settlement
pub const JUVENILE_SETTLEMENT: TableSchema = TableSchema {
    name: "juvenile settlement",
    columns: &[
        label(JUV_COLONY_ID),
        key(SURFACE_ID),
        key(SETTLEMENT_ID),
        key(EVENT_ID),
        key(TAXON_ID),
        label(GENUS_CODE),
        measure(IND_COUNT),
        measure(LENGTH_MM),
        measure(WIDTH_MM),
    ],
};

/// ... ⋈ Event
pub const JUVENILE_EVENT: TableSchema = TableSchema {
    name: "juvenile event",
    columns: &[
        label(JUV_COLONY_ID),
        key(SURFACE_ID),
        key(SETTLEMENT_ID),
        key(EVENT_ID),
        key(TAXON_ID),
        key(LOCATION_ID),
        required_period(START_DATE),
        period(ENTERED_DATE),
        label(GENUS_CODE),
        measure(IND_COUNT),
        measure(LENGTH_MM),
        measure(WIDTH_MM),
    ],
};

/// ... ⋈ Taxon
pub const JUVENILE_TAXON: TableSchema = TableSchema {
    name: "juvenile taxon",
    columns: &[
        label(JUV_COLONY_ID),
        key(SURFACE_ID),
        key(SETTLEMENT_ID),
        key(EVENT_ID),
        key(TAXON_ID),
        key(LOCATION_ID),
        required_label(TAXON_NAME),
        label(TYPE),
        required_period(START_DATE),
        period(ENTERED_DATE),
        label(GENUS_CODE),
        measure(IND_COUNT),
        measure(LENGTH_MM),
        measure(WIDTH_MM),
    ],
};

pub const JUVENILE_SIZE: TableSchema = TableSchema {
    name: "juvenile size",
    columns: &[
        label(JUV_COLONY_ID),
        key(SURFACE_ID),
        key(SETTLEMENT_ID),
        key(EVENT_ID),
        key(TAXON_ID),
        key(LOCATION_ID),
        measure(LATITUDE),
        label(LATITUDE_DIR),
        number(LONGITUDE),
        label(LONGITUDE_DIR),
        required_label(ISLAND),
        label(SUBUNIT),
        label(LOC_NAME),
        required_label(TAXON_NAME),
        label(TYPE),
        required_period(START_DATE),
        period(ENTERED_DATE),
        label(GENUS_CODE),
        measure(IND_COUNT),
        measure(LENGTH_MM),
        measure(WIDTH_MM),
        measure(SIZE_MM),
    ],
};
