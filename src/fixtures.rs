//! Small survey export shared by the unit tests
//!
//! Row-by-row expectations:
//! - Locations: 1 Guam, 2 Tutuila, 3 no island, 4 no latitude
//! - Events 10, 11, 15 are on Guam/Tutuila; 12 → location 3, 13 → location 4,
//!   14 → unknown location 99
//! - Bleaching: b1-b4 survive, b2 has no severity
//! - Rugosity: events 10 (0.8), 11 (zero tape → NaN), 15 (no chain → null)
//! - Fish: f1, f2 (zero area → NaN), f8 survive
//! - Juvenile colonies: j1 (8 mm²) and j3 (9 mm²) survive

use polars::prelude::*;

use crate::data::{RawTables, SurveyData};
use crate::utils::normalization::NormalizeOptions;

pub(crate) fn raw_tables() -> RawTables {
    RawTables {
        locations: df![
            "Location_ID" => &[1i64, 2, 3, 4],
            "Island" => &[Some("Guam"), Some("Tutuila"), None, Some("Hawaii")],
            "Subunit" => &["Piti", "Fagatele", "North", "Kona"],
            "Loc_Name" => &["Piti Bomb Holes", "Fagatele Bay", "Unnamed", "Kahaluu"],
            "Latitude" => &[Some(13.5), Some(-14.3), Some(20.0), None],
            "Longitude" => &[144.8, -170.7, -156.0, -155.5],
            "Unused" => &["a", "b", "c", "d"],
        ]
        .unwrap(),
        events: df![
            "Event_ID" => &["10", "11", "12", "13", "14", "15"],
            "Location_ID" => &["1", "2", "3", "4", "99", "1"],
            "Start_Date" => &["2020-06-01", "2020-06-28", "2021-01-10", "2021-02-03", "2021-03-01", "3/17/2021 0:00:00"],
            "Entered_Date" => &[Some("2020-06-15"), Some("2020-07-02"), None, None, None, Some("2021-03-20")],
        ]
        .unwrap(),
        benthic_cover: df![
            "Benthic_ID" => &["b1", "b2", "b3", "b4", "b5", "b6", "b7"],
            "Event_ID" => &["10", "10", "11", "12", "13", "14", "99"],
            "Frame" => &["1", "2", "1", "1", "1", "1", "1"],
            "Disease_Bleaching" => &[Some("No"), None, Some("Yes"), Some("Yes"), Some("Yes"), Some("No"), Some("No")],
            "Severity" => &[Some("0%"), None, Some("26-50%"), Some("1-25%"), Some("51-75%"), Some("0%"), Some("0%")],
        ]
        .unwrap(),
        rugosity: df![
            "Event_ID" => &["10", "11", "15", "13", "99"],
            "Chain_length" => &[Some(8.0), Some(12.0), None, Some(5.0), Some(5.0)],
            "Tape_length" => &[10.0, 0.0, 10.0, 10.0, 5.0],
        ]
        .unwrap(),
        fish: df![
            "Fish_ID" => &["f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8"],
            "Event_ID" => &["10", "10", "11", "12", "13", "10", "14", "15"],
            "Taxon_ID" => &[100.0, 102.0, 101.0, 100.0, 100.0, 999.0, 100.0, 102.0],
            "Number" => &[4i64, 3, 1, 1, 1, 1, 1, 10],
            "Area" => &[2.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 5.0],
        ]
        .unwrap(),
        juvenile_colonies: df![
            "Juv_Colony_ID" => &["j1", "j2", "j3", "j4", "j5", "j6", "j7", "j8"],
            "Surface_ID" => &["s1", "s1", "s2", "s3", "s9", "s2", "s1", "s4"],
            "Taxon_ID" => &["200", "200", "200", "200", "200", "101", "300", "200"],
            "Genus_code" => &["POCI", "POCI", "POCI", "POCI", "POCI", "UNKN", "UNKN", "POCI"],
            "Ind_Count" => &[Some(1i64), None, Some(2), Some(1), Some(1), Some(1), Some(1), Some(1)],
            "Length_mm" => &[4.0, 5.0, 3.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            "Width_mm" => &[2.0, 2.0, 3.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        ]
        .unwrap(),
        settlements: df![
            "Settlement_ID" => &["p1", "p2", "p3"],
            "Event_ID" => &["10", "11", "13"],
        ]
        .unwrap(),
        surfaces: df![
            "Surface_ID" => &["s1", "s2", "s3", "s4"],
            "Settlement_ID" => &["p1", "p2", "p9", "p3"],
        ]
        .unwrap(),
        taxa: df![
            "Taxon_ID" => &[100i64, 101, 102, 200],
            "Taxon_Name" => &[Some("Chromis"), None, Some("Acanthurus"), Some("Pocillopora")],
            "Type" => &["Fish", "Fish", "Fish", "Coral"],
        ]
        .unwrap(),
    }
}

pub(crate) fn survey_data() -> SurveyData {
    SurveyData::from_raw(raw_tables(), &NormalizeOptions::default()).unwrap()
}
