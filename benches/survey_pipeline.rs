use criterion::{criterion_group, criterion_main, Criterion};
use polars::prelude::*;
use reef_survey_rust::utils::NormalizeOptions;
use reef_survey_rust::{RawTables, SurveyData, SurveyPipeline};
use std::hint::black_box;

const LOCATIONS: usize = 50;
const EVENTS: usize = 2_000;
const ROWS: usize = 20_000;

const ISLANDS: [&str; 4] = ["Guam", "Tutuila", "Saipan", "Tinian"];

fn ids(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

fn synthetic_tables() -> RawTables {
    let location_ids: Vec<i64> = (0..LOCATIONS as i64).collect();
    let islands: Vec<&str> = (0..LOCATIONS).map(|i| ISLANDS[i % ISLANDS.len()]).collect();
    let latitudes: Vec<f64> = (0..LOCATIONS).map(|i| 13.0 + i as f64 * 0.01).collect();
    let longitudes: Vec<f64> = (0..LOCATIONS).map(|i| 144.0 + i as f64 * 0.01).collect();

    let event_ids: Vec<i64> = (0..EVENTS as i64).collect();
    let event_locations: Vec<i64> = (0..EVENTS as i64).map(|i| i % LOCATIONS as i64).collect();
    let start_dates: Vec<String> = (0..EVENTS)
        .map(|i| format!("{}-{:02}-{:02}", 2010 + i % 12, 1 + i % 12, 1 + i % 28))
        .collect();

    let row_events: Vec<i64> = (0..ROWS as i64).map(|i| i % EVENTS as i64).collect();
    let taxon_ids: Vec<f64> = (0..ROWS).map(|i| (i % 20) as f64).collect();
    let severities: Vec<&str> = (0..ROWS).map(|i| ["0%", "1-25%", "26-50%"][i % 3]).collect();
    let measures: Vec<f64> = (0..ROWS).map(|i| (i % 17) as f64 + 1.0).collect();

    let settlement_ids = ids("p", EVENTS);
    let surface_ids = ids("s", EVENTS);
    let row_surfaces: Vec<String> = (0..ROWS).map(|i| format!("s{}", i % EVENTS)).collect();

    RawTables {
        locations: df![
            "Location_ID" => location_ids,
            "Island" => islands,
            "Latitude" => latitudes,
            "Longitude" => longitudes,
        ]
        .unwrap(),
        events: df![
            "Event_ID" => &event_ids,
            "Location_ID" => event_locations,
            "Start_Date" => start_dates,
        ]
        .unwrap(),
        benthic_cover: df![
            "Benthic_ID" => ids("b", ROWS),
            "Event_ID" => &row_events,
            "Severity" => severities,
        ]
        .unwrap(),
        rugosity: df![
            "Event_ID" => &event_ids,
            "Chain_length" => &measures[..EVENTS],
            "Tape_length" => vec![10.0; EVENTS],
        ]
        .unwrap(),
        fish: df![
            "Fish_ID" => ids("f", ROWS),
            "Event_ID" => &row_events,
            "Taxon_ID" => &taxon_ids,
            "Number" => &measures,
            "Area" => vec![2.0; ROWS],
        ]
        .unwrap(),
        juvenile_colonies: df![
            "Juv_Colony_ID" => ids("j", ROWS),
            "Surface_ID" => row_surfaces,
            "Taxon_ID" => &taxon_ids,
            "Ind_Count" => vec![1i64; ROWS],
            "Length_mm" => &measures,
            "Width_mm" => &measures,
        ]
        .unwrap(),
        settlements: df![
            "Settlement_ID" => &settlement_ids,
            "Event_ID" => &event_ids,
        ]
        .unwrap(),
        surfaces: df![
            "Surface_ID" => surface_ids,
            "Settlement_ID" => &settlement_ids,
        ]
        .unwrap(),
        taxa: df![
            "Taxon_ID" => (0..20i64).collect::<Vec<_>>(),
            "Taxon_Name" => ids("taxon ", 20),
        ]
        .unwrap(),
    }
}

fn bench_load(c: &mut Criterion) {
    let raw = synthetic_tables();
    let options = NormalizeOptions::default();

    c.bench_function("survey/normalize", |b| {
        b.iter(|| {
            let data = SurveyData::from_raw(black_box(raw.clone()), &options).expect("normalize tables");
            black_box(data.events().height());
        });
    });
}

fn bench_output_tables(c: &mut Criterion) {
    let data = SurveyData::from_raw(synthetic_tables(), &NormalizeOptions::default()).expect("normalize tables");
    let pipeline = SurveyPipeline::new(data);

    c.bench_function("survey/bleaching", |b| {
        b.iter(|| black_box(pipeline.get_bleaching_table().expect("bleaching").height()));
    });
    c.bench_function("survey/rugosity", |b| {
        b.iter(|| black_box(pipeline.get_rugosity_table().expect("rugosity").height()));
    });
    c.bench_function("survey/fish_density", |b| {
        b.iter(|| black_box(pipeline.get_fish_density_table().expect("fish density").height()));
    });
    c.bench_function("survey/juvenile_size", |b| {
        b.iter(|| black_box(pipeline.get_juvenile_size_table().expect("juvenile size").height()));
    });
}

criterion_group!(benches, bench_load, bench_output_tables);
criterion_main!(benches);
