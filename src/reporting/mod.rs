//! Reporting on top of the pipeline's output tables
//!
//! Nothing here joins source tables; every function takes an output table
//! (or the pipeline itself, for export).

pub mod export;
pub mod severity;
pub mod summary;

pub use export::{export_all, write_csv};
pub use severity::{bleached_only, with_severity_score, Severity, SEVERITY_NUM};
pub use summary::{
    center_point, island_centers, island_statistics, period_means, rolling_means, IslandCenter, IslandStatistics,
    PeriodMean,
};
