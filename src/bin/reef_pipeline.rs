// Reef survey pipeline entry point
//
// Loads the survey extracts, builds the five output tables and writes them
// as CSV. Usage: cargo run --bin reef_pipeline -- --data-dir ./records-2300415/

use anyhow::{Context, Result};
use clap::Parser;
use reef_survey_rust::reporting::{
    export_all, island_centers, island_statistics, period_means, rolling_means, with_severity_score, IslandCenter,
    IslandStatistics, SEVERITY_NUM,
};
use reef_survey_rust::{PeriodGranularity, PipelineConfig, SurveyPipeline};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "reef_pipeline")]
#[command(about = "Join coral reef survey extracts into analysis-ready tables")]
struct Args {
    /// JSON configuration file (defaults plus REEF_* environment overrides when absent)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the source CSV extracts
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Period granularity for dates: Y, M or D
    #[arg(long)]
    period: Option<PeriodGranularity>,

    /// Directory the output tables are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Print per-island statistics as JSON
    #[arg(long)]
    summary: bool,
}

#[derive(Serialize)]
struct IslandSummary<'a> {
    table: &'a str,
    value: &'a str,
    islands: Vec<IslandStatistics>,
}

#[derive(Serialize)]
struct TrendPoint {
    period: String,
    n: usize,
    mean: f64,
    /// Mean of this and the two preceding periods
    rolling_mean: Option<f64>,
}

#[derive(Serialize)]
struct Summary<'a> {
    islands: [IslandSummary<'a>; 4],
    heterogeneity_by_year: Vec<TrendPoint>,
    survey_centers: Vec<IslandCenter>,
}

fn main() -> Result<()> {
    // Default log level: info for our crate, warn for others
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reef_survey_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?
            .with_env_overrides()?,
        None => PipelineConfig::from_env()?,
    };
    if let Some(data_dir) = args.data_dir {
        config = config.with_data_dir(data_dir);
    }
    if let Some(period) = args.period {
        config = config.with_period(period);
    }

    tracing::info!("Configuration:");
    tracing::info!("  data_dir: {:?}", config.data_dir);
    tracing::info!("  period: {}", config.period);
    tracing::info!("  out_dir: {:?}", args.out_dir);

    let pipeline = SurveyPipeline::load(&config)
        .with_context(|| format!("Failed to load survey extracts from {:?}", config.data_dir))?;

    let written = export_all(&pipeline, &args.out_dir)
        .with_context(|| format!("Failed to export tables to {:?}", args.out_dir))?;
    for path in &written {
        println!("{}", path.display());
    }

    if args.summary {
        let rugosity = pipeline.get_rugosity_table()?;
        let bleaching = with_severity_score(&pipeline.get_bleaching_severity_table()?)?;
        let islands = [
            IslandSummary {
                table: "rugosity",
                value: "Heterogeneity",
                islands: island_statistics(&rugosity, "Heterogeneity")?,
            },
            IslandSummary {
                table: "bleaching severity",
                value: SEVERITY_NUM,
                islands: island_statistics(&bleaching, SEVERITY_NUM)?,
            },
            IslandSummary {
                table: "fish density",
                value: "Density",
                islands: island_statistics(&pipeline.get_fish_density_table()?, "Density")?,
            },
            IslandSummary {
                table: "juvenile size",
                value: "Size_mm",
                islands: island_statistics(&pipeline.get_juvenile_size_table()?, "Size_mm")?,
            },
        ];

        let yearly = period_means(&rugosity, "Start_Date", "Heterogeneity", PeriodGranularity::Year)?;
        let heterogeneity_by_year = yearly
            .iter()
            .zip(rolling_means(&yearly, 3))
            .map(|(point, rolling_mean)| TrendPoint {
                period: point.period.clone(),
                n: point.n,
                mean: point.mean,
                rolling_mean,
            })
            .collect();

        let summary = Summary {
            islands,
            heterogeneity_by_year,
            survey_centers: island_centers(&rugosity)?,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
