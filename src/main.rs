//! Titanic Manifest Analyzer - passenger statistics and survival charts
//!
//! Loads a manifest CSV, prints the three summary tables, and exports both
//! charts as PNG and JSON.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use titanic_analysis::charts::{
    ChartBuilder, StaticChartRenderer, FAMILY_CHART_SIZE, SURVIVAL_CHART_SIZE,
};
use titanic_analysis::data::DataLoader;
use titanic_analysis::stats::{DemographicsAggregator, FamilyAggregator, NameCounter};

#[derive(Parser)]
#[command(name = "titanic_analysis")]
#[command(about = "Analyze the Titanic passenger manifest", long_about = None)]
struct Cli {
    /// Path to the manifest CSV
    #[arg(value_name = "CSV_PATH")]
    csv_path: String,

    /// Directory chart exports are written to
    #[arg(long, default_value = "charts")]
    out_dir: PathBuf,

    /// Number of surnames to print
    #[arg(long, default_value_t = 15)]
    top_surnames: usize,

    /// Skip chart export
    #[arg(long, default_value_t = false)]
    no_charts: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "titanic_analysis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Polars elides table rows past a limit (default 10); -1 prints everything
    if env::var_os("POLARS_FMT_MAX_ROWS").is_none() {
        env::set_var("POLARS_FMT_MAX_ROWS", "-1");
    }

    let cli = Cli::parse();

    let mut loader = DataLoader::new();
    let records = loader
        .load_csv(&cli.csv_path)
        .with_context(|| format!("loading manifest from {}", cli.csv_path))?;
    info!(passengers = records.len(), "manifest loaded");

    let demographics = DemographicsAggregator::aggregate(records);
    let families = FamilyAggregator::aggregate(records);
    let surnames = NameCounter::count(records);

    println!("Survival Demographics Summary");
    println!("{}", DemographicsAggregator::to_dataframe(&demographics)?);

    println!("\nFamily Size and Fare Summary");
    println!("{}", FamilyAggregator::to_dataframe(&families)?);

    println!("\nTop Last Names and Counts");
    let surname_df = NameCounter::to_dataframe(&surnames)?;
    println!("{}", surname_df.head(Some(cli.top_surnames)));

    if cli.no_charts {
        return Ok(());
    }

    let survival_spec = ChartBuilder::survival_chart(&demographics);
    let family_spec = ChartBuilder::family_chart(&families);

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let survival_png = cli.out_dir.join("survival_by_demographics.png");
    StaticChartRenderer::render_survival_chart(&survival_spec, &survival_png, SURVIVAL_CHART_SIZE)?;
    fs::write(
        cli.out_dir.join("survival_by_demographics.json"),
        serde_json::to_string_pretty(&survival_spec)?,
    )?;

    let family_png = cli.out_dir.join("fare_by_family_size.png");
    StaticChartRenderer::render_family_chart(&family_spec, &family_png, FAMILY_CHART_SIZE)?;
    fs::write(
        cli.out_dir.join("fare_by_family_size.json"),
        serde_json::to_string_pretty(&family_spec)?,
    )?;

    info!(out_dir = %cli.out_dir.display(), "charts exported");
    Ok(())
}
