//! Ladeatlas - EV charging station statistics and maps for Germany
//!
//! Loads the federal charging station register (`;`-delimited CSV), computes
//! per-state counts, extremes, filtered city rankings and operator capacity
//! rankings, and renders bar charts, a state choropleth and an interactive
//! city map.

mod charts;
mod data;
mod geo;
mod report;
mod stats;

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use charts::{BarChartRenderer, ChoroplethRenderer, PointMapRenderer};
use data::{schema, StationLoader};

const DEFAULT_EXCLUDED_CITIES: [&str; 6] =
    ["Berlin", "Hamburg", "München", "Munich", "Köln", "Cologne"];

#[derive(Parser)]
#[command(name = "ladeatlas", version, about = "EV charging station statistics and maps for Germany")]
struct Cli {
    /// Register CSV export (`;`-separated, UTF-8)
    #[arg(long)]
    input: String,

    /// Federal state boundaries, as URL or local GeoJSON file
    #[arg(long, default_value = geo::DEFAULT_GEOJSON_URL)]
    geojson: String,

    /// Directory for the rendered charts and the city map
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// City for the scoped summary and the interactive map
    #[arg(long, default_value = "Amberg")]
    city: String,

    /// City to leave out of the top-city ranking; repeat for more than one.
    /// Given at least once, the default major-city list is replaced.
    #[arg(long = "exclude")]
    excluded: Vec<String>,

    /// Number of operators in the capacity ranking
    #[arg(long, default_value_t = 5)]
    top_n: usize,

    /// Open the generated city map with the system default app
    #[arg(long)]
    open: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Cli::parse();
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let df = StationLoader::load_csv(&args.input)
        .with_context(|| format!("loading {}", args.input))?;
    info!(rows = df.height(), "loaded station register");

    // Stations per state: console list, bar chart, extremes.
    let state_counts = stats::count_by_key(&df, schema::STATE)?;
    report::print(&report::format_state_counts(&state_counts));

    let state_chart = args.out_dir.join("stations_per_state.png");
    let state_entries: Vec<(String, f64)> = state_counts
        .iter()
        .map(|(state, count)| (state.clone(), *count as f64))
        .collect();
    BarChartRenderer::render(
        &state_chart,
        "Charging Stations per German State",
        "Number of Stations",
        &state_entries,
    )?;
    info!(path = %state_chart.display(), "wrote state bar chart");

    let extremes = stats::summarize_extremes(&df, schema::STATE)?;
    report::print(&report::format_extremes(&extremes));

    // Choropleth over the federal state shapes.
    let regions = geo::load_regions(&args.geojson)
        .with_context(|| format!("loading region shapes from {}", args.geojson))?;
    info!(regions = regions.len(), "loaded region shapes");
    let joined = geo::join_counts_to_regions(regions, &state_counts);
    let density_map = args.out_dir.join("station_density.png");
    ChoroplethRenderer::render(
        &density_map,
        "Charging Station Density by German State",
        &joined,
    )?;
    info!(path = %density_map.display(), "wrote choropleth");

    // Top city outside the excluded majors.
    let excluded: Vec<String> = if args.excluded.is_empty() {
        DEFAULT_EXCLUDED_CITIES.iter().map(|s| s.to_string()).collect()
    } else {
        args.excluded.clone()
    };
    let excluded_set: HashSet<String> = excluded.iter().cloned().collect();
    let top_city = stats::top_entity_excluding(&df, schema::CITY, &excluded_set)?;
    report::print(&report::format_top_city(top_city.as_ref(), &excluded));

    // Scoped city summary and interactive map.
    let city_summary = stats::summarize_entity(&df, schema::CITY, &args.city, schema::POWER_KW)?;
    report::print(&report::format_city_summary(&args.city, &city_summary));

    let markers = data::city_markers(&df, &args.city)?;
    let city_map = args.out_dir.join("city_map.html");
    PointMapRenderer::render(&city_map, &args.city, &markers)?;
    info!(path = %city_map.display(), markers = markers.len(), "wrote city map");
    if args.open {
        open::that(&city_map).with_context(|| format!("opening {}", city_map.display()))?;
    }

    // Operator capacity ranking (charge points, not physical stations).
    let operator_ranking =
        stats::top_n_by_sum(&df, schema::OPERATOR, schema::CHARGE_POINTS, args.top_n)?;
    report::print(&report::format_operator_ranking(&operator_ranking));

    let operator_chart = args.out_dir.join("top_operators.png");
    BarChartRenderer::render(
        &operator_chart,
        &format!("Top {} Charging Station Operators in Germany", operator_ranking.len()),
        "Total Charge Points",
        &operator_ranking,
    )?;
    info!(path = %operator_chart.display(), "wrote operator chart");

    Ok(())
}
