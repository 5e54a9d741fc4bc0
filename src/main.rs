use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use ev_dashboard::data::filter::BrandFilter;
use ev_dashboard::state::{BarChartView, DashboardState, RangeCurveView, ScatterView};
use ev_dashboard::{Locale, Metric, UnitSystem};

/// Print the EV dashboard view-models for a CSV of vehicle specifications.
#[derive(Debug, Parser)]
#[command(name = "ev-dashboard", version, about)]
struct Cli {
    /// CSV file with one vehicle per row.
    data: PathBuf,

    /// Metric ranked in the brand bar chart.
    #[arg(long, default_value = "range_km")]
    metric: Metric,

    /// Unit system for displayed values.
    #[arg(long, default_value = "metric")]
    units: UnitSystem,

    /// Label language.
    #[arg(long, default_value = "en")]
    lang: Locale,

    /// Restrict the bar chart to one brand. Every brand when omitted.
    #[arg(long)]
    brand: Option<String>,

    /// Model to include in the scatter plot and range curve. Repeatable.
    #[arg(long = "model")]
    models: Vec<String>,

    /// Emit compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardOutput {
    locale: Locale,
    unit_system: UnitSystem,
    vehicles: usize,
    bar_chart: Option<BarChartView>,
    scatter_plot: Option<ScatterView>,
    range_curve: Option<RangeCurveView>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = DashboardState::default();
    state.set_locale(cli.lang);
    state.unit_system = cli.units;
    state.bar_metric = cli.metric;
    state.brand_filter = cli.brand.map_or(BrandFilter::All, BrandFilter::Brand);
    for model in &cli.models {
        state.selection.insert(model.as_str());
    }

    let ticket = state.begin_load();
    let fetched = std::fs::read_to_string(&cli.data)
        .with_context(|| format!("reading {}", cli.data.display()));
    state.finish_load(ticket, fetched);
    if let Some(msg) = state.status_message() {
        anyhow::bail!(msg);
    }

    let output = DashboardOutput {
        locale: state.locale,
        unit_system: state.unit_system,
        vehicles: state.dataset().map_or(0, |ds| ds.len()),
        bar_chart: state.bar_chart(),
        scatter_plot: state.scatter_plot(),
        range_curve: state.range_curve(),
    };

    let json = if cli.compact {
        serde_json::to_string(&output)
    } else {
        serde_json::to_string_pretty(&output)
    }
    .context("serializing dashboard")?;
    println!("{json}");
    Ok(())
}
