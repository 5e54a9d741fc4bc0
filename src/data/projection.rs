//! Chart-specific view-models built from the ingested records.

use std::cmp::Ordering;

use serde::Serialize;

use super::aggregate::BrandAggregate;
use super::catalog::{Metric, UnitSystem};
use super::filter::{selected_records, ModelSelection};
use super::model::VehicleRecord;

/// One selected vehicle on the battery-vs-efficiency scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    pub brand: String,
    pub model: String,
    /// x-axis, always kWh.
    pub battery_capacity: Option<f64>,
    /// y-axis, Wh/km or Wh/mile.
    pub efficiency: Option<f64>,
    /// Marker size, km or miles.
    pub range: Option<f64>,
    pub drivetrain: String,
}

/// One selected vehicle on the range-vs-battery curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeCurvePoint {
    pub model: String,
    pub battery_capacity: Option<f64>,
    pub range: Option<f64>,
}

/// Scatter points for the selected models, in record order.
pub fn project_scatter(
    records: &[VehicleRecord],
    selection: &ModelSelection,
    system: UnitSystem,
) -> Vec<ScatterPoint> {
    selected_records(records, selection)
        .map(|rec| ScatterPoint {
            brand: rec.brand.clone(),
            model: rec.model.clone(),
            battery_capacity: rec.metric(Metric::BatteryCapacityKwh),
            efficiency: Metric::EfficiencyWhPerKm.convert(rec.metric(Metric::EfficiencyWhPerKm), system),
            range: Metric::RangeKm.convert(rec.metric(Metric::RangeKm), system),
            drivetrain: rec.drivetrain_or_default().to_string(),
        })
        .collect()
}

/// Range against battery capacity for the selected models, ordered by
/// capacity ascending. Points without a capacity go last.
pub fn project_range_curve(
    records: &[VehicleRecord],
    selection: &ModelSelection,
    system: UnitSystem,
) -> Vec<RangeCurvePoint> {
    let mut points: Vec<RangeCurvePoint> = selected_records(records, selection)
        .map(|rec| RangeCurvePoint {
            model: rec.model.clone(),
            battery_capacity: rec.metric(Metric::BatteryCapacityKwh),
            range: Metric::RangeKm.convert(rec.metric(Metric::RangeKm), system),
        })
        .collect();
    points.sort_by(|a, b| match (a.battery_capacity, b.battery_capacity) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    points
}

/// Convert brand aggregates for display. Ranking order is unchanged since
/// every conversion factor is positive.
pub fn convert_aggregates(
    aggregates: &[BrandAggregate],
    selected: Metric,
    system: UnitSystem,
) -> Vec<BrandAggregate> {
    aggregates
        .iter()
        .map(|agg| {
            let averages = agg.averages.map(|metric, v| metric.convert(Some(v), system));
            BrandAggregate {
                name: agg.name.clone(),
                selected_value: averages.get(selected),
                averages,
                models: agg.models,
            }
        })
        .collect()
}
