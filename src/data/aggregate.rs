use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::catalog::{Metric, ParseKeyError, RankDirection};
use super::model::{MetricValues, VehicleRecord};
use crate::units::round1;

// ---------------------------------------------------------------------------
// BrandAggregate – one bar of the brand chart
// ---------------------------------------------------------------------------

/// Per-brand averages over every catalog metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandAggregate {
    /// Brand name.
    pub name: String,
    /// Mean of the non-null values of each metric, one decimal. `None` when
    /// no record of the brand has a value.
    pub averages: MetricValues,
    /// `averages` of the metric currently shown.
    pub selected_value: Option<f64>,
    /// Number of records in the group.
    pub models: usize,
}

/// Running mean and count for each metric of one brand.
#[derive(Debug, Default)]
struct Accumulator {
    mean: [f64; Metric::COUNT],
    count: [usize; Metric::COUNT],
    records: usize,
}

impl Accumulator {
    fn add(&mut self, record: &VehicleRecord) {
        self.records += 1;
        for (metric, value) in record.metrics.iter() {
            if let Some(v) = value {
                let i = metric.index();
                self.count[i] += 1;
                let n = self.count[i] as f64;
                // Incremental form stays finite where a plain sum would overflow.
                self.mean[i] += v / n - self.mean[i] / n;
            }
        }
    }

    fn averages(&self) -> MetricValues {
        let mut out = MetricValues::default();
        for metric in Metric::ALL {
            let i = metric.index();
            if self.count[i] > 0 {
                out.set(metric, Some(round1(self.mean[i])));
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Group records by brand, average every metric and rank by `selected`.
///
/// Groups start in order of first appearance; the stable ranking sort keeps
/// that order for ties. Brands without a value for `selected` rank last.
pub fn aggregate_by_brand<'a>(
    records: impl IntoIterator<Item = &'a VehicleRecord>,
    selected: Metric,
) -> Vec<BrandAggregate> {
    let mut order: Vec<&'a str> = Vec::new();
    let mut groups: HashMap<&'a str, Accumulator> = HashMap::new();

    for rec in records {
        let brand = rec.brand.as_str();
        groups
            .entry(brand)
            .or_insert_with(|| {
                order.push(brand);
                Accumulator::default()
            })
            .add(rec);
    }

    let mut aggregates: Vec<BrandAggregate> = order
        .into_iter()
        .filter_map(|brand| {
            let acc = groups.get(brand)?;
            let averages = acc.averages();
            Some(BrandAggregate {
                name: brand.to_string(),
                selected_value: averages.get(selected),
                averages,
                models: acc.records,
            })
        })
        .collect();

    rank(&mut aggregates, selected.rank_direction());
    aggregates
}

/// String-keyed variant of [`aggregate_by_brand`].
pub fn aggregate_by_brand_key(
    records: &[VehicleRecord],
    selected_key: &str,
) -> Result<Vec<BrandAggregate>, ParseKeyError> {
    let metric = selected_key.parse::<Metric>()?;
    Ok(aggregate_by_brand(records.iter(), metric))
}

/// Stable sort of aggregates by `selected_value` in `direction`, missing last.
pub fn rank(aggregates: &mut [BrandAggregate], direction: RankDirection) {
    aggregates.sort_by(|a, b| compare_ranked(a.selected_value, b.selected_value, direction));
}

/// Missing values compare as -inf when descending and +inf when ascending so
/// they sink to the end either way.
fn compare_ranked(a: Option<f64>, b: Option<f64>, direction: RankDirection) -> Ordering {
    match direction {
        RankDirection::Descending => {
            let a = a.unwrap_or(f64::NEG_INFINITY);
            let b = b.unwrap_or(f64::NEG_INFINITY);
            b.total_cmp(&a)
        }
        RankDirection::Ascending => {
            let a = a.unwrap_or(f64::INFINITY);
            let b = b.unwrap_or(f64::INFINITY);
            a.total_cmp(&b)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(brand: &str, model: &str, values: &[(Metric, f64)]) -> VehicleRecord {
        let mut rec = VehicleRecord {
            brand: brand.to_string(),
            model: model.to_string(),
            ..Default::default()
        };
        for &(metric, v) in values {
            rec.metrics.set(metric, Some(v));
        }
        rec
    }

    fn names(aggregates: &[BrandAggregate]) -> Vec<&str> {
        aggregates.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn averages_ignore_missing_values() {
        let records = vec![
            record("Tesla", "Model 3", &[(Metric::RangeKm, 560.0)]),
            record("Tesla", "Model S", &[(Metric::RangeKm, 650.0)]),
            record("Tesla", "Cybertruck", &[]),
        ];
        let out = aggregate_by_brand(&records, Metric::RangeKm);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].averages.get(Metric::RangeKm), Some(605.0));
        assert_eq!(out[0].selected_value, Some(605.0));
        assert_eq!(out[0].averages.get(Metric::TorqueNm), None);
        assert_eq!(out[0].models, 3);
    }

    #[test]
    fn averages_are_rounded_to_one_decimal() {
        let records = vec![
            record("Kia", "EV6", &[(Metric::Acceleration0To100S, 5.2)]),
            record("Kia", "EV9", &[(Metric::Acceleration0To100S, 5.3)]),
            record("Kia", "Niro", &[(Metric::Acceleration0To100S, 7.8)]),
        ];
        let out = aggregate_by_brand(&records, Metric::Acceleration0To100S);
        // (5.2 + 5.3 + 7.8) / 3 = 6.1
        assert_eq!(out[0].selected_value, Some(6.1));
    }

    #[test]
    fn huge_values_still_average() {
        let records = vec![
            record("Big", "A", &[(Metric::RangeKm, 1e308)]),
            record("Big", "B", &[(Metric::RangeKm, 1e308)]),
            record("Lone", "C", &[(Metric::RangeKm, 1e308)]),
        ];
        let out = aggregate_by_brand(&records, Metric::RangeKm);
        assert_eq!(out[0].selected_value, Some(1e308));
        assert_eq!(out[1].selected_value, Some(1e308));
    }

    #[test]
    fn one_aggregate_per_distinct_brand() {
        let records = vec![
            record("Tesla", "Model 3", &[]),
            record("BYD", "Seal", &[]),
            record("Tesla", "Model Y", &[]),
            record("Kia", "EV6", &[]),
        ];
        let out = aggregate_by_brand(&records, Metric::RangeKm);
        assert_eq!(names(&out), vec!["Tesla", "BYD", "Kia"]);
    }

    #[test]
    fn acceleration_ranks_ascending_and_others_descending() {
        let records = vec![
            record("Slow", "A", &[(Metric::Acceleration0To100S, 7.6), (Metric::RangeKm, 7.6)]),
            record("Fast", "B", &[(Metric::Acceleration0To100S, 3.3), (Metric::RangeKm, 3.3)]),
        ];
        let accel = aggregate_by_brand(&records, Metric::Acceleration0To100S);
        assert_eq!(names(&accel), vec!["Fast", "Slow"]);

        let range = aggregate_by_brand(&records, Metric::RangeKm);
        assert_eq!(names(&range), vec!["Slow", "Fast"]);
    }

    #[test]
    fn brands_without_data_rank_last_in_both_directions() {
        let records = vec![
            record("Empty", "X", &[]),
            record("Low", "A", &[(Metric::Acceleration0To100S, 3.0), (Metric::RangeKm, 300.0)]),
            record("High", "B", &[(Metric::Acceleration0To100S, 6.0), (Metric::RangeKm, 600.0)]),
        ];
        let accel = aggregate_by_brand(&records, Metric::Acceleration0To100S);
        assert_eq!(names(&accel), vec!["Low", "High", "Empty"]);

        let range = aggregate_by_brand(&records, Metric::RangeKm);
        assert_eq!(names(&range), vec!["High", "Low", "Empty"]);
    }

    #[test]
    fn ties_keep_first_appearance_order() {
        let records = vec![
            record("B", "1", &[(Metric::Seats, 5.0)]),
            record("A", "2", &[(Metric::Seats, 5.0)]),
            record("C", "3", &[(Metric::Seats, 7.0)]),
        ];
        let out = aggregate_by_brand(&records, Metric::Seats);
        assert_eq!(names(&out), vec!["C", "B", "A"]);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = vec![
            record("Tesla", "Model 3", &[(Metric::RangeKm, 560.0), (Metric::TorqueNm, 420.0)]),
            record("BYD", "Seal", &[(Metric::RangeKm, 570.0)]),
        ];
        let first = aggregate_by_brand(&records, Metric::TorqueNm);
        let second = aggregate_by_brand(&records, Metric::TorqueNm);
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = aggregate_by_brand_key(&[], "horsepower").unwrap_err();
        assert_eq!(err, ParseKeyError::Metric("horsepower".into()));
        assert!(aggregate_by_brand_key(&[], "range_km").unwrap().is_empty());
    }
}
