use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Index, IndexMut};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::catalog::Metric;

// ---------------------------------------------------------------------------
// MetricValues – one optional number per catalog metric
// ---------------------------------------------------------------------------

/// Fixed-size table of per-metric values indexed by [`Metric`].
///
/// `None` means unknown. Values stored here are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricValues([Option<f64>; Metric::COUNT]);

impl MetricValues {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0[metric.index()]
    }

    /// Store a value; non-finite input is stored as `None`.
    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        self.0[metric.index()] = value.filter(|v| v.is_finite());
    }

    /// Iterate `(metric, value)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, Option<f64>)> + '_ {
        Metric::ALL.iter().map(move |&m| (m, self.get(m)))
    }

    /// Apply `f` to every known value.
    pub fn map(&self, mut f: impl FnMut(Metric, f64) -> Option<f64>) -> MetricValues {
        let mut out = MetricValues::default();
        for (metric, value) in self.iter() {
            out.set(metric, value.and_then(|v| f(metric, v)));
        }
        out
    }
}

impl Index<Metric> for MetricValues {
    type Output = Option<f64>;

    fn index(&self, metric: Metric) -> &Option<f64> {
        &self.0[metric.index()]
    }
}

impl IndexMut<Metric> for MetricValues {
    fn index_mut(&mut self, metric: Metric) -> &mut Option<f64> {
        &mut self.0[metric.index()]
    }
}

/// Serialized as a map keyed by the CSV column name, in catalog order.
impl Serialize for MetricValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Metric::COUNT))?;
        for (metric, value) in self.iter() {
            map.serialize_entry(metric.key(), &value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// VehicleRecord – one row of the source CSV
// ---------------------------------------------------------------------------

/// One electric vehicle's specification. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VehicleRecord {
    pub brand: String,
    pub model: String,
    /// Numeric catalog columns, native (metric) units.
    pub metrics: MetricValues,
    /// `None` when the column is absent or blank.
    pub drivetrain: Option<String>,
    /// Any other column, kept verbatim (trimmed).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl VehicleRecord {
    pub const DEFAULT_DRIVETRAIN: &'static str = "Other";

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(metric)
    }

    /// Drivetrain with the `"Other"` fallback applied.
    pub fn drivetrain_or_default(&self) -> &str {
        self.drivetrain
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(Self::DEFAULT_DRIVETRAIN)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete ingested collection
// ---------------------------------------------------------------------------

/// All ingested records plus indices derived from them.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<VehicleRecord>,
    /// Distinct brands in order of first appearance.
    pub brands: Vec<String>,
    /// Distinct model identifiers, sorted.
    pub models: BTreeSet<String>,
}

impl Dataset {
    /// Build the brand and model indices from the parsed records.
    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut brands = Vec::new();
        for rec in &records {
            if seen.insert(rec.brand.as_str()) {
                brands.push(rec.brand.clone());
            }
        }
        let models = records.iter().map(|r| r.model.clone()).collect();
        Dataset {
            brands,
            models,
            records,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
