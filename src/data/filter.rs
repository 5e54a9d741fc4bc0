use std::collections::BTreeSet;

use super::model::VehicleRecord;

// ---------------------------------------------------------------------------
// Brand filter for the bar chart
// ---------------------------------------------------------------------------

/// Restricts the bar chart to one brand, or shows every brand.
///
/// A brand is matched by exact name, so a brand literally called "All" is
/// still selectable as `Brand("All".into())`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BrandFilter {
    #[default]
    All,
    Brand(String),
}

impl BrandFilter {
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        match self {
            BrandFilter::All => true,
            BrandFilter::Brand(brand) => record.brand == *brand,
        }
    }
}

/// Records passing the brand filter, in input order.
pub fn filter_by_brand<'a>(
    records: &'a [VehicleRecord],
    filter: &'a BrandFilter,
) -> impl Iterator<Item = &'a VehicleRecord> + 'a {
    records.iter().filter(move |rec| filter.matches(rec))
}

// ---------------------------------------------------------------------------
// Model selection for the scatter plot and range curve
// ---------------------------------------------------------------------------

/// Set of model identifiers the user picked for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelSelection(BTreeSet<String>);

impl ModelSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, model: &str) -> bool {
        self.0.contains(model)
    }

    pub fn insert(&mut self, model: impl Into<String>) -> bool {
        self.0.insert(model.into())
    }

    /// Add the model if absent, remove it if present.
    pub fn toggle(&mut self, model: &str) {
        if !self.0.remove(model) {
            self.0.insert(model.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ModelSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ModelSelection(iter.into_iter().map(Into::into).collect())
    }
}

/// Records whose model is in the selection, in input order.
pub fn selected_records<'a>(
    records: &'a [VehicleRecord],
    selection: &'a ModelSelection,
) -> impl Iterator<Item = &'a VehicleRecord> + 'a {
    records.iter().filter(move |rec| selection.contains(&rec.model))
}
