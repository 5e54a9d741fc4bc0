use std::sync::Arc;

use serde::Serialize;

use crate::data::aggregate::{aggregate_by_brand, BrandAggregate};
use crate::data::catalog::{Metric, UnitSystem};
use crate::data::filter::{filter_by_brand, BrandFilter, ModelSelection};
use crate::data::loader::parse_csv;
use crate::data::model::Dataset;
use crate::data::projection::{
    convert_aggregates, project_range_curve, project_scatter, RangeCurvePoint, ScatterPoint,
};
use crate::i18n::{Locale, Translations};
use crate::labels;

// ---------------------------------------------------------------------------
// Load lifecycle
// ---------------------------------------------------------------------------

/// Where the dataset is in its load lifecycle.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Loaded(Arc<Dataset>),
    Failed(String),
}

/// Identifies one retrieval attempt. Only the most recent ticket may install
/// its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

// ---------------------------------------------------------------------------
// View-models handed to the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartView {
    pub title: String,
    pub metric: Metric,
    pub axis_label: String,
    pub unit_suffix: String,
    pub rows: Vec<BrandAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeCurveView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<RangeCurvePoint>,
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The dashboard's state, independent of rendering.
///
/// Toggles are plain fields; every view is derived on demand by passing them
/// explicitly into the pure pipeline functions.
pub struct DashboardState {
    pub load: LoadState,
    pub locale: Locale,
    pub unit_system: UnitSystem,
    /// Metric shown in the brand bar chart.
    pub bar_metric: Metric,
    pub brand_filter: BrandFilter,
    /// Models compared in the scatter plot and range curve.
    pub selection: ModelSelection,
    translations: Translations,
    latest_ticket: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            load: LoadState::Loading,
            locale: Locale::default(),
            unit_system: UnitSystem::default(),
            bar_metric: Metric::RangeKm,
            brand_filter: BrandFilter::All,
            selection: ModelSelection::new(),
            translations: Translations::default(),
            latest_ticket: 0,
        }
    }
}

impl DashboardState {
    /// Start a retrieval. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.load = LoadState::Loading;
        LoadTicket(self.latest_ticket)
    }

    /// Install the outcome of a retrieval.
    ///
    /// Returns `false` and leaves the state untouched when `ticket` has been
    /// superseded by a newer [`begin_load`](Self::begin_load).
    pub fn finish_load(&mut self, ticket: LoadTicket, fetched: anyhow::Result<String>) -> bool {
        if ticket.0 != self.latest_ticket {
            log::warn!("Discarding stale load result (ticket {})", ticket.0);
            return false;
        }
        match fetched {
            Ok(text) => {
                let dataset = Dataset::from_records(parse_csv(&text));
                log::info!(
                    "Loaded {} vehicles from {} brands",
                    dataset.len(),
                    dataset.brands.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load EV data: {e:#}");
                self.load = LoadState::Failed(format!("{e:#}"));
            }
        }
        true
    }

    /// Replace the dataset wholesale. Selections naming models that no longer
    /// exist are dropped.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selection = self
            .selection
            .iter()
            .filter(|m| dataset.models.contains(*m))
            .map(str::to_string)
            .collect();
        self.load = LoadState::Loaded(Arc::new(dataset));
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match &self.load {
            LoadState::Loaded(ds) => Some(ds),
            _ => None,
        }
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.translations = Translations::new(locale);
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Localized status line for the non-loaded states.
    pub fn status_message(&self) -> Option<String> {
        match &self.load {
            LoadState::Loading => Some(self.translations.text("loadingData").to_string()),
            LoadState::Loaded(_) => None,
            LoadState::Failed(reason) => Some(format!(
                "{} {reason}",
                self.translations.text("errorLoadingData")
            )),
        }
    }

    /// Toggle a model in the comparison selection.
    pub fn toggle_model(&mut self, model: &str) {
        self.selection.toggle(model);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // -- Views ---------------------------------------------------------------

    pub fn bar_chart(&self) -> Option<BarChartView> {
        let ds = self.dataset()?;
        let filtered = filter_by_brand(&ds.records, &self.brand_filter);
        let ranked = aggregate_by_brand(filtered, self.bar_metric);
        let t = &self.translations;
        Some(BarChartView {
            title: t.text("barChartTitle").to_string(),
            metric: self.bar_metric,
            axis_label: labels::label(self.bar_metric, self.unit_system, t).to_string(),
            unit_suffix: labels::unit_suffix(self.bar_metric, self.unit_system),
            rows: convert_aggregates(&ranked, self.bar_metric, self.unit_system),
        })
    }

    pub fn scatter_plot(&self) -> Option<ScatterView> {
        let ds = self.dataset()?;
        let t = &self.translations;
        Some(ScatterView {
            title: t.text("scatterPlotTitle").to_string(),
            x_label: labels::label(Metric::BatteryCapacityKwh, self.unit_system, t).to_string(),
            y_label: labels::label(Metric::EfficiencyWhPerKm, self.unit_system, t).to_string(),
            points: project_scatter(&ds.records, &self.selection, self.unit_system),
        })
    }

    pub fn range_curve(&self) -> Option<RangeCurveView> {
        let ds = self.dataset()?;
        let t = &self.translations;
        Some(RangeCurveView {
            title: t.text("lineChartTitle").to_string(),
            x_label: labels::label(Metric::BatteryCapacityKwh, self.unit_system, t).to_string(),
            y_label: labels::label(Metric::RangeKm, self.unit_system, t).to_string(),
            points: project_range_curve(&ds.records, &self.selection, self.unit_system),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "brand,model,range_km,acceleration_0_100_s,battery_capacity_kWh,efficiency_wh_per_km,drivetrain\n\
                       Tesla,Model 3,560,4.4,75,150,AWD\n\
                       Tesla,Model S,650,3.2,100,170,AWD\n\
                       BYD,Seal,570,3.8,82.5,160,\n";

    fn loaded() -> DashboardState {
        let mut state = DashboardState::default();
        let ticket = state.begin_load();
        assert!(state.finish_load(ticket, Ok(CSV.to_string())));
        state
    }

    #[test]
    fn starts_loading_without_views() {
        let state = DashboardState::default();
        assert!(matches!(state.load, LoadState::Loading));
        assert!(state.bar_chart().is_none());
        assert_eq!(state.status_message().as_deref(), Some("Loading EV data..."));
    }

    #[test]
    fn failure_is_distinct_from_loading() {
        let mut state = DashboardState::default();
        let ticket = state.begin_load();
        state.finish_load(ticket, Err(anyhow::anyhow!("connection reset")));
        match &state.load {
            LoadState::Failed(msg) => assert!(msg.contains("connection reset")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(state.scatter_plot().is_none());
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut state = DashboardState::default();
        let old = state.begin_load();
        let new = state.begin_load();
        assert!(state.finish_load(new, Ok(CSV.to_string())));
        assert!(!state.finish_load(old, Err(anyhow::anyhow!("late failure"))));
        assert_eq!(state.dataset().map(|ds| ds.len()), Some(3));
    }

    #[test]
    fn bar_chart_follows_toggles() {
        let mut state = loaded();
        let view = state.bar_chart().unwrap();
        assert_eq!(view.axis_label, "Range (km)");
        assert_eq!(view.rows[0].name, "Tesla");
        assert_eq!(view.rows[0].selected_value, Some(605.0));

        state.unit_system = UnitSystem::Imperial;
        state.set_locale(Locale::Fr);
        state.bar_metric = Metric::Acceleration0To100S;
        let view = state.bar_chart().unwrap();
        assert_eq!(view.axis_label, "Accélération (0-60 mph en s)");
        assert_eq!(view.rows[0].name, "Tesla");
        // mean(4.4, 3.2) = 3.8, * 0.9656 = 3.669
        assert_eq!(view.rows[0].selected_value, Some(3.7));
    }

    #[test]
    fn brand_filter_limits_bar_chart() {
        let mut state = loaded();
        state.brand_filter = BrandFilter::Brand("BYD".into());
        let view = state.bar_chart().unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].name, "BYD");
    }

    #[test]
    fn scatter_uses_selection() {
        let mut state = loaded();
        state.toggle_model("Seal");
        let view = state.scatter_plot().unwrap();
        assert_eq!(view.points.len(), 1);
        assert_eq!(view.points[0].drivetrain, "Other");
        state.clear_selection();
        assert!(state.scatter_plot().unwrap().points.is_empty());
    }

    #[test]
    fn reload_drops_vanished_models_from_selection() {
        let mut state = loaded();
        state.toggle_model("Seal");
        state.toggle_model("Model 3");
        let ticket = state.begin_load();
        state.finish_load(ticket, Ok("brand,model\nTesla,Model 3\n".to_string()));
        let kept: Vec<&str> = state.selection.iter().collect();
        assert_eq!(kept, vec!["Model 3"]);
    }
}
