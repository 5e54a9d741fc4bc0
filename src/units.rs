//! Unit conversion for display.
//!
//! Records are stored in metric units. Conversion happens only when a value is
//! projected for display, driven by the catalog factor of its [`Metric`].

use crate::data::catalog::{Metric, UnitSystem};

/// Round to one decimal place, half away from zero.
///
/// Magnitudes too large to scale by ten have no fractional part left and are
/// returned unchanged.
pub fn round1(value: f64) -> f64 {
    let scaled = value * 10.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 10.0
}

impl Metric {
    /// Convert a native value for display in `system`.
    ///
    /// Missing values stay missing; metric display is the identity; imperial
    /// display scales by the catalog factor and rounds to one decimal. A
    /// converted value beyond the `f64` range is unknown.
    pub fn convert(self, value: Option<f64>, system: UnitSystem) -> Option<f64> {
        let value = value?;
        match (system, self.imperial_factor()) {
            (UnitSystem::Imperial, Some(factor)) => {
                Some(round1(value * factor)).filter(|v| v.is_finite())
            }
            _ => Some(value),
        }
    }
}

/// String-keyed conversion. Keys outside the catalog pass through unchanged.
pub fn convert(metric_key: &str, value: Option<f64>, system: UnitSystem) -> Option<f64> {
    match Metric::from_key(metric_key) {
        Some(metric) => metric.convert(value, system),
        None => value,
    }
}
