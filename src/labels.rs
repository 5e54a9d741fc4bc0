//! Axis, tooltip and legend labels for the charts.

use crate::data::catalog::{Metric, UnitSystem};
use crate::i18n::Translations;

/// Localized axis label for `metric` in `system`.
pub fn label(metric: Metric, system: UnitSystem, translations: &Translations) -> &'static str {
    let key = metric.label_keys().key_for(system);
    translations.get(key).unwrap_or(key)
}

/// String-keyed variant of [`label`]; unknown metric keys give `""`.
pub fn metric_label(metric_key: &str, system: UnitSystem, translations: &Translations) -> &'static str {
    match Metric::from_key(metric_key) {
        Some(metric) => label(metric, system, translations),
        None => "",
    }
}

/// Unit suffix appended to tooltip values, e.g. `" km"`. Empty for seats.
pub fn unit_suffix(metric: Metric, system: UnitSystem) -> String {
    match metric.unit(system) {
        "" => String::new(),
        unit => format!(" {unit}"),
    }
}

/// Legend name for a drivetrain code. Only `AWD`, `FWD`, `RWD` and `Other`
/// are translated; anything else is shown as-is.
pub fn drivetrain_label<'a>(drivetrain: &'a str, translations: &Translations) -> &'a str {
    let key = match drivetrain {
        "AWD" => "awd",
        "FWD" => "fwd",
        "RWD" => "rwd",
        "Other" => "other",
        _ => return drivetrain,
    };
    let found: Option<&'a str> = translations.get(key);
    found.unwrap_or(drivetrain)
}
