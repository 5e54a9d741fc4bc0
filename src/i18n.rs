//! Localized UI strings keyed by identifier.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::catalog::ParseKeyError;

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::En => EN,
            Locale::Fr => FR,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            _ => Err(ParseKeyError::Locale(s.to_string())),
        }
    }
}

/// Key → string lookup for one locale.
///
/// Keys missing from a non-English table fall back to English, then to the
/// key itself. Lookups never fail.
#[derive(Debug, Clone)]
pub struct Translations {
    locale: Locale,
    strings: HashMap<&'static str, &'static str>,
}

impl Translations {
    pub fn new(locale: Locale) -> Self {
        let mut strings: HashMap<&'static str, &'static str> = EN.iter().copied().collect();
        if locale != Locale::En {
            strings.extend(locale.table().iter().copied());
        }
        Translations { locale, strings }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.strings.get(key).copied()
    }

    /// Localized string, or `key` when unknown.
    pub fn text<'a>(&self, key: &'a str) -> &'a str {
        let found: Option<&'a str> = self.get(key);
        found.unwrap_or(key)
    }
}

impl Default for Translations {
    fn default() -> Self {
        Translations::new(Locale::default())
    }
}

// ---------------------------------------------------------------------------
// String tables
// ---------------------------------------------------------------------------

const EN: &[(&str, &str)] = &[
    ("dashboardTitle", "Electric Vehicle Performance Dashboard"),
    ("language", "Language"),
    ("english", "English"),
    ("french", "French"),
    ("selectMetric", "Select Metric"),
    ("rangeKm", "Range (km)"),
    ("rangeMiles", "Range (miles)"),
    ("topSpeedKmH", "Top Speed (km/h)"),
    ("topSpeedMph", "Top Speed (mph)"),
    ("accelerationS", "Acceleration (0-100 km/h in s)"),
    ("accelerationMph", "Acceleration (0-60 mph in s)"),
    ("batteryCapacityKWh", "Battery Capacity (kWh)"),
    ("efficiencyWhPerKm", "Efficiency (Wh/km)"),
    ("efficiencyWhPerMile", "Efficiency (Wh/mile)"),
    ("torqueNm", "Torque (Nm)"),
    ("torqueLbFt", "Torque (lb-ft)"),
    ("fastChargingPowerKwDc", "Fast Charging Power (kW DC)"),
    ("towingCapacityKg", "Towing Capacity (kg)"),
    ("towingCapacityLbs", "Towing Capacity (lbs)"),
    ("cargoVolumeL", "Cargo Volume (L)"),
    ("cargoVolumeCuFt", "Cargo Volume (cu ft)"),
    ("seats", "Seats"),
    ("lengthMm", "Length (mm)"),
    ("widthMm", "Width (mm)"),
    ("heightMm", "Height (mm)"),
    ("lengthInches", "Length (inches)"),
    ("widthInches", "Width (inches)"),
    ("heightInches", "Height (inches)"),
    ("selectUnit", "Select Unit System"),
    ("metric", "Metric"),
    ("imperial", "Imperial"),
    ("barChartTitle", "Average Performance by Brand"),
    ("scatterPlotTitle", "Battery Capacity vs. Efficiency (Top-right = Longest Range)"),
    ("lineChartTitle", "Range vs. Battery Capacity"),
    ("selectModels", "Select Models for Scatter Plot"),
    ("model", "Model"),
    ("batteryCapacity", "Battery Capacity"),
    ("efficiency", "Efficiency"),
    ("range", "Range"),
    ("brand", "Brand"),
    ("allBrands", "All Brands"),
    ("value", "Value"),
    ("noDataSelected", "No data selected for the scatter plot. Please select models."),
    ("selectedModels", "Selected Models"),
    ("drivetrain", "Drivetrain"),
    ("awd", "All-Wheel Drive"),
    ("fwd", "Front-Wheel Drive"),
    ("rwd", "Rear-Wheel Drive"),
    ("other", "Other"),
    ("loadingData", "Loading EV data..."),
    ("errorLoadingData", "Error loading EV data."),
];

const FR: &[(&str, &str)] = &[
    ("dashboardTitle", "Tableau de bord des performances des véhicules électriques"),
    ("language", "Langue"),
    ("english", "Anglais"),
    ("french", "Français"),
    ("selectMetric", "Sélectionner la métrique"),
    ("rangeKm", "Autonomie (km)"),
    ("rangeMiles", "Autonomie (miles)"),
    ("topSpeedKmH", "Vitesse Max (km/h)"),
    ("topSpeedMph", "Vitesse Max (mph)"),
    ("accelerationS", "Accélération (0-100 km/h en s)"),
    ("accelerationMph", "Accélération (0-60 mph en s)"),
    ("batteryCapacityKWh", "Capacité Batterie (kWh)"),
    ("efficiencyWhPerKm", "Efficacité (Wh/km)"),
    ("efficiencyWhPerMile", "Efficacité (Wh/mile)"),
    ("torqueNm", "Couple (Nm)"),
    ("torqueLbFt", "Couple (lb-ft)"),
    ("fastChargingPowerKwDc", "Puissance Charge Rapide (kW CC)"),
    ("towingCapacityKg", "Capacité Remorquage (kg)"),
    ("towingCapacityLbs", "Capacité Remorquage (lbs)"),
    ("cargoVolumeL", "Volume Coffre (L)"),
    ("cargoVolumeCuFt", "Volume Coffre (cu ft)"),
    ("seats", "Places"),
    ("lengthMm", "Longueur (mm)"),
    ("widthMm", "Largeur (mm)"),
    ("heightMm", "Hauteur (mm)"),
    ("lengthInches", "Longueur (pouces)"),
    ("widthInches", "Largeur (pouces)"),
    ("heightInches", "Hauteur (pouces)"),
    ("selectUnit", "Sélectionner le système d'unités"),
    ("metric", "Métrique"),
    ("imperial", "Impérial"),
    ("barChartTitle", "Performance Moyenne par Marque"),
    ("scatterPlotTitle", "Capacité vs. Efficacité (En haut à droite = Plus longue autonomie)"),
    ("lineChartTitle", "Autonomie vs. Capacité Batterie"),
    ("selectModels", "Sélectionner des Modèles pour le Nuage de Points"),
    ("model", "Modèle"),
    ("batteryCapacity", "Capacité Batterie"),
    ("efficiency", "Efficacité"),
    ("range", "Autonomie"),
    ("brand", "Marque"),
    ("allBrands", "Toutes les Marques"),
    ("value", "Valeur"),
    (
        "noDataSelected",
        "Aucune donnée sélectionnée pour le nuage de points. Veuillez sélectionner des modèles.",
    ),
    ("selectedModels", "Modèles Sélectionnés"),
    ("drivetrain", "Transmission"),
    ("awd", "Transmission Intégrale"),
    ("fwd", "Traction Avant"),
    ("rwd", "Propulsion"),
    ("other", "Autre"),
    ("loadingData", "Chargement des données VE..."),
    ("errorLoadingData", "Erreur lors du chargement des données VE."),
];
