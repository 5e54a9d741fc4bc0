use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Parse errors for user-supplied identifiers
// ---------------------------------------------------------------------------

/// An identifier (metric key, unit system, locale) that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    #[error("unknown metric key: {0:?}")]
    Metric(String),
    #[error("unknown unit system: {0:?} (expected \"metric\" or \"imperial\")")]
    UnitSystem(String),
    #[error("unknown locale: {0:?} (expected \"en\" or \"fr\")")]
    Locale(String),
}

// ---------------------------------------------------------------------------
// UnitSystem
// ---------------------------------------------------------------------------

/// Display convention for converted values. Records are always stored metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(ParseKeyError::UnitSystem(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion factors
// ---------------------------------------------------------------------------

pub const KM_TO_MILES: f64 = 0.621371;
pub const KMH_TO_MPH: f64 = 0.621371;
pub const KG_TO_LBS: f64 = 2.20462;
pub const L_TO_CU_FT: f64 = 0.0353147;
pub const MM_TO_INCH: f64 = 0.0393701;
pub const NM_TO_LB_FT: f64 = 0.737562;
pub const WH_PER_KM_TO_WH_PER_MILE: f64 = 1.0 / KM_TO_MILES;
/// Cosmetic rescale of the 0-100 km/h time into a 0-60 mph framing.
pub const ACCEL_100KMH_TO_60MPH_FACTOR: f64 = 0.9656;

// ---------------------------------------------------------------------------
// Ranking policy
// ---------------------------------------------------------------------------

/// Which end of a metric's scale ranks first in the brand bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDirection {
    /// Higher is better (range, torque, ...).
    Descending,
    /// Lower is better (acceleration time).
    Ascending,
}

// ---------------------------------------------------------------------------
// Label keys
// ---------------------------------------------------------------------------

/// Translation keys used to label a metric axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKeys {
    /// Same label in both unit systems.
    Shared(&'static str),
    /// Distinct labels for metric and imperial display.
    PerSystem {
        metric: &'static str,
        imperial: &'static str,
    },
}

impl LabelKeys {
    pub fn key_for(self, system: UnitSystem) -> &'static str {
        match (self, system) {
            (LabelKeys::Shared(key), _) => key,
            (LabelKeys::PerSystem { metric, .. }, UnitSystem::Metric) => metric,
            (LabelKeys::PerSystem { imperial, .. }, UnitSystem::Imperial) => imperial,
        }
    }
}

// ---------------------------------------------------------------------------
// Metric – the closed catalog of numeric vehicle attributes
// ---------------------------------------------------------------------------

/// Every numeric column a [`VehicleRecord`](super::model::VehicleRecord) carries.
///
/// The declaration order is the catalog order and doubles as the index into
/// per-metric arrays ([`Metric::index`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    RangeKm,
    TopSpeedKmh,
    Acceleration0To100S,
    BatteryCapacityKwh,
    EfficiencyWhPerKm,
    TorqueNm,
    FastChargingPowerKwDc,
    TowingCapacityKg,
    CargoVolumeL,
    Seats,
    LengthMm,
    WidthMm,
    HeightMm,
}

impl Metric {
    pub const COUNT: usize = 13;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::RangeKm,
        Metric::TopSpeedKmh,
        Metric::Acceleration0To100S,
        Metric::BatteryCapacityKwh,
        Metric::EfficiencyWhPerKm,
        Metric::TorqueNm,
        Metric::FastChargingPowerKwDc,
        Metric::TowingCapacityKg,
        Metric::CargoVolumeL,
        Metric::Seats,
        Metric::LengthMm,
        Metric::WidthMm,
        Metric::HeightMm,
    ];

    /// Position in [`Metric::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name in the source CSV.
    pub fn key(self) -> &'static str {
        match self {
            Metric::RangeKm => "range_km",
            Metric::TopSpeedKmh => "top_speed_kmh",
            Metric::Acceleration0To100S => "acceleration_0_100_s",
            Metric::BatteryCapacityKwh => "battery_capacity_kWh",
            Metric::EfficiencyWhPerKm => "efficiency_wh_per_km",
            Metric::TorqueNm => "torque_nm",
            Metric::FastChargingPowerKwDc => "fast_charging_power_kw_dc",
            Metric::TowingCapacityKg => "towing_capacity_kg",
            Metric::CargoVolumeL => "cargo_volume_l",
            Metric::Seats => "seats",
            Metric::LengthMm => "length_mm",
            Metric::WidthMm => "width_mm",
            Metric::HeightMm => "height_mm",
        }
    }

    /// Catalog lookup by column name. Exact match, case-sensitive.
    pub fn from_key(key: &str) -> Option<Metric> {
        Metric::ALL.iter().copied().find(|m| m.key() == key)
    }

    /// Multiplier from the native (metric) unit to the imperial display unit.
    /// `None` when the metric has no imperial counterpart.
    pub fn imperial_factor(self) -> Option<f64> {
        match self {
            Metric::RangeKm => Some(KM_TO_MILES),
            Metric::TopSpeedKmh => Some(KMH_TO_MPH),
            Metric::Acceleration0To100S => Some(ACCEL_100KMH_TO_60MPH_FACTOR),
            Metric::EfficiencyWhPerKm => Some(WH_PER_KM_TO_WH_PER_MILE),
            Metric::TorqueNm => Some(NM_TO_LB_FT),
            Metric::TowingCapacityKg => Some(KG_TO_LBS),
            Metric::CargoVolumeL => Some(L_TO_CU_FT),
            Metric::LengthMm | Metric::WidthMm | Metric::HeightMm => Some(MM_TO_INCH),
            Metric::BatteryCapacityKwh | Metric::FastChargingPowerKwDc | Metric::Seats => None,
        }
    }

    /// Display unit in the given system. Empty for unitless metrics.
    pub fn unit(self, system: UnitSystem) -> &'static str {
        let (metric, imperial) = match self {
            Metric::RangeKm => ("km", "miles"),
            Metric::TopSpeedKmh => ("km/h", "mph"),
            Metric::Acceleration0To100S => ("s", "s"),
            Metric::BatteryCapacityKwh => ("kWh", "kWh"),
            Metric::EfficiencyWhPerKm => ("Wh/km", "Wh/mile"),
            Metric::TorqueNm => ("Nm", "lb-ft"),
            Metric::FastChargingPowerKwDc => ("kW", "kW"),
            Metric::TowingCapacityKg => ("kg", "lbs"),
            Metric::CargoVolumeL => ("L", "cu ft"),
            Metric::Seats => ("", ""),
            Metric::LengthMm | Metric::WidthMm | Metric::HeightMm => ("mm", "inches"),
        };
        match system {
            UnitSystem::Metric => metric,
            UnitSystem::Imperial => imperial,
        }
    }

    pub fn label_keys(self) -> LabelKeys {
        use LabelKeys::{PerSystem, Shared};
        match self {
            Metric::RangeKm => PerSystem { metric: "rangeKm", imperial: "rangeMiles" },
            Metric::TopSpeedKmh => PerSystem { metric: "topSpeedKmH", imperial: "topSpeedMph" },
            Metric::Acceleration0To100S => {
                PerSystem { metric: "accelerationS", imperial: "accelerationMph" }
            }
            Metric::BatteryCapacityKwh => Shared("batteryCapacityKWh"),
            Metric::EfficiencyWhPerKm => {
                PerSystem { metric: "efficiencyWhPerKm", imperial: "efficiencyWhPerMile" }
            }
            Metric::TorqueNm => PerSystem { metric: "torqueNm", imperial: "torqueLbFt" },
            Metric::FastChargingPowerKwDc => Shared("fastChargingPowerKwDc"),
            Metric::TowingCapacityKg => {
                PerSystem { metric: "towingCapacityKg", imperial: "towingCapacityLbs" }
            }
            Metric::CargoVolumeL => PerSystem { metric: "cargoVolumeL", imperial: "cargoVolumeCuFt" },
            Metric::Seats => Shared("seats"),
            Metric::LengthMm => PerSystem { metric: "lengthMm", imperial: "lengthInches" },
            Metric::WidthMm => PerSystem { metric: "widthMm", imperial: "widthInches" },
            Metric::HeightMm => PerSystem { metric: "heightMm", imperial: "heightInches" },
        }
    }

    pub fn rank_direction(self) -> RankDirection {
        match self {
            Metric::Acceleration0To100S => RankDirection::Ascending,
            _ => RankDirection::Descending,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::from_key(s.trim()).ok_or_else(|| ParseKeyError::Metric(s.to_string()))
    }
}

impl Serialize for Metric {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
