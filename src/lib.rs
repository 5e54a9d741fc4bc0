//! Electric vehicle dashboard pipeline.
//!
//! Ingests a CSV of vehicle specifications and derives the view-models behind
//! the dashboard charts: per-brand averages, the battery/efficiency scatter
//! plot and the range curve, converted to the chosen unit system and labelled
//! in the chosen language.

pub mod data;
pub mod i18n;
pub mod labels;
pub mod state;
pub mod units;

pub use data::catalog::{Metric, UnitSystem};
pub use data::model::{Dataset, VehicleRecord};
pub use i18n::{Locale, Translations};
