/// Data layer: metric catalog, ingestion, filtering and chart projections.
///
/// Architecture:
/// ```text
///   CSV text
///       │
///       ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Vec<VehicleRecord>
///   └──────────┘
///       │
///       ▼
///   ┌──────────┐
///   │ Dataset   │  records, brand / model indices
///   └──────────┘
///       │
///       ├──────────────────────┐
///       ▼                      ▼
///   ┌──────────┐          ┌────────────┐
///   │ filter    │ brand    │ filter      │ model selection
///   └──────────┘          └────────────┘
///       │                      │
///       ▼                      ▼
///   ┌──────────┐          ┌────────────┐
///   │ aggregate │          │ projection  │ scatter / range curve
///   └──────────┘          └────────────┘
/// ```
///
/// Every metric lookup goes through [`catalog::Metric`].

pub mod aggregate;
pub mod catalog;
pub mod filter;
pub mod loader;
pub mod model;
pub mod projection;
