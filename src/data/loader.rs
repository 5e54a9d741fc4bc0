use std::path::Path;

use anyhow::{Context, Result};

use super::catalog::Metric;
use super::model::{Dataset, VehicleRecord};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a CSV file from disk and ingest it.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading CSV file {}", path.display()))?;
    let records = parse_csv(&text);
    log::info!("Loaded {} vehicle records from {}", records.len(), path.display());
    Ok(Dataset::from_records(records))
}

/// Parse delimited text into vehicle records.
///
/// The first line is the header. Headers and cells are trimmed. Rows whose
/// cell count differs from the header count are dropped without error.
/// Catalog columns are parsed as numbers: blank, unparseable and non-finite
/// cells become `None`. `brand`, `model` and `drivetrain` fill their typed
/// fields; any other column is kept verbatim in [`VehicleRecord::extra`].
///
/// Quotes carry no meaning: every line is one row and every comma ends a cell.
pub fn parse_csv(text: &str) -> Vec<VehicleRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns: Vec<Column> = match reader.headers() {
        Ok(headers) => headers.iter().map(Column::classify).collect(),
        Err(e) => {
            log::warn!("Unreadable CSV header: {e}");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::debug!("Skipping CSV row {row_no}: {e}");
                continue;
            }
        };
        if row.len() != columns.len() {
            log::debug!(
                "Skipping CSV row {row_no}: {} cells, header has {}",
                row.len(),
                columns.len()
            );
            continue;
        }

        let mut rec = VehicleRecord::default();
        for (column, cell) in columns.iter().zip(row.iter()) {
            match column {
                Column::Brand => rec.brand = cell.to_string(),
                Column::Model => rec.model = cell.to_string(),
                Column::Drivetrain => {
                    rec.drivetrain = (!cell.is_empty()).then(|| cell.to_string());
                }
                Column::Metric(metric) => rec.metrics.set(*metric, parse_number(cell)),
                Column::Other(name) => {
                    rec.extra.insert(name.clone(), cell.to_string());
                }
            }
        }
        records.push(rec);
    }
    records
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// What a header column maps to on [`VehicleRecord`].
#[derive(Debug, Clone, PartialEq)]
enum Column {
    Brand,
    Model,
    Drivetrain,
    Metric(Metric),
    Other(String),
}

impl Column {
    fn classify(header: &str) -> Column {
        match header {
            "brand" => Column::Brand,
            "model" => Column::Model,
            "drivetrain" => Column::Drivetrain,
            other => match Metric::from_key(other) {
                Some(metric) => Column::Metric(metric),
                None => Column::Other(other.to_string()),
            },
        }
    }
}

/// Strict float parse; anything that is not a finite number is unknown.
fn parse_number(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
