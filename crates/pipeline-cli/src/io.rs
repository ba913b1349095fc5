//! CSV loading and writing

use anyhow::{bail, Context, Result};
use sensor_table::{ColumnView, LabelInterval, Schema, SensorTable};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Parse a numeric cell; empty or unparsable cells are missing
fn parse_cell(cell: &str) -> f64 {
    let cell = cell.trim();
    if cell.is_empty() {
        return f64::NAN;
    }
    cell.parse().unwrap_or(f64::NAN)
}

/// Read a recording: a header row, the time column and numeric channels
///
/// A column named like the schema's label column is read as text labels.
pub fn read_table<R: Read>(reader: R, schema: &Schema) -> Result<SensorTable> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv
        .headers()
        .context("reading CSV header")?
        .iter()
        .map(str::to_string)
        .collect();

    let time_idx = headers
        .iter()
        .position(|h| *h == schema.time_column)
        .with_context(|| format!("missing time column {:?}", schema.time_column))?;
    let label_idx = headers.iter().position(|h| *h == schema.label_column);

    let mut numeric: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    let mut labels: Vec<String> = Vec::new();

    for (row, record) in csv.records().enumerate() {
        let record = record.with_context(|| format!("reading CSV row {}", row + 1))?;
        if record.len() != headers.len() {
            bail!(
                "row {} has {} fields, header has {}",
                row + 1,
                record.len(),
                headers.len()
            );
        }
        for (idx, cell) in record.iter().enumerate() {
            if Some(idx) == label_idx {
                labels.push(cell.to_string());
            } else {
                numeric[idx].push(parse_cell(cell));
            }
        }
    }

    let time = std::mem::take(&mut numeric[time_idx]);
    let mut table = SensorTable::new(schema.time_column.clone(), time)?;

    for (idx, (name, values)) in headers.iter().zip(numeric).enumerate() {
        if idx == time_idx || Some(idx) == label_idx {
            continue;
        }
        table.push_column(name.clone(), values)?;
    }
    if label_idx.is_some() {
        table.set_labels(schema.label_column.clone(), labels)?;
    }

    debug!(
        "Read table: {} rows, {} columns",
        table.num_rows(),
        table.num_columns()
    );
    Ok(table)
}

/// Read label intervals (`Time(Seconds)`, `Length(Seconds)`, `Label(string)`)
pub fn read_labels<R: Read>(reader: R) -> Result<Vec<LabelInterval>> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv.deserialize::<LabelInterval>()
        .enumerate()
        .map(|(row, record)| record.with_context(|| format!("parsing label row {}", row + 1)))
        .collect()
}

/// Write a table as CSV; missing values become empty cells
pub fn write_table<W: Write>(writer: W, table: &SensorTable) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let columns = table.columns_in_order();

    csv.write_record(columns.iter().map(|(name, _)| *name))?;

    let mut record: Vec<String> = Vec::with_capacity(columns.len());
    for row in 0..table.num_rows() {
        record.clear();
        for (_, column) in &columns {
            record.push(match column {
                ColumnView::Numeric(values) if values[row].is_nan() => String::new(),
                ColumnView::Numeric(values) => values[row].to_string(),
                ColumnView::Text(values) => values[row].clone(),
            });
        }
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Load a recording from disk
pub fn load_table(path: &Path, schema: &Schema) -> Result<SensorTable> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let table = read_table(BufReader::new(file), schema)
        .with_context(|| format!("loading recording {}", path.display()))?;
    info!(
        "Loaded {}: {} rows, {} columns",
        path.display(),
        table.num_rows(),
        table.num_columns()
    );
    Ok(table)
}

/// Load label intervals; a missing file means the recording is unlabelled
pub fn load_labels(path: &Path) -> Result<Option<Vec<LabelInterval>>> {
    if !path.exists() {
        warn!("Label file {} not found; continuing without labels", path.display());
        return Ok(None);
    }

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let labels = read_labels(BufReader::new(file))
        .with_context(|| format!("loading labels {}", path.display()))?;
    info!("Loaded {} label intervals from {}", labels.len(), path.display());
    Ok(Some(labels))
}
