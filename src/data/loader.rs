use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::RawRecord;

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Failure to produce records from a source path.
///
/// `SourceNotFound` is the variant the UI treats specially; everything else
/// is a malformed or unsupported input surfaced verbatim.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("{0:#}")]
    Malformed(#[from] anyhow::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load crop records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `temperature` and `label` columns
/// * `.json`    – `[{ "temperature": 21.5, "label": "rice", ... }, ...]`
/// * `.parquet` – flat `temperature` and `label` columns
///
/// Columns other than `temperature` and `label` are ignored. Missing cells
/// come back as `None`; dropping them is the cleaner's job.
pub fn load_file(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::SourceNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per row.
/// A blank or unparseable `temperature` cell and a blank `label` cell are
/// loaded as missing values rather than rejected.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let temp_idx = headers
        .iter()
        .position(|h| h == "temperature")
        .context("CSV missing 'temperature' column")?;
    let label_idx = headers
        .iter()
        .position(|h| h == "label")
        .context("CSV missing 'label' column")?;

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(RawRecord {
            temperature: record.get(temp_idx).and_then(parse_temperature),
            label: record.get(label_idx).and_then(non_empty),
        });
    }

    Ok(rows)
}

fn parse_temperature(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "temperature": 21.5, "label": "rice", "humidity": 82.0 },
///   ...
/// ]
/// ```
#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    label: Option<String>,
}

fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<JsonRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    Ok(records
        .into_iter()
        .map(|r| RawRecord {
            temperature: r.temperature,
            label: r.label.and_then(|l| non_empty(&l)),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat `temperature` and `label` columns.
///
/// Expected schema:
/// - `temperature`: Float64, Float32, Int64 or Int32
/// - `label`: Utf8 or LargeUtf8
/// - Any other columns are ignored
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let temp_idx = schema
            .index_of("temperature")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'temperature' column"))?;
        let label_idx = schema
            .index_of("label")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'label' column"))?;

        let temp_col = batch.column(temp_idx);
        let label_col = batch.column(label_idx);

        for row in 0..batch.num_rows() {
            rows.push(RawRecord {
                temperature: extract_opt_f64(temp_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'temperature'"))?,
                label: extract_opt_string(label_col, row),
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Extract an optional numeric value from an Arrow column at a given row.
fn extract_opt_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            arr.value(row)
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            arr.value(row) as f64
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            arr.value(row) as f64
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            arr.value(row) as f64
        }
        other => bail!("temperature column has unsupported type {other:?}"),
    };
    Ok(Some(value))
}

/// Extract an optional string value from an Arrow column at a given row.
fn extract_opt_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .and_then(|arr| non_empty(arr.value(row))),
        DataType::LargeUtf8 => non_empty(col.as_string::<i64>().value(row)),
        _ => None,
    }
}
