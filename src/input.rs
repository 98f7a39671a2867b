use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use std::{fs, path::Path};

use crate::record::Row;

/// Reads a list of rows from the file at `path`.
///
/// Files with a `.csv` extension are read as CSV with a header row: each
/// record becomes an object keyed by the header names, with every cell as
/// text. Short records are allowed, and their missing cells are treated as
/// absent fields. Any other file is read as a JSON array.
///
/// Individual entries that aren't records become [`Row::Malformed`], and
/// never cause an error.
///
/// # Errors
///
/// Returns errors if:
/// * The file cannot be opened or read
/// * The file is not valid JSON (or CSV)
/// * A JSON file holds something other than a list
pub fn read_rows<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<Row<T>>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        return read_csv_rows(path).with_context(|| format!("reading {}", path.display()));
    }
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_rows(&text).with_context(|| format!("reading {}", path.display()))
}

/// Parses a JSON array into rows.
///
/// # Errors
///
/// Returns an error if `json` is not valid JSON, or is not a list.
pub fn parse_rows<T: DeserializeOwned>(json: &str) -> Result<Vec<Row<T>>> {
    let value: Value = serde_json::from_str(json).context("invalid JSON")?;
    let Value::Array(items) = value else {
        bail!("expected a list of records");
    };
    Ok(items.into_iter().map(Row::from_value).collect())
}

fn read_csv_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<Row<T>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let object: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(name, cell)| (name.to_string(), Value::String(cell.to_string())))
            .collect();
        rows.push(Row::from_value(Value::Object(object)));
    }
    Ok(rows)
}
