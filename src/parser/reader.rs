use encoding_rs::Encoding;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::schema::TableKind;

/// Rows read from one table, with the rows that had to be skipped
#[derive(Debug)]
pub struct TableRows<T> {
    pub rows: Vec<T>,
    pub skipped: Vec<CatalogError>,
}

/// Decode legacy-encoded bytes. A byte order mark overrides `encoding`.
pub fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding, kind: TableKind) -> Cow<'a, str> {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(table = %kind, encoding = used.name(), "Replaced undecodable bytes");
    }
    text
}

/// Read and convert every row of a CSV table file.
///
/// A missing file, a missing required header or a broken CSV stream fails the
/// whole table. Rows that fail to convert are logged and skipped.
pub fn read_table<R, T>(path: &Path, kind: TableKind, encoding: &'static Encoding) -> Result<TableRows<T>>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = String>,
{
    let bytes = fs::read(path).map_err(|source| CatalogError::DataUnavailable {
        table: kind,
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode(&bytes, encoding, kind);
    parse_table(&text, kind)
}

/// Convert already-decoded CSV text
pub fn parse_table<R, T>(text: &str, kind: TableKind) -> Result<TableRows<T>>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = String>,
{
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|source| CatalogError::Csv { table: kind, source })?
        .clone();
    let header_names: Vec<&str> = headers.iter().collect();
    if let Some(column) = kind.schema().missing_header(header_names) {
        return Err(CatalogError::MissingColumn { table: kind, column });
    }

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|source| CatalogError::Csv { table: kind, source })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if record.iter().all(str::is_empty) {
            continue;
        }

        let converted = record
            .deserialize::<R>(Some(&headers))
            .map_err(|e| e.to_string())
            .and_then(T::try_from);

        match converted {
            Ok(row) => rows.push(row),
            Err(reason) => {
                tracing::warn!(table = %kind, line, %reason, "Skipping malformed row");
                skipped.push(CatalogError::MalformedInput {
                    table: kind,
                    line,
                    reason,
                });
            }
        }
    }

    tracing::debug!(table = %kind, rows = rows.len(), skipped = skipped.len(), "Table parsed");
    Ok(TableRows { rows, skipped })
}
