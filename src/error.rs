use std::path::PathBuf;

use crate::schema::TableKind;

/// Errors raised while loading catalog tables.
///
/// Query functions never return these: an empty result or a missing lookup
/// target is part of their normal return value.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{table} data unavailable: {path:?} ({source})")]
    DataUnavailable {
        table: TableKind,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{table} is missing required column '{column}'")]
    MissingColumn {
        table: TableKind,
        column: &'static str,
    },

    #[error("{table} could not be read as CSV: {source}")]
    Csv {
        table: TableKind,
        source: csv::Error,
    },

    #[error("{table} line {line}: {reason}")]
    MalformedInput {
        table: TableKind,
        line: u64,
        reason: String,
    },
}

impl CatalogError {
    /// True for errors that make a whole table unusable
    pub fn is_structural(&self) -> bool {
        !matches!(self, CatalogError::MalformedInput { .. })
    }

    pub fn table(&self) -> TableKind {
        match self {
            CatalogError::DataUnavailable { table, .. }
            | CatalogError::MissingColumn { table, .. }
            | CatalogError::Csv { table, .. }
            | CatalogError::MalformedInput { table, .. } => *table,
        }
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
