use std::fmt;

/// The four tables a catalog is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    Idols,
    Skills,
    IdolNames,
    IdealTeams,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Idols,
        TableKind::Skills,
        TableKind::IdolNames,
        TableKind::IdealTeams,
    ];

    pub fn schema(self) -> &'static TableSchema {
        match self {
            TableKind::Idols => &super::tables::IDOLS,
            TableKind::Skills => &super::tables::SKILLS,
            TableKind::IdolNames => &super::tables::IDOL_NAMES,
            TableKind::IdealTeams => &super::tables::IDEAL_TEAMS,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema().name)
    }
}

/// Column data type
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    Integer,
    Text,
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    /// Header label in the CSV file
    pub header: &'static str,
    /// Column name in the exported SQLite table
    pub name: &'static str,
    pub col_type: ColumnType,
    pub nullable: bool,
}

impl Column {
    /// Create an optional (nullable) column
    pub const fn new(header: &'static str, name: &'static str, col_type: ColumnType) -> Self {
        Self {
            header,
            name,
            col_type,
            nullable: true,
        }
    }

    /// Create a required (non-nullable) column
    pub const fn required(header: &'static str, name: &'static str, col_type: ColumnType) -> Self {
        Self {
            header,
            name,
            col_type,
            nullable: false,
        }
    }
}

/// Table schema definition
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub kind: TableKind,
    pub name: &'static str,
    /// Default file name inside the data directory
    pub source_file: &'static str,
    pub columns: &'static [Column],
    /// Columns that get a non-unique index on export
    pub indexes: &'static [&'static str],
}

impl TableSchema {
    /// Headers that must be present for the table to load
    pub fn required_headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns
            .iter()
            .filter(|c| !c.nullable)
            .map(|c| c.header)
    }

    /// Returns the first required header missing from `headers`
    pub fn missing_header<'h>(
        &self,
        headers: impl IntoIterator<Item = &'h str> + Clone,
    ) -> Option<&'static str> {
        self.required_headers()
            .find(|required| !headers.clone().into_iter().any(|h| h.trim() == *required))
    }
}
