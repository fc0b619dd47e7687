use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use rusqlite::Connection;
use std::path::Path;

use super::schema_gen::{generate_create_table, generate_indexes, generate_insert};
use crate::catalog::Catalog;
use crate::model::{IdealTeamPreset, IdolCard, SkillInfo};
use crate::schema::{TableKind, TableSchema, ALL_TABLES};

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        SqlValue::Integer(v.into())
    }
}

impl From<Option<&str>> for SqlValue {
    fn from(v: Option<&str>) -> Self {
        v.map(SqlValue::from).unwrap_or(SqlValue::Null)
    }
}

/// A record that can be written as one row of its table.
///
/// `values` must follow the column order of the table's schema.
pub trait ExportRow {
    const TABLE: TableKind;

    fn values(&self) -> Vec<SqlValue>;
}

impl ExportRow for IdolCard {
    const TABLE: TableKind = TableKind::Idols;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.card_name.as_str().into(),
            self.name.as_str().into(),
            self.skill.as_str().into(),
            self.duration.into(),
            self.specialization.as_str().into(),
            self.attribute.label().into(),
            self.probability.label().into(),
            self.stats.vo.into(),
            self.stats.da.into(),
            self.stats.vi.into(),
            self.center_effect.as_str().into(),
            self.sub_attribute.as_deref().into(),
            self.dominant.as_deref().into(),
            self.gacha_url.as_deref().into(),
            self.training_image_url.as_deref().into(),
            SqlValue::Text(self.image_path.to_string_lossy().into_owned()),
        ]
    }
}

impl ExportRow for SkillInfo {
    const TABLE: TableKind = TableKind::Skills;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.skill.as_str().into(),
            self.description.as_str().into(),
            self.categories.as_str().into(),
        ]
    }
}

impl ExportRow for String {
    const TABLE: TableKind = TableKind::IdolNames;

    fn values(&self) -> Vec<SqlValue> {
        vec![self.as_str().into()]
    }
}

impl ExportRow for IdealTeamPreset {
    const TABLE: TableKind = TableKind::IdealTeams;

    fn values(&self) -> Vec<SqlValue> {
        let mut values = vec![self.name.as_str().into(), self.song.as_str().into()];
        for slot in &self.slots {
            values.push(slot.skill.as_str().into());
            values.push(slot.raw_duration.as_str().into());
            values.push(slot.specialization.as_str().into());
            values.push(slot.attribute.label().into());
        }
        values
    }
}

pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    pub fn new(db_path: &Path) -> Result<Self> {
        // Remove existing database if present
        if db_path.exists() {
            std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        }

        let conn = Connection::open(db_path).context("Failed to create database")?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        Ok(Self { conn })
    }

    /// Create all tables for the given schemas
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<()> {
        for schema in schemas {
            let sql = generate_create_table(schema);
            self.conn
                .execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;

            for index_sql in generate_indexes(schema) {
                self.conn
                    .execute(&index_sql, [])
                    .with_context(|| format!("Failed to create index for: {}", schema.name))?;
            }
        }

        Ok(())
    }

    /// Insert all rows of one table in a single transaction
    pub fn import_rows<R: ExportRow>(&mut self, rows: &[R], progress: &ProgressBar) -> Result<u64> {
        let schema = R::TABLE.schema();
        let insert_sql = generate_insert(schema);

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&insert_sql)?;
            for (row_id, row) in rows.iter().enumerate() {
                SqlValue::Integer(row_id as i64).bind_to(1, &mut stmt)?;
                for (idx, value) in row.values().iter().enumerate() {
                    value.bind_to(idx + 2, &mut stmt)?;
                }
                stmt.raw_execute()
                    .with_context(|| format!("Failed to insert row {} into {}", row_id, schema.name))?;
                progress.inc(1);
            }
        }
        tx.commit()?;

        progress.finish_with_message(format!("{}: {} records", schema.name, rows.len()));
        Ok(rows.len() as u64)
    }

    /// Finalize the database
    pub fn finalize(self) -> Result<()> {
        self.conn.execute_batch("PRAGMA optimize;")?;
        Ok(())
    }
}

/// Write every loaded table of `catalog` to a new SQLite database.
/// Unavailable tables are created empty. Returns the number of rows written.
pub fn export_catalog(catalog: &Catalog, output_db: &Path) -> Result<u64> {
    let mut writer = SqliteWriter::new(output_db)?;
    writer.create_tables(ALL_TABLES)?;

    let multi = MultiProgress::new();
    let style = ProgressStyle::default_bar()
        .template("{msg:30} [{bar:40.cyan/blue}] {pos}/{len}")
        .context("Invalid progress template")?
        .progress_chars("=>-");
    let bar = |kind: TableKind, len: usize| {
        let pb = multi.add(ProgressBar::new(len as u64));
        pb.set_style(style.clone());
        pb.set_message(kind.to_string());
        pb
    };

    let mut total = 0;
    total += writer.import_rows(catalog.idols(), &bar(TableKind::Idols, catalog.idols().len()))?;
    total += writer.import_rows(catalog.skills(), &bar(TableKind::Skills, catalog.skills().len()))?;
    total += writer.import_rows(
        catalog.names().names(),
        &bar(TableKind::IdolNames, catalog.names().len()),
    )?;
    total += writer.import_rows(
        catalog.presets(),
        &bar(TableKind::IdealTeams, catalog.presets().len()),
    )?;

    writer.finalize()?;
    tracing::info!(path = ?output_db, rows = total, "Catalog exported");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_follow_schema_columns() {
        let card = crate::query::testing::card("卯月", "A", 7, "高", "Cu", "ボーカル");
        assert_eq!(card.values().len(), TableKind::Idols.schema().columns.len());
        assert_eq!(card.values()[3], SqlValue::Integer(7));
        assert_eq!(card.values()[11], SqlValue::Null);

        let preset = crate::query::testing::preset("p", "s", Default::default());
        assert_eq!(preset.values().len(), TableKind::IdealTeams.schema().columns.len());

        assert_eq!("x".to_string().values(), vec![SqlValue::Text("x".into())]);
    }
}
