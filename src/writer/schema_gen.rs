use crate::schema::{ColumnType, TableSchema};

/// Generate CREATE TABLE SQL for a table schema.
///
/// Rows have no natural key, so every table gets a `row_id` holding the
/// source row position.
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);
    let mut columns = vec!["    row_id INTEGER PRIMARY KEY".to_string()];

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
        };
        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
        columns.push(format!("    {} {}{}", col.name, sql_type, null_constraint));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for the schema's indexed columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .indexes
        .iter()
        .map(|column| {
            format!(
                "CREATE INDEX idx_{}_{} ON {}({})",
                schema.name, column, schema.name, column
            )
        })
        .collect()
}

/// INSERT statement with one placeholder per column plus `row_id`
pub fn generate_insert(schema: &TableSchema) -> String {
    let names: Vec<&str> = std::iter::once("row_id")
        .chain(schema.columns.iter().map(|c| c.name))
        .collect();
    let placeholders = vec!["?"; names.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.name,
        names.join(", "),
        placeholders.join(", ")
    )
}
