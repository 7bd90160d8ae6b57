use log::{error, info};
use rusqlite::Connection;

use crate::errors::Result;

/// Creates any missing tables, indexes and views. Safe to run on every start.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        if let Err(e) = execute_sql(conn, statement) {
            error!("Failed to execute schema statement {}: {}", idx + 1, e);
            return Err(e.into());
        }
    }

    info!("Database schema ready ({} statements)", statements.len());
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> rusqlite::Result<()> {
    conn.execute(sql, []).map(|_| ())
}
