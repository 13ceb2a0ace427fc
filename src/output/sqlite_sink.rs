// src/output/sqlite_sink.rs
//! SQLite output with one fixed table and a commit per page.

use super::{ensure_parent_dir, RecordSink, SinkSummary, TablePolicy};
use crate::error::AppError;
use crate::model::{FeedbackRecord, FEEDBACK_COLUMNS};
use crate::types::TableName;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection};
use serde_json::Value;
use std::path::PathBuf;

/// Bound-parameter limit of the bundled SQLite (3.32+).
const MAX_BOUND_PARAMETERS: usize = 32_766;

/// Inserts each page in its own transaction.
///
/// A crash between pages keeps every committed page; a failure inside a
/// page rolls that page back entirely.
pub struct SqliteSink {
    conn: Connection,
    path: PathBuf,
    table: TableName,
    policy: TablePolicy,
    rows_written: usize,
}

impl SqliteSink {
    /// Opens (or creates) the database file. The table is set up in `begin`.
    pub fn open(
        path: impl Into<PathBuf>,
        table: TableName,
        policy: TablePolicy,
    ) -> Result<Self, AppError> {
        let path = path.into();
        ensure_parent_dir(&path)?;
        let conn = Connection::open(&path)?;

        Ok(Self {
            conn,
            path,
            table,
            policy,
            rows_written: 0,
        })
    }

    /// Create an in-memory sink (for testing)
    #[cfg(test)]
    pub fn open_in_memory(table: TableName, policy: TablePolicy) -> Result<Self, AppError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: PathBuf::from(":memory:"),
            table,
            policy,
            rows_written: 0,
        })
    }

    fn table_exists(&self) -> Result<bool, AppError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![self.table.as_str()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn create_table(&self, if_not_exists: bool) -> Result<(), AppError> {
        self.conn
            .execute(&create_table_sql(&self.table, if_not_exists), [])?;
        Ok(())
    }
}

impl RecordSink for SqliteSink {
    fn begin(&mut self) -> Result<(), AppError> {
        log::info!(
            "Preparing table '{}' in {} ({})",
            self.table,
            self.path.display(),
            self.policy
        );

        match self.policy {
            TablePolicy::Fresh => {
                if self.table_exists()? {
                    return Err(AppError::DestinationExists {
                        table: self.table.to_string(),
                        path: self.path.clone(),
                    });
                }
                self.create_table(false)
            }
            TablePolicy::Append => self.create_table(true),
            TablePolicy::Replace => {
                self.conn
                    .execute(&format!("DROP TABLE IF EXISTS \"{}\"", self.table), [])?;
                self.create_table(false)
            }
        }
    }

    fn write_page(&mut self, page: u32, records: Vec<FeedbackRecord>) -> Result<(), AppError> {
        if records.is_empty() {
            return Ok(());
        }
        // `id` aliases the rowid; a null would be replaced by a generated key.
        if records.iter().any(|record| record.id().is_none()) {
            return Err(AppError::MissingKey { page });
        }

        let rows_per_statement = MAX_BOUND_PARAMETERS / FEEDBACK_COLUMNS.len();
        let tx = self.conn.transaction()?;
        for chunk in records.chunks(rows_per_statement) {
            let sql = insert_sql(&self.table, chunk.len());
            let values = chunk
                .iter()
                .flat_map(|record| record.values_in(&FEEDBACK_COLUMNS).map(to_sql_value));
            tx.execute(&sql, params_from_iter(values))?;
        }
        tx.commit()?;

        self.rows_written += records.len();
        log::debug!(
            "Committed page {} ({} rows, {} total)",
            page,
            records.len(),
            self.rows_written
        );
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkSummary, AppError> {
        log::info!(
            "Wrote {} records to table '{}' in {}",
            self.rows_written,
            self.table,
            self.path.display()
        );
        Ok(SinkSummary {
            destination: self.path.clone(),
            records_written: self.rows_written,
        })
    }
}

fn column_type(column: &str) -> &'static str {
    match column {
        "id" => "INTEGER PRIMARY KEY",
        "publicationId" => "INTEGER",
        _ => "TEXT",
    }
}

fn create_table_sql(table: &TableName, if_not_exists: bool) -> String {
    let columns = FEEDBACK_COLUMNS
        .iter()
        .map(|column| format!("    \"{}\" {}", column, column_type(column)))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "CREATE TABLE {}\"{}\" (\n{}\n)",
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        table,
        columns
    )
}

/// One multi-row INSERT for `rows` records.
fn insert_sql(table: &TableName, rows: usize) -> String {
    let columns = FEEDBACK_COLUMNS
        .iter()
        .map(|column| format!("\"{}\"", column))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = format!("({})", vec!["?"; FEEDBACK_COLUMNS.len()].join(", "));
    let tuples = vec![placeholders.as_str(); rows].join(", ");

    format!("INSERT INTO \"{}\" ({}) VALUES {}", table, columns, tuples)
}

/// Maps a JSON value onto SQLite storage classes.
pub fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map_or(SqlValue::Null, SqlValue::Real),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        nested => SqlValue::Text(nested.to_string()),
    }
}
