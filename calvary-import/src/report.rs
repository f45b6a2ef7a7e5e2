//! Post-import report
//!
//! Summarizes each file's outcome and prints the first few stored rows of
//! each table so a run can be checked at a glance.

use crate::error::ImportResult;
use crate::pipeline::ImportOutcome;
use calvary_common::db::{fetch_json_rows, StatsTable};
use serde_json::{Map, Value};
use sqlx::SqliteConnection;
use std::fmt::Write;

/// First `limit` rows of `table` as JSON objects
pub async fn preview_rows(
    conn: &mut SqliteConnection,
    table: StatsTable,
    limit: u32,
) -> calvary_common::Result<Vec<Map<String, Value>>> {
    let sql = format!("SELECT * FROM {} LIMIT {}", table.table_name(), limit);
    fetch_json_rows(conn, &sql).await
}

/// One line describing how a file's import ended
pub fn describe_outcome(table: StatsTable, result: &ImportResult<ImportOutcome>) -> String {
    match result {
        Ok(ImportOutcome::SkippedAlreadyPopulated { existing_rows, .. }) => format!(
            "{}: skipped, table already contains {} rows",
            table, existing_rows
        ),
        Ok(ImportOutcome::Completed(summary)) => {
            let mut line = format!(
                "{}: imported {} of {} rows from '{}'",
                table,
                summary.rows_inserted,
                summary.rows_read,
                summary.source.display()
            );
            if !summary.skipped.is_empty() {
                let indexes: Vec<String> =
                    summary.skipped.iter().map(|s| s.index.to_string()).collect();
                let _ = write!(line, " (skipped rows: {})", indexes.join(", "));
            }
            line
        }
        Err(e) => format!("{}: FAILED: {}", table, e),
    }
}

/// Full report: outcome lines followed by a preview of each table
pub async fn render_report(
    conn: &mut SqliteConnection,
    results: &[(StatsTable, ImportResult<ImportOutcome>)],
    preview_limit: u32,
) -> String {
    let mut out = String::from("Import results:\n");
    for (table, result) in results {
        let _ = writeln!(out, "  {}", describe_outcome(*table, result));
    }

    for table in StatsTable::ALL {
        let _ = writeln!(
            out,
            "\nVerifying imported data for {} (first {} rows):",
            table, preview_limit
        );
        match preview_rows(conn, table, preview_limit).await {
            Ok(rows) if rows.is_empty() => {
                let _ = writeln!(out, "No data found in '{}' table after import.", table);
            }
            Ok(rows) => {
                for row in rows {
                    let _ = writeln!(out, "{}", Value::Object(row));
                }
            }
            Err(e) => {
                let _ = writeln!(out, "Error verifying data: {}", e);
            }
        }
    }

    out
}
