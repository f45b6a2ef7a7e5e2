//! CSV-to-table import pipeline
//!
//! One file's import moves through
//! `NotStarted → SchemaEnsured → {SkippedAlreadyPopulated | Importing → Completed} | Failed`.
//! The terminal states are the return value of [`import_stats`]:
//! `Ok(ImportOutcome::SkippedAlreadyPopulated)`, `Ok(ImportOutcome::Completed)`
//! or `Err(ImportError)`.
//!
//! A table that already holds rows is never touched again, which is what makes
//! reruns safe. The flip side is that a corrected CSV is not picked up until
//! the table is emptied by hand.

use crate::error::{ImportError, ImportResult};
use crate::normalize::{normalize_row, NormalizedRow, RawRecord, StatValue};
use calvary_common::config::ResolvedPaths;
use calvary_common::db::{ensure_table, row_count, table_exists, StatsTable, ValueKind};
use sqlx::{Connection, SqliteConnection};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A data row that was not imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based data row index (the header row is not counted)
    pub index: usize,
    pub reason: String,
}

/// Result of an import that ran to the end of the file
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub table: StatsTable,
    pub source: PathBuf,
    pub rows_read: usize,
    pub rows_inserted: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ImportSummary {
    fn new(table: StatsTable, source: &Path) -> Self {
        Self {
            table,
            source: source.to_path_buf(),
            rows_read: 0,
            rows_inserted: 0,
            skipped: Vec::new(),
        }
    }

    fn skip(&mut self, index: usize, reason: String) {
        self.skipped.push(SkippedRow { index, reason });
    }
}

/// Non-error outcome of one file's import
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    /// Table already had rows; nothing was read or written
    SkippedAlreadyPopulated {
        table: StatsTable,
        existing_rows: i64,
    },
    /// File consumed and committed (individual rows may have been skipped)
    Completed(ImportSummary),
}

impl ImportOutcome {
    pub fn rows_inserted(&self) -> usize {
        match self {
            ImportOutcome::SkippedAlreadyPopulated { .. } => 0,
            ImportOutcome::Completed(summary) => summary.rows_inserted,
        }
    }
}

fn open_csv(path: &Path) -> ImportResult<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ImportError::SourceNotFound(path.to_path_buf())
        } else {
            ImportError::SourceRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    // Spreadsheet exports often leave a trailing comma; extra fields are ignored
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file))
}

/// Whether a CSV error only spoils the current record
///
/// A record with invalid UTF-8 is skipped like any other bad row. I/O
/// failures end the import.
fn is_row_level(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Utf8 { .. })
}

async fn insert_row(
    conn: &mut SqliteConnection,
    insert_sql: &str,
    row: &NormalizedRow,
) -> Result<(), sqlx::Error> {
    let mut query = sqlx::query(insert_sql);
    for value in &row.values {
        query = match value {
            StatValue::Text(text) => query.bind(text.as_str()),
            StatValue::Real(v) => query.bind(*v),
            StatValue::Integer(v) => query.bind(*v),
        };
    }
    query.execute(&mut *conn).await?;
    Ok(())
}

/// Import `csv_path` into `table`
///
/// Ensures the table exists, skips the import if it already holds rows, and
/// otherwise inserts every row that normalizes cleanly inside one
/// transaction committed at end of file. Rows that fail normalization are
/// logged and listed in the summary. A fatal error drops the transaction, so
/// none of that file's rows are kept.
pub async fn import_stats(
    conn: &mut SqliteConnection,
    table: StatsTable,
    csv_path: &Path,
) -> ImportResult<ImportOutcome> {
    if !table_exists(conn, table).await? {
        info!("Table '{}' does not exist; creating it", table);
    }
    ensure_table(conn, table).await?;

    let existing_rows = row_count(conn, table).await?;
    if existing_rows > 0 {
        info!(
            "Table '{}' already contains data ({} rows). Skipping import.",
            table, existing_rows
        );
        return Ok(ImportOutcome::SkippedAlreadyPopulated {
            table,
            existing_rows,
        });
    }

    info!("Importing '{}' into '{}'", csv_path.display(), table);

    let mut reader = open_csv(csv_path)?;
    let headers = reader
        .headers()
        .map_err(|source| ImportError::Csv {
            path: csv_path.to_path_buf(),
            source,
        })?
        .clone();

    let has_header = |name: &str| headers.iter().any(|h| h == name);

    if !has_header(table.name_header()) {
        warn!(
            "Column '{}' not found in '{}'; every row will be skipped",
            table.name_header(),
            csv_path.display()
        );
    }

    for column in table.columns() {
        if column.kind != ValueKind::Name && !has_header(column.source_header) {
            warn!(
                "Column '{}' not found in '{}'; defaulting '{}'",
                column.source_header,
                csv_path.display(),
                column.name
            );
        }
    }

    let insert_sql = table.insert_sql();
    let mut summary = ImportSummary::new(table, csv_path);
    let mut tx = conn.begin().await?;

    for (i, result) in reader.records().enumerate() {
        let index = i + 1;
        summary.rows_read += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) if is_row_level(&e) => {
                warn!("Skipping {} row {}: {}", table, index, e);
                summary.skip(index, e.to_string());
                continue;
            }
            Err(source) => {
                return Err(ImportError::Csv {
                    path: csv_path.to_path_buf(),
                    source,
                })
            }
        };

        if record.len() < headers.len() {
            let reason = format!(
                "found record with {} fields, but the header has {} fields",
                record.len(),
                headers.len()
            );
            warn!("Skipping {} row {}: {}", table, index, reason);
            summary.skip(index, reason);
            continue;
        }

        let raw: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();

        match normalize_row(table, &raw) {
            Ok(row) => {
                insert_row(&mut tx, &insert_sql, &row).await?;
                summary.rows_inserted += 1;
                debug!("Inserted {} row {} ({})", table, index, row.player());
            }
            Err(e) => {
                warn!(
                    "Skipping {} row {} due to data conversion error: {} in row: {:?}",
                    table, index, e, record
                );
                summary.skip(index, e.to_string());
            }
        }
    }

    tx.commit().await?;

    info!(
        "Data imported from '{}' to '{}': {} inserted, {} skipped",
        csv_path.display(),
        table,
        summary.rows_inserted,
        summary.skipped.len()
    );

    Ok(ImportOutcome::Completed(summary))
}

/// Import averages then totals from the resolved CSV paths
///
/// Each file succeeds or fails on its own; a failure of the first does not
/// stop the second from being attempted.
pub async fn import_all(
    conn: &mut SqliteConnection,
    paths: &ResolvedPaths,
) -> Vec<(StatsTable, ImportResult<ImportOutcome>)> {
    let sources = [
        (StatsTable::SeasonAverages, paths.averages_csv.as_path()),
        (StatsTable::SeasonTotals, paths.totals_csv.as_path()),
    ];

    let mut results = Vec::with_capacity(sources.len());
    for (table, csv_path) in sources {
        let result = import_stats(conn, table, csv_path).await;
        if let Err(e) = &result {
            warn!("Import into '{}' failed: {}", table, e);
        }
        results.push((table, result));
    }
    results
}
