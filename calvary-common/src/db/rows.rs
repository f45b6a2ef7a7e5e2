//! Row-to-JSON conversion
//!
//! Turns any SQLite row into a flat JSON object keyed by column name. Values
//! map by their runtime storage class, so an INTEGER column yields JSON
//! integers and a REAL column yields JSON floats (`27.0`, not `27`).

use crate::Result;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Executor, Row, Sqlite, TypeInfo, ValueRef};

/// Convert one column of `row` to JSON
fn column_value(row: &SqliteRow, index: usize) -> Value {
    let raw = match row.try_get_raw(index) {
        Ok(raw) => raw,
        Err(_) => return Value::Null,
    };
    if raw.is_null() {
        return Value::Null;
    }

    let type_name = raw.type_info().name().to_string();
    match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => row
            .try_get::<i64, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "REAL" | "NUMERIC" => row
            .try_get::<f64, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "TEXT" => row
            .try_get::<String, _>(index)
            .map(Value::String)
            .unwrap_or(Value::Null),
        // BLOB has no JSON form
        _ => Value::Null,
    }
}

/// Convert a row to a JSON object keyed by column name
pub fn row_to_json(row: &SqliteRow) -> Map<String, Value> {
    row.columns()
        .iter()
        .map(|col| (col.name().to_string(), column_value(row, col.ordinal())))
        .collect()
}

/// Run `sql` and convert every returned row, preserving store order
pub async fn fetch_json_rows<'e, E>(executor: E, sql: &str) -> Result<Vec<Map<String, Value>>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(sql).fetch_all(executor).await?;
    Ok(rows.iter().map(row_to_json).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Connection, SqliteConnection};

    #[tokio::test]
    async fn test_storage_classes_map_to_json_types() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();

        let rows = fetch_json_rows(
            &mut conn,
            "SELECT 27 AS whole, 27.0 AS real, 'Jane Doe' AS name, NULL AS missing",
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row["whole"], Value::from(27_i64));
        assert!(row["whole"].is_i64());
        assert!(row["real"].is_f64());
        assert_eq!(row["real"].as_f64(), Some(27.0));
        assert_eq!(row["name"], "Jane Doe");
        assert!(row["missing"].is_null());
    }

    #[tokio::test]
    async fn test_rows_keep_store_order() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        sqlx::query("CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, label TEXT)")
            .execute(&mut conn)
            .await
            .unwrap();
        for label in ["first", "second", "third"] {
            sqlx::query("INSERT INTO t (label) VALUES (?)")
                .bind(label)
                .execute(&mut conn)
                .await
                .unwrap();
        }

        let rows = fetch_json_rows(&mut conn, "SELECT * FROM t").await.unwrap();
        let labels: Vec<&str> = rows.iter().map(|r| r["label"].as_str().unwrap()).collect();

        assert_eq!(labels, vec!["first", "second", "third"]);
        assert_eq!(rows[2]["id"], 3);
    }
}
