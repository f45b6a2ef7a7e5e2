//! Row normalization
//!
//! Converts one raw CSV record (header → raw string) into typed values in the
//! destination table's column order. Driven entirely by the table's
//! [`ColumnDefinition`]s, so the averages and totals files differ only in
//! their declarations.
//!
//! Cleaning rules:
//! - Player name: trimmed; a leading `#NN ` rank/jersey prefix is dropped
//!   through the first space.
//!   A bare `#NN` with nothing after it is kept as-is.
//! - Percentages: trailing `%` stripped, then parsed as float.
//! - Other statistics: float for averages, integer for totals.
//! - A column absent from the file defaults to zero. A column present but
//!   blank or unparsable rejects the whole row.

use calvary_common::db::{ColumnDefinition, StatsTable, ValueKind};
use std::collections::HashMap;
use std::fmt;

/// One CSV record keyed by exact header spelling
pub type RawRecord = HashMap<String, String>;

/// A typed value ready to bind into an INSERT
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Text(String),
    Real(f64),
    Integer(i64),
}

/// A cleaned row in table column order
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub table: StatsTable,
    pub values: Vec<StatValue>,
}

impl NormalizedRow {
    /// Cleaned player name
    pub fn player(&self) -> &str {
        self.values
            .iter()
            .find_map(|v| match v {
                StatValue::Text(name) => Some(name.as_str()),
                _ => None,
            })
            .unwrap_or("")
    }

    /// Value stored in `column`, if the table has one by that name
    pub fn get(&self, column: &str) -> Option<&StatValue> {
        self.table
            .columns()
            .iter()
            .position(|c| c.name == column)
            .and_then(|i| self.values.get(i))
    }
}

/// A single column that failed to normalize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// CSV header of the failing column
    pub header: &'static str,
    /// Raw value as read, `None` if the column was absent
    pub raw: Option<String>,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "'{}' = {:?}: {}", self.header, raw, self.reason),
            None => write!(f, "'{}': {}", self.header, self.reason),
        }
    }
}

/// Why a row was rejected; lists every failing column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub fields: Vec<FieldError>,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.fields.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for RowError {}

/// Clean a raw player name
///
/// `"#23 Jane Doe"` → `"Jane Doe"`, `"#23"` → `"#23"`, `"  Jane Doe  "` → `"Jane Doe"`.
/// Only the prefix through the first space is dropped; whatever follows it is
/// kept verbatim.
pub fn clean_player_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('#') {
        if let Some((_, rest)) = trimmed.split_once(' ') {
            return rest.to_string();
        }
    }
    trimmed.to_string()
}

fn check_finite(value: f64) -> Result<f64, String> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err("not a finite number".to_string())
    }
}

/// Parse a floating point statistic
pub fn parse_real(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("could not convert to float: {}", e))?;
    check_finite(value)
}

/// Parse an integer statistic; `"27.0"` is rejected
pub fn parse_integer(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| format!("could not convert to integer: {}", e))
}

/// Parse a percentage such as `"45.6%"` into `45.6`
pub fn parse_percentage(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_real(number)
}

fn normalize_field(column: &ColumnDefinition, raw: Option<&str>) -> Result<StatValue, String> {
    match (column.kind, raw) {
        (ValueKind::Name, raw) => {
            let name = clean_player_name(raw.unwrap_or(""));
            if name.is_empty() {
                Err("missing player name".to_string())
            } else {
                Ok(StatValue::Text(name))
            }
        }
        (ValueKind::Real, None) | (ValueKind::Percentage, None) => Ok(StatValue::Real(0.0)),
        (ValueKind::Integer, None) => Ok(StatValue::Integer(0)),
        (ValueKind::Real, Some(raw)) => parse_real(raw).map(StatValue::Real),
        (ValueKind::Percentage, Some(raw)) => parse_percentage(raw).map(StatValue::Real),
        (ValueKind::Integer, Some(raw)) => parse_integer(raw).map(StatValue::Integer),
    }
}

/// Normalize one record for `table`
///
/// Every column is checked before giving up, so the error names all the
/// columns that failed rather than only the first.
pub fn normalize_row(table: StatsTable, record: &RawRecord) -> Result<NormalizedRow, RowError> {
    let columns = table.columns();
    let mut values = Vec::with_capacity(columns.len());
    let mut failures = Vec::new();

    for column in columns {
        let raw = record.get(column.source_header).map(String::as_str);
        match normalize_field(column, raw) {
            Ok(value) => values.push(value),
            Err(reason) => failures.push(FieldError {
                header: column.source_header,
                raw: raw.map(str::to_string),
                reason,
            }),
        }
    }

    if failures.is_empty() {
        Ok(NormalizedRow { table, values })
    } else {
        Err(RowError { fields: failures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVERAGES_HEADER: &str = "Player,PTS,REBS,ASSISTS,STEALS,BLOCKS,2 PTM,2 PTA,2 PT %,3 PTM,3 PTA,3 PT %,FGM,FGA,FG %,FTM,FTA,FT %,TO";

    fn record(header: &str, line: &str) -> RawRecord {
        header
            .split(',')
            .zip(line.split(','))
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect()
    }

    fn real(row: &NormalizedRow, column: &str) -> f64 {
        match row.get(column) {
            Some(StatValue::Real(v)) => *v,
            other => panic!("expected REAL for {column}, got {other:?}"),
        }
    }

    #[test]
    fn test_clean_player_name() {
        assert_eq!(clean_player_name("#23 Jane Doe"), "Jane Doe");
        assert_eq!(clean_player_name("#23"), "#23");
        assert_eq!(clean_player_name("  Jane Doe  "), "Jane Doe");
        assert_eq!(clean_player_name("  #5 John Smith "), "John Smith");
        assert_eq!(clean_player_name("Jane #2 Doe"), "Jane #2 Doe");
        assert_eq!(clean_player_name("#7  Extra Space"), " Extra Space");
        assert_eq!(clean_player_name(""), "");
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("45.6%"), Ok(45.6));
        assert_eq!(parse_percentage("45.6"), Ok(45.6));
        assert_eq!(parse_percentage(" 100% "), Ok(100.0));
        assert_eq!(parse_percentage("0.0%"), Ok(0.0));
        assert!(parse_percentage("%").is_err());
        assert!(parse_percentage("n/a").is_err());
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_real("27"), Ok(27.0));
        assert_eq!(parse_real(" 20.5 "), Ok(20.5));
        assert_eq!(parse_integer("27"), Ok(27));
        assert!(parse_integer("27.0").is_err());
        assert!(parse_real("").is_err());
        assert!(parse_real("NaN").is_err());
        assert!(parse_real("inf").is_err());
    }

    #[test]
    fn test_john_smith_averages_row() {
        let raw = record(
            AVERAGES_HEADER,
            "#5 John Smith,20.5,5.1,3.2,1.0,0.5,4.0,8.0,50.0%,2.0,5.0,40.0%,6.0,13.0,46.2%,5.0,6.0,83.3%,2.0",
        );

        let row = normalize_row(StatsTable::SeasonAverages, &raw).unwrap();

        assert_eq!(row.values.len(), 19);
        assert_eq!(row.player(), "John Smith");
        assert_eq!(real(&row, "pts"), 20.5);
        assert_eq!(real(&row, "two_pt_pct"), 50.0);
        assert_eq!(real(&row, "three_pt_pct"), 40.0);
        assert_eq!(real(&row, "fg_pct"), 46.2);
        assert_eq!(real(&row, "ft_pct"), 83.3);
        assert_eq!(real(&row, "to_val"), 2.0);
    }

    #[test]
    fn test_type_fidelity_between_tables() {
        let mut raw = RawRecord::new();
        raw.insert("Player".to_string(), "Jane Doe".to_string());
        raw.insert("Players".to_string(), "Jane Doe".to_string());
        raw.insert("PTS".to_string(), "27".to_string());

        let averages = normalize_row(StatsTable::SeasonAverages, &raw).unwrap();
        let totals = normalize_row(StatsTable::SeasonTotals, &raw).unwrap();

        assert_eq!(averages.get("pts"), Some(&StatValue::Real(27.0)));
        assert_eq!(totals.get("pts"), Some(&StatValue::Integer(27)));
    }

    #[test]
    fn test_missing_columns_default_to_zero() {
        let mut raw = RawRecord::new();
        raw.insert("Players".to_string(), "#11 Sam Lee".to_string());

        let row = normalize_row(StatsTable::SeasonTotals, &raw).unwrap();

        assert_eq!(row.values.len(), 20);
        assert_eq!(row.player(), "Sam Lee");
        assert_eq!(row.get("games"), Some(&StatValue::Integer(0)));
        assert_eq!(row.get("fg_pct"), Some(&StatValue::Real(0.0)));
        assert_eq!(row.get("rebs"), Some(&StatValue::Integer(0)));
    }

    #[test]
    fn test_totals_read_plural_name_header() {
        let mut raw = RawRecord::new();
        raw.insert("Player".to_string(), "Wrong Header".to_string());

        let err = normalize_row(StatsTable::SeasonTotals, &raw).unwrap_err();

        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].header, "Players");
        assert_eq!(err.fields[0].raw, None);
    }

    #[test]
    fn test_blank_value_is_not_defaulted() {
        let mut raw = RawRecord::new();
        raw.insert("Player".to_string(), "Jane Doe".to_string());
        raw.insert("PTS".to_string(), "".to_string());

        let err = normalize_row(StatsTable::SeasonAverages, &raw).unwrap_err();
        assert_eq!(err.fields[0].header, "PTS");
    }

    #[test]
    fn test_error_lists_every_failing_column() {
        let mut raw = RawRecord::new();
        raw.insert("Players".to_string(), "   ".to_string());
        raw.insert("PTS".to_string(), "abc".to_string());
        raw.insert("FG %".to_string(), "12.5".to_string());
        raw.insert("Games".to_string(), "3.5".to_string());

        let err = normalize_row(StatsTable::SeasonTotals, &raw).unwrap_err();
        let headers: Vec<&str> = err.fields.iter().map(|f| f.header).collect();

        assert_eq!(headers, vec!["Players", "PTS", "Games"]);

        let message = err.to_string();
        assert!(message.contains("'PTS' = \"abc\""), "{message}");
        assert!(message.contains("missing player name"), "{message}");
    }
}
