//! SQLite dialect.

use chrono::NaiveDateTime;

use super::{Capability, DateFormat, DatePart, Dialect, FunctionName};
use crate::parameter::BackendType;
use crate::schema::ColumnType;

/// SQLite dialect.
///
/// SQLite has no date type; dates are ISO-8601 text and every date
/// operation goes through `strftime`. Identity retrieval uses
/// `RETURNING <key column>`, or `RETURNING rowid` when the table has no
/// generated column (SQLite 3.35.0+).
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

const FUNCTIONS: &[(FunctionName, &str)] = &[
    (FunctionName::Substring, "SUBSTR"),
    (FunctionName::IsNull, "IFNULL"),
    (FunctionName::CurrentDate, "DATE('now')"),
    (FunctionName::Concatenate, "||"),
];

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn month_abbreviation(expr: &str) -> String {
    let arms: String = MONTH_ABBREVIATIONS
        .iter()
        .enumerate()
        .map(|(i, name)| format!(" WHEN '{:02}' THEN '{name}'", i + 1))
        .collect();
    format!("CASE strftime('%m', {expr}){arms} END")
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::BlobParameter, Capability::IdentityFetch]
    }

    fn backend_type(&self, column_type: &ColumnType) -> Option<BackendType> {
        // Type affinity names
        let name = match column_type {
            ColumnType::VarChar | ColumnType::Char | ColumnType::DateTime => "TEXT",
            ColumnType::Int32 | ColumnType::Bit => "INTEGER",
            ColumnType::Double => "REAL",
            ColumnType::Blob | ColumnType::VarBinary => "BLOB",
            ColumnType::Decimal => "NUMERIC",
            ColumnType::Guid | ColumnType::Xml | ColumnType::Other(_) => return None,
        };
        Some(BackendType(name))
    }

    fn parameter_connector(&self) -> &'static str {
        "?"
    }

    fn placeholder(&self, _name: &str, _index: usize) -> String {
        String::from("?")
    }

    fn identity_clause(&self, key_column: Option<&str>) -> Option<String> {
        Some(format!(" RETURNING {}", key_column.unwrap_or("rowid")))
    }

    fn duplicate_key_markers(&self) -> &'static [&'static str] {
        &["UNIQUE constraint failed"]
    }

    fn function_table(&self) -> &'static [(FunctionName, &'static str)] {
        FUNCTIONS
    }

    fn if_null_function(&self) -> &'static str {
        "IFNULL"
    }

    fn current_date_function(&self) -> &'static str {
        "DATE('now')"
    }

    fn format_date(&self, expr: &str, format: DateFormat) -> Option<String> {
        match format {
            DateFormat::MmDdYyyy => Some(format!("strftime('%m/%d/%Y', {expr})")),
            DateFormat::MmDdYyyyHyphen => Some(format!("strftime('%m-%d-%Y', {expr})")),
            DateFormat::MonDYyyy => Some(format!(
                "({} || ' ' || CAST(strftime('%d', {expr}) AS INTEGER) || ' ' || \
                 strftime('%Y', {expr}))",
                month_abbreviation(expr)
            )),
            DateFormat::Native => None,
        }
    }

    fn date_part(&self, expr: &str, _format: DateFormat, part: DatePart) -> String {
        let field = match part {
            DatePart::Day => "%d",
            DatePart::Month => "%m",
            DatePart::Year => "%Y",
        };
        format!("CAST(strftime('{field}', {expr}) AS INTEGER)")
    }

    fn string_to_date(&self, literal: &str) -> String {
        format!("datetime('{literal}')")
    }

    fn string_to_date_value(&self, value: NaiveDateTime) -> String {
        self.string_to_date(&value.format("%Y-%m-%d %H:%M:%S").to_string())
    }

    fn date_only(&self, column: &str) -> String {
        format!("date({column})")
    }

    fn year_syntax(&self, date_string: &str) -> String {
        format!("strftime('%Y', '{date_string}')")
    }

    fn convert_to_char(&self, column: &str) -> String {
        format!("CAST({column} AS TEXT)")
    }

    fn default_schema_query(&self) -> &'static str {
        "SELECT 'main'"
    }
}
