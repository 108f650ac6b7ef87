//! PostgreSQL dialect.

use super::{Capability, DateFormat, DatePart, Dialect, FunctionName};
use crate::parameter::BackendType;
use crate::schema::ColumnType;

/// PostgreSQL dialect.
///
/// Placeholders are positional (`$1`, `$2`, ...), so parameter order must
/// match column order exactly.
/// The identity comes back through `RETURNING <key column>`; without a
/// generated column there is nothing to return.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

const FUNCTIONS: &[(FunctionName, &str)] = &[
    (FunctionName::Substring, "SUBSTRING"),
    (FunctionName::IsNull, "COALESCE"),
    (FunctionName::CurrentDate, "CURRENT_DATE"),
    (FunctionName::Concatenate, "||"),
];

const fn pattern(format: DateFormat) -> Option<&'static str> {
    match format {
        DateFormat::MmDdYyyy => Some("MM/DD/YYYY"),
        DateFormat::MmDdYyyyHyphen => Some("MM-DD-YYYY"),
        DateFormat::MonDYyyy => Some("Mon FMDD YYYY"),
        DateFormat::Native => None,
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn capabilities(&self) -> &'static [Capability] {
        &[
            Capability::GuidParameter,
            Capability::BlobParameter,
            Capability::XmlParameter,
            Capability::IdentityFetch,
        ]
    }

    fn backend_type(&self, column_type: &ColumnType) -> Option<BackendType> {
        let name = match column_type {
            ColumnType::VarChar => "Varchar",
            ColumnType::Int32 => "Integer",
            ColumnType::Double => "Double",
            ColumnType::DateTime => "Timestamp",
            ColumnType::Char => "Char",
            ColumnType::Blob => "Text",
            ColumnType::VarBinary => "Bytea",
            ColumnType::Decimal => "Numeric",
            ColumnType::Bit => "Boolean",
            ColumnType::Guid => "Uuid",
            ColumnType::Xml => "Xml",
            ColumnType::Other(_) => return None,
        };
        Some(BackendType(name))
    }

    fn parameter_connector(&self) -> &'static str {
        "$"
    }

    fn placeholder(&self, _name: &str, index: usize) -> String {
        format!("${}", index + 1)
    }

    fn identity_clause(&self, key_column: Option<&str>) -> Option<String> {
        key_column.map(|column| format!(" RETURNING {column}"))
    }

    fn duplicate_key_markers(&self) -> &'static [&'static str] {
        &["duplicate key value violates unique constraint"]
    }

    fn function_table(&self) -> &'static [(FunctionName, &'static str)] {
        FUNCTIONS
    }

    fn if_null_function(&self) -> &'static str {
        "COALESCE"
    }

    fn current_date_function(&self) -> &'static str {
        "CURRENT_DATE"
    }

    fn format_date(&self, expr: &str, format: DateFormat) -> Option<String> {
        pattern(format).map(|p| format!("to_char({expr}, '{p}')"))
    }

    fn date_part(&self, expr: &str, _format: DateFormat, part: DatePart) -> String {
        let field = match part {
            DatePart::Day => "DAY",
            DatePart::Month => "MONTH",
            DatePart::Year => "YEAR",
        };
        format!("EXTRACT({field} FROM {expr})")
    }

    fn string_to_date(&self, literal: &str) -> String {
        format!("CAST('{literal}' AS TIMESTAMP)")
    }

    fn to_date(&self, date_string: &str, format: DateFormat) -> String {
        match pattern(format) {
            Some(p) => format!("to_date('{date_string}', '{p}')"),
            None => self.quote_literal(date_string),
        }
    }

    fn date_only(&self, column: &str) -> String {
        format!("CAST({column} AS DATE)")
    }

    fn year_syntax(&self, date_string: &str) -> String {
        format!("EXTRACT(YEAR FROM CAST('{date_string}' AS DATE))")
    }

    fn convert_to_char(&self, column: &str) -> String {
        format!("CAST({column} AS TEXT)")
    }

    fn default_schema_query(&self) -> &'static str {
        "SELECT current_schema()"
    }
}
