//! Microsoft SQL Server dialect.

use super::{Capability, DateFormat, Dialect, FunctionName};
use crate::parameter::BackendType;
use crate::schema::ColumnType;

/// SQL Server (T-SQL) dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

const FUNCTIONS: &[(FunctionName, &str)] = &[
    (FunctionName::Substring, "SUBSTRING"),
    (FunctionName::IsNull, "ISNULL"),
    (FunctionName::CurrentDate, "GETDATE()"),
    (FunctionName::Concatenate, "+"),
];

/// CONVERT style codes: 101 = mm/dd/yyyy, 110 = mm-dd-yyyy, 100 = mon dd yyyy.
const fn convert_style(format: DateFormat) -> Option<(u8, u8)> {
    match format {
        DateFormat::MmDdYyyy => Some((10, 101)),
        DateFormat::MmDdYyyyHyphen => Some((10, 110)),
        DateFormat::MonDYyyy => Some((11, 100)),
        DateFormat::Native => None,
    }
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn capabilities(&self) -> &'static [Capability] {
        &[
            Capability::GuidParameter,
            Capability::BlobParameter,
            Capability::XmlParameter,
            Capability::OutputParameter,
            Capability::IdentityFetch,
        ]
    }

    fn backend_type(&self, column_type: &ColumnType) -> Option<BackendType> {
        let name = match column_type {
            ColumnType::VarChar => "VarChar",
            ColumnType::Int32 => "Int",
            ColumnType::Double => "Float",
            ColumnType::DateTime => "DateTime",
            ColumnType::Char => "Char",
            ColumnType::Blob => "Text",
            ColumnType::VarBinary => "VarBinary",
            ColumnType::Decimal => "Decimal",
            ColumnType::Bit => "Bit",
            ColumnType::Guid => "UniqueIdentifier",
            ColumnType::Xml => "Xml",
            ColumnType::Other(_) => return None,
        };
        Some(BackendType(name))
    }

    fn identity_clause(&self, _key_column: Option<&str>) -> Option<String> {
        Some(String::from("; SELECT SCOPE_IDENTITY()"))
    }

    fn duplicate_key_markers(&self) -> &'static [&'static str] {
        &["duplicate key", "Violation of PRIMARY KEY", "Violation of UNIQUE KEY"]
    }

    fn function_table(&self) -> &'static [(FunctionName, &'static str)] {
        FUNCTIONS
    }

    fn if_null_function(&self) -> &'static str {
        "ISNULL"
    }

    fn current_date_function(&self) -> &'static str {
        "GETDATE()"
    }

    fn format_date(&self, expr: &str, format: DateFormat) -> Option<String> {
        convert_style(format)
            .map(|(len, style)| format!("CONVERT(varchar({len}), {expr}, {style})"))
    }

    fn string_to_date(&self, literal: &str) -> String {
        format!("CONVERT(datetime, '{literal}')")
    }

    fn to_date(&self, date_string: &str, format: DateFormat) -> String {
        match convert_style(format) {
            Some((_, style)) => format!("CONVERT(datetime, '{date_string}', {style})"),
            None => self.quote_literal(date_string),
        }
    }

    fn date_only(&self, column: &str) -> String {
        format!("CONVERT(date, {column})")
    }

    fn year_syntax(&self, date_string: &str) -> String {
        format!("YEAR('{date_string}')")
    }

    fn convert_to_char(&self, column: &str) -> String {
        format!("CONVERT(varchar, {column})")
    }

    fn default_schema_query(&self) -> &'static str {
        "SELECT SCHEMA_NAME()"
    }
}
