//! OLE DB dialect (Jet / Access SQL).
//!
//! Dates are delimited with `#`, text literals inside `FORMAT` use double
//! quotes, and `&` concatenates strings.

use super::{Capability, DateFormat, Dialect, FunctionName};
use crate::parameter::BackendType;
use crate::schema::ColumnType;

/// OLE DB dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct OleDbDialect;

impl OleDbDialect {
    /// Creates a new OLE DB dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

const FUNCTIONS: &[(FunctionName, &str)] = &[
    (FunctionName::Substring, "LEFT"),
    (FunctionName::IsNull, "ISNULL"),
    (FunctionName::CurrentDate, "NOW()"),
    (FunctionName::Concatenate, "&"),
];

impl Dialect for OleDbDialect {
    fn name(&self) -> &'static str {
        "oledb"
    }

    fn capabilities(&self) -> &'static [Capability] {
        &[
            Capability::GuidParameter,
            Capability::BlobParameter,
            Capability::OutputParameter,
            Capability::IdentityFetch,
        ]
    }

    fn backend_type(&self, column_type: &ColumnType) -> Option<BackendType> {
        let name = match column_type {
            ColumnType::VarChar => "VarChar",
            ColumnType::Int32 => "Integer",
            ColumnType::Double => "Double",
            ColumnType::DateTime => "DBDate",
            ColumnType::Char => "Char",
            // Text, not image.
            ColumnType::Blob | ColumnType::VarBinary => "Variant",
            ColumnType::Decimal => "Decimal",
            ColumnType::Bit => "Boolean",
            ColumnType::Guid => "Guid",
            ColumnType::Xml | ColumnType::Other(_) => return None,
        };
        Some(BackendType(name))
    }

    fn identity_clause(&self, _key_column: Option<&str>) -> Option<String> {
        Some(String::from(" SELECT SCOPE_IDENTITY()"))
    }

    fn duplicate_key_markers(&self) -> &'static [&'static str] {
        &["duplicate key", "duplicate values"]
    }

    fn function_table(&self) -> &'static [(FunctionName, &'static str)] {
        FUNCTIONS
    }

    fn if_null_function(&self) -> &'static str {
        "IsNULL"
    }

    fn current_date_function(&self) -> &'static str {
        "Now()"
    }

    fn format_date(&self, expr: &str, format: DateFormat) -> Option<String> {
        let pattern = match format {
            DateFormat::MmDdYyyy => "mm/dd/yyyy",
            DateFormat::MmDdYyyyHyphen => "mm-dd-yyyy",
            DateFormat::MonDYyyy => "mmm d yyyy",
            DateFormat::Native => return None,
        };
        Some(format!("FORMAT({expr}, \"{pattern}\")"))
    }

    fn quote_literal(&self, value: &str) -> String {
        format!("\"{value}\"")
    }

    fn string_to_date(&self, literal: &str) -> String {
        format!("#{literal}#")
    }

    fn to_date(&self, date_string: &str, _format: DateFormat) -> String {
        format!("'{date_string}'")
    }

    fn date_only(&self, column: &str) -> String {
        format!("CSTR({column})")
    }

    fn year_syntax(&self, date_string: &str) -> String {
        format!("FORMAT(#{date_string}#, \"yyyy\")")
    }

    fn convert_to_char(&self, column: &str) -> String {
        format!("CONVERT(varchar, {column})")
    }

    fn default_schema_query(&self) -> &'static str {
        "SELECT DATABASE()"
    }
}
