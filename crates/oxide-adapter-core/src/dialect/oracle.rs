//! Oracle dialect.
//!
//! Oracle never converts date strings implicitly in comparisons, so every
//! date literal goes through `TO_DATE`. Conditional expressions use
//! `DECODE`. Identity retrieval is not offered: Oracle tables get their
//! keys from sequences the caller manages.

use super::{Capability, DateFormat, DatePart, Dialect, FunctionName};
use crate::parameter::BackendType;
use crate::schema::ColumnType;

/// Oracle dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleDialect;

impl OracleDialect {
    /// Creates a new Oracle dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

const FUNCTIONS: &[(FunctionName, &str)] = &[
    (FunctionName::Substring, "SUBSTR"),
    (FunctionName::IsNull, "NVL"),
    (FunctionName::CurrentDate, "SYSDATE"),
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

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn capabilities(&self) -> &'static [Capability] {
        &[
            Capability::BlobParameter,
            Capability::XmlParameter,
            Capability::OutputParameter,
        ]
    }

    fn backend_type(&self, column_type: &ColumnType) -> Option<BackendType> {
        let name = match column_type {
            ColumnType::VarChar => "Varchar2",
            ColumnType::Int32 => "Int32",
            ColumnType::Double => "Double",
            ColumnType::DateTime => "Date",
            ColumnType::Char => "Char",
            ColumnType::Blob => "Clob",
            ColumnType::VarBinary => "Blob",
            ColumnType::Decimal => "Decimal",
            ColumnType::Bit => "Int16",
            ColumnType::Xml => "XmlType",
            ColumnType::Guid | ColumnType::Other(_) => return None,
        };
        Some(BackendType(name))
    }

    fn parameter_connector(&self) -> &'static str {
        ":"
    }

    fn identity_clause(&self, _key_column: Option<&str>) -> Option<String> {
        None
    }

    fn duplicate_key_markers(&self) -> &'static [&'static str] {
        &["ORA-00001"]
    }

    fn function_table(&self) -> &'static [(FunctionName, &'static str)] {
        FUNCTIONS
    }

    fn if_null_function(&self) -> &'static str {
        "NVL"
    }

    fn current_date_function(&self) -> &'static str {
        "SYSDATE"
    }

    fn format_date(&self, expr: &str, format: DateFormat) -> Option<String> {
        pattern(format).map(|p| format!("TO_CHAR({expr}, '{p}')"))
    }

    fn date_part(&self, expr: &str, format: DateFormat, part: DatePart) -> String {
        let date = match pattern(format) {
            Some(p) => format!("TO_DATE({expr}, '{p}')"),
            None => expr.to_string(),
        };
        let field = match part {
            DatePart::Day => "DD",
            DatePart::Month => "MM",
            DatePart::Year => "YYYY",
        };
        format!("TO_NUMBER(TO_CHAR({date}, '{field}'))")
    }

    fn string_to_date(&self, literal: &str) -> String {
        format!("TO_DATE('{literal}', 'MM/DD/YYYY HH24:MI:SS')")
    }

    fn to_date(&self, date_string: &str, format: DateFormat) -> String {
        match pattern(format) {
            Some(p) => format!("TO_DATE('{date_string}', '{p}')"),
            None => format!("TO_DATE('{date_string}')"),
        }
    }

    fn date_only(&self, column: &str) -> String {
        format!("TRUNC({column})")
    }

    fn year_syntax(&self, date_string: &str) -> String {
        format!("TO_CHAR(TO_DATE('{date_string}', 'MM/DD/YYYY'), 'YYYY')")
    }

    fn case_decode(
        &self,
        column: &str,
        match_value: &str,
        then_value: &str,
        else_value: &str,
        alias: &str,
    ) -> String {
        format!("DECODE({column}, {match_value}, {then_value}, {else_value}) {alias}")
    }

    fn convert_to_char(&self, column: &str) -> String {
        format!("TO_CHAR({column})")
    }

    fn default_schema_query(&self) -> &'static str {
        "SELECT SYS_CONTEXT('USERENV', 'CURRENT_SCHEMA') FROM DUAL"
    }
}
