//! SQL dialect support.
//!
//! Each backend renders the same logical operations (date formatting,
//! conditional expressions, built-in function names, identity retrieval)
//! with its own syntax. A [`Dialect`] is a stateless set of these
//! renderings plus the backend's wire-type table. Dialects are looked up
//! by identifier through a [`DialectRegistry`], so adding a backend never
//! touches caller code.
//!
//! No fragment escapes or validates its inputs: callers must only embed
//! column names and literals that are already safe.

mod oledb;
mod oracle;
mod postgres;
mod registry;
mod sqlite;
mod sqlserver;

pub use oledb::OleDbDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use registry::DialectRegistry;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::{BackendError, ErrorCode};
use crate::parameter::BackendType;
use crate::schema::ColumnType;

static UNSAFE_PARAM_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("Invalid parameter name regex"));

/// Date formats understood by the date rendering functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `MM/DD/YYYY`
    MmDdYyyy,
    /// `MM-DD-YYYY`
    MmDdYyyyHyphen,
    /// `Mon D YYYY`
    MonDYyyy,
    /// No formatting requested; expressions are returned unchanged.
    #[default]
    Native,
}

impl FromStr for DateFormat {
    type Err = std::convert::Infallible;

    /// Parses a format name. Unrecognized names map to [`DateFormat::Native`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "MM/DD/YYYY" | "MMDDYYYY" => Self::MmDdYyyy,
            "MM-DD-YYYY" | "MMDDYYYY_HYPHEN" => Self::MmDdYyyyHyphen,
            "MON D YYYY" | "MONDDYYYY" => Self::MonDYyyy,
            _ => Self::Native,
        })
    }
}

/// Date component extracted by [`Dialect::date_part`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    /// Day of month.
    Day,
    /// Month number.
    Month,
    /// Four digit year.
    Year,
}

/// Built-in functions with per-dialect names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionName {
    /// Substring / left-part extraction.
    Substring,
    /// Null coalescing.
    IsNull,
    /// Current date.
    CurrentDate,
    /// String concatenation operator.
    Concatenate,
}

impl FromStr for FunctionName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUBSTRING" => Ok(Self::Substring),
            "ISNULL" => Ok(Self::IsNull),
            "CURRENTDATE" => Ok(Self::CurrentDate),
            "CONCATENATE" => Ok(Self::Concatenate),
            _ => Err(()),
        }
    }
}

/// Optional operations a dialect may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// GUID-typed parameters.
    GuidParameter,
    /// Binary large object parameters.
    BlobParameter,
    /// XML-typed parameters.
    XmlParameter,
    /// Output and return-value parameters.
    OutputParameter,
    /// Retrieving a generated identity in the INSERT round trip.
    IdentityFetch,
}

impl Capability {
    /// Returns a human readable operation name.
    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::GuidParameter => "GUID parameters",
            Self::BlobParameter => "blob parameters",
            Self::XmlParameter => "XML parameters",
            Self::OutputParameter => "output parameters",
            Self::IdentityFetch => "identity retrieval on insert",
        }
    }
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the registry identifier of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the optional operations this dialect provides.
    fn capabilities(&self) -> &'static [Capability];

    /// Returns whether the dialect provides `capability`.
    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    // Parameters and wire types

    /// Maps a logical column type to the backend wire type.
    fn backend_type(&self, column_type: &ColumnType) -> Option<BackendType>;

    /// Returns the parameter prefix (e.g. `@`).
    fn parameter_connector(&self) -> &'static str {
        "@"
    }

    /// Renders the placeholder for the `index`-th (zero based) parameter.
    fn placeholder(&self, name: &str, _index: usize) -> String {
        format!("{}{name}", self.parameter_connector())
    }

    /// Turns a column name into a valid parameter name.
    fn to_safe_param_name(&self, column: &str) -> String {
        UNSAFE_PARAM_CHARS.replace_all(column, "_").into_owned()
    }

    /// Returns the LIKE wildcard.
    fn wildcard_character(&self) -> &'static str {
        "%"
    }

    // Insert support

    /// Clause appended to an INSERT so the same execution returns the
    /// generated identity of `key_column`, the table's generated column.
    /// `None` when the dialect cannot do this.
    fn identity_clause(&self, key_column: Option<&str>) -> Option<String>;

    /// Substrings of backend error text that indicate a duplicate key.
    fn duplicate_key_markers(&self) -> &'static [&'static str];

    /// Returns true when `err` reports a uniqueness violation.
    ///
    /// A structured [`ErrorCode`] wins; the message match only covers
    /// backends that report nothing but text.
    fn is_duplicate_key(&self, err: &BackendError) -> bool {
        match err.code {
            Some(ErrorCode::UniqueViolation) => true,
            Some(_) => false,
            None => self
                .duplicate_key_markers()
                .iter()
                .any(|marker| err.message.contains(marker)),
        }
    }

    // Function names

    /// Returns the dialect's (function, name) table.
    fn function_table(&self) -> &'static [(FunctionName, &'static str)];

    /// Returns the dialect name of a built-in function, or `""`.
    fn function_name(&self, function: FunctionName) -> &'static str {
        self.function_table()
            .iter()
            .find(|(f, _)| *f == function)
            .map_or("", |(_, name)| *name)
    }

    /// Looks up a built-in function by logical name. Unknown names
    /// return `""`, which callers treat as "not supported, omit".
    fn function_name_str(&self, logical_name: &str) -> &'static str {
        logical_name
            .parse::<FunctionName>()
            .map_or("", |f| self.function_name(f))
    }

    /// Returns the name of the null-coalescing function.
    fn if_null_function(&self) -> &'static str;

    /// Renders `if_null_function(column, fallback)`.
    fn if_null(&self, column: &str, fallback: &str) -> String {
        format!("{}({column}, {fallback})", self.if_null_function())
    }

    /// Returns the current date expression.
    fn current_date_function(&self) -> &'static str;

    // Dates

    /// Renders `expr` formatted as text, or `None` for [`DateFormat::Native`].
    fn format_date(&self, expr: &str, format: DateFormat) -> Option<String>;

    /// Quotes a textual literal for embedding.
    fn quote_literal(&self, value: &str) -> String {
        format!("'{value}'")
    }

    /// Formats a date column as text.
    fn date_to_string_for_column(&self, column: &str, format: DateFormat) -> String {
        self.format_date(column, format)
            .unwrap_or_else(|| column.to_string())
    }

    /// Formats a literal date value as text.
    fn date_to_string_for_value(&self, value: &str, format: DateFormat) -> String {
        self.format_date(&self.quote_literal(value), format)
            .unwrap_or_else(|| value.to_string())
    }

    /// Extracts a date component from `expr`.
    fn date_part(&self, expr: &str, _format: DateFormat, part: DatePart) -> String {
        match part {
            DatePart::Day => format!("DAY({expr})"),
            DatePart::Month => format!("MONTH({expr})"),
            DatePart::Year => format!("YEAR({expr})"),
        }
    }

    /// Converts a date string literal to a date expression.
    fn string_to_date(&self, literal: &str) -> String;

    /// Converts a date value to a date expression.
    fn string_to_date_value(&self, value: NaiveDateTime) -> String {
        self.string_to_date(&value.format("%m/%d/%Y %H:%M:%S").to_string())
    }

    /// Converts a date string to a date for range comparisons.
    fn to_date(&self, date_string: &str, _format: DateFormat) -> String {
        self.quote_literal(date_string)
    }

    /// Strips the time component of a date column.
    fn date_only(&self, column: &str) -> String;

    /// Renders the year of a date string.
    fn year_syntax(&self, date_string: &str) -> String;

    // Expressions

    /// Renders a conditional expression with a trailing alias.
    fn case_decode(
        &self,
        column: &str,
        match_value: &str,
        then_value: &str,
        else_value: &str,
        alias: &str,
    ) -> String {
        format!(
            "(CASE {column} WHEN {match_value} THEN {then_value} ELSE {else_value} END) {alias}"
        )
    }

    /// Converts any expression to text.
    fn convert_to_char(&self, column: &str) -> String {
        format!("CAST({column} AS VARCHAR(255))")
    }

    // Schema

    /// Qualifies a table name with a schema.
    fn table_name(&self, schema: Option<&str>, table: &str) -> String {
        match schema {
            Some(schema) if !schema.is_empty() => format!("{schema}.{table}"),
            _ => table.to_string(),
        }
    }

    /// Query returning the session's default schema.
    fn default_schema_query(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_format_from_str() {
        let parse = |s: &str| s.parse::<DateFormat>().ok();
        assert_eq!(parse("MM/DD/YYYY"), Some(DateFormat::MmDdYyyy));
        assert_eq!(parse("mm-dd-yyyy"), Some(DateFormat::MmDdYyyyHyphen));
        assert_eq!(parse("Mon D YYYY"), Some(DateFormat::MonDYyyy));
        assert_eq!(parse("YYYY.MM.DD"), Some(DateFormat::Native));
    }

    #[test]
    fn test_function_name_from_str() {
        assert_eq!("substring".parse::<FunctionName>(), Ok(FunctionName::Substring));
        assert_eq!("ISNULL".parse::<FunctionName>(), Ok(FunctionName::IsNull));
        assert!("COALESCE".parse::<FunctionName>().is_err());
    }

    #[test]
    fn test_safe_param_name() {
        let dialect = SqlServerDialect::new();
        assert_eq!(dialect.to_safe_param_name("first name"), "first_name");
        assert_eq!(dialect.to_safe_param_name("order#id"), "order_id");
        assert_eq!(dialect.to_safe_param_name("plain_col1"), "plain_col1");
    }

    #[test]
    fn test_structured_code_wins_over_text() {
        let dialect = SqlServerDialect::new();
        let coded = BackendError::new("constraint failed").with_code(ErrorCode::UniqueViolation);
        assert!(dialect.is_duplicate_key(&coded));

        let fk = BackendError::new("duplicate key in FK check")
            .with_code(ErrorCode::ForeignKeyViolation);
        assert!(!dialect.is_duplicate_key(&fk));

        let text = BackendError::new("Cannot insert duplicate key row in object 'dbo.users'");
        assert!(dialect.is_duplicate_key(&text));
    }
}
