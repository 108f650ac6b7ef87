//! Decides whether an extracted value is sent as SQL NULL.
//!
//! # Sentinel compatibility mode
//!
//! Entities written for environments without nullable value types mark a
//! missing field by storing the type's minimum (or an empty string). In
//! [`NullPolicy::Sentinel`] those markers become NULL:
//!
//! | Column type          | Treated as NULL                 |
//! |----------------------|---------------------------------|
//! | `VarChar`, `Char`    | missing value or `""`           |
//! | `Int32`              | `i32::MIN`                      |
//! | `Double`             | `f64::MIN`                      |
//! | `DateTime`           | `NaiveDateTime::MIN`            |
//! | `Decimal`            | `Decimal::MIN`                  |
//! | `Blob`, `VarBinary`  | missing value only              |
//! | `Bit`                | missing value only              |
//!
//! This mode is lossy: a row can never store `i32::MIN`, `f64::MIN`,
//! `Decimal::MIN`, `NaiveDateTime::MIN` or an empty string as real data,
//! because those values are indistinguishable from "absent".

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::schema::ColumnType;
use crate::value::{ParamValue, SqlValue};

/// How absent values are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Only a missing value (`None`) is NULL.
    #[default]
    Explicit,
    /// Missing values and per-type sentinels are NULL. Lossy.
    Sentinel,
}

impl NullPolicy {
    /// Returns true when `value` must be sent as NULL for `column_type`.
    #[must_use]
    pub fn is_null(self, column_type: &ColumnType, value: Option<&SqlValue>) -> bool {
        match value {
            None => true,
            Some(value) => self == Self::Sentinel && is_sentinel(column_type, value),
        }
    }

    /// Classifies an extracted value into a parameter value.
    #[must_use]
    pub fn classify(self, column_type: &ColumnType, value: Option<SqlValue>) -> ParamValue {
        if self.is_null(column_type, value.as_ref()) {
            return ParamValue::Null;
        }
        value.map_or(ParamValue::Null, ParamValue::Value)
    }
}

/// Returns true when `value` is the documented sentinel for `column_type`.
#[must_use]
pub fn is_sentinel(column_type: &ColumnType, value: &SqlValue) -> bool {
    match (column_type, value) {
        (ColumnType::VarChar | ColumnType::Char, SqlValue::Text(s)) => s.is_empty(),
        (ColumnType::Int32, SqlValue::Int32(n)) => *n == i32::MIN,
        #[allow(clippy::float_cmp)]
        (ColumnType::Double, SqlValue::Double(f)) => *f == f64::MIN,
        (ColumnType::DateTime, SqlValue::DateTime(dt)) => *dt == NaiveDateTime::MIN,
        (ColumnType::Decimal, SqlValue::Decimal(d)) => *d == Decimal::MIN,
        _ => false,
    }
}
