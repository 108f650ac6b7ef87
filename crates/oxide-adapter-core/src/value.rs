//! Typed SQL values and parameter value states.
//!
//! [`SqlValue`] carries a genuine typed value. NULL is never a `SqlValue`;
//! a parameter that should be sent as NULL holds [`ParamValue::Null`]
//! instead, so every null still travels with its declared backend type.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A typed, non-null SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer value.
    Int32(i32),
    /// 64-bit integer value, typically a generated identity.
    Int64(i64),
    /// Double precision value.
    Double(f64),
    /// Fixed point value.
    Decimal(Decimal),
    /// Text value.
    Text(String),
    /// Date and time value.
    DateTime(NaiveDateTime),
    /// GUID value.
    Guid(Uuid),
    /// Binary value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns the variant name, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Double(_) => "double",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::DateTime(_) => "datetime",
            Self::Guid(_) => "guid",
            Self::Blob(_) => "blob",
        }
    }

    /// Returns the value as an integer key, if it holds one.
    ///
    /// Identity fetches come back as whatever numeric type the backend
    /// picks (`SCOPE_IDENTITY()` is a decimal on SQL Server), so integral
    /// decimals and doubles are accepted too.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int32(n) => Some(i64::from(*n)),
            Self::Int64(n) => Some(*n),
            Self::Decimal(d) if d.fract().is_zero() => d.to_i64(),
            #[allow(clippy::cast_possible_truncation)]
            Self::Double(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// The value slot of a parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamValue {
    /// No value bound. Only valid for output, return and empty parameters.
    #[default]
    Unset,
    /// Explicit SQL NULL.
    Null,
    /// A genuine typed value.
    Value(SqlValue),
}

impl ParamValue {
    /// Returns true for the explicit NULL marker.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the typed value, if one is bound.
    #[must_use]
    pub const fn as_value(&self) -> Option<&SqlValue> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}
