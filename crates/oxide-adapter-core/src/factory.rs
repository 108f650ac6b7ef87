//! Builds typed, named parameters for a dialect.
//!
//! Every call site (INSERT, UPDATE, stored-procedure binding) goes
//! through a [`ParameterFactory`], so they all share one type mapping and
//! one definition of NULL.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::capability::EntityStore;
use crate::dialect::{Capability, Dialect};
use crate::error::{AdapterError, BoxError, Result};
use crate::null_policy::NullPolicy;
use crate::parameter::{BackendType, Direction, Parameter};
use crate::schema::{ColumnType, TableColumn};
use crate::value::SqlValue;

/// Creates parameters for one dialect under one null policy.
#[derive(Debug, Clone, Copy)]
pub struct ParameterFactory<'a> {
    dialect: &'a dyn Dialect,
    policy: NullPolicy,
}

impl<'a> ParameterFactory<'a> {
    /// Creates a factory.
    #[must_use]
    pub const fn new(dialect: &'a dyn Dialect, policy: NullPolicy) -> Self {
        Self { dialect, policy }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Returns the null policy.
    #[must_use]
    pub const fn policy(&self) -> NullPolicy {
        self.policy
    }

    /// Builds the parameter for `column` from the value the store extracts
    /// out of `entity`.
    ///
    /// Fails with [`AdapterError::UnsupportedType`] before touching the
    /// entity if the column type cannot be bound, and with
    /// [`AdapterError::ParameterCreationFailed`] if extraction fails or
    /// yields a value of the wrong type.
    pub fn create_parameter<E: ?Sized>(
        &self,
        entity: &E,
        column: &TableColumn,
        store: &dyn EntityStore<E>,
    ) -> Result<Parameter> {
        if !ColumnType::INSERTABLE.contains(&column.column_type) {
            return Err(unsupported(&column.column_type));
        }
        let backend_type = self.backend_type(&column.column_type)?;

        let extracted = store
            .extract(entity, &column.name)
            .map_err(|source| AdapterError::ParameterCreationFailed {
                column: column.name.clone(),
                source,
            })?;
        if let Some(value) = &extracted {
            check_value_type(&column.column_type, value).map_err(|source| {
                AdapterError::ParameterCreationFailed {
                    column: column.name.clone(),
                    source,
                }
            })?;
        }

        let value = self.policy.classify(&column.column_type, extracted);
        Ok(self.base(&column.name, backend_type).with_value(value))
    }

    /// Creates a `VarChar` parameter.
    pub fn string_parameter(&self, column: &str, value: Option<&str>) -> Result<Parameter> {
        self.typed(column, &ColumnType::VarChar, value.map(text))
    }

    /// Creates an `Int32` parameter.
    pub fn int32_parameter(&self, column: &str, value: Option<i32>) -> Result<Parameter> {
        self.typed(column, &ColumnType::Int32, value.map(SqlValue::Int32))
    }

    /// Creates a `Double` parameter.
    pub fn double_parameter(&self, column: &str, value: Option<f64>) -> Result<Parameter> {
        self.typed(column, &ColumnType::Double, value.map(SqlValue::Double))
    }

    /// Creates a `DateTime` parameter.
    pub fn date_time_parameter(
        &self,
        column: &str,
        value: Option<NaiveDateTime>,
    ) -> Result<Parameter> {
        self.typed(column, &ColumnType::DateTime, value.map(SqlValue::DateTime))
    }

    /// Creates a sized `Char` parameter.
    pub fn char_parameter(
        &self,
        column: &str,
        value: Option<&str>,
        size: usize,
    ) -> Result<Parameter> {
        self.typed(column, &ColumnType::Char, value.map(text))
            .map(|p| p.with_size(size))
    }

    /// Creates a `Decimal` parameter.
    pub fn decimal_parameter(&self, column: &str, value: Option<Decimal>) -> Result<Parameter> {
        self.typed(column, &ColumnType::Decimal, value.map(SqlValue::Decimal))
    }

    /// Creates a `Bit` parameter.
    pub fn boolean_parameter(&self, column: &str, value: Option<bool>) -> Result<Parameter> {
        self.typed(column, &ColumnType::Bit, value.map(SqlValue::Bool))
    }

    /// Creates a GUID parameter. Requires [`Capability::GuidParameter`].
    pub fn guid_parameter(&self, column: &str, value: Option<Uuid>) -> Result<Parameter> {
        self.require(Capability::GuidParameter)?;
        self.typed(column, &ColumnType::Guid, value.map(SqlValue::Guid))
    }

    /// Creates a sized binary parameter. Requires [`Capability::BlobParameter`].
    pub fn blob_parameter(
        &self,
        column: &str,
        value: Option<Vec<u8>>,
        size: usize,
    ) -> Result<Parameter> {
        self.require(Capability::BlobParameter)?;
        self.typed(column, &ColumnType::VarBinary, value.map(SqlValue::Blob))
            .map(|p| p.with_size(size))
    }

    /// Creates an XML parameter. Requires [`Capability::XmlParameter`].
    pub fn xml_parameter(&self, column: &str, value: Option<&str>) -> Result<Parameter> {
        self.require(Capability::XmlParameter)?;
        self.typed(column, &ColumnType::Xml, value.map(text))
    }

    /// Creates an output parameter. The value is left unset.
    pub fn output_parameter(&self, name: &str, return_type: &ColumnType) -> Result<Parameter> {
        self.directional(name, return_type, Direction::Output)
    }

    /// Creates a return-value parameter. The value is left unset.
    pub fn return_parameter(&self, name: &str, return_type: &ColumnType) -> Result<Parameter> {
        self.directional(name, return_type, Direction::ReturnValue)
    }

    /// Creates a parameter with no name or type bound, for callers that
    /// configure it by hand.
    #[must_use]
    pub fn empty_parameter(&self) -> Parameter {
        Parameter::default()
    }

    fn directional(
        &self,
        name: &str,
        return_type: &ColumnType,
        direction: Direction,
    ) -> Result<Parameter> {
        self.require(Capability::OutputParameter)?;
        if !ColumnType::INSERTABLE.contains(return_type) {
            return Err(unsupported(return_type));
        }
        let backend_type = self.backend_type(return_type)?;
        Ok(self.base(name, backend_type).with_direction(direction))
    }

    fn typed(
        &self,
        column: &str,
        column_type: &ColumnType,
        value: Option<SqlValue>,
    ) -> Result<Parameter> {
        let backend_type = self.backend_type(column_type)?;
        let value = self.policy.classify(column_type, value);
        Ok(self.base(column, backend_type).with_value(value))
    }

    fn base(&self, column: &str, backend_type: BackendType) -> Parameter {
        Parameter::new(self.dialect.to_safe_param_name(column), column, backend_type)
    }

    fn backend_type(&self, column_type: &ColumnType) -> Result<BackendType> {
        self.dialect
            .backend_type(column_type)
            .ok_or_else(|| unsupported(column_type))
    }

    fn require(&self, capability: Capability) -> Result<()> {
        if self.dialect.supports(capability) {
            Ok(())
        } else {
            Err(AdapterError::UnsupportedOperation {
                dialect: self.dialect.name(),
                operation: capability.operation(),
            })
        }
    }
}

fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}

fn unsupported(column_type: &ColumnType) -> AdapterError {
    AdapterError::UnsupportedType {
        type_name: column_type.to_string(),
        allowed: ColumnType::insertable_names(),
    }
}

fn check_value_type(
    column_type: &ColumnType,
    value: &SqlValue,
) -> std::result::Result<(), BoxError> {
    let matches = matches!(
        (column_type, value),
        (ColumnType::VarChar | ColumnType::Char, SqlValue::Text(_))
            | (ColumnType::Int32, SqlValue::Int32(_))
            | (ColumnType::Double, SqlValue::Double(_))
            | (ColumnType::DateTime, SqlValue::DateTime(_))
            | (ColumnType::Decimal, SqlValue::Decimal(_))
            | (ColumnType::Blob, SqlValue::Text(_) | SqlValue::Blob(_))
            | (ColumnType::VarBinary, SqlValue::Blob(_))
            | (ColumnType::Bit, SqlValue::Bool(_))
    );
    if matches {
        Ok(())
    } else {
        Err(format!("cannot bind a {} value to a {column_type} column", value.kind()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{OleDbDialect, SqlServerDialect, SqliteDialect};
    use crate::value::ParamValue;

    #[test]
    fn test_typed_sentinels() {
        let dialect = OleDbDialect::new();
        let factory = ParameterFactory::new(&dialect, NullPolicy::Sentinel);

        assert!(factory.int32_parameter("qty", Some(i32::MIN)).unwrap().is_null());
        assert!(factory.double_parameter("price", Some(f64::MIN)).unwrap().is_null());
        assert!(factory.string_parameter("name", Some("")).unwrap().is_null());
        assert!(factory.string_parameter("name", None).unwrap().is_null());

        let p = factory.int32_parameter("qty", Some(0)).unwrap();
        assert_eq!(p.value, ParamValue::Value(SqlValue::Int32(0)));
        assert_eq!(p.backend_type, Some(BackendType("Integer")));
    }

    #[test]
    fn test_char_and_blob_sizes() {
        let dialect = OleDbDialect::new();
        let factory = ParameterFactory::new(&dialect, NullPolicy::Explicit);
        let p = factory.char_parameter("code", Some("AB"), 2).unwrap();
        assert_eq!(p.size, Some(2));
        let p = factory.blob_parameter("data", Some(vec![0, 1, 2]), 3).unwrap();
        assert_eq!(p.size, Some(3));
        assert_eq!(p.backend_type, Some(BackendType("Variant")));
    }

    #[test]
    fn test_output_and_return_parameters() {
        let dialect = OleDbDialect::new();
        let factory = ParameterFactory::new(&dialect, NullPolicy::Explicit);

        let out = factory.output_parameter("total", &ColumnType::Int32).unwrap();
        assert_eq!(out.direction, Direction::Output);
        assert_eq!(out.value, ParamValue::Unset);

        let ret = factory.return_parameter("rc", &ColumnType::Decimal).unwrap();
        assert_eq!(ret.direction, Direction::ReturnValue);
        assert_eq!(ret.backend_type, Some(BackendType("Decimal")));

        let err = factory.output_parameter("doc", &ColumnType::Xml).unwrap_err();
        assert!(matches!(err, AdapterError::UnsupportedType { .. }));
    }

    #[test]
    fn test_capability_checked_before_building() {
        let dialect = SqliteDialect::new();
        let factory = ParameterFactory::new(&dialect, NullPolicy::Explicit);

        let err = factory.guid_parameter("id", Some(Uuid::nil())).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::UnsupportedOperation { dialect: "sqlite", .. }
        ));
        assert!(factory.output_parameter("x", &ColumnType::Int32).is_err());
    }

    #[test]
    fn test_xml_parameter_requires_capability() {
        let dialect = SqlServerDialect::new();
        let factory = ParameterFactory::new(&dialect, NullPolicy::Explicit);
        let p = factory.xml_parameter("doc", Some("<a/>")).unwrap();
        assert_eq!(p.backend_type, Some(BackendType("Xml")));
        assert_eq!(p.value, ParamValue::Value(SqlValue::Text("<a/>".into())));
        assert!(factory.xml_parameter("doc", None).unwrap().is_null());

        let dialect = OleDbDialect::new();
        let factory = ParameterFactory::new(&dialect, NullPolicy::Explicit);
        let err = factory.xml_parameter("doc", Some("<a/>")).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::UnsupportedOperation { dialect: "oledb", operation: "XML parameters" }
        ));
    }

    #[test]
    fn test_empty_parameter() {
        let dialect = SqliteDialect::new();
        let factory = ParameterFactory::new(&dialect, NullPolicy::Explicit);
        let p = factory.empty_parameter();
        assert!(p.name.is_empty());
        assert_eq!(p.backend_type, None);
        assert_eq!(p.value, ParamValue::Unset);
    }

    #[test]
    fn test_safe_names() {
        let dialect = OleDbDialect::new();
        let factory = ParameterFactory::new(&dialect, NullPolicy::Explicit);
        let p = factory.string_parameter("first name", Some("Ada")).unwrap();
        assert_eq!(p.name, "first_name");
        assert_eq!(p.source_column, "first name");
    }

    #[test]
    fn test_value_type_check() {
        assert!(check_value_type(&ColumnType::Blob, &SqlValue::Text("x".into())).is_ok());
        assert!(check_value_type(&ColumnType::Int32, &SqlValue::Int64(1)).is_err());
    }
}
