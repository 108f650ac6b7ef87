//! Conversions between core values and sqlx's SQLite types.

use oxide_adapter_core::{BackendError, ErrorCode, ParamValue, Parameter, SqlValue};
use sqlx::error::ErrorKind;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, TypeInfo, ValueRef};

pub(crate) type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Binds a parameter. NULLs are bound untyped; SQLite has no typed NULL.
pub(crate) fn bind_param<'q>(
    query: SqliteQuery<'q>,
    param: &Parameter,
) -> Result<SqliteQuery<'q>, BackendError> {
    let value = match &param.value {
        ParamValue::Unset => {
            return Err(BackendError::new(format!(
                "parameter '{}' has no value bound",
                param.name
            )))
        }
        ParamValue::Null => return Ok(query.bind(Option::<String>::None)),
        ParamValue::Value(value) => value,
    };

    Ok(match value {
        SqlValue::Bool(b) => query.bind(*b),
        SqlValue::Int32(n) => query.bind(*n),
        SqlValue::Int64(n) => query.bind(*n),
        SqlValue::Double(f) => query.bind(*f),
        SqlValue::Decimal(d) => query.bind(d.to_string()),
        SqlValue::Text(s) => query.bind(s.clone()),
        SqlValue::DateTime(dt) => query.bind(*dt),
        SqlValue::Guid(u) => query.bind(u.to_string()),
        SqlValue::Blob(b) => query.bind(b.clone()),
    })
}

/// Decodes column `index` of `row` by the storage class of the value.
pub(crate) fn decode_value(
    row: &SqliteRow,
    index: usize,
) -> Result<Option<SqlValue>, BackendError> {
    let type_name = {
        let raw = row.try_get_raw(index).map_err(backend_error)?;
        if raw.is_null() {
            return Ok(None);
        }
        raw.type_info().name().to_ascii_uppercase()
    };

    let value = match type_name.as_str() {
        "INTEGER" | "INT" | "BIGINT" | "BOOLEAN" => {
            SqlValue::Int64(row.try_get(index).map_err(backend_error)?)
        }
        "REAL" | "FLOAT" | "DOUBLE" => SqlValue::Double(row.try_get(index).map_err(backend_error)?),
        "BLOB" => SqlValue::Blob(row.try_get(index).map_err(backend_error)?),
        _ => SqlValue::Text(row.try_get(index).map_err(backend_error)?),
    };
    Ok(Some(value))
}

/// Maps a sqlx error, keeping the constraint kind when SQLite reports one.
pub(crate) fn backend_error(err: sqlx::Error) -> BackendError {
    let code = match &err {
        sqlx::Error::Database(db) => Some(match db.kind() {
            ErrorKind::UniqueViolation => ErrorCode::UniqueViolation,
            ErrorKind::ForeignKeyViolation => ErrorCode::ForeignKeyViolation,
            ErrorKind::NotNullViolation => ErrorCode::NotNullViolation,
            _ => ErrorCode::Other,
        }),
        _ => None,
    };
    let error = BackendError::new(err.to_string());
    match code {
        Some(code) => error.with_code(code),
        None => error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_parameter_is_rejected() {
        let param = Parameter::default();
        let err = bind_param(sqlx::query("SELECT ?"), &param).err().unwrap();
        assert!(err.message.contains("no value bound"));
    }

    #[test]
    fn test_non_database_errors_have_no_code() {
        let err = backend_error(sqlx::Error::RowNotFound);
        assert_eq!(err.code, None);
    }
}
