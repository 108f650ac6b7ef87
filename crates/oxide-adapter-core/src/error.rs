//! Error types for the adapter core.

use thiserror::Error;

/// Boxed error used to carry an arbitrary underlying cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Structured error classification a backend may attach to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A unique or primary key constraint was violated.
    UniqueViolation,
    /// A foreign key constraint was violated.
    ForeignKeyViolation,
    /// A NOT NULL constraint was violated.
    NotNullViolation,
    /// Any other constraint or engine failure.
    Other,
}

/// Error reported by a capability implementation (connection, command,
/// transaction, cursor or entity store).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    /// Backend error text.
    pub message: String,
    /// Structured code, when the backend exposes one.
    pub code: Option<ErrorCode>,
}

impl BackendError {
    /// Creates an error carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Attaches a structured error code.
    #[must_use]
    pub const fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }
}

/// Errors produced by the adapter core.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The column or return type has no mapping in this code path.
    #[error("data type {type_name} is not supported; supported types are: {allowed}")]
    UnsupportedType {
        /// The rejected type.
        type_name: String,
        /// Comma separated list of supported types.
        allowed: String,
    },

    /// Building a parameter from an entity field failed.
    #[error("error creating parameter for column '{column}'")]
    ParameterCreationFailed {
        /// Column being extracted.
        column: String,
        /// Underlying cause.
        #[source]
        source: BoxError,
    },

    /// A blob read was attempted on a cursor not opened for sequential access.
    #[error("column '{column}' can only be read as a blob from a sequential-access cursor")]
    SequentialAccessRequired {
        /// Column that was requested.
        column: String,
    },

    /// The backend reported a uniqueness violation during an insert.
    #[error("duplicate key inserting into '{table}'")]
    DuplicateKey {
        /// Target table.
        table: String,
        /// Underlying cause.
        #[source]
        source: BoxError,
    },

    /// Any other insert failure.
    #[error("failed to add record to '{table}'")]
    InsertFailed {
        /// Target table.
        table: String,
        /// Underlying cause.
        #[source]
        source: BoxError,
    },

    /// Opening or testing a connection failed.
    #[error("could not open connection, check the connection string")]
    ConnectionError {
        /// Underlying cause.
        #[source]
        source: BackendError,
    },

    /// An INSERT was requested for a table with no insertable columns.
    #[error("table '{table}' has no insertable columns")]
    NoInsertableColumns {
        /// Target table.
        table: String,
    },

    /// The parameter set does not line up with the insertable columns.
    #[error("expected {expected} parameters for '{table}', got {actual}")]
    ParameterCountMismatch {
        /// Target table.
        table: String,
        /// Number of insertable columns.
        expected: usize,
        /// Number of parameters built.
        actual: usize,
    },

    /// The dialect does not provide an optional operation.
    #[error("dialect '{dialect}' does not support {operation}")]
    UnsupportedOperation {
        /// Dialect name.
        dialect: &'static str,
        /// Operation that was requested.
        operation: &'static str,
    },

    /// No dialect is registered under the requested identifier.
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),

    /// Two insertable columns map to the same parameter name.
    #[error("columns of '{table}' share the parameter name '{name}'")]
    DuplicateParameterName {
        /// Target table.
        table: String,
        /// The colliding parameter name.
        name: String,
    },

    /// The identity fetch did not return an integer.
    #[error("insert into '{table}' did not return a generated identity")]
    MissingIdentity {
        /// Target table.
        table: String,
    },

    /// The cursor failed while streaming a large object.
    #[error("failed to read blob column '{column}'")]
    BlobReadFailed {
        /// Column being read.
        column: String,
        /// Underlying cause.
        #[source]
        source: BackendError,
    },

    /// Any other capability failure.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl AdapterError {
    /// Returns the structured backend error code behind this error, if any.
    #[must_use]
    pub fn backend_code(&self) -> Option<ErrorCode> {
        match self {
            Self::DuplicateKey { source, .. } | Self::InsertFailed { source, .. } => source
                .downcast_ref::<BackendError>()
                .and_then(|err| err.code),
            Self::ConnectionError { source } | Self::BlobReadFailed { source, .. } => source.code,
            Self::Backend(err) => err.code,
            _ => None,
        }
    }
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;
