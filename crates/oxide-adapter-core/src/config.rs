//! Adapter configuration.

use serde::Deserialize;

use crate::blob::DEFAULT_CHUNK_SIZE;
use crate::null_policy::NullPolicy;

/// Settings for a [`crate::DatabaseAdapter`].
///
/// Deserializable from any serde format; missing fields take their
/// defaults.
///
/// ```
/// use oxide_adapter_core::{AdapterConfig, NullPolicy};
///
/// let config = AdapterConfig::new("sqlite", "sqlite::memory:")
///     .with_null_policy(NullPolicy::Sentinel);
/// assert_eq!(config.blob_chunk_size, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Registry identifier of the dialect, e.g. `"sqlserver"`.
    pub dialect: String,
    /// Backend connection string, passed through untouched.
    pub connection_string: String,
    /// How NULL is recognized when building parameters.
    pub null_policy: NullPolicy,
    /// Bytes requested per blob chunk.
    pub blob_chunk_size: usize,
    /// Schema used to qualify table names, if any.
    pub default_schema: Option<String>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            dialect: String::from("sqlserver"),
            connection_string: String::new(),
            null_policy: NullPolicy::default(),
            blob_chunk_size: DEFAULT_CHUNK_SIZE,
            default_schema: None,
        }
    }
}

impl AdapterConfig {
    /// Creates a configuration for a dialect and connection string.
    #[must_use]
    pub fn new(dialect: impl Into<String>, connection_string: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
            connection_string: connection_string.into(),
            ..Self::default()
        }
    }

    /// Sets the null policy.
    #[must_use]
    pub const fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        self.null_policy = policy;
        self
    }

    /// Sets the blob chunk size.
    #[must_use]
    pub const fn with_blob_chunk_size(mut self, size: usize) -> Self {
        self.blob_chunk_size = size;
        self
    }

    /// Sets the default schema.
    #[must_use]
    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }
}
