//! Lookup table of dialects keyed by backend identifier.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Dialect, OleDbDialect, OracleDialect, PostgresDialect, SqlServerDialect, SqliteDialect};
use crate::error::{AdapterError, Result};

/// Maps backend identifiers (`"sqlserver"`, `"sqlite"`, ...) to dialects.
///
/// Identifiers are case-insensitive. A registry is an ordinary value:
/// build one, register custom backends on it, and hand it to
/// [`crate::DatabaseAdapter::new`].
#[derive(Debug, Clone, Default)]
pub struct DialectRegistry {
    dialects: HashMap<String, Arc<dyn Dialect>>,
}

impl DialectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in dialect.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(SqlServerDialect::new());
        registry.register(OleDbDialect::new());
        registry.register(OracleDialect::new());
        registry.register(PostgresDialect::new());
        registry.register(SqliteDialect::new());
        registry
    }

    /// Registers a dialect under its own name, replacing any previous entry.
    pub fn register<D: Dialect + 'static>(&mut self, dialect: D) {
        let id = dialect.name();
        self.register_as(id, Arc::new(dialect));
    }

    /// Registers a dialect under an explicit identifier (an alias such as
    /// `"mssql"`), replacing any previous entry.
    pub fn register_as(&mut self, id: &str, dialect: Arc<dyn Dialect>) {
        self.dialects.insert(id.to_ascii_lowercase(), dialect);
    }

    /// Looks up a dialect.
    pub fn get(&self, id: &str) -> Result<Arc<dyn Dialect>> {
        self.dialects
            .get(&id.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| AdapterError::UnknownDialect(id.to_string()))
    }

    /// Returns the registered identifiers, sorted.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.dialects.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
