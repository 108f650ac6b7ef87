//! The adapter facade: one dialect, one configuration.

use std::sync::Arc;

use tracing::{debug, info};

use crate::blob::BlobReader;
use crate::capability::{Command, Connection, ConnectionState, EntityStore, Transaction};
use crate::config::AdapterConfig;
use crate::dialect::{Dialect, DialectRegistry};
use crate::error::{AdapterError, Result};
use crate::factory::ParameterFactory;
use crate::insert::{InsertExecutor, InsertOutcome};
use crate::schema::TableColumn;

/// Binds a configured dialect to the parameter factory, insert executor
/// and blob reader.
#[derive(Debug, Clone)]
pub struct DatabaseAdapter {
    dialect: Arc<dyn Dialect>,
    config: AdapterConfig,
}

impl DatabaseAdapter {
    /// Resolves `config.dialect` in `registry` and creates the adapter.
    pub fn new(registry: &DialectRegistry, config: AdapterConfig) -> Result<Self> {
        let dialect = registry.get(&config.dialect)?;
        debug!(
            dialect = dialect.name(),
            null_policy = ?config.null_policy,
            blob_chunk_size = config.blob_chunk_size,
            "Created database adapter"
        );
        Ok(Self { dialect, config })
    }

    /// Returns the dialect.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Returns a parameter factory for this adapter's dialect and policy.
    #[must_use]
    pub fn parameters(&self) -> ParameterFactory<'_> {
        ParameterFactory::new(self.dialect.as_ref(), self.config.null_policy)
    }

    /// Returns an insert executor.
    #[must_use]
    pub fn inserter(&self) -> InsertExecutor<'_> {
        InsertExecutor::new(self.parameters())
    }

    /// Inserts `entity` into `table`, qualified with the default schema.
    ///
    /// See [`InsertExecutor::insert`].
    pub fn insert<E, S>(
        &self,
        session: &mut S,
        table: &str,
        entity: &mut E,
        columns: &[TableColumn],
        store: &dyn EntityStore<E>,
    ) -> Result<InsertOutcome>
    where
        E: ?Sized,
        S: Command + Transaction + ?Sized,
    {
        let table = self.table_name(table);
        self.inserter().insert(session, &table, entity, columns, store)
    }

    /// Returns a blob reader using the configured chunk size.
    #[must_use]
    pub const fn blob_reader(&self) -> BlobReader {
        BlobReader::new(self.config.blob_chunk_size)
    }

    /// Qualifies `table` with the configured default schema.
    #[must_use]
    pub fn table_name(&self, table: &str) -> String {
        self.dialect
            .table_name(self.config.default_schema.as_deref(), table)
    }

    /// Opens `connection`, checks that it reached the open state, and
    /// closes it again.
    pub fn test_connection(&self, connection: &mut dyn Connection) -> Result<bool> {
        connection
            .open()
            .map_err(|source| AdapterError::ConnectionError { source })?;
        let open = connection.state() == ConnectionState::Open;
        connection
            .close()
            .map_err(|source| AdapterError::ConnectionError { source })?;
        info!(dialect = self.dialect.name(), open, "Tested connection");
        Ok(open)
    }
}
