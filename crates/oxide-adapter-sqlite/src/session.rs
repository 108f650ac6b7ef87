//! A blocking SQLite session.

use oxide_adapter_core::{
    AccessMode, BackendError, Command, Connection, ConnectionState, ParameterSet, SqlValue,
    Transaction,
};
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection as _;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, trace};

use crate::convert::{backend_error, bind_param, decode_value, SqliteQuery};
use crate::cursor::SqliteCursor;

/// One SQLite connection driven from synchronous code.
///
/// The session owns a current-thread tokio runtime and blocks on each
/// sqlx call, so it must not be used from inside an async context.
#[derive(Debug)]
pub struct SqliteSession {
    url: String,
    runtime: Runtime,
    conn: Option<SqliteConnection>,
    state: ConnectionState,
    in_transaction: bool,
}

impl SqliteSession {
    /// Creates a closed session for `url` (e.g. `sqlite::memory:`).
    pub fn new(url: impl Into<String>) -> Result<Self, BackendError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BackendError::new(format!("failed to start runtime: {e}")))?;
        Ok(Self {
            url: url.into(),
            runtime,
            conn: None,
            state: ConnectionState::Closed,
            in_transaction: false,
        })
    }

    /// Creates a session and opens it.
    pub fn connect(url: impl Into<String>) -> Result<Self, BackendError> {
        let mut session = Self::new(url)?;
        session.open()?;
        Ok(session)
    }

    /// Returns the connection string.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns true while a transaction started with [`begin`](Self::begin)
    /// is active.
    #[must_use]
    pub const fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    /// Starts a transaction.
    pub fn begin(&mut self) -> Result<(), BackendError> {
        self.raw("BEGIN")?;
        self.in_transaction = true;
        Ok(())
    }

    /// Commits the active transaction.
    pub fn commit(&mut self) -> Result<(), BackendError> {
        self.raw("COMMIT")?;
        self.in_transaction = false;
        Ok(())
    }

    /// Runs a query and returns its rows as a cursor opened in `mode`.
    pub fn query(
        &mut self,
        sql: &str,
        params: &ParameterSet,
        mode: AccessMode,
    ) -> Result<SqliteCursor, BackendError> {
        trace!(sql = %sql, "Running query");
        let query = bind_all(sql, params)?;
        let conn = connection(&mut self.conn)?;
        let rows = self
            .runtime
            .block_on(query.fetch_all(conn))
            .map_err(backend_error)?;
        SqliteCursor::from_rows(&rows, mode)
    }

    fn raw(&mut self, sql: &str) -> Result<(), BackendError> {
        let conn = connection(&mut self.conn)?;
        self.runtime
            .block_on(sqlx::query(sql).execute(conn))
            .map_err(backend_error)?;
        Ok(())
    }
}

fn connection(
    conn: &mut Option<SqliteConnection>,
) -> Result<&mut SqliteConnection, BackendError> {
    conn.as_mut()
        .ok_or_else(|| BackendError::new("connection is not open"))
}

fn bind_all<'q>(sql: &'q str, params: &ParameterSet) -> Result<SqliteQuery<'q>, BackendError> {
    params
        .iter()
        .try_fold(sqlx::query(sql), |query, param| bind_param(query, param))
}

impl Connection for SqliteSession {
    fn open(&mut self) -> Result<(), BackendError> {
        if self.conn.is_some() {
            return Ok(());
        }
        match self.runtime.block_on(SqliteConnection::connect(&self.url)) {
            Ok(conn) => {
                debug!(url = %self.url, "Opened SQLite connection");
                self.conn = Some(conn);
                self.state = ConnectionState::Open;
                Ok(())
            }
            Err(err) => {
                self.state = ConnectionState::Broken;
                Err(backend_error(err))
            }
        }
    }

    fn state(&self) -> ConnectionState {
        self.state
    }

    fn close(&mut self) -> Result<(), BackendError> {
        self.in_transaction = false;
        self.state = ConnectionState::Closed;
        if let Some(conn) = self.conn.take() {
            self.runtime.block_on(conn.close()).map_err(backend_error)?;
            debug!(url = %self.url, "Closed SQLite connection");
        }
        Ok(())
    }
}

impl Command for SqliteSession {
    fn execute(&mut self, sql: &str, params: &ParameterSet) -> Result<u64, BackendError> {
        let query = bind_all(sql, params)?;
        let conn = connection(&mut self.conn)?;
        let result = self
            .runtime
            .block_on(query.execute(conn))
            .map_err(backend_error)?;
        Ok(result.rows_affected())
    }

    fn execute_scalar(
        &mut self,
        sql: &str,
        params: &ParameterSet,
    ) -> Result<Option<SqlValue>, BackendError> {
        let query = bind_all(sql, params)?;
        let conn = connection(&mut self.conn)?;
        // Drain every row so the statement completes and autocommits.
        let rows = self
            .runtime
            .block_on(query.fetch_all(conn))
            .map_err(backend_error)?;
        match rows.first() {
            Some(row) if !sqlx::Row::is_empty(row) => decode_value(row, 0),
            _ => Ok(None),
        }
    }
}

impl Transaction for SqliteSession {
    fn rollback(&mut self) -> Result<(), BackendError> {
        if !self.in_transaction {
            return Ok(());
        }
        self.in_transaction = false;
        self.raw("ROLLBACK")?;
        debug!(url = %self.url, "Rolled back transaction");
        Ok(())
    }
}
