//! Capabilities the core consumes from its collaborators.
//!
//! The core never talks to a driver directly. Backends implement these
//! traits; every method takes `&mut self`, so a connection or cursor is
//! used by one caller at a time.

use crate::error::{BackendError, BoxError};
use crate::parameter::ParameterSet;
use crate::value::SqlValue;

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not connected.
    #[default]
    Closed,
    /// Connected and idle.
    Open,
    /// The connection failed and must be reopened.
    Broken,
}

/// Opens and closes a backend connection.
pub trait Connection {
    /// Opens the connection.
    fn open(&mut self) -> Result<(), BackendError>;

    /// Returns the current state.
    fn state(&self) -> ConnectionState;

    /// Closes the connection.
    fn close(&mut self) -> Result<(), BackendError>;
}

/// Executes parameterized statements.
pub trait Command {
    /// Executes a statement that returns no rows. Returns rows affected.
    fn execute(&mut self, sql: &str, params: &ParameterSet) -> Result<u64, BackendError>;

    /// Executes a statement and returns the first column of the first row.
    fn execute_scalar(
        &mut self,
        sql: &str,
        params: &ParameterSet,
    ) -> Result<Option<SqlValue>, BackendError>;
}

/// The caller's active transaction.
///
/// The core only ever rolls back; begin and commit belong to the caller.
pub trait Transaction {
    /// Rolls back the active transaction. A no-op when none is active.
    fn rollback(&mut self) -> Result<(), BackendError>;
}

/// Cursor access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// Columns of the current row can be read in any order, any number of times.
    #[default]
    Random,
    /// Columns must be read once each, in increasing ordinal order.
    Sequential,
}

/// A forward-only result cursor.
pub trait ResultCursor {
    /// Advances to the next row. Returns false past the last row.
    fn read(&mut self) -> Result<bool, BackendError>;

    /// Returns the ordinal of a column by name.
    fn ordinal(&self, column: &str) -> Result<usize, BackendError>;

    /// Copies up to `count` bytes of a column, starting at `field_offset`,
    /// into `buffer[buffer_offset..]`. Returns the number of bytes copied.
    ///
    /// With `buffer` set to `None` nothing is copied and the total length
    /// of the column value is returned instead.
    fn get_bytes(
        &mut self,
        ordinal: usize,
        field_offset: u64,
        buffer: Option<&mut [u8]>,
        buffer_offset: usize,
        count: usize,
    ) -> Result<u64, BackendError>;

    /// Returns the mode the cursor was opened with.
    fn access_mode(&self) -> AccessMode;
}

/// Reads fields from, and assigns keys to, caller-owned entities.
pub trait EntityStore<E: ?Sized> {
    /// Extracts the value of `column` from `entity`. `None` means missing.
    fn extract(&self, entity: &E, column: &str) -> Result<Option<SqlValue>, BoxError>;

    /// Returns the entity's current primary key.
    fn primary_key(&self, entity: &E) -> i64;

    /// Writes a generated primary key back into the entity.
    fn set_primary_key(&self, entity: &mut E, key: i64);
}

/// Returns true when a primary key value means "not assigned yet".
#[must_use]
pub fn is_unassigned_key(key: i64) -> bool {
    key == 0 || key == i64::from(i32::MIN) || key == i64::MIN
}
