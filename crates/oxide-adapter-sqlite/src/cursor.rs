//! A result cursor over rows fetched from SQLite.

use oxide_adapter_core::{AccessMode, BackendError, ResultCursor, SqlValue};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row};

use crate::convert::decode_value;

/// Rows of one query, decoded up front.
///
/// In [`AccessMode::Sequential`] the cursor enforces forward-only column
/// access within a row: once a column has been read, earlier ordinals
/// are rejected until the next [`read`](ResultCursor::read).
#[derive(Debug, Clone)]
pub struct SqliteCursor {
    columns: Vec<String>,
    rows: Vec<Vec<Option<SqlValue>>>,
    current: Option<usize>,
    last_ordinal: Option<usize>,
    mode: AccessMode,
}

impl SqliteCursor {
    pub(crate) fn from_rows(rows: &[SqliteRow], mode: AccessMode) -> Result<Self, BackendError> {
        let columns = rows
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        let rows = rows
            .iter()
            .map(|row| {
                (0..row.len())
                    .map(|i| decode_value(row, i))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            columns,
            rows,
            current: None,
            last_ordinal: None,
            mode,
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the query produced no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns column `ordinal` of the current row. `None` is SQL NULL.
    pub fn value(&mut self, ordinal: usize) -> Result<Option<&SqlValue>, BackendError> {
        self.advance_to(ordinal)?;
        let row = self.current_row()?;
        row.get(ordinal)
            .map(Option::as_ref)
            .ok_or_else(|| BackendError::new(format!("column ordinal {ordinal} out of range")))
    }

    fn current_row(&self) -> Result<&Vec<Option<SqlValue>>, BackendError> {
        self.current
            .and_then(|i| self.rows.get(i))
            .ok_or_else(|| BackendError::new("cursor is not positioned on a row"))
    }

    fn advance_to(&mut self, ordinal: usize) -> Result<(), BackendError> {
        if self.mode == AccessMode::Sequential {
            if let Some(last) = self.last_ordinal {
                if ordinal < last {
                    return Err(BackendError::new(format!(
                        "column {ordinal} already passed; sequential access is at column {last}"
                    )));
                }
            }
            self.last_ordinal = Some(ordinal);
        }
        Ok(())
    }
}

impl ResultCursor for SqliteCursor {
    fn read(&mut self) -> Result<bool, BackendError> {
        let next = self.current.map_or(0, |i| i + 1);
        self.last_ordinal = None;
        if next < self.rows.len() {
            self.current = Some(next);
            Ok(true)
        } else {
            self.current = Some(self.rows.len());
            Ok(false)
        }
    }

    fn ordinal(&self, column: &str) -> Result<usize, BackendError> {
        self.columns
            .iter()
            .position(|name| name.eq_ignore_ascii_case(column))
            .ok_or_else(|| BackendError::new(format!("no such column: {column}")))
    }

    fn get_bytes(
        &mut self,
        ordinal: usize,
        field_offset: u64,
        buffer: Option<&mut [u8]>,
        buffer_offset: usize,
        count: usize,
    ) -> Result<u64, BackendError> {
        self.advance_to(ordinal)?;
        let bytes: &[u8] = match self.current_row()?.get(ordinal) {
            None => {
                return Err(BackendError::new(format!(
                    "column ordinal {ordinal} out of range"
                )))
            }
            Some(None) => &[],
            Some(Some(SqlValue::Blob(b))) => b,
            Some(Some(SqlValue::Text(s))) => s.as_bytes(),
            Some(Some(other)) => {
                return Err(BackendError::new(format!(
                    "column {ordinal} holds a {} value, not bytes",
                    other.kind()
                )))
            }
        };

        let Some(buffer) = buffer else {
            return Ok(bytes.len() as u64);
        };
        if buffer_offset > buffer.len() {
            return Err(BackendError::new("buffer offset is past the end of the buffer"));
        }

        let start = usize::try_from(field_offset)
            .unwrap_or(usize::MAX)
            .min(bytes.len());
        let n = count
            .min(bytes.len() - start)
            .min(buffer.len() - buffer_offset);
        buffer[buffer_offset..buffer_offset + n].copy_from_slice(&bytes[start..start + n]);
        Ok(n as u64)
    }

    fn access_mode(&self) -> AccessMode {
        self.mode
    }
}
