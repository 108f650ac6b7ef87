//! Chunked reads of large binary columns.
//!
//! A blob is pulled from the cursor in fixed-size chunks instead of in one
//! call, so drivers that stream large objects never have to materialize
//! them twice.
//!
//! The cursor must be opened with [`AccessMode::Sequential`]. Under that
//! mode columns of a row must be read in increasing ordinal order, each at
//! most once: read every column that precedes the blob before calling
//! [`BlobReader::read_blob`], and none of them after it.

use tracing::trace;

use crate::capability::{AccessMode, ResultCursor};
use crate::error::{AdapterError, BackendError, Result};

/// Default number of bytes requested per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Progress through one blob column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlobReadState {
    /// Ordinal of the column being read.
    pub column_ordinal: usize,
    /// Bytes copied so far.
    pub bytes_read: usize,
}

/// Reads blob columns from a sequential cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobReader {
    chunk_size: usize,
}

impl Default for BlobReader {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl BlobReader {
    /// Creates a reader that requests `chunk_size` bytes per call.
    /// A size of zero is treated as one.
    #[must_use]
    pub const fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: if chunk_size == 0 { 1 } else { chunk_size },
        }
    }

    /// Returns the chunk size.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Reads the whole value of `column` on the cursor's current row.
    ///
    /// The total length is probed first, then the value is copied in
    /// chunks of at most [`chunk_size`](Self::chunk_size) bytes, so a value
    /// of `n` bytes takes `ceil(n / chunk_size)` chunk reads. A short read
    /// ends the loop and the bytes received so far are returned.
    pub fn read_blob(&self, cursor: &mut dyn ResultCursor, column: &str) -> Result<Vec<u8>> {
        if cursor.access_mode() != AccessMode::Sequential {
            return Err(AdapterError::SequentialAccessRequired {
                column: column.to_string(),
            });
        }

        let failed = |source: BackendError| AdapterError::BlobReadFailed {
            column: column.to_string(),
            source,
        };

        let ordinal = cursor.ordinal(column).map_err(failed)?;
        let total = cursor.get_bytes(ordinal, 0, None, 0, 0).map_err(failed)?;
        let too_large =
            || failed(BackendError::new(format!("blob of {total} bytes does not fit in memory")));
        let total = usize::try_from(total).map_err(|_| too_large())?;

        let mut buffer = Vec::new();
        buffer.try_reserve_exact(total).map_err(|_| too_large())?;
        buffer.resize(total, 0_u8);
        let mut state = BlobReadState {
            column_ordinal: ordinal,
            bytes_read: 0,
        };

        while state.bytes_read < total {
            let wanted = self.chunk_size.min(total - state.bytes_read);
            let copied = cursor
                .get_bytes(
                    state.column_ordinal,
                    state.bytes_read as u64,
                    Some(buffer.as_mut_slice()),
                    state.bytes_read,
                    wanted,
                )
                .map_err(failed)?;
            let copied = usize::try_from(copied).map_or(wanted, |n| n.min(wanted));
            state.bytes_read += copied;
            trace!(
                column = %column,
                ordinal = state.column_ordinal,
                copied,
                bytes_read = state.bytes_read,
                total,
                "Read blob chunk"
            );
            if copied < wanted {
                break;
            }
        }

        buffer.truncate(state.bytes_read);
        Ok(buffer)
    }

    /// Reads `column` as a blob and decodes it as ASCII text.
    ///
    /// Bytes outside the ASCII range decode to `?`.
    pub fn read_string_from_blob(
        &self,
        cursor: &mut dyn ResultCursor,
        column: &str,
    ) -> Result<String> {
        let bytes = self.read_blob(cursor, column)?;
        Ok(bytes
            .into_iter()
            .map(|b| if b.is_ascii() { char::from(b) } else { '?' })
            .collect())
    }
}
