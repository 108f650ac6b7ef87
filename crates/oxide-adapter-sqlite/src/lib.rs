//! # oxide-adapter-sqlite
//!
//! SQLite backend for `oxide-adapter-core`, built on sqlx.
//!
//! [`SqliteSession`] implements the core's `Connection`, `Command` and
//! `Transaction` traits on a single sqlx connection, and
//! [`SqliteSession::query`] returns a [`SqliteCursor`] implementing
//! `ResultCursor`. Pair it with the `sqlite` dialect:
//!
//! - Placeholders are positional `?`, bound in column order.
//! - Generated identities come back through `RETURNING <key column>`
//!   (SQLite 3.35.0+).
//! - Uniqueness violations carry `ErrorCode::UniqueViolation`, so
//!   duplicate detection never relies on message text.
//!
//! ## Example
//!
//! ```rust
//! use oxide_adapter_core::{Command, ParameterSet, SqlValue};
//! use oxide_adapter_sqlite::SqliteSession;
//!
//! let mut session = SqliteSession::connect("sqlite::memory:").unwrap();
//! let one = session.execute_scalar("SELECT 1", &ParameterSet::new()).unwrap();
//! assert_eq!(one, Some(SqlValue::Int64(1)));
//! ```

mod convert;
mod cursor;
mod session;

pub use cursor::SqliteCursor;
pub use session::SqliteSession;
