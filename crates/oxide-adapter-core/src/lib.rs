//! # oxide-adapter-core
//!
//! Dialect-aware parameter marshalling, single-row INSERT with identity
//! retrieval, and chunked blob reads, for any relational backend that
//! implements a handful of small traits.
//!
//! This crate provides:
//! - `Dialect` implementations for SQL Server, OLE DB (Access), Oracle,
//!   PostgreSQL and SQLite, looked up through a `DialectRegistry`
//! - `ParameterFactory` for typed, named parameters with one definition
//!   of NULL (`NullPolicy`)
//! - `InsertExecutor` for INSERT plus identity fetch in one round trip
//! - `BlobReader` for streaming large binary columns in chunks
//! - `DatabaseAdapter` tying them to an `AdapterConfig`
//!
//! The crate performs no I/O itself. Backends implement `Connection`,
//! `Command`, `Transaction` and `ResultCursor`; applications implement
//! `EntityStore` for their entity types.
//!
//! ## Quick Start
//!
//! ```
//! use oxide_adapter_core::{AdapterConfig, DatabaseAdapter, Dialect, DialectRegistry};
//!
//! let registry = DialectRegistry::with_builtins();
//! let adapter = DatabaseAdapter::new(&registry, AdapterConfig::new("postgres", "")).unwrap();
//!
//! let dialect = adapter.dialect();
//! assert_eq!(dialect.placeholder("name", 0), "$1");
//! assert_eq!(dialect.if_null("nickname", "name"), "COALESCE(nickname, name)");
//!
//! let param = adapter.parameters().int32_parameter("age", Some(42)).unwrap();
//! assert!(!param.is_null());
//! ```
//!
//! ## Inserting
//!
//! ```ignore
//! let columns = vec![
//!     TableColumn::new("id", ColumnType::Int32).generated(),
//!     TableColumn::new("name", ColumnType::VarChar),
//! ];
//! // Writes the generated id back through the store.
//! adapter.insert(&mut session, "people", &mut person, &columns, &PersonStore)?;
//! ```

pub mod adapter;
pub mod blob;
pub mod capability;
pub mod config;
pub mod dialect;
pub mod error;
pub mod factory;
pub mod insert;
pub mod null_policy;
pub mod parameter;
pub mod schema;
pub mod value;

pub use adapter::DatabaseAdapter;
pub use blob::{BlobReadState, BlobReader, DEFAULT_CHUNK_SIZE};
pub use capability::{
    is_unassigned_key, AccessMode, Command, Connection, ConnectionState, EntityStore,
    ResultCursor, Transaction,
};
pub use config::AdapterConfig;
pub use dialect::{
    Capability, DateFormat, DatePart, Dialect, DialectRegistry, FunctionName, OleDbDialect,
    OracleDialect, PostgresDialect, SqlServerDialect, SqliteDialect,
};
pub use error::{AdapterError, BackendError, BoxError, ErrorCode, Result};
pub use factory::ParameterFactory;
pub use insert::{render_insert, InsertExecutor, InsertOutcome, InsertStatement};
pub use null_policy::{is_sentinel, NullPolicy};
pub use parameter::{BackendType, Direction, Parameter, ParameterSet};
pub use schema::{ColumnType, TableColumn};
pub use value::{ParamValue, SqlValue};
