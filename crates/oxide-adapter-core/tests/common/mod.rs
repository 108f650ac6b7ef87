#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use oxide_adapter_core::{
    AccessMode, BackendError, BoxError, Command, ColumnType, EntityStore, ParameterSet,
    ResultCursor, SqlValue, TableColumn, Transaction,
};

/// An entity held as a field map plus an integer key.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub id: i64,
    pub fields: HashMap<String, SqlValue>,
}

impl Record {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            fields: HashMap::new(),
        }
    }

    pub fn with(mut self, column: &str, value: SqlValue) -> Self {
        self.fields.insert(column.to_string(), value);
        self
    }
}

/// Reads `Record` fields by name. Missing fields extract as `None`.
#[derive(Debug, Default)]
pub struct MapStore {
    /// Column whose extraction fails.
    pub broken_column: Option<String>,
    /// Number of extractions performed.
    pub extractions: Cell<usize>,
}

impl MapStore {
    pub fn broken(column: &str) -> Self {
        Self {
            broken_column: Some(column.to_string()),
            extractions: Cell::new(0),
        }
    }
}

impl EntityStore<Record> for MapStore {
    fn extract(&self, entity: &Record, column: &str) -> Result<Option<SqlValue>, BoxError> {
        self.extractions.set(self.extractions.get() + 1);
        if self.broken_column.as_deref() == Some(column) {
            return Err(format!("no accessor for {column}").into());
        }
        Ok(entity.fields.get(column).cloned())
    }

    fn primary_key(&self, entity: &Record) -> i64 {
        entity.id
    }

    fn set_primary_key(&self, entity: &mut Record, key: i64) {
        entity.id = key;
    }
}

/// A statement the session received.
#[derive(Debug, Clone)]
pub struct Executed {
    pub sql: String,
    pub params: ParameterSet,
    pub scalar: bool,
}

/// Records statements and rollbacks; fails on demand.
#[derive(Debug, Default)]
pub struct RecordingSession {
    pub executed: Vec<Executed>,
    pub scalar: Option<SqlValue>,
    pub failure: Option<BackendError>,
    pub rollback_failure: Option<BackendError>,
    pub rollbacks: usize,
}

impl RecordingSession {
    pub fn returning(scalar: SqlValue) -> Self {
        Self {
            scalar: Some(scalar),
            ..Self::default()
        }
    }

    pub fn failing(err: BackendError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    fn record(
        &mut self,
        sql: &str,
        params: &ParameterSet,
        scalar: bool,
    ) -> Result<(), BackendError> {
        self.executed.push(Executed {
            sql: sql.to_string(),
            params: params.clone(),
            scalar,
        });
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Command for RecordingSession {
    fn execute(&mut self, sql: &str, params: &ParameterSet) -> Result<u64, BackendError> {
        self.record(sql, params, false)?;
        Ok(1)
    }

    fn execute_scalar(
        &mut self,
        sql: &str,
        params: &ParameterSet,
    ) -> Result<Option<SqlValue>, BackendError> {
        self.record(sql, params, true)?;
        Ok(self.scalar.clone())
    }
}

impl Transaction for RecordingSession {
    fn rollback(&mut self) -> Result<(), BackendError> {
        self.rollbacks += 1;
        match &self.rollback_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// A single-row cursor over named binary columns that counts chunk reads.
#[derive(Debug)]
pub struct ChunkCursor {
    pub columns: Vec<(String, Vec<u8>)>,
    pub mode: AccessMode,
    pub chunk_reads: usize,
    pub requested: Vec<usize>,
}

impl ChunkCursor {
    pub fn sequential(column: &str, data: Vec<u8>) -> Self {
        Self {
            columns: vec![(column.to_string(), data)],
            mode: AccessMode::Sequential,
            chunk_reads: 0,
            requested: Vec::new(),
        }
    }

    pub fn random(column: &str, data: Vec<u8>) -> Self {
        Self {
            mode: AccessMode::Random,
            ..Self::sequential(column, data)
        }
    }
}

impl ResultCursor for ChunkCursor {
    fn read(&mut self) -> Result<bool, BackendError> {
        Ok(true)
    }

    fn ordinal(&self, column: &str) -> Result<usize, BackendError> {
        self.columns
            .iter()
            .position(|(name, _)| name == column)
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
        let data = &self.columns[ordinal].1;
        let Some(buffer) = buffer else {
            return Ok(data.len() as u64);
        };
        self.chunk_reads += 1;
        self.requested.push(count);
        let start = usize::try_from(field_offset).unwrap().min(data.len());
        let end = (start + count).min(data.len());
        let n = end - start;
        buffer[buffer_offset..buffer_offset + n].copy_from_slice(&data[start..end]);
        Ok(n as u64)
    }

    fn access_mode(&self) -> AccessMode {
        self.mode
    }
}

/// `id` (generated), `name` and `age`.
pub fn person_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("id", ColumnType::Int32).generated(),
        TableColumn::new("name", ColumnType::VarChar),
        TableColumn::new("age", ColumnType::Int32),
    ]
}

pub fn person(id: i64, name: &str, age: i32) -> Record {
    Record::new(id)
        .with("name", SqlValue::Text(name.to_string()))
        .with("age", SqlValue::Int32(age))
}

/// `len` bytes of a repeating pattern.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
