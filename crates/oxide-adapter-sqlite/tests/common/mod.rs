#![allow(dead_code)]

use oxide_adapter_core::{
    AdapterConfig, BoxError, ColumnType, Command, DatabaseAdapter, DialectRegistry, EntityStore,
    ParameterSet, SqlValue, TableColumn,
};
use oxide_adapter_sqlite::SqliteSession;

pub const CREATE_PEOPLE_SQL: &str = r"
CREATE TABLE people (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    age INTEGER,
    photo BLOB
)
";

#[derive(Debug, Clone, Default)]
pub struct Person {
    pub id: i64,
    pub email: String,
    pub age: Option<i32>,
    pub photo: Option<Vec<u8>>,
}

impl Person {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Self::default()
        }
    }
}

pub struct PersonStore;

impl EntityStore<Person> for PersonStore {
    fn extract(&self, entity: &Person, column: &str) -> Result<Option<SqlValue>, BoxError> {
        Ok(match column {
            "id" => Some(SqlValue::Int32(i32::try_from(entity.id)?)),
            "email" => Some(SqlValue::Text(entity.email.clone())),
            "age" => entity.age.map(SqlValue::Int32),
            "photo" => entity.photo.clone().map(SqlValue::Blob),
            other => return Err(format!("Person has no field {other}").into()),
        })
    }

    fn primary_key(&self, entity: &Person) -> i64 {
        entity.id
    }

    fn set_primary_key(&self, entity: &mut Person, key: i64) {
        entity.id = key;
    }
}

pub fn people_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("id", ColumnType::Int32).generated(),
        TableColumn::new("email", ColumnType::VarChar),
        TableColumn::new("age", ColumnType::Int32),
        TableColumn::new("photo", ColumnType::VarBinary),
    ]
}

pub fn adapter() -> DatabaseAdapter {
    DatabaseAdapter::new(
        &DialectRegistry::with_builtins(),
        AdapterConfig::new("sqlite", "sqlite::memory:"),
    )
    .unwrap()
}

pub fn people_session() -> SqliteSession {
    let mut session =
        SqliteSession::connect("sqlite::memory:").expect("Failed to open in-memory SQLite");
    session
        .execute(CREATE_PEOPLE_SQL, &ParameterSet::new())
        .expect("Failed to create people table");
    session
}

pub fn count_people(session: &mut SqliteSession) -> Option<SqlValue> {
    session
        .execute_scalar("SELECT COUNT(*) FROM people", &ParameterSet::new())
        .unwrap()
}
