//! Single-row INSERT with same-round-trip identity retrieval.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::capability::{is_unassigned_key, Command, EntityStore, Transaction};
use crate::dialect::{Capability, Dialect};
use crate::error::{AdapterError, Result};
use crate::factory::ParameterFactory;
use crate::parameter::ParameterSet;
use crate::schema::TableColumn;

/// What an insert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The identity was generated by the backend and written to the entity.
    Identity(i64),
    /// The entity already had a key; the statement affected this many rows.
    RowsAffected(u64),
}

/// A rendered INSERT and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Statement text, including the identity clause when one is needed.
    pub sql: String,
    /// Parameters in placeholder order.
    pub params: ParameterSet,
    /// Whether the statement returns the generated identity.
    pub fetch_identity: bool,
}

/// Renders `INSERT INTO <table> (<columns>) VALUES (<placeholders>)`.
///
/// `params` must hold exactly one parameter per insertable column, in
/// column order, and no two parameters may share a name.
pub fn render_insert(
    dialect: &dyn Dialect,
    table: &str,
    columns: &[TableColumn],
    params: &ParameterSet,
) -> Result<String> {
    let insertable: Vec<&TableColumn> = columns.iter().filter(|c| c.insertable).collect();
    if insertable.is_empty() {
        return Err(AdapterError::NoInsertableColumns {
            table: table.to_string(),
        });
    }
    if insertable.len() != params.len() {
        return Err(AdapterError::ParameterCountMismatch {
            table: table.to_string(),
            expected: insertable.len(),
            actual: params.len(),
        });
    }

    let mut seen = HashSet::with_capacity(params.len());
    for param in params.iter() {
        if !seen.insert(param.name.as_str()) {
            return Err(AdapterError::DuplicateParameterName {
                table: table.to_string(),
                name: param.name.clone(),
            });
        }
    }

    let names: Vec<&str> = insertable.iter().map(|c| c.name.as_str()).collect();
    let placeholders: Vec<String> = params
        .iter()
        .enumerate()
        .map(|(i, p)| dialect.placeholder(&p.name, i))
        .collect();

    Ok(format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    ))
}

/// Inserts entities one row at a time.
#[derive(Debug, Clone, Copy)]
pub struct InsertExecutor<'a> {
    factory: ParameterFactory<'a>,
}

impl<'a> InsertExecutor<'a> {
    /// Creates an executor that builds parameters with `factory`.
    #[must_use]
    pub const fn new(factory: ParameterFactory<'a>) -> Self {
        Self { factory }
    }

    /// Builds the statement for `entity` without executing it.
    pub fn build<E: ?Sized>(
        &self,
        table: &str,
        entity: &E,
        columns: &[TableColumn],
        store: &dyn EntityStore<E>,
    ) -> Result<InsertStatement> {
        let dialect = self.factory.dialect();
        if !columns.iter().any(|c| c.insertable) {
            return Err(AdapterError::NoInsertableColumns {
                table: table.to_string(),
            });
        }

        let params = columns
            .iter()
            .filter(|c| c.insertable)
            .map(|c| self.factory.create_parameter(entity, c, store))
            .collect::<Result<ParameterSet>>()?;
        let mut sql = render_insert(dialect, table, columns, &params)?;

        let fetch_identity = is_unassigned_key(store.primary_key(entity));
        if fetch_identity {
            let key_column = columns.iter().find(|c| !c.insertable).map(|c| c.name.as_str());
            let clause = dialect.identity_clause(key_column).ok_or(
                AdapterError::UnsupportedOperation {
                    dialect: dialect.name(),
                    operation: Capability::IdentityFetch.operation(),
                },
            )?;
            sql.push_str(&clause);
        }

        Ok(InsertStatement {
            sql,
            params,
            fetch_identity,
        })
    }

    /// Inserts `entity` into `table`.
    ///
    /// When the entity's key is unassigned the generated identity is
    /// fetched by the same execution and written back through `store`.
    /// On any failure the session's transaction is rolled back once
    /// before the error is returned.
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
        match self.try_insert(session, table, entity, columns, store) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                if let Err(rollback_err) = session.rollback() {
                    warn!(
                        table = %table,
                        error = %rollback_err,
                        "Rollback after failed insert also failed"
                    );
                }
                Err(self.classify(table, err))
            }
        }
    }

    fn try_insert<E, S>(
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
        let statement = self.build(table, entity, columns, store)?;
        debug!(
            table = %table,
            sql = %statement.sql,
            params = ?statement.params.names(),
            "Executing insert"
        );

        if !statement.fetch_identity {
            let rows = session.execute(&statement.sql, &statement.params)?;
            return Ok(InsertOutcome::RowsAffected(rows));
        }

        let key = session
            .execute_scalar(&statement.sql, &statement.params)?
            .as_ref()
            .and_then(crate::value::SqlValue::as_i64)
            .ok_or_else(|| AdapterError::MissingIdentity {
                table: table.to_string(),
            })?;
        store.set_primary_key(entity, key);
        info!(table = %table, key, "Assigned generated identity");
        Ok(InsertOutcome::Identity(key))
    }

    fn classify(&self, table: &str, err: AdapterError) -> AdapterError {
        match err {
            AdapterError::Backend(err) if self.factory.dialect().is_duplicate_key(&err) => {
                AdapterError::DuplicateKey {
                    table: table.to_string(),
                    source: Box::new(err),
                }
            }
            AdapterError::Backend(err) => AdapterError::InsertFailed {
                table: table.to_string(),
                source: Box::new(err),
            },
            // Contract violations are reported as themselves.
            err @ (AdapterError::NoInsertableColumns { .. }
            | AdapterError::ParameterCountMismatch { .. }
            | AdapterError::DuplicateParameterName { .. }
            | AdapterError::UnsupportedOperation { .. }
            | AdapterError::MissingIdentity { .. }) => err,
            other => AdapterError::InsertFailed {
                table: table.to_string(),
                source: Box::new(other),
            },
        }
    }
}
