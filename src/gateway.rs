//! Ownership of the single store connection.
//!
//! A [`Store`] is opened once at startup and lent to every operation.  All statements go through
//! [`Store::query`] or [`Store::query_returning`] with positional parameters; nothing is ever
//! formatted into SQL text.

use std::path::Path;

use rusqlite::{Connection, Params, Row};

use crate::config::Config;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Fixed three-table schema, applied idempotently on open.
const SCHEMA_SQL: &str = include_str!("../db/schema.sql");

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database named by `config` and make sure the schema exists.
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_path(&config.database)
    }

    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| GatewayError::Open {
            location: path.display().to_string(),
            source,
        })?;

        let store = Self::init(conn)?;
        tracing::info!(path = %path.display(), "store opened");
        Ok(store)
    }

    /// Open a private in-memory database.  Mostly useful for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| GatewayError::Open {
            location: String::from(":memory:"),
            source,
        })?;

        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(GatewayError::Schema)?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(GatewayError::Schema)?;

        Ok(Store { conn })
    }

    /// Run a read statement and map every returned row, in store order.
    pub fn query<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        tracing::debug!(sql = %compact(sql), "query");

        let mut statement = self.conn.prepare(sql).map_err(GatewayError::Query)?;
        let rows = statement
            .query_map(params, map)
            .map_err(GatewayError::Query)?
            .collect::<rusqlite::Result<Vec<T>>>()
            .map_err(GatewayError::Query)?;

        Ok(rows)
    }

    /// Run a write statement carrying a `RETURNING` clause and map the written row.  A statement
    /// that writes nothing is an error.
    pub fn query_returning<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<T>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        tracing::debug!(sql = %compact(sql), "write");

        self.conn
            .query_row(sql, params, map)
            .map_err(GatewayError::Query)
    }

    /// Release the connection.  Consumes the store, so it can only happen once.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, source)| GatewayError::Close(source))?;

        tracing::info!("store closed");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql).map_err(GatewayError::Query)
    }
}

/// Collapse a multi-line statement onto one line for logging.
fn compact(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("could not open database {location}: {source}")]
    Open {
        location: String,
        source: rusqlite::Error,
    },

    #[error("could not apply schema: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("statement failed: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("could not close database: {0}")]
    Close(#[source] rusqlite::Error),
}
