//! DuckDB store implementation

use crate::error::{DbError, DbResult};
use crate::schema::{ColumnDescriptor, SchemaDescriptor};
use crate::traits::Store;
use duckdb::{params, Connection};
use sl_core::TableName;
use std::path::Path;

/// Location string that opens an in-memory database.
pub const IN_MEMORY: &str = ":memory:";

const TABLE_EXISTS_SQL: &str = "SELECT COUNT(*) FROM information_schema.tables \
     WHERE table_catalog = current_database() \
       AND lower(table_schema) = lower(?) \
       AND lower(table_name) = lower(?) \
       AND table_type <> 'VIEW'";

const COLUMNS_SQL: &str = "SELECT column_name, data_type, is_nullable, column_default \
     FROM information_schema.columns \
     WHERE table_catalog = current_database() \
       AND lower(table_schema) = lower(?) \
       AND lower(table_name) = lower(?) \
     ORDER BY ordinal_position";

/// DuckDB store handle.
///
/// Owns its connection outright: a handle belongs to one run, so no locking
/// is needed.
pub struct DuckDbBackend {
    conn: Connection,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create a new DuckDB connection from a file path, creating the file if needed
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == IN_MEMORY {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Execute multiple statements (fixtures, setup scripts)
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Count the rows a query returns
    pub fn query_count(&self, sql: &str) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
                row.get(0)
            })
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count as usize)
    }

    fn table_exists(&self, schema: &str, table: &str) -> DbResult<bool> {
        let count: i64 = self
            .conn
            .query_row(TABLE_EXISTS_SQL, params![schema, table], |row| row.get(0))
            .map_err(|e| DbError::IntrospectionError {
                table: format!("{schema}.{table}"),
                message: e.to_string(),
            })?;
        Ok(count > 0)
    }

    fn read_columns(&self, schema: &str, table: &str) -> duckdb::Result<Vec<ColumnDescriptor>> {
        let mut stmt = self.conn.prepare(COLUMNS_SQL)?;
        let rows = stmt.query_map(params![schema, table], |row| {
            let is_nullable: String = row.get(2)?;
            Ok(ColumnDescriptor {
                name: row.get(0)?,
                data_type: row.get(1)?,
                nullable: is_nullable.eq_ignore_ascii_case("YES"),
                default: row.get(3)?,
            })
        })?;
        let columns = rows.collect::<duckdb::Result<Vec<_>>>()?;
        Ok(columns)
    }
}

impl Store for DuckDbBackend {
    /// Open an existing database. Unlike [`DuckDbBackend::new`], a missing
    /// file is an error rather than a fresh empty database.
    fn open(location: &str) -> DbResult<Self> {
        if location != IN_MEMORY && !Path::new(location).is_file() {
            return Err(DbError::ConnectionError(format!(
                "database file not found: {location}"
            )));
        }
        Self::new(location)
    }

    fn introspect(&self, table: &TableName) -> DbResult<SchemaDescriptor> {
        let (schema, name) = table.parts();

        if !self.table_exists(schema, name)? {
            return Err(DbError::TableNotFound(table.to_string()));
        }

        let columns = self
            .read_columns(schema, name)
            .map_err(|e| DbError::IntrospectionError {
                table: table.to_string(),
                message: e.to_string(),
            })?;
        log::debug!("Introspected {}: {} columns", table, columns.len());

        Ok(SchemaDescriptor::new(table.clone(), columns))
    }

    fn execute(&mut self, sql: &str) -> DbResult<usize> {
        self.conn
            .execute(sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    fn close(self) -> DbResult<()> {
        self.conn
            .close()
            .map_err(|(_conn, e)| DbError::CloseError(e.to_string()))
    }

    fn store_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
