//! Store trait definition

use crate::error::DbResult;
use crate::schema::SchemaDescriptor;
use sl_core::TableName;

/// The narrow interface the migration executor needs from a database.
///
/// A value of an implementing type is an exclusive handle: it is opened once,
/// used by a single run, and consumed by [`close`](Store::close), so a handle
/// can be closed at most once and never used afterwards.
pub trait Store: Sized {
    /// Open a handle on an existing database. `":memory:"` conventionally
    /// means a throwaway database; any other location that does not exist
    /// is a [`DbError::ConnectionError`](crate::DbError::ConnectionError).
    fn open(location: &str) -> DbResult<Self>;

    /// Read the column list of `table` without mutating anything.
    ///
    /// Returns [`DbError::TableNotFound`](crate::DbError::TableNotFound) when
    /// the table does not exist.
    fn introspect(&self, table: &TableName) -> DbResult<SchemaDescriptor>;

    /// Execute one statement, returning the affected row count.
    fn execute(&mut self, sql: &str) -> DbResult<usize>;

    /// Release the handle.
    fn close(self) -> DbResult<()>;

    /// Store type identifier for logging
    fn store_type(&self) -> &'static str;
}
