//! sl-db - Store abstraction layer for Schemalift
//!
//! This crate provides the narrow [`Store`] trait the migration executor
//! consumes (open, introspect, execute, close) and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod schema;
pub mod traits;

pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use schema::{ColumnDescriptor, SchemaDescriptor};
pub use traits::Store;
