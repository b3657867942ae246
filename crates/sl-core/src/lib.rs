//! sl-core - Core library for Schemalift
//!
//! This crate provides the shared types every other crate builds on: validated
//! table/column names, the [`MigrationSpec`] describing one additive column
//! change, configuration parsing for `schemalift.yml`, SQL quoting helpers, and
//! the persisted group-toggle state.

pub mod config;
pub mod error;
pub mod migration_spec;
mod newtype_string;
pub mod sql_type;
pub mod sql_utils;
pub mod table_name;
pub mod toggle;

pub use config::{Config, DatabaseConfig, TargetConfig};
pub use error::{CoreError, CoreResult};
pub use migration_spec::MigrationSpec;
pub use sql_type::SqlType;
pub use table_name::{ColumnName, TableName};
pub use toggle::{KeyValueStore, MemoryKeyValueStore, OpenGroups};
