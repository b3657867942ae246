//! Runtime context for CLI commands

use anyhow::{Context, Result};
use sl_core::{ColumnName, Config, MigrationSpec, SqlType, TableName};
use std::path::Path;

use crate::cli::{GlobalArgs, MigrationArgs};

/// Resolved configuration shared by every command
pub struct RuntimeContext {
    /// The loaded (or default) configuration
    pub config: Config,

    /// Database location after flag/env/target/config precedence
    pub database: String,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let config = match &args.config {
            Some(config_path) => {
                Config::load(Path::new(config_path)).context("Failed to load configuration file")?
            }
            None => Config::load_from_dir(Path::new(&args.project_dir))
                .context("Failed to load project configuration")?,
        };

        let target = Config::resolve_target(args.target.as_deref());
        let database = match &args.database {
            Some(path) => path.clone(),
            None => {
                config
                    .get_database_config(target.as_deref())
                    .context("Failed to resolve database target")?
                    .path
            }
        };
        log::debug!("Resolved database {database} (target: {target:?})");

        Ok(Self {
            config,
            database,
            verbose: args.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }

    /// Migrations to run: the one given by flags, else the configured list
    pub fn migrations(&self, args: &MigrationArgs) -> Result<Vec<MigrationSpec>> {
        match migration_from_args(args)? {
            Some(spec) => Ok(vec![spec]),
            None => Ok(self.config.effective_migrations()),
        }
    }
}

/// Build a spec from `--table/--column/--type/--default`, if given.
fn migration_from_args(args: &MigrationArgs) -> Result<Option<MigrationSpec>> {
    let (Some(table), Some(column)) = (&args.table, &args.column) else {
        return Ok(None);
    };

    let column_type = match &args.column_type {
        Some(ty) => SqlType::parse(ty.as_str()).context("Invalid --type")?,
        None => SqlType::text(),
    };
    let spec = MigrationSpec::add_column(
        TableName::parse(table.as_str()).context("Invalid --table")?,
        ColumnName::parse(column.as_str()).context("Invalid --column")?,
        column_type,
    );

    let spec = match &args.default {
        Some(expr) => spec
            .with_default(expr.as_str())
            .context("Invalid --default")?,
        None => spec,
    };
    Ok(Some(spec))
}
