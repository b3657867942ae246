//! Configuration types and parsing for schemalift.yml

use crate::error::{CoreError, CoreResult};
use crate::migration_spec::MigrationSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// File names probed by [`Config::load_from_dir`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["schemalift.yml", "schemalift.yaml"];

const DEFAULT_DB_PATH: &str = "app.duckdb";

/// Environment variable consulted when no `--target` flag is given.
pub const TARGET_ENV_VAR: &str = "SL_TARGET";

/// Project configuration from schemalift.yml
///
/// Every field is optional; an absent file is equivalent to `Config::default()`,
/// which runs the built-in migration against `app.duckdb`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Migrations to run, in order. Empty means the built-in migration.
    #[serde(default)]
    pub migrations: Vec<MigrationSpec>,

    /// Named target configurations (e.g., dev, prod)
    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,
}

/// Target-specific configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Database configuration override
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (a DuckDB file, or `:memory:`)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse configuration from YAML text; `origin` names the source in errors.
    pub fn parse(content: &str, origin: &str) -> CoreResult<Self> {
        // An empty file deserializes to unit, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| CoreError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory.
    ///
    /// Looks for schemalift.yml or schemalift.yaml. A directory with neither
    /// yields the defaults: the config file is optional.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        log::debug!(
            "No config file in {}, using built-in defaults",
            dir.display()
        );
        Ok(Self::default())
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }

        for (idx, spec) in self.migrations.iter().enumerate() {
            spec.validate()?;
            let duplicate = self.migrations[..idx]
                .iter()
                .any(|prev| prev.table.matches(&spec.table) && prev.column.matches(&spec.column));
            if duplicate {
                return Err(CoreError::ConfigInvalid {
                    message: format!("migration {} is listed more than once", spec.target()),
                });
            }
        }
        Ok(())
    }

    /// The migrations to run: the configured list, or the built-in one.
    pub fn effective_migrations(&self) -> Vec<MigrationSpec> {
        if self.migrations.is_empty() {
            vec![MigrationSpec::builtin()]
        } else {
            self.migrations.clone()
        }
    }

    /// Get database configuration, optionally applying target overrides
    ///
    /// If target is specified and exists, uses target's database config.
    /// Otherwise, uses the base database config.
    pub fn get_database_config(&self, target: Option<&str>) -> CoreResult<DatabaseConfig> {
        match target {
            Some(name) => {
                let target_config =
                    self.targets
                        .get(name)
                        .ok_or_else(|| CoreError::ConfigInvalid {
                            message: format!(
                                "Target '{}' not found. Available targets: {}",
                                name,
                                self.available_targets().join(", ")
                            ),
                        })?;

                Ok(target_config
                    .database
                    .clone()
                    .unwrap_or_else(|| self.database.clone()))
            }
            None => Ok(self.database.clone()),
        }
    }

    /// Sorted list of target names
    pub fn available_targets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.targets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve target from CLI flag or SL_TARGET environment variable
    ///
    /// Priority: CLI flag > SL_TARGET env var > None
    pub fn resolve_target(cli_target: Option<&str>) -> Option<String> {
        cli_target
            .map(String::from)
            .or_else(|| std::env::var(TARGET_ENV_VAR).ok())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
