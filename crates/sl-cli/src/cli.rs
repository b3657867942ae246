//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Schemalift - idempotent add-column migrations for DuckDB
#[derive(Parser, Debug)]
#[command(name = "sl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute (default: apply)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory searched for schemalift.yml
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the database path (a DuckDB file or :memory:)
    #[arg(short, long, global = true, env = "SL_DATABASE")]
    pub database: Option<String>,

    /// Named target from the config file
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply every migration that is not already present
    Apply(ApplyArgs),

    /// Report which migrations are pending without changing anything
    Check(CheckArgs),

    /// Print a table's columns as the store reports them
    Describe(DescribeArgs),
}

/// A single migration given on the command line instead of the config file
#[derive(Args, Debug, Clone, Default)]
pub struct MigrationArgs {
    /// Target table (optionally schema-qualified)
    #[arg(long, requires = "column")]
    pub table: Option<String>,

    /// Column to add
    #[arg(long, requires = "table")]
    pub column: Option<String>,

    /// Declared column type [default: TEXT]
    #[arg(long = "type", requires = "table")]
    pub column_type: Option<String>,

    /// SQL default expression for the new column
    #[arg(long, requires = "table")]
    pub default: Option<String>,
}

/// Arguments for the apply command
#[derive(Args, Debug, Clone, Default)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub migration: MigrationArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub migration: MigrationArgs,
}

/// Arguments for the describe command
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Table to describe
    pub table: String,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable progress lines
    #[default]
    Text,
    /// JSON report
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
