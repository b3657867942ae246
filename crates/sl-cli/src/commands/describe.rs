//! Describe command implementation

use anyhow::{Context, Result};
use sl_core::TableName;
use sl_db::{DuckDbBackend, Store};

use crate::cli::{DescribeArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute the describe command
pub(crate) fn execute(args: &DescribeArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let table = TableName::parse(args.table.as_str()).context("Invalid table name")?;

    ctx.verbose(&format!("Describing {} in {}", table, ctx.database));
    let store = DuckDbBackend::open(&ctx.database)
        .with_context(|| format!("Failed to open {}", ctx.database))?;

    let schema = store.introspect(&table);
    let closed = store.close();
    let schema = schema.with_context(|| format!("Failed to describe {}", table))?;
    closed.context("Failed to close database")?;

    println!("{} ({} columns)", schema.table, schema.columns.len());
    for column in &schema.columns {
        println!("  {}", column);
    }
    Ok(())
}
