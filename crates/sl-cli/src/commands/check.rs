//! Check command implementation

use anyhow::{Context, Result};
use sl_db::DuckDbBackend;
use sl_migrate::{open_and_check, Pending};

use crate::cli::{CheckArgs, GlobalArgs};
use crate::commands::common::{ExitCode, EXIT_PENDING};
use crate::context::RuntimeContext;

/// Execute the check command
///
/// Exits with code 3 when any migration is pending. Nothing is executed
/// against the store.
pub(crate) fn execute(args: &CheckArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let specs = ctx.migrations(&args.migration)?;

    ctx.verbose(&format!(
        "Checking {} migration(s) against {}",
        specs.len(),
        ctx.database
    ));

    let mut pending = 0;
    for spec in &specs {
        let found = open_and_check::<DuckDbBackend>(&ctx.database, spec)
            .with_context(|| format!("Failed to check {}", spec.target()))?;

        match found {
            Pending::Present(column) => println!("  • {} present as {}", spec.target(), column),
            Pending::Missing { statement } => {
                pending += 1;
                println!("  ○ {} pending: {}", spec.target(), statement);
            }
        }
    }

    println!();
    if pending > 0 {
        println!("{} of {} migration(s) pending", pending, specs.len());
        return Err(ExitCode(EXIT_PENDING).into());
    }
    println!("All {} migration(s) present", specs.len());
    Ok(())
}
