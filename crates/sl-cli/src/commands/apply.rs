//! Apply command implementation

use anyhow::{bail, Result};
use serde::Serialize;
use sl_db::DuckDbBackend;
use sl_migrate::{run_all, Outcome, RunReport, RunSummary};

use crate::cli::{ApplyArgs, GlobalArgs, OutputFormat};
use crate::context::RuntimeContext;

/// JSON output for the apply command
#[derive(Serialize)]
struct ApplyOutput<'a> {
    database: &'a str,
    summary: RunSummary,
    reports: &'a [RunReport],
}

/// Execute the apply command
pub(crate) fn execute(args: &ApplyArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let specs = ctx.migrations(&args.migration)?;
    let json = args.output == OutputFormat::Json;

    ctx.verbose(&format!(
        "Applying {} migration(s) to {}",
        specs.len(),
        ctx.database
    ));
    if !json {
        println!("Applying {} migration(s) to {}\n", specs.len(), ctx.database);
    }

    let reports = run_all::<DuckDbBackend>(&ctx.database, &specs, |report| {
        if !json {
            print_report(report);
        }
    });
    let summary = RunSummary::from_reports(&reports, specs.len());

    if json {
        let output = ApplyOutput {
            database: &ctx.database,
            summary,
            reports: &reports,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        println!(
            "Completed: {} applied, {} already present, {} failed, {} skipped",
            summary.applied, summary.already_present, summary.failed, summary.skipped
        );
    }

    if let Some(failed) = reports.iter().find(|r| !r.outcome.is_success()) {
        let detail = failed.error.as_deref().unwrap_or("unknown error");
        bail!("Migration {} failed: {}", failed.target(), detail);
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    match &report.outcome {
        Outcome::Applied => println!(
            "  ✓ {} {} applied [{}ms]",
            report.target(),
            report.column_type,
            report.duration_ms
        ),
        Outcome::AlreadyPresent => println!(
            "  • {} already present [{}ms]",
            report.target(),
            report.duration_ms
        ),
        Outcome::Failed(err) => println!(
            "  ✗ {} failed ({}) [{}ms]",
            report.target(),
            err.kind(),
            report.duration_ms
        ),
    }
}
