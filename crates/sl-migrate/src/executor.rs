//! The migration executor.
//!
//! A run is strictly linear: introspect, decide, apply or skip, close. Every
//! entry point takes ownership of the store handle and closes it exactly once,
//! whatever the outcome. Nothing is retried: a failed run is re-run from the
//! top, which re-introspects before acting.

use crate::error::{MigrationError, MigrationResult};
use crate::outcome::{Outcome, Pending};
use crate::report::RunReport;
use sl_core::MigrationSpec;
use sl_db::Store;
use std::time::Instant;

/// Run one migration against an open handle, then close the handle.
///
/// Issues at most one mutating statement. The column check follows the
/// store's case-insensitive identifier rules, so `Socials` counts as present
/// for a spec adding `socials`.
pub fn run<S: Store>(mut store: S, spec: &MigrationSpec) -> Outcome {
    let outcome = Outcome::from(apply(&mut store, spec));
    release(store, spec);
    outcome
}

/// Open the store at `location` and [`run`] the migration.
///
/// A failure to open is reported as [`MigrationError::ConnectionFailure`];
/// there is no handle to close in that case.
pub fn open_and_run<S: Store>(location: &str, spec: &MigrationSpec) -> Outcome {
    log::debug!("Opening store at {location}");
    match S::open(location) {
        Ok(store) => run(store, spec),
        Err(e) => Outcome::Failed(MigrationError::connection(location, e)),
    }
}

/// Introspect and decide without applying anything, then close the handle.
pub fn check<S: Store>(store: S, spec: &MigrationSpec) -> MigrationResult<Pending> {
    let result = inspect(&store, spec);
    release(store, spec);
    result
}

/// Open the store at `location` and [`check`] the migration.
pub fn open_and_check<S: Store>(location: &str, spec: &MigrationSpec) -> MigrationResult<Pending> {
    let store = S::open(location).map_err(|e| MigrationError::connection(location, e))?;
    check(store, spec)
}

/// Run several independent migrations in order, each on its own handle.
///
/// `observe` sees every report as soon as its run finishes. Stops after the
/// first failure; later specs are not attempted.
pub fn run_all<S: Store>(
    location: &str,
    specs: &[MigrationSpec],
    mut observe: impl FnMut(&RunReport),
) -> Vec<RunReport> {
    let mut reports = Vec::with_capacity(specs.len());

    for spec in specs {
        let start = Instant::now();
        let outcome = open_and_run::<S>(location, spec);
        let report = RunReport::new(spec, outcome, start.elapsed());
        observe(&report);

        let failed = !report.outcome.is_success();
        reports.push(report);
        if failed {
            log::debug!(
                "Stopping after failed migration; {} not attempted",
                specs.len() - reports.len()
            );
            break;
        }
    }

    reports
}

fn inspect<S: Store>(store: &S, spec: &MigrationSpec) -> MigrationResult<Pending> {
    let schema = store
        .introspect(&spec.table)
        .map_err(|e| MigrationError::introspection(spec.table.as_str(), e))?;

    match schema.find(&spec.column) {
        Some(column) => Ok(Pending::Present(column.clone())),
        None => Ok(Pending::Missing {
            statement: spec.statement(),
        }),
    }
}

fn apply<S: Store>(store: &mut S, spec: &MigrationSpec) -> MigrationResult<Outcome> {
    let statement = match inspect(store, spec)? {
        Pending::Present(column) => {
            log::debug!(
                "{} already present as {} on {}",
                spec.column,
                column,
                store.store_type()
            );
            return Ok(Outcome::AlreadyPresent);
        }
        Pending::Missing { statement } => statement,
    };

    log::debug!("Executing: {statement}");
    store
        .execute(&statement)
        .map_err(|e| MigrationError::apply(&statement, e))?;
    Ok(Outcome::Applied)
}

/// Close the handle. The outcome is already decided at this point: a
/// statement the store acknowledged stays applied even if the close fails.
fn release<S: Store>(store: S, spec: &MigrationSpec) {
    if let Err(e) = store.close() {
        log::warn!("Failed to close store after {}: {}", spec.target(), e);
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
