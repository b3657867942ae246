//! sl-migrate - Idempotent migration executor for Schemalift
//!
//! Runs one additive column change against one table: introspect, decide,
//! apply or skip, close. Re-running a migration that already succeeded is a
//! no-op that reports [`Outcome::AlreadyPresent`].

pub mod error;
pub mod executor;
pub mod outcome;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use error::{FailureKind, MigrationError, MigrationResult};
pub use executor::{check, open_and_check, open_and_run, run, run_all};
pub use outcome::{Outcome, Pending};
pub use report::{RunReport, RunSummary};
