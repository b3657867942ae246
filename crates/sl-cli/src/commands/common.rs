//! Shared helpers for CLI commands

use std::fmt;

/// Process exit code carried through `anyhow` so destructors still run.
///
/// Return `Err(ExitCode(N).into())` instead of calling `std::process::exit`.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) u8);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; never printed.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Exit code for `check` when at least one migration is pending.
pub(crate) const EXIT_PENDING: u8 = 3;
