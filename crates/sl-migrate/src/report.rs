//! Per-run reports

use crate::error::FailureKind;
use crate::outcome::Outcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sl_core::MigrationSpec;
use std::time::Duration;

/// Result of a single migration run, shaped for display and JSON output
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Target table
    pub table: String,

    /// Column the migration adds
    pub column: String,

    /// Declared column type
    pub column_type: String,

    /// `applied`, `already_present` or `failed`
    pub status: &'static str,

    /// Failure class, when the run failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<FailureKind>,

    /// Error message, when the run failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Wall-clock time of the run in milliseconds
    pub duration_ms: u64,

    /// When the run finished
    pub finished_at: DateTime<Utc>,

    /// The outcome itself
    #[serde(skip)]
    pub outcome: Outcome,
}

impl RunReport {
    pub fn new(spec: &MigrationSpec, outcome: Outcome, duration: Duration) -> Self {
        Self {
            table: spec.table.to_string(),
            column: spec.column.to_string(),
            column_type: spec.column_type.to_string(),
            status: outcome.label(),
            failure_kind: outcome.failure_kind(),
            error: outcome.error().map(ToString::to_string),
            duration_ms: duration.as_millis() as u64,
            finished_at: Utc::now(),
            outcome,
        }
    }

    /// `table.column`
    pub fn target(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }
}

/// Aggregate counts across a batch of reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub applied: usize,
    pub already_present: usize,
    pub failed: usize,
    /// Specs never attempted because an earlier one failed
    pub skipped: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[RunReport], total_specs: usize) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match report.outcome {
                Outcome::Applied => summary.applied += 1,
                Outcome::AlreadyPresent => summary.already_present += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
        }
        summary.skipped = total_specs.saturating_sub(reports.len());
        summary
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
