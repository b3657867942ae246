//! Executor tests against the recording mock store and real DuckDB.

use super::*;
use crate::error::FailureKind;
use crate::test_utils::{Faults, MockDatabase, RecordingStore};
use sl_core::{ColumnName, SqlType, TableName};
use sl_db::DuckDbBackend;

fn users_without_socials() -> MockDatabase {
    MockDatabase::new().with_table("users", &[("id", "INTEGER"), ("name", "VARCHAR")])
}

fn socials() -> MigrationSpec {
    MigrationSpec::builtin()
}

// ── Mock store ─────────────────────────────────────────────────────────

#[test]
fn test_applies_missing_column() {
    let db = users_without_socials();

    let outcome = run(db.handle(), &socials());

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(
        db.column_names("users").unwrap(),
        vec!["id", "name", "socials"]
    );
    let log = db.log();
    assert_eq!(log.introspections, 1);
    assert_eq!(
        log.statements,
        vec![r#"ALTER TABLE "users" ADD COLUMN "socials" TEXT"#.to_string()]
    );
    assert_eq!(log.closes, 1);
}

#[test]
fn test_second_run_is_already_present() {
    let db = users_without_socials();

    let first = run(db.handle(), &socials());
    let after_first = db.column_names("users").unwrap();
    let second = run(db.handle(), &socials());

    assert_eq!(first, Outcome::Applied);
    assert_eq!(second, Outcome::AlreadyPresent);
    assert_eq!(db.column_names("users").unwrap(), after_first);
    assert_eq!(db.log().statements.len(), 1);
    assert_eq!(db.log().closes, 2);
}

#[test]
fn test_present_column_issues_no_statement() {
    let db = MockDatabase::new().with_table(
        "users",
        &[("id", "INTEGER"), ("socials", "JSON"), ("name", "VARCHAR")],
    );

    let outcome = run(db.handle(), &socials());

    assert_eq!(outcome, Outcome::AlreadyPresent);
    assert!(db.log().statements.is_empty());
    assert_eq!(db.log().closes, 1);
}

#[test]
fn test_present_column_matches_case_insensitively() {
    let db = MockDatabase::new().with_table("users", &[("id", "INTEGER"), ("SOCIALS", "TEXT")]);

    assert_eq!(run(db.handle(), &socials()), Outcome::AlreadyPresent);
    assert!(db.log().statements.is_empty());
}

#[test]
fn test_missing_table_is_target_missing() {
    let db = users_without_socials();
    let spec = MigrationSpec::add_column(
        TableName::new("ghosts"),
        ColumnName::new("socials"),
        SqlType::text(),
    );

    let outcome = run(db.handle(), &spec);

    assert_eq!(outcome.failure_kind(), Some(FailureKind::TargetMissing));
    assert!(outcome.error().unwrap().store_message().contains("ghosts"));
    assert!(db.log().statements.is_empty());
    assert_eq!(db.column_names("users").unwrap(), vec!["id", "name"]);
    assert_eq!(db.log().closes, 1);
}

#[test]
fn test_introspection_failure_is_reported_and_closed() {
    let db = users_without_socials().with_faults(Faults {
        introspect: Some("catalog unavailable".into()),
        ..Faults::default()
    });

    let outcome = run(db.handle(), &socials());

    assert_eq!(
        outcome.failure_kind(),
        Some(FailureKind::IntrospectionFailure)
    );
    assert!(outcome.to_string().contains("catalog unavailable"));
    assert!(db.log().statements.is_empty());
    assert_eq!(db.log().closes, 1);
}

#[test]
fn test_apply_failure_keeps_store_message() {
    let db = users_without_socials().with_faults(Faults {
        execute: Some("disk full".into()),
        ..Faults::default()
    });

    let outcome = run(db.handle(), &socials());

    let err = outcome.error().expect("run should fail");
    assert_eq!(err.kind(), FailureKind::ApplyFailure);
    assert!(err.store_message().contains("disk full"));
    assert_eq!(db.log().statements.len(), 1);
    assert_eq!(db.log().closes, 1);
    // a re-run re-checks state and tries again
    assert_eq!(db.column_names("users").unwrap(), vec!["id", "name"]);
}

#[test]
fn test_close_failure_does_not_change_outcome() {
    let db = users_without_socials().with_faults(Faults {
        close: Some("fsync failed".into()),
        ..Faults::default()
    });

    assert_eq!(run(db.handle(), &socials()), Outcome::Applied);
    assert_eq!(db.log().closes, 1);
}

#[test]
fn test_open_failure_is_connection_failure() {
    let db = users_without_socials()
        .with_faults(Faults {
            open: Some("permission denied".into()),
            ..Faults::default()
        })
        .register("mock://locked");

    let outcome = open_and_run::<RecordingStore>("mock://locked", &socials());

    assert_eq!(
        outcome.failure_kind(),
        Some(FailureKind::ConnectionFailure)
    );
    assert!(outcome.to_string().contains("permission denied"));
    assert_eq!(db.log().opens, 0);
    assert_eq!(db.log().closes, 0);
}

#[test]
fn test_open_and_run_closes_exactly_once() {
    let db = users_without_socials().register("mock://users");

    let outcome = open_and_run::<RecordingStore>("mock://users", &socials());

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(db.log().opens, 1);
    assert_eq!(db.log().closes, 1);
}

#[test]
fn test_check_reports_pending_statement_without_executing() {
    let db = users_without_socials();

    let pending = check(db.handle(), &socials()).unwrap();

    assert_eq!(
        pending,
        Pending::Missing {
            statement: socials().statement()
        }
    );
    assert!(pending.is_pending());
    assert!(db.log().statements.is_empty());
    assert_eq!(db.log().closes, 1);
}

#[test]
fn test_check_reports_existing_column() {
    let db = MockDatabase::new().with_table("users", &[("socials", "VARCHAR")]);

    match check(db.handle(), &socials()).unwrap() {
        Pending::Present(column) => assert_eq!(column.data_type, "VARCHAR"),
        other => panic!("expected Present, got {other:?}"),
    }
}

#[test]
fn test_check_missing_table_is_error() {
    let db = MockDatabase::new();
    let err = check(db.handle(), &socials()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::TargetMissing);
    assert_eq!(db.log().closes, 1);
}

#[test]
fn test_run_all_stops_after_first_failure() {
    let db = users_without_socials().register("mock://batch");
    let specs = vec![
        socials(),
        MigrationSpec::add_column(
            TableName::new("ghosts"),
            ColumnName::new("boo"),
            SqlType::text(),
        ),
        MigrationSpec::add_column(
            TableName::new("users"),
            ColumnName::new("bio"),
            SqlType::text(),
        ),
    ];

    let mut seen = Vec::new();
    let reports = run_all::<RecordingStore>("mock://batch", &specs, |r| seen.push(r.status));

    assert_eq!(seen, vec!["applied", "failed"]);
    assert_eq!(reports.len(), 2);
    assert_eq!(
        reports[1].failure_kind,
        Some(FailureKind::TargetMissing)
    );
    assert_eq!(
        db.column_names("users").unwrap(),
        vec!["id", "name", "socials"]
    );
    // one handle per attempted spec
    assert_eq!(db.log().opens, 2);
    assert_eq!(db.log().closes, 2);
}

// ── DuckDB ─────────────────────────────────────────────────────────────

fn duckdb_users(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("app.duckdb");
    let db = DuckDbBackend::new(path.to_str().unwrap()).unwrap();
    db.execute_batch(
        "CREATE TABLE users (id INTEGER, name VARCHAR);
         INSERT INTO users VALUES (1, 'Alice'), (2, 'Bob');",
    )
    .unwrap();
    db.close().unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_duckdb_scenario_apply_then_noop() {
    let dir = tempfile::tempdir().unwrap();
    let location = duckdb_users(&dir);

    let first = open_and_run::<DuckDbBackend>(&location, &socials());
    let second = open_and_run::<DuckDbBackend>(&location, &socials());

    assert_eq!(first, Outcome::Applied);
    assert_eq!(second, Outcome::AlreadyPresent);

    let db = DuckDbBackend::new(&location).unwrap();
    let schema = db.introspect(&TableName::new("users")).unwrap();
    assert_eq!(schema.column_names(), vec!["id", "name", "socials"]);
    let socials = schema.find("socials").unwrap();
    assert!(socials.nullable);
    assert!(socials.default.is_none());
    assert_eq!(
        db.query_count("SELECT * FROM users WHERE socials IS NULL")
            .unwrap(),
        2
    );
}

#[test]
fn test_duckdb_missing_table_leaves_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let location = duckdb_users(&dir);
    let spec = MigrationSpec::add_column(
        TableName::new("ghosts"),
        ColumnName::new("socials"),
        SqlType::text(),
    );

    let outcome = open_and_run::<DuckDbBackend>(&location, &spec);

    assert_eq!(outcome.failure_kind(), Some(FailureKind::TargetMissing));
    let db = DuckDbBackend::new(&location).unwrap();
    assert_eq!(
        db.introspect(&TableName::new("users"))
            .unwrap()
            .column_names(),
        vec!["id", "name"]
    );
}

#[test]
fn test_duckdb_default_fills_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let location = duckdb_users(&dir);
    let spec = MigrationSpec::add_column(
        TableName::new("users"),
        ColumnName::new("tier"),
        SqlType::parse("VARCHAR(16)").unwrap(),
    )
    .with_default("'free'")
    .unwrap();

    assert_eq!(open_and_run::<DuckDbBackend>(&location, &spec), Outcome::Applied);

    let db = DuckDbBackend::new(&location).unwrap();
    assert_eq!(
        db.query_count("SELECT * FROM users WHERE tier = 'free'")
            .unwrap(),
        2
    );
}

#[test]
fn test_duckdb_unopenable_location_is_connection_failure() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("no").join("such").join("dir.duckdb");

    let outcome = open_and_run::<DuckDbBackend>(location.to_str().unwrap(), &socials());

    assert_eq!(
        outcome.failure_kind(),
        Some(FailureKind::ConnectionFailure)
    );
}

#[test]
fn test_duckdb_missing_file_is_connection_failure_and_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("typo.duckdb");

    let outcome = open_and_run::<DuckDbBackend>(location.to_str().unwrap(), &socials());
    let checked = open_and_check::<DuckDbBackend>(location.to_str().unwrap(), &socials());

    assert_eq!(
        outcome.failure_kind(),
        Some(FailureKind::ConnectionFailure)
    );
    assert_eq!(checked.unwrap_err().kind(), FailureKind::ConnectionFailure);
    assert!(!location.exists());
}
