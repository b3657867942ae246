use super::*;

#[test]
fn test_default_config_runs_builtin_migration() {
    let config = Config::default();
    assert_eq!(config.database.path, "app.duckdb");
    assert_eq!(
        config.effective_migrations(),
        vec![MigrationSpec::builtin()]
    );
}

#[test]
fn test_parse_empty_file() {
    let config = Config::parse("   \n", "schemalift.yml").unwrap();
    assert_eq!(config.database, DatabaseConfig::default());
    assert!(config.migrations.is_empty());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
database:
  path: "./warehouse.duckdb"
migrations:
  - table: users
    column: socials
    type: TEXT
  - table: crm.accounts
    column: tier
    type: VARCHAR(16)
    default: "'free'"
targets:
  prod:
    database:
      path: /var/lib/app/prod.duckdb
"#;
    let config = Config::parse(yaml, "schemalift.yml").unwrap();
    assert_eq!(config.database.path, "./warehouse.duckdb");
    assert_eq!(config.migrations.len(), 2);
    assert_eq!(config.migrations[1].default.as_deref(), Some("'free'"));
    assert_eq!(config.effective_migrations().len(), 2);
    assert_eq!(
        config.get_database_config(Some("prod")).unwrap().path,
        "/var/lib/app/prod.duckdb"
    );
}

#[test]
fn test_target_without_database_falls_back_to_base() {
    let yaml = r#"
database:
  path: base.duckdb
targets:
  dev: {}
"#;
    let config = Config::parse(yaml, "schemalift.yml").unwrap();
    assert_eq!(
        config.get_database_config(Some("dev")).unwrap().path,
        "base.duckdb"
    );
}

#[test]
fn test_unknown_target_lists_available() {
    let yaml = r#"
targets:
  prod: {}
  dev: {}
"#;
    let config = Config::parse(yaml, "schemalift.yml").unwrap();
    let err = config.get_database_config(Some("staging")).unwrap_err();
    assert!(err.to_string().contains("Available targets: dev, prod"));
}

#[test]
fn test_unknown_fields_rejected() {
    let err = Config::parse("datbase:\n  path: x.duckdb\n", "schemalift.yml").unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}

#[test]
fn test_duplicate_migration_rejected_case_insensitively() {
    let yaml = r#"
migrations:
  - table: users
    column: socials
    type: TEXT
  - table: USERS
    column: Socials
    type: VARCHAR
"#;
    let err = Config::parse(yaml, "schemalift.yml").unwrap_err();
    assert!(err.to_string().contains("listed more than once"));
}

#[test]
fn test_empty_database_path_rejected() {
    let err = Config::parse("database:\n  path: ''\n", "schemalift.yml").unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("schemalift.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_from_dir_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert!(config.migrations.is_empty());
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("schemalift.yml"),
        "database:\n  path: from_yml.duckdb\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("schemalift.yaml"),
        "database:\n  path: from_yaml.duckdb\n",
    )
    .unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.database.path, "from_yml.duckdb");
}

// These tests modify environment variables and must run serially
use serial_test::serial;

#[test]
#[serial]
fn test_resolve_target_cli_takes_precedence() {
    let original = std::env::var(TARGET_ENV_VAR).ok();
    std::env::set_var(TARGET_ENV_VAR, "staging");
    let result = Config::resolve_target(Some("prod"));
    assert_eq!(result, Some("prod".to_string()));
    match original {
        Some(v) => std::env::set_var(TARGET_ENV_VAR, v),
        None => std::env::remove_var(TARGET_ENV_VAR),
    }
}

#[test]
#[serial]
fn test_resolve_target_uses_env_var() {
    let original = std::env::var(TARGET_ENV_VAR).ok();
    std::env::set_var(TARGET_ENV_VAR, "staging");
    let result = Config::resolve_target(None);
    assert_eq!(result, Some("staging".to_string()));
    match original {
        Some(v) => std::env::set_var(TARGET_ENV_VAR, v),
        None => std::env::remove_var(TARGET_ENV_VAR),
    }
}

#[test]
#[serial]
fn test_resolve_target_none_when_not_set() {
    let original = std::env::var(TARGET_ENV_VAR).ok();
    std::env::remove_var(TARGET_ENV_VAR);
    assert_eq!(Config::resolve_target(None), None);
    if let Some(v) = original {
        std::env::set_var(TARGET_ENV_VAR, v);
    }
}
