// tests/config_loading.rs

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use scholarship_daily::config::{ConfigLocation, load_and_validate, load_config};
use scholarship_daily::errors::DailyTaskError;
use scholarship_daily::fs::RealFileSystem;
use scholarship_daily::types::{LogLevel, StepKind};

#[test]
fn full_config_file_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[log]
file = "logs/daily_tasks.log"
level = "warn"

[env]
file = "config/.env"
override = true

[steps.scrape]
cmd = "python -m backend.python.scraper --all-sources"
workdir = "backend"

[steps.recommend]
cmd = "python recommend_scholarships.py"
"#
    )
    .unwrap();

    let cfg = load_and_validate(&RealFileSystem, file.path()).unwrap();

    assert_eq!(cfg.log.file, PathBuf::from("logs/daily_tasks.log"));
    assert_eq!(cfg.log.level, LogLevel::Warn);
    assert_eq!(cfg.env.file, PathBuf::from("config/.env"));
    assert!(cfg.env.override_existing);
    assert_eq!(
        cfg.step(StepKind::Scrape).workdir,
        Some(PathBuf::from("backend"))
    );
    assert_eq!(
        cfg.step(StepKind::Recommend).cmd,
        "python recommend_scholarships.py"
    );
}

#[test]
fn blank_command_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[steps.scrape]
cmd = ""
"#
    )
    .unwrap();

    match load_and_validate(&RealFileSystem, file.path()) {
        Err(DailyTaskError::ConfigError(msg)) => {
            assert!(msg.contains("[steps.scrape].cmd"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn invalid_log_level_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[log]\nlevel = \"chatty\"\n").unwrap();

    let result = load_and_validate(&RealFileSystem, file.path());
    assert!(matches!(result, Err(DailyTaskError::TomlError(_))));
}

#[test]
fn explicit_location_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let location = ConfigLocation {
        path: dir.path().join("daily_tasks.toml"),
        explicit: true,
    };

    match load_config(&RealFileSystem, &location) {
        Err(DailyTaskError::ConfigError(msg)) => {
            assert!(msg.contains("does not exist"));
            assert!(msg.contains("DAILY_TASKS_CONFIG"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn default_location_that_is_a_directory_does_not_blame_the_env_var() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily_tasks.toml");
    std::fs::create_dir(&path).unwrap();

    let location = ConfigLocation {
        path,
        explicit: false,
    };

    match load_config(&RealFileSystem, &location) {
        Err(DailyTaskError::ConfigError(msg)) => {
            assert!(msg.contains("is not a regular file"));
            assert!(!msg.contains("DAILY_TASKS_CONFIG"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}
