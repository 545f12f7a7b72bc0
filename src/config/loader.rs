// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{DailyConfig, RawDailyConfig};
use crate::errors::{DailyTaskError, Result};
use crate::fs::FileSystem;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "DAILY_TASKS_CONFIG";

/// Load a configuration file from a given path and return the raw
/// `RawDailyConfig`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawDailyConfig> {
    let contents = fs.read_to_string(path.as_ref())?;
    let config: RawDailyConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<DailyConfig> {
    let raw_config = load_from_path(fs, &path)?;
    let config = DailyConfig::try_from(raw_config)?;
    Ok(config)
}

/// Where the configuration should come from, and whether the caller asked
/// for that location explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub explicit: bool,
}

/// Resolve the config location from the value of [`CONFIG_PATH_ENV`].
///
/// A blank value counts as unset.
pub fn resolve_config_location(env_value: Option<String>) -> ConfigLocation {
    match env_value {
        Some(v) if !v.trim().is_empty() => ConfigLocation {
            path: PathBuf::from(v.trim()),
            explicit: true,
        },
        _ => ConfigLocation {
            path: default_config_path(),
            explicit: false,
        },
    }
}

/// Load the configuration for a [`ConfigLocation`].
///
/// - explicit location: the file must exist.
/// - default location: a missing file means built-in defaults.
pub fn load_config(fs: &dyn FileSystem, location: &ConfigLocation) -> Result<DailyConfig> {
    if !location.explicit && !fs.exists(&location.path) {
        debug!(path = ?location.path, "no config file found; using defaults");
        return DailyConfig::try_from(RawDailyConfig::default());
    }

    if !fs.is_file(&location.path) {
        let problem = if fs.exists(&location.path) {
            "is not a regular file"
        } else {
            "does not exist"
        };
        let origin = if location.explicit {
            format!(" (from {CONFIG_PATH_ENV})")
        } else {
            String::new()
        };
        return Err(DailyTaskError::ConfigError(format!(
            "config file {:?}{origin} {problem}",
            location.path
        )));
    }

    load_and_validate(fs, &location.path)
}

/// Resolve and load the configuration for this process.
pub fn load_for_process(fs: &dyn FileSystem) -> Result<DailyConfig> {
    let location = resolve_config_location(std::env::var(CONFIG_PATH_ENV).ok());
    load_config(fs, &location)
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("daily_tasks.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::types::{LogLevel, StepKind};

    #[test]
    fn blank_env_value_falls_back_to_default_path() {
        let loc = resolve_config_location(Some("  ".to_string()));
        assert_eq!(loc.path, default_config_path());
        assert!(!loc.explicit);

        let loc = resolve_config_location(Some("ops/daily.toml".to_string()));
        assert_eq!(loc.path, PathBuf::from("ops/daily.toml"));
        assert!(loc.explicit);
    }

    #[test]
    fn missing_default_file_yields_defaults() {
        let fs = MockFileSystem::new();
        let cfg = load_config(&fs, &resolve_config_location(None)).unwrap();
        assert_eq!(cfg.log.level, LogLevel::Info);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let fs = MockFileSystem::new();
        let loc = resolve_config_location(Some("missing.toml".to_string()));
        assert!(matches!(
            load_config(&fs, &loc),
            Err(DailyTaskError::ConfigError(_))
        ));
    }

    #[test]
    fn reads_partial_file_and_fills_defaults() {
        let fs = MockFileSystem::new().with_file(
            "daily_tasks.toml",
            r#"
[log]
level = "debug"

[steps.recommend]
cmd = "./recommend.sh"
workdir = "jobs"
"#,
        );

        let cfg = load_config(&fs, &resolve_config_location(None)).unwrap();
        assert_eq!(cfg.log.level, LogLevel::Debug);
        assert_eq!(cfg.log.file, PathBuf::from("daily_tasks.log"));
        assert_eq!(cfg.step(StepKind::Recommend).cmd, "./recommend.sh");
        assert_eq!(
            cfg.step(StepKind::Recommend).workdir,
            Some(PathBuf::from("jobs"))
        );
        assert_eq!(
            cfg.step(StepKind::Scrape).cmd,
            "python -m backend.python.scraper"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let fs = MockFileSystem::new().with_file("daily_tasks.toml", "[log]\nfiel = \"x.log\"\n");
        assert!(matches!(
            load_config(&fs, &resolve_config_location(None)),
            Err(DailyTaskError::TomlError(_))
        ));
    }
}
