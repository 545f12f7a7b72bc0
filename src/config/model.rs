// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::{LogLevel, StepKind};

/// Top-level configuration as read from `daily_tasks.toml`.
///
/// ```toml
/// [log]
/// file = "daily_tasks.log"
/// level = "info"
///
/// [env]
/// file = ".env"
/// override = false
///
/// [steps.scrape]
/// cmd = "python -m backend.python.scraper"
///
/// [steps.recommend]
/// cmd = "python -m recommend_scholarships"
/// workdir = "backend"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDailyConfig {
    #[serde(default)]
    pub log: LogSection,

    #[serde(default)]
    pub env: EnvSection,

    #[serde(default)]
    pub steps: StepsSection,
}

/// Validated configuration.
///
/// Only obtainable through `DailyConfig::try_from(RawDailyConfig)` (or the
/// loader), so holders can rely on the invariants checked in `validate.rs`.
#[derive(Debug, Clone)]
pub struct DailyConfig {
    pub log: LogSection,
    pub env: EnvSection,
    pub steps: StepsSection,
}

impl DailyConfig {
    pub(crate) fn new_unchecked(log: LogSection, env: EnvSection, steps: StepsSection) -> Self {
        Self { log, env, steps }
    }

    pub fn step(&self, kind: StepKind) -> &StepConfig {
        match kind {
            StepKind::Scrape => &self.steps.scrape,
            StepKind::Recommend => &self.steps.recommend,
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// Append-only log file mirrored with the console.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Overridden by `DAILY_TASKS_LOG` when that is set.
    #[serde(default)]
    pub level: LogLevel,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("daily_tasks.log")
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: LogLevel::default(),
        }
    }
}

/// `[env]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvSection {
    /// Environment file, loaded if present.
    #[serde(default = "default_env_file")]
    pub file: PathBuf,

    /// When true, values from the file replace variables that are already
    /// set in the process environment.
    #[serde(default, rename = "override")]
    pub override_existing: bool,
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

impl Default for EnvSection {
    fn default() -> Self {
        Self {
            file: default_env_file(),
            override_existing: false,
        }
    }
}

/// `[steps]` section: one table per collaborator.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepsSection {
    #[serde(default = "default_scrape_step")]
    pub scrape: StepConfig,

    #[serde(default = "default_recommend_step")]
    pub recommend: StepConfig,
}

fn default_scrape_step() -> StepConfig {
    StepConfig::new("python -m backend.python.scraper")
}

fn default_recommend_step() -> StepConfig {
    StepConfig::new("python -m recommend_scholarships")
}

impl Default for StepsSection {
    fn default() -> Self {
        Self {
            scrape: default_scrape_step(),
            recommend: default_recommend_step(),
        }
    }
}

/// `[steps.<name>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepConfig {
    /// Shell command line (`sh -c` / `cmd /C`).
    pub cmd: String,

    /// Working directory for the command; defaults to the current one.
    #[serde(default)]
    pub workdir: Option<PathBuf>,
}

impl StepConfig {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            workdir: None,
        }
    }
}
