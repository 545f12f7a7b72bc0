#![allow(dead_code)]

use std::path::{Path, PathBuf};

use scholarship_daily::config::{DailyConfig, RawDailyConfig};
use scholarship_daily::types::LogLevel;

/// Builder for `DailyConfig` to simplify test setup.
pub struct DailyConfigBuilder {
    config: RawDailyConfig,
}

impl DailyConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawDailyConfig::default(),
        }
    }

    pub fn scrape_cmd(mut self, cmd: &str) -> Self {
        self.config.steps.scrape.cmd = cmd.to_string();
        self
    }

    pub fn recommend_cmd(mut self, cmd: &str) -> Self {
        self.config.steps.recommend.cmd = cmd.to_string();
        self
    }

    pub fn workdir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir: PathBuf = dir.as_ref().to_path_buf();
        self.config.steps.scrape.workdir = Some(dir.clone());
        self.config.steps.recommend.workdir = Some(dir);
        self
    }

    pub fn env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config.env.file = path.as_ref().to_path_buf();
        self
    }

    pub fn env_override(mut self, val: bool) -> Self {
        self.config.env.override_existing = val;
        self
    }

    pub fn log_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config.log.file = path.as_ref().to_path_buf();
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.log.level = level;
        self
    }

    pub fn build(self) -> DailyConfig {
        DailyConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for DailyConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
