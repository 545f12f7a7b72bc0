// src/config/validate.rs

use crate::config::model::{DailyConfig, RawDailyConfig, StepConfig};
use crate::errors::{DailyTaskError, Result};
use crate::types::StepKind;

impl TryFrom<RawDailyConfig> for DailyConfig {
    type Error = crate::errors::DailyTaskError;

    fn try_from(raw: RawDailyConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(DailyConfig::new_unchecked(raw.log, raw.env, raw.steps))
    }
}

fn validate_raw_config(cfg: &RawDailyConfig) -> Result<()> {
    validate_log_section(cfg)?;
    validate_step(StepKind::Scrape, &cfg.steps.scrape)?;
    validate_step(StepKind::Recommend, &cfg.steps.recommend)?;
    Ok(())
}

fn validate_log_section(cfg: &RawDailyConfig) -> Result<()> {
    if cfg.log.file.as_os_str().is_empty() {
        return Err(DailyTaskError::ConfigError(
            "[log].file must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_step(kind: StepKind, step: &StepConfig) -> Result<()> {
    if step.cmd.trim().is_empty() {
        return Err(DailyTaskError::ConfigError(format!(
            "[steps.{}].cmd must not be empty",
            kind
        )));
    }

    if let Some(dir) = &step.workdir {
        if dir.as_os_str().is_empty() {
            return Err(DailyTaskError::ConfigError(format!(
                "[steps.{}].workdir must not be empty when set",
                kind
            )));
        }
    }

    Ok(())
}
