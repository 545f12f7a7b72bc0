// src/lib.rs

pub mod config;
pub mod env;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod runner;
pub mod step;
pub mod types;

use tracing::debug;

use crate::config::DailyConfig;
use crate::env::Environment;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::runner::{DailyTaskRunner, RunRecord, log_failure};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - environment loading (`[env]`)
/// - the configured scrape and recommend commands (`[steps]`)
/// - one run of the [`DailyTaskRunner`]
///
/// Environment loading sits inside the same failure boundary as the steps:
/// a broken `.env` is logged like any other run failure before it is
/// returned.
pub async fn run_daily_tasks(fs: &dyn FileSystem, cfg: &DailyConfig) -> Result<RunRecord> {
    let env = Environment::load(fs, &cfg.env).inspect_err(|err| log_failure(err))?;
    debug!(vars = env.len(), "environment ready");

    let runner = DailyTaskRunner::from_config(cfg);
    let record = runner.run(&env).await?;
    Ok(record)
}
