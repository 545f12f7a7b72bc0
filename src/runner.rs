// src/runner.rs

//! The daily task runner.
//!
//! Runs the scrape step, then the recommendation step, strictly in that
//! order, and records how long the whole run took. Any failure is logged
//! at ERROR with its full cause chain and then handed back to the caller
//! unchanged; nothing is retried or swallowed.

use std::error::Error as StdError;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::time::Instant;
use tracing::{error, info};

use crate::config::DailyConfig;
use crate::env::Environment;
use crate::errors::{StepError, error_report};
use crate::logging::LOG_TARGET;
use crate::step::{CommandStep, Step};
use crate::types::StepKind;

/// Lifecycle of one run: `NotStarted -> Running -> {Succeeded, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed)
    }
}

/// Timing and outcome of a single run. Lives only as long as the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    started_at: Option<SystemTime>,
    finished_at: Option<SystemTime>,
    elapsed: Option<Duration>,
    state: RunState,
}

impl Default for RunRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl RunRecord {
    pub fn new() -> Self {
        Self {
            started_at: None,
            finished_at: None,
            elapsed: None,
            state: RunState::NotStarted,
        }
    }

    pub fn start(&mut self) {
        debug_assert_eq!(self.state, RunState::NotStarted, "run started twice");
        if self.state != RunState::NotStarted {
            return;
        }
        self.started_at = Some(SystemTime::now());
        self.state = RunState::Running;
    }

    pub fn succeed(&mut self, elapsed: Duration) {
        self.finish(RunState::Succeeded, elapsed);
    }

    pub fn fail(&mut self, elapsed: Duration) {
        self.finish(RunState::Failed, elapsed);
    }

    fn finish(&mut self, state: RunState, elapsed: Duration) {
        debug_assert_eq!(self.state, RunState::Running, "finishing a run that is not running");
        if self.state != RunState::Running {
            return;
        }
        self.finished_at = Some(SystemTime::now());
        self.elapsed = Some(elapsed);
        self.state = state;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<SystemTime> {
        self.finished_at
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }
}

/// Sequences the scrape and recommendation collaborators.
pub struct DailyTaskRunner {
    scrape: Arc<dyn Step>,
    recommend: Arc<dyn Step>,
}

impl std::fmt::Debug for DailyTaskRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyTaskRunner")
            .field("scrape", &self.scrape.name())
            .field("recommend", &self.recommend.name())
            .finish()
    }
}

impl DailyTaskRunner {
    pub fn new(scrape: Arc<dyn Step>, recommend: Arc<dyn Step>) -> Self {
        Self { scrape, recommend }
    }

    /// Runner whose steps are the commands from `[steps]`.
    pub fn from_config(cfg: &DailyConfig) -> Self {
        let step = |kind| -> Arc<dyn Step> {
            Arc::new(CommandStep::from_config(kind, cfg.step(kind)))
        };
        Self::new(step(StepKind::Scrape), step(StepKind::Recommend))
    }

    /// Execute one run.
    ///
    /// Returns the finished record on success. On failure the collaborator's
    /// error is logged and returned as-is; the recommendation step never runs
    /// after a failed scrape.
    pub async fn run(&self, env: &Environment) -> Result<RunRecord, StepError> {
        info!(target: LOG_TARGET, "Starting daily scholarship update process");

        let mut record = RunRecord::new();
        record.start();
        let started = Instant::now();

        match self.run_steps(env).await {
            Ok(()) => {
                let elapsed = started.elapsed();
                record.succeed(elapsed);
                info!(
                    target: LOG_TARGET,
                    "Daily tasks completed successfully in {}",
                    format_elapsed(elapsed)
                );
                Ok(record)
            }
            Err(err) => {
                record.fail(started.elapsed());
                log_failure(&err);
                Err(err)
            }
        }
    }

    async fn run_steps(&self, env: &Environment) -> Result<(), StepError> {
        info!(target: LOG_TARGET, "Starting scholarship scraping");
        self.scrape.run(env).await?;
        info!(target: LOG_TARGET, "Completed scholarship scraping");

        info!(target: LOG_TARGET, "Starting recommendation generation");
        self.recommend.run(env).await?;
        info!(target: LOG_TARGET, "Completed recommendation generation");

        Ok(())
    }
}

/// Log a run failure with its full cause chain.
pub fn log_failure(err: &(dyn StdError + 'static)) {
    error!(target: LOG_TARGET, "Error in daily tasks: {}", error_report(err));
}

/// Render a duration as `[D day(s), ]H:MM:SS[.ffffff]`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    let micros = elapsed.subsec_micros();

    let mut out = String::new();
    if days > 0 {
        let _ = write!(out, "{days} day{}, ", if days == 1 { "" } else { "s" });
    }
    let _ = write!(out, "{hours}:{minutes:02}:{seconds:02}");
    if micros > 0 {
        let _ = write!(out, ".{micros:06}");
    }
    out
}
