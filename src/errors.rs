// src/errors.rs

//! Crate-wide error types and helpers.
//!
//! - [`DailyTaskError`] covers everything that can go wrong around a run
//!   (config, `.env`, IO) plus the collaborator failure itself.
//! - [`StepError`] is the collaborator failure. The runner never inspects
//!   its variants; it only logs and propagates it.

use std::error::Error as StdError;
use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DailyTaskError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("failed to load environment file {path:?}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error(transparent)]
    Collaborator(#[from] StepError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure raised by a collaborator step (scrape or recommend).
#[derive(Error, Debug)]
pub enum StepError {
    #[error("failed to spawn step '{step}'")]
    Spawn {
        step: String,
        #[source]
        source: std::io::Error,
    },

    #[error("step '{step}' exited with {}", describe_exit(.code))]
    Exited { step: String, code: Option<i32> },

    #[error("I/O error while running step '{step}'")]
    Io {
        step: String,
        #[source]
        source: std::io::Error,
    },

    #[error("step '{step}' failed: {message}")]
    Failed { step: String, message: String },
}

impl StepError {
    /// Name of the step that produced this failure.
    pub fn step(&self) -> &str {
        match self {
            StepError::Spawn { step, .. }
            | StepError::Exited { step, .. }
            | StepError::Io { step, .. }
            | StepError::Failed { step, .. } => step,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status code {code}"),
        None => "no status code (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, DailyTaskError>;

/// Render an error together with its whole `source()` chain.
///
/// ```text
/// step 'scrape' exited with status code 2
///
/// Caused by:
///     0: ...
/// ```
///
/// The chain is omitted when the error has no source.
pub fn error_report(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();

    let mut source = err.source();
    if source.is_some() {
        out.push_str("\n\nCaused by:");
    }

    let mut idx = 0;
    while let Some(cause) = source {
        let _ = write!(out, "\n    {idx}: {cause}");
        idx += 1;
        source = cause.source();
    }

    out
}
