// src/step.rs

//! Collaborator steps.
//!
//! The runner talks to a [`Step`] instead of spawning processes itself.
//! Production code uses [`CommandStep`], which runs the configured shell
//! command; tests provide in-process fakes that succeed, fail or sleep on
//! demand.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::StepConfig;
use crate::env::Environment;
use crate::errors::StepError;
use crate::types::StepKind;

pub type StepFuture<'a> = Pin<Box<dyn Future<Output = Result<(), StepError>> + Send + 'a>>;

/// One collaborator in the daily pipeline.
///
/// A step takes no arguments besides the environment and returns nothing;
/// whatever it produces is persisted by the step itself.
pub trait Step: Send + Sync {
    fn name(&self) -> &str;

    /// Run the step to completion.
    fn run<'a>(&'a self, env: &'a Environment) -> StepFuture<'a>;
}

/// Step backed by an external shell command.
#[derive(Debug, Clone)]
pub struct CommandStep {
    name: String,
    cmd: String,
    workdir: Option<PathBuf>,
}

impl CommandStep {
    pub fn new(name: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
            workdir: None,
        }
    }

    pub fn from_config(kind: StepKind, cfg: &StepConfig) -> Self {
        Self {
            name: kind.to_string(),
            cmd: cfg.cmd.clone(),
            workdir: cfg.workdir.clone(),
        }
    }

    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    fn build_command(&self, env: &Environment) -> Command {
        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd);
            c
        };

        cmd.env_clear()
            .envs(env.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        cmd
    }

    async fn execute(&self, env: &Environment) -> Result<(), StepError> {
        debug!(step = %self.name, cmd = %self.cmd, workdir = ?self.workdir, "spawning step process");

        let mut child = self
            .build_command(env)
            .spawn()
            .map_err(|source| StepError::Spawn {
                step: self.name.clone(),
                source,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Drain both pipes together so neither can fill up and block the child.
        let (out, err) = tokio::join!(
            forward_lines(&self.name, "stdout", stdout),
            forward_lines(&self.name, "stderr", stderr),
        );
        out.and(err).map_err(|source| self.io_error(source))?;

        let status = child.wait().await.map_err(|source| self.io_error(source))?;

        debug!(
            step = %self.name,
            exit_code = ?status.code(),
            success = status.success(),
            "step process exited"
        );

        if status.success() {
            Ok(())
        } else {
            Err(StepError::Exited {
                step: self.name.clone(),
                code: status.code(),
            })
        }
    }

    fn io_error(&self, source: std::io::Error) -> StepError {
        StepError::Io {
            step: self.name.clone(),
            source,
        }
    }
}

impl Step for CommandStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn run<'a>(&'a self, env: &'a Environment) -> StepFuture<'a> {
        Box::pin(self.execute(env))
    }
}

/// Forward every line of a child pipe to the log at INFO.
async fn forward_lines<R>(step: &str, stream: &'static str, pipe: Option<R>) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(pipe) = pipe else {
        return Ok(());
    };

    let mut lines = BufReader::new(pipe).lines();
    while let Some(line) = lines.next_line().await? {
        info!(step = %step, stream = %stream, "{}", line);
    }
    Ok(())
}
