use std::sync::{Arc, Mutex};
use std::time::Duration;

use scholarship_daily::env::Environment;
use scholarship_daily::errors::StepError;
use scholarship_daily::step::{Step, StepFuture};

/// Shared, ordered log of which fake steps were invoked.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

#[derive(Debug, Clone)]
enum Outcome {
    Succeed,
    Fail(String),
}

/// A fake collaborator that:
/// - records its name in a shared [`CallLog`] when invoked
/// - optionally sleeps (on the tokio clock, so paused-time tests work)
/// - then succeeds or fails with `StepError::Failed`.
#[derive(Debug, Clone)]
pub struct FakeStep {
    name: String,
    outcome: Outcome,
    delay: Option<Duration>,
    calls: CallLog,
    seen_env: Arc<Mutex<Option<Environment>>>,
}

impl FakeStep {
    pub fn succeeding(name: &str, calls: CallLog) -> Self {
        Self {
            name: name.to_string(),
            outcome: Outcome::Succeed,
            delay: None,
            calls,
            seen_env: Arc::new(Mutex::new(None)),
        }
    }

    pub fn failing(name: &str, message: &str, calls: CallLog) -> Self {
        Self {
            outcome: Outcome::Fail(message.to_string()),
            ..Self::succeeding(name, calls)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Environment passed to the most recent invocation.
    pub fn seen_env(&self) -> Option<Environment> {
        self.seen_env.lock().unwrap().clone()
    }

    pub fn into_arc(self) -> Arc<dyn Step> {
        Arc::new(self)
    }
}

impl Step for FakeStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn run<'a>(&'a self, env: &'a Environment) -> StepFuture<'a> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(self.name.clone());
            *self.seen_env.lock().unwrap() = Some(env.clone());

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            match &self.outcome {
                Outcome::Succeed => Ok(()),
                Outcome::Fail(message) => Err(StepError::Failed {
                    step: self.name.clone(),
                    message: message.clone(),
                }),
            }
        })
    }
}
