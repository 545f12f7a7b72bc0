// tests/command_step.rs
#![cfg(unix)]

mod common;
use crate::common::{capture_logs, with_timeout};

use std::error::Error;
use std::fs;

use scholarship_daily::config::StepConfig;
use scholarship_daily::env::Environment;
use scholarship_daily::errors::StepError;
use scholarship_daily::step::{CommandStep, Step};
use scholarship_daily::types::StepKind;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn stdout_and_stderr_lines_are_logged_with_step_name() -> TestResult {
    with_timeout(async {
        let (logs, _guard) = capture_logs(tracing::Level::INFO);

        let step = CommandStep::new("scrape", "echo 'stored 42 scholarships'; echo 'slow page' >&2");
        step.run(&Environment::from_process()).await?;

        let console = logs.console.contents();
        assert!(console.contains("stored 42 scholarships"));
        assert!(console.contains("slow page"));
        assert!(console.contains("step=scrape"));
        assert!(console.contains("stream=stderr"));
        assert!(!logs.file.contents().contains('\u{1b}'));
        assert_eq!(logs.file.contents(), console);
        Ok::<(), Box<dyn Error>>(())
    })
    .await
}

#[tokio::test]
async fn non_zero_exit_is_a_step_failure() -> TestResult {
    with_timeout(async {
        let step = CommandStep::new("recommend", "exit 3");

        match step.run(&Environment::from_process()).await {
            Err(StepError::Exited { step, code }) => {
                assert_eq!(step, "recommend");
                assert_eq!(code, Some(3));
            }
            other => panic!("expected Exited, got {other:?}"),
        }
        Ok::<(), Box<dyn Error>>(())
    })
    .await
}

#[tokio::test]
async fn child_sees_only_the_given_environment() -> TestResult {
    with_timeout(async {
        let path = std::env::var("PATH").unwrap_or_else(|_| "/usr/bin:/bin".to_string());
        let env = Environment::from_pairs([("PATH", path.as_str()), ("SCHOLARSHIP_REGION", "EU")]);

        let step = CommandStep::new(
            "recommend",
            r#"test "$SCHOLARSHIP_REGION" = EU && test -z "${HOME:-}""#,
        );
        step.run(&env).await?;
        Ok::<(), Box<dyn Error>>(())
    })
    .await
}

#[tokio::test]
async fn runs_inside_configured_workdir() -> TestResult {
    with_timeout(async {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("scholarships.json"), "[]")?;

        let cfg = StepConfig {
            cmd: "test -f scholarships.json".to_string(),
            workdir: Some(dir.path().to_path_buf()),
        };
        let step = CommandStep::from_config(StepKind::Recommend, &cfg);
        assert_eq!(step.name(), "recommend");

        step.run(&Environment::from_process()).await?;
        Ok::<(), Box<dyn Error>>(())
    })
    .await
}

#[tokio::test]
async fn missing_workdir_fails_to_spawn() -> TestResult {
    with_timeout(async {
        let dir = tempfile::tempdir()?;
        let step = CommandStep::new("scrape", "true").with_workdir(dir.path().join("missing"));

        match step.run(&Environment::from_process()).await {
            Err(StepError::Spawn { step, .. }) => assert_eq!(step, "scrape"),
            other => panic!("expected Spawn, got {other:?}"),
        }
        Ok::<(), Box<dyn Error>>(())
    })
    .await
}
