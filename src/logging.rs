// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Every line goes to two sinks, an append-only log file and the console
//! (stderr), in the format
//!
//! ```text
//! <timestamp> - <target> - <LEVEL> - <message> [fields]
//! ```
//!
//! The sinks are fed by a single formatting layer through a tee writer,
//! so both always receive byte-identical content.
//!
//! Priority for determining the log level:
//! 1. `DAILY_TASKS_LOG` environment variable (e.g. "info", "debug")
//! 2. `[log].level` from the config file
//! 3. default to `info`

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

use crate::config::LogSection;
use crate::types::LogLevel;

/// Logger name used for the runner's own events.
pub const LOG_TARGET: &str = "daily_tasks";

/// Environment variable overriding `[log].level`.
pub const LOG_LEVEL_ENV: &str = "DAILY_TASKS_LOG";

/// Event formatter producing `timestamp - target - LEVEL - message` lines.
#[derive(Debug, Clone, Default)]
pub struct DailyLineFormat<T = SystemTime> {
    timer: T,
}

impl<T> DailyLineFormat<T> {
    pub fn with_timer(timer: T) -> Self {
        Self { timer }
    }
}

impl<S, N, T> FormatEvent<S, N> for DailyLineFormat<T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    T: FormatTime,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        self.timer.format_time(&mut writer)?;
        write!(writer, " - {} - {} - ", meta.target(), meta.level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Build a subscriber that mirrors every line to `file` and `console`.
///
/// The binary installs the result globally via [`init_logging`]; tests
/// install it per-thread with `tracing::subscriber::set_default` and pass
/// in-memory writers.
pub fn build_subscriber<T, F, C>(
    level: tracing::Level,
    timer: T,
    file: F,
    console: C,
) -> impl Subscriber + Send + Sync + 'static
where
    T: FormatTime + Send + Sync + 'static,
    F: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .event_format(DailyLineFormat::with_timer(timer))
        .with_writer(file.and(console))
        .finish()
}

/// Initialise the global logging subscriber from `[log]`.
///
/// Safe to call once at startup.
pub fn init_logging(section: &LogSection) -> Result<()> {
    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    let level = effective_level(section.level, env_level.as_deref());

    let file = open_log_file(&section.file)
        .with_context(|| format!("opening log file {:?}", section.file))?;

    let subscriber = build_subscriber(
        level.as_tracing_level(),
        SystemTime,
        Mutex::new(file),
        io::stderr,
    );

    tracing::subscriber::set_global_default(subscriber)
        .context("installing global log subscriber")?;

    Ok(())
}

/// Open `path` for appending, creating it and its parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `DAILY_TASKS_LOG` wins over the configured level when it parses.
pub fn effective_level(configured: LogLevel, env_value: Option<&str>) -> LogLevel {
    env_value
        .and_then(|s| s.parse::<LogLevel>().ok())
        .unwrap_or(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_level_overrides_config() {
        assert_eq!(effective_level(LogLevel::Info, Some("debug")), LogLevel::Debug);
        assert_eq!(effective_level(LogLevel::Warn, None), LogLevel::Warn);
        assert_eq!(effective_level(LogLevel::Warn, Some("bogus")), LogLevel::Warn);
    }

    #[test]
    fn log_file_is_appended_not_truncated() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("daily_tasks.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
