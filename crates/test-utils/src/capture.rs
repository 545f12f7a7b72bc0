use std::io;
use std::sync::{Arc, Mutex};

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use scholarship_daily::logging::build_subscriber;

/// In-memory log sink usable wherever a `MakeWriter` is expected.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().unwrap()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Both sinks of a captured run.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    pub file: SharedBuffer,
    pub console: SharedBuffer,
}

impl CapturedLogs {
    /// Messages (text after `LEVEL - `) of the lines logged under `target`.
    pub fn messages_for(&self, target: &str) -> Vec<String> {
        let marker = format!(" - {target} - ");
        self.console
            .lines()
            .into_iter()
            .filter_map(|line| {
                let rest = line.split_once(&marker)?.1;
                let (_level, message) = rest.split_once(" - ")?;
                Some(message.to_string())
            })
            .collect()
    }
}

/// Install the production line format on the current thread, writing to
/// two in-memory sinks instead of a file and stderr.
///
/// Timestamps are omitted so lines can be compared exactly. Keep the guard
/// alive for as long as logs should be captured.
pub fn capture_logs(level: tracing::Level) -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = build_subscriber(level, (), logs.file.clone(), logs.console.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
