#![allow(dead_code, unused_imports)]

pub use scholarship_daily_test_utils::builders;
pub use scholarship_daily_test_utils::capture::{CapturedLogs, SharedBuffer, capture_logs};
pub use scholarship_daily_test_utils::fake_step::{CallLog, FakeStep, call_log};
pub use scholarship_daily_test_utils::with_timeout;

/// The six success-path messages, in the order the runner must emit them
/// (the last one without its duration).
pub const SUCCESS_SEQUENCE: [&str; 6] = [
    "Starting daily scholarship update process",
    "Starting scholarship scraping",
    "Completed scholarship scraping",
    "Starting recommendation generation",
    "Completed recommendation generation",
    "Daily tasks completed successfully in ",
];
