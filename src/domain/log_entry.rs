use std::fmt;

use compact_str::{CompactString, ToCompactString};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::domain::status::StatusCode;

/// Wall clock used for request log timestamps.
///
/// The offset has to be looked up while the process is still single threaded,
/// `time` refuses to read it afterwards on most unixes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Clock {
    offset: UtcOffset,
}

impl Clock {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// Falls back to UTC when the local offset is unavailable.
    pub fn local() -> Self {
        Self::new(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
    }

    pub fn now(&self) -> CompactString {
        Self::format(OffsetDateTime::now_utc().to_offset(self.offset))
    }

    pub fn format(at: OffsetDateTime) -> CompactString {
        let layout = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        at.format(layout)
            .map(|s| s.to_compact_string())
            .unwrap_or_else(|_| at.to_compact_string())
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(UtcOffset::UTC)
    }
}

/// One block of the request log, rendered in a single piece so it can be
/// appended with one write.
#[derive(Debug, Clone, Copy)]
pub struct LogEntry<'a> {
    pub timestamp: &'a str,
    pub request_line: &'a str,
    pub status: StatusCode,
}

impl fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\nRequest at {}:\n{}\nResponse code:\n{}\n",
            self.timestamp, self.request_line, self.status
        )
    }
}
