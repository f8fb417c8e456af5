use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::format_cache;
use crate::record_encoder::encode_record;
use crate::sink::ByteSink;
use crate::value::Value;

/// Prefix decorators: small records written in front of the main record of
/// a log line, carrying level and timestamp context.
///
/// Each decorator is itself a client of the format machinery: it fetches a
/// compiled format from the cache and encodes through the same two-pass
/// encoder, so a decorated line is just a sequence of ordinary records on
/// the sink.

/// Record severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl Level {
    /// The name written by [`LevelPrefix`].
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERR",
            Level::Critical => "CRITICAL",
        }
    }
}

/// Writes a small record in front of a log line's main record.
pub trait PrefixDecorator {
    fn apply(&self, level: Level, sink: &mut dyn ByteSink) -> Result<()>;
}

/// Prepends the record's severity as a fixed 8-byte level name.
pub struct LevelPrefix;

impl PrefixDecorator for LevelPrefix {
    fn apply(&self, level: Level, sink: &mut dyn ByteSink) -> Result<()> {
        let format = format_cache::compiled("[%8s]")?;
        encode_record(&format, &[Value::from(level.as_str())], sink)
    }
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Prepends the wall-clock time (UTC) as a calendar timestamp record.
pub struct TimestampPrefix;

impl PrefixDecorator for TimestampPrefix {
    fn apply(&self, _level: Level, sink: &mut dyn ByteSink) -> Result<()> {
        let now = unix_seconds();
        let tm = broken_down_utc(now);
        let format = format_cache::compiled("[%d-%3s-%d %d:%d:%d]: ")?;
        encode_record(
            &format,
            &[
                Value::from(tm.year),
                Value::from(MONTHS[tm.month]),
                Value::from(tm.day),
                Value::from(tm.hour),
                Value::from(tm.minute),
                Value::from(tm.second),
            ],
            sink,
        )
    }
}

/// Prepends nanoseconds since the Unix epoch as a single 8-byte counter.
pub struct NanosecondTimestampPrefix;

impl PrefixDecorator for NanosecondTimestampPrefix {
    fn apply(&self, _level: Level, sink: &mut dyn ByteSink) -> Result<()> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(0);
        let format = format_cache::compiled("[%llu]: ")?;
        encode_record(&format, &[Value::from(nanos)], sink)
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

struct BrokenDown {
    year: i32,
    /// 0-based month index.
    month: usize,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const DAYS_IN_MONTH: [u64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Split seconds since the Unix epoch into UTC calendar parts, walking
/// years then months from 1970.
fn broken_down_utc(epoch_seconds: u64) -> BrokenDown {
    let seconds_of_day = epoch_seconds % 86_400;
    let mut days = epoch_seconds / 86_400;

    let mut year: i32 = 1970;
    loop {
        let days_in_year: u64 = if is_leap_year(year) { 366 } else { 365 };
        if days < days_in_year {
            break;
        }
        days -= days_in_year;
        year += 1;
    }

    let mut month = 0usize;
    loop {
        let mut days_in_month = DAYS_IN_MONTH[month];
        if month == 1 && is_leap_year(year) {
            days_in_month += 1;
        }
        if days < days_in_month {
            break;
        }
        days -= days_in_month;
        month += 1;
    }

    BrokenDown {
        year,
        month,
        day: days as u32 + 1,
        hour: (seconds_of_day / 3_600) as u32,
        minute: (seconds_of_day % 3_600 / 60) as u32,
        second: (seconds_of_day % 60) as u32,
    }
}
