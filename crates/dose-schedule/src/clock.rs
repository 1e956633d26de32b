//! Time-of-day comparisons in the fixed schedule time zone
//!
//! Scheduled times are stored as bare "HH:MM" strings. They are always
//! interpreted on the current calendar date as seen in [`SCHEDULE_TZ`], never in
//! the host's local zone, so a deployment behaves the same wherever it runs.

use std::sync::RwLock;

use chrono::{DateTime, LocalResult, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};

/// Zone every scheduled time is interpreted in
pub const SCHEDULE_TZ: Tz = chrono_tz::Europe::Moscow;

/// Source of "now"
///
/// Every call re-reads the clock. Two comparisons made microseconds apart may
/// disagree when they straddle a minute boundary.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a settable instant
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new<T: TimeZone>(now: DateTime<T>) -> Self {
        Self {
            now: RwLock::new(now.with_timezone(&Utc)),
        }
    }

    pub fn set<T: TimeZone>(&self, now: DateTime<T>) {
        let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
        *guard = now.with_timezone(&Utc);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// Parse a strict "HH:MM" time of day (hour 0-23, minute 0-59)
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    // Surrounding whitespace is tolerated; inner fields must be bare digits
    let (hours, minutes) = value
        .trim()
        .split_once(':')
        .ok_or_else(|| ScheduleError::parse(value, "expected HH:MM"))?;

    let hour = parse_component(value, hours, "hour", 23)?;
    let minute = parse_component(value, minutes, "minute", 59)?;

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| ScheduleError::parse(value, "time of day out of range"))
}

fn parse_component(value: &str, field: &str, label: &str, max: u32) -> Result<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScheduleError::parse(
            value,
            format!("{} '{}' is not a number", label, field),
        ));
    }

    let n: u32 = field
        .parse()
        .map_err(|_| ScheduleError::parse(value, format!("{} '{}' is too large", label, field)))?;

    if n > max {
        return Err(ScheduleError::parse(
            value,
            format!("{} must be between 0 and {}", label, max),
        ));
    }
    Ok(n)
}

/// The instant `value` denotes on the schedule-zone calendar date of `now`
pub fn to_time_today(value: &str, now: DateTime<Utc>) -> Result<DateTime<Tz>> {
    let time = parse_time_of_day(value)?;
    let today = now.with_timezone(&SCHEDULE_TZ).date_naive();

    match SCHEDULE_TZ.from_local_datetime(&today.and_time(time)) {
        LocalResult::Single(t) => Ok(t),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(ScheduleError::parse(
            value,
            "does not exist today in the schedule time zone",
        )),
    }
}

/// True iff today's occurrence of `value` is strictly before now
pub fn is_past(value: &str, clock: &dyn Clock) -> Result<bool> {
    let now = clock.now();
    let scheduled = to_time_today(value, now)?;
    Ok(scheduled.with_timezone(&Utc) < now)
}
