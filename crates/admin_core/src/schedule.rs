//! Scheduling normalizer for programmes: one picked calendar date plus two
//! local times of day become two absolute instants, and back again for the
//! edit form.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("time must be entered as HH:MM")]
    InvalidTime { field: &'static str },
    /// The combined wall-clock time does not exist in the editor's timezone
    /// (DST spring-forward gap).
    #[error("no such local time on {date}")]
    NonexistentLocalTime {
        field: &'static str,
        date: NaiveDate,
    },
    #[error("End time must be after start time")]
    EndNotAfterStart,
}

impl ScheduleError {
    /// The draft field the error belongs to, for inline form messages.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidTime { field } | Self::NonexistentLocalTime { field, .. } => field,
            Self::EndNotAfterStart => "end_time",
        }
    }
}

/// Combines the picked date with both times of day in the editor's timezone.
/// An end at or before the start is rejected rather than silently producing
/// an inverted window.
pub fn normalize<Tz: TimeZone>(
    date: NaiveDate,
    start_time: &str,
    end_time: &str,
    tz: &Tz,
) -> Result<SessionWindow, ScheduleError> {
    let start = combine(date, parse_time_of_day("start_time", start_time)?, tz, "start_time")?;
    let end = combine(date, parse_time_of_day("end_time", end_time)?, tz, "end_time")?;
    if end <= start {
        return Err(ScheduleError::EndNotAfterStart);
    }
    Ok(SessionWindow { start, end })
}

/// Local `HH:MM` projection of an instant, as the edit form displays it.
pub fn time_of_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant
        .with_timezone(tz)
        .naive_local()
        .format("%H:%M")
        .to_string()
}

fn parse_time_of_day(field: &'static str, value: &str) -> Result<NaiveTime, ScheduleError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| ScheduleError::InvalidTime { field })
}

fn combine<Tz: TimeZone>(
    date: NaiveDate,
    time: NaiveTime,
    tz: &Tz,
    field: &'static str,
) -> Result<DateTime<Utc>, ScheduleError> {
    // A DST fold yields two candidate instants; take the earlier one.
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|instant| instant.with_timezone(&Utc))
        .ok_or(ScheduleError::NonexistentLocalTime { field, date })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).expect("date")
    }

    #[test]
    fn normalizes_against_the_editor_offset() {
        let tz = FixedOffset::east_opt(5 * 3600 + 1800).expect("offset"); // UTC+05:30
        let window = normalize(day(), "09:00", "10:30", &tz).expect("window");
        assert_eq!(window.start.to_rfc3339(), "2025-03-10T03:30:00+00:00");
        assert_eq!(window.end.to_rfc3339(), "2025-03-10T05:00:00+00:00");
    }

    #[test]
    fn round_trips_through_the_local_projection() {
        let tz = FixedOffset::west_opt(4 * 3600).expect("offset");
        let window = normalize(day(), "09:00", "10:30", &tz).expect("window");
        assert_eq!(time_of_day(window.start, &tz), "09:00");
        assert_eq!(time_of_day(window.end, &tz), "10:30");
    }

    #[test]
    fn accepts_seconds_in_the_time_input() {
        let window = normalize(day(), "09:00:00", "10:30:00", &Utc).expect("window");
        assert_eq!(time_of_day(window.start, &Utc), "09:00");
    }

    #[test]
    fn rejects_end_at_or_before_start() {
        assert_eq!(
            normalize(day(), "10:30", "09:00", &Utc),
            Err(ScheduleError::EndNotAfterStart)
        );
        assert_eq!(
            normalize(day(), "09:00", "09:00", &Utc),
            Err(ScheduleError::EndNotAfterStart)
        );
    }

    #[test]
    fn rejects_unparseable_times_with_the_owning_field() {
        let err = normalize(day(), "quarter past", "10:30", &Utc).expect_err("invalid");
        assert_eq!(err.field(), "start_time");
        let err = normalize(day(), "09:00", "25:99", &Utc).expect_err("invalid");
        assert_eq!(err.field(), "end_time");
    }
}
