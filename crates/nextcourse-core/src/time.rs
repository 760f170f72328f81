//! Time types for timetable courses.
//!
//! This module provides [`CourseTime`] for representing course start/end
//! instants (which may have failed to parse on the wire and are then kept as
//! raw strings), and [`TimeWindow`] for defining fetch ranges.

use chrono::{Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Represents the start or end instant of a course.
///
/// The portal delivers date-times as strings in a fixed format, but the field
/// is not guaranteed well-formed. A value that parsed is an `Instant`; one
/// that did not is kept verbatim as `Raw` and never matches any range
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CourseTime {
    /// A parsed date-time (the portal encodes naive local time).
    Instant(NaiveDateTime),
    /// The original string, kept when parsing failed.
    Raw(String),
}

impl CourseTime {
    /// Creates a `CourseTime::Instant`.
    pub fn from_instant(dt: NaiveDateTime) -> Self {
        Self::Instant(dt)
    }

    /// Creates a `CourseTime::Raw` from an unparseable wire value.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self::Raw(raw.into())
    }

    /// Returns `true` if this value parsed into an instant.
    pub fn is_instant(&self) -> bool {
        matches!(self, Self::Instant(_))
    }

    /// Returns `true` if this value is an unparsed wire string.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Returns the instant if this is an `Instant` variant.
    pub fn as_instant(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Instant(dt) => Some(*dt),
            Self::Raw(_) => None,
        }
    }

    /// Returns the original wire string if this is a `Raw` variant.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(s) => Some(s),
            Self::Instant(_) => None,
        }
    }

    /// Returns the day-of-month of the instant, if parsed.
    pub fn day_of_month(&self) -> Option<u32> {
        self.as_instant().map(|dt| dt.day())
    }

    /// Returns the epoch seconds of the instant interpreted in the local
    /// timezone, if parsed.
    pub fn epoch_local(&self) -> Option<i64> {
        self.as_instant().map(local_epoch)
    }
}

impl fmt::Display for CourseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instant(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            Self::Raw(s) => write!(f, "{}", s),
        }
    }
}

impl PartialOrd for CourseTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Instants order chronologically; raw values sort after every instant so
/// that unparsed records end up at the tail of a sorted timetable.
impl Ord for CourseTime {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Instant(a), Self::Instant(b)) => a.cmp(b),
            (Self::Raw(a), Self::Raw(b)) => a.cmp(b),
            (Self::Instant(_), Self::Raw(_)) => Ordering::Less,
            (Self::Raw(_), Self::Instant(_)) => Ordering::Greater,
        }
    }
}

/// Converts a naive local date-time to epoch seconds.
///
/// Falls back to a UTC interpretation when the local time does not exist
/// (skipped by a DST jump).
pub fn local_epoch(dt: NaiveDateTime) -> i64 {
    match chrono::Local.from_local_datetime(&dt) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.timestamp(),
        LocalResult::None => dt.and_utc().timestamp(),
    }
}

/// A time window for fetching timetable courses.
///
/// Represents a half-open interval `[start, end)` in portal-local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: NaiveDateTime,
    /// End of the window (exclusive).
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        assert!(start <= end, "TimeWindow start must be <= end");
        Self { start, end }
    }

    /// Creates the default fetch window: a rolling week anchored one day in
    /// the past, `[yesterday 00:00, yesterday 00:00 + 7 days)`.
    pub fn rolling_week(today: NaiveDate) -> Self {
        let anchor = today
            .pred_opt()
            .expect("valid predecessor date")
            .and_hms_opt(0, 0, 0)
            .expect("valid time");
        Self::new(anchor, anchor + Duration::days(7))
    }

    /// Returns the duration of this window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if a date-time falls within this window.
    ///
    /// Uses half-open interval semantics: `[start, end)`.
    pub fn contains(&self, dt: NaiveDateTime) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Epoch seconds of the window start, for the wire query parameters.
    pub fn start_epoch(&self) -> i64 {
        local_epoch(self.start)
    }

    /// Epoch seconds of the window end, for the wire query parameters.
    pub fn end_epoch(&self) -> i64 {
        local_epoch(self.end)
    }
}
