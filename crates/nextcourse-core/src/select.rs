//! Relative-time selection over a sorted timetable.
//!
//! A selection token ("current", "next", "previous", a count, a day offset)
//! picks a subset of a chronologically ascending course list. The reference
//! instant is always passed in by the caller and captured once per call, so
//! the engine stays pure and every comparison sees the same "now".

use chrono::{Datelike, NaiveDateTime};
use thiserror::Error;

use crate::course::Course;

/// Errors raised while parsing a selection token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The token is neither a known keyword nor an integer.
    #[error("invalid selection token: {0}")]
    InvalidToken(String),
}

/// A parsed selection token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// No token: the whole timetable, unchanged.
    All,
    /// `"current"` or `"0"`: the course in progress right now, if any.
    Current,
    /// `"next"`: the first course starting after now.
    Next,
    /// `"previous"`: the most recent course that has already ended.
    /// A course in progress is never "previous".
    Previous,
    /// A digits-only token `n`: the first `n` courses starting after now.
    Upcoming(usize),
    /// Any other integer token: keep courses whose start day-of-month is
    /// `<= today's day-of-month + offset`.
    ///
    /// Known approximation: the comparison ignores month and year rollover,
    /// so results near the end of a month include nothing from the next one.
    DayOffset(i64),
}

impl Selection {
    /// Parses a selection token.
    ///
    /// `None` and the empty string select everything. A digits-only token is
    /// a count of upcoming courses; any other token that parses as an
    /// integer (signed, so including `"-1"` and `"+2"`) is a day offset.
    pub fn parse(token: Option<&str>) -> Result<Self, SelectionError> {
        let token = match token {
            None => return Ok(Self::All),
            Some("") => return Ok(Self::All),
            Some(t) => t,
        };

        match token {
            "current" | "0" => Ok(Self::Current),
            "next" => Ok(Self::Next),
            "previous" => Ok(Self::Previous),
            _ if token.bytes().all(|b| b.is_ascii_digit()) => token
                .parse::<usize>()
                .map(Self::Upcoming)
                .map_err(|_| SelectionError::InvalidToken(token.to_string())),
            _ => token
                .parse::<i64>()
                .map(Self::DayOffset)
                .map_err(|_| SelectionError::InvalidToken(token.to_string())),
        }
    }

    /// Applies this selection to a chronologically ascending course list.
    ///
    /// `now` is the reference instant for every comparison. Courses with
    /// unparsed start or end times never match a range comparison; they are
    /// only returned by [`Selection::All`].
    pub fn apply(&self, courses: &[Course], now: NaiveDateTime) -> Vec<Course> {
        match *self {
            Self::All => courses.to_vec(),
            Self::Current => courses
                .iter()
                .find(|c| c.is_ongoing_at(now))
                .cloned()
                .into_iter()
                .collect(),
            Self::Next => courses
                .iter()
                .find(|c| c.starts_after(now))
                .cloned()
                .into_iter()
                .collect(),
            // Scan backwards so that a course still in progress is skipped
            // rather than reported as the previous one.
            Self::Previous => courses
                .iter()
                .rev()
                .find(|c| c.ended_by(now))
                .cloned()
                .into_iter()
                .collect(),
            Self::Upcoming(n) => courses
                .iter()
                .filter(|c| c.starts_after(now))
                .take(n)
                .cloned()
                .collect(),
            Self::DayOffset(offset) => {
                let limit = i64::from(now.day()) + offset;
                courses
                    .iter()
                    .filter(|c| {
                        c.start
                            .day_of_month()
                            .is_some_and(|day| i64::from(day) <= limit)
                    })
                    .cloned()
                    .collect()
            }
        }
    }
}

/// Parses `token` and applies it to `courses` in one call.
///
/// This is the consumer-facing entry point: the caller fetches and sorts a
/// timetable, captures `now` once, and hands all three over.
pub fn select(
    courses: &[Course],
    token: Option<&str>,
    now: NaiveDateTime,
) -> Result<Vec<Course>, SelectionError> {
    Ok(Selection::parse(token)?.apply(courses, now))
}
