//! RawCourse to Course normalization.
//!
//! Two transformations happen here:
//! 1. The composite subject line `"<title> - <teacher> - <room>"` is split
//!    into its three parts. A line that does not match is an error: the
//!    upstream format changed and silently dropping the record would lose
//!    data.
//! 2. The start/end strings are parsed against the portal's wire format.
//!    A value that does not parse is kept verbatim as [`CourseTime::Raw`];
//!    the selection logic treats it as matching nothing.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use nextcourse_core::{Course, CourseTime};

use crate::error::{ExtranetError, ExtranetResult};
use crate::raw::RawCourse;

/// The portal's date-time wire format. Must be preserved exactly.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Splits the composite subject line; trailing whitespace is tolerated.
static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>.*)\s+-\s+(?P<teacher>.*)\s+-\s+(?P<room>.*?)\s*$")
        .expect("Invalid title regex")
});

/// Parses a wire date-time, falling back to the raw string.
pub fn parse_course_time(value: &str) -> CourseTime {
    match NaiveDateTime::parse_from_str(value, DATE_FORMAT) {
        Ok(dt) => CourseTime::from_instant(dt),
        Err(_) => CourseTime::from_raw(value),
    }
}

/// Normalizes a single raw record into a [`Course`].
///
/// # Errors
///
/// Returns [`ExtranetError::Normalization`] when the subject line does not
/// match the three-part pattern.
pub fn normalize_course(raw: &RawCourse) -> ExtranetResult<Course> {
    let captures = TITLE_PATTERN
        .captures(&raw.title)
        .ok_or_else(|| ExtranetError::Normalization(raw.title.clone()))?;

    let course = Course::new(
        captures["title"].trim(),
        captures["teacher"].trim(),
        captures["room"].trim(),
        parse_course_time(&raw.start),
        parse_course_time(&raw.end),
    )
    .with_extra(raw.extra.clone());

    Ok(course)
}

/// Normalizes a whole response, in server-delivered order.
///
/// One malformed record aborts the operation: a partial timetable is worse
/// than a loud failure.
pub fn normalize_courses(raws: &[RawCourse]) -> ExtranetResult<Vec<Course>> {
    raws.iter().map(normalize_course).collect()
}
