//! The normalized course record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::time::CourseTime;

/// A single scheduled course occurrence, normalized from a portal record.
///
/// Immutable once built: there are no update operations, a timetable is
/// fetched, queried, and discarded. The `extra` map carries every server
/// field that is not part of the normalized shape, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// The raw subject line as delivered by the server.
    pub title: String,
    /// Teacher name, split out of the subject line.
    pub teacher: String,
    /// Room, split out of the subject line.
    pub room: String,
    /// When the course starts.
    pub start: CourseTime,
    /// When the course ends.
    pub end: CourseTime,
    /// Passthrough server fields outside the normalized shape.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Course {
    /// Creates a new course with the normalized fields.
    pub fn new(
        title: impl Into<String>,
        teacher: impl Into<String>,
        room: impl Into<String>,
        start: CourseTime,
        end: CourseTime,
    ) -> Self {
        Self {
            title: title.into(),
            teacher: teacher.into(),
            room: room.into(),
            start,
            end,
            extra: Map::new(),
        }
    }

    /// Builder method to attach passthrough server fields.
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    /// Checks if the course is in progress at the given time
    /// (`start <= now < end`).
    ///
    /// Unparsed start or end times never match.
    pub fn is_ongoing_at(&self, now: NaiveDateTime) -> bool {
        match (self.start.as_instant(), self.end.as_instant()) {
            (Some(start), Some(end)) => start <= now && now < end,
            _ => false,
        }
    }

    /// Checks if the course starts strictly after the given time.
    pub fn starts_after(&self, now: NaiveDateTime) -> bool {
        self.start.as_instant().is_some_and(|start| start > now)
    }

    /// Checks if the course has ended at the given time (`end <= now`).
    pub fn ended_by(&self, now: NaiveDateTime) -> bool {
        self.end.as_instant().is_some_and(|end| end <= now)
    }

    /// Returns the duration in minutes, when both endpoints parsed.
    pub fn duration_minutes(&self) -> Option<i64> {
        let start = self.start.as_instant()?;
        let end = self.end.as_instant()?;
        Some((end - start).num_minutes())
    }
}

/// Sorts a timetable chronologically by start time.
///
/// Unparsed start times sort after every parsed one.
pub fn sort_chronologically(courses: &mut [Course]) {
    courses.sort_by(|a, b| a.start.cmp(&b.start));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn course(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Course {
        Course::new(
            title,
            "Dupont",
            "A101",
            CourseTime::from_instant(start),
            CourseTime::from_instant(end),
        )
    }

    #[test]
    fn ongoing_boundaries() {
        let c = course("Algebra", dt(2, 10, 0), dt(2, 11, 0));
        assert!(!c.is_ongoing_at(dt(2, 9, 59)));
        assert!(c.is_ongoing_at(dt(2, 10, 0)));
        assert!(c.is_ongoing_at(dt(2, 10, 30)));
        assert!(!c.is_ongoing_at(dt(2, 11, 0)));
    }

    #[test]
    fn unparsed_times_never_match() {
        let c = Course::new(
            "Algebra",
            "Dupont",
            "A101",
            CourseTime::from_raw("bogus"),
            CourseTime::from_raw("bogus"),
        );
        assert!(!c.is_ongoing_at(dt(2, 10, 0)));
        assert!(!c.starts_after(dt(2, 10, 0)));
        assert!(!c.ended_by(dt(2, 10, 0)));
        assert_eq!(c.duration_minutes(), None);
    }

    #[test]
    fn duration() {
        let c = course("Algebra", dt(2, 10, 0), dt(2, 11, 30));
        assert_eq!(c.duration_minutes(), Some(90));
    }

    #[test]
    fn sort_puts_unparsed_last() {
        let mut courses = vec![
            Course::new(
                "Broken",
                "?",
                "?",
                CourseTime::from_raw("bogus"),
                CourseTime::from_raw("bogus"),
            ),
            course("Second", dt(2, 12, 0), dt(2, 13, 0)),
            course("First", dt(2, 10, 0), dt(2, 11, 0)),
        ];
        sort_chronologically(&mut courses);
        assert_eq!(courses[0].title, "First");
        assert_eq!(courses[1].title, "Second");
        assert_eq!(courses[2].title, "Broken");
    }

    #[test]
    fn serde_roundtrip_keeps_extra_fields() {
        let mut extra = Map::new();
        extra.insert("id".to_string(), Value::from(7));
        let c = course("Algebra", dt(2, 10, 0), dt(2, 11, 0)).with_extra(extra);

        let json = serde_json::to_string(&c).unwrap();
        let parsed: Course = serde_json::from_str(&json).unwrap();
        assert_eq!(c, parsed);
        assert_eq!(parsed.extra["id"], Value::from(7));
    }
}
