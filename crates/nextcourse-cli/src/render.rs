//! Output rendering for selected courses.
//!
//! Two formats: a human-readable block per course, and a JSON array with
//! epoch-second timestamps for scripting. Courses whose times did not parse
//! are shown with the original wire strings instead of being dropped.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;
use serde_json::{Map, Value};

use nextcourse_core::{Course, CourseTime};

const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The output format for course display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// One course in JSON output; `start`/`end` are epoch seconds when parsed,
/// the original wire strings otherwise.
#[derive(Serialize)]
struct JsonCourse<'a> {
    title: &'a str,
    teacher: &'a str,
    room: &'a str,
    start: Value,
    end: Value,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

/// Renders courses in the requested format.
pub fn render(courses: &[Course], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Tty => Ok(render_tty(courses)),
        OutputFormat::Json => render_json(courses),
    }
}

fn render_tty(courses: &[Course]) -> String {
    let mut out = String::new();
    for course in courses {
        out.push_str(&course.title);
        out.push('\n');
        out.push_str("    ");
        out.push_str(&course.room);
        out.push('\n');
        out.push_str("    ");
        out.push_str(&span(course));
        out.push('\n');
        out.push('\n');
    }
    out
}

/// Formats the course span like `Mon 2 Mar: 10h0-12h0`.
fn span(course: &Course) -> String {
    match (course.start.as_instant(), course.end.as_instant()) {
        (Some(start), Some(end)) => format!(
            "{} {} {}: {}-{}",
            DAYS[start.weekday().num_days_from_monday() as usize],
            start.day(),
            MONTHS[start.month0() as usize],
            clock(start),
            clock(end),
        ),
        _ => format!("{} - {}", course.start, course.end),
    }
}

fn clock(dt: NaiveDateTime) -> String {
    format!("{}h{}", dt.hour(), dt.minute())
}

fn render_json(courses: &[Course]) -> Result<String, String> {
    let json_courses: Vec<JsonCourse<'_>> = courses
        .iter()
        .map(|c| JsonCourse {
            title: &c.title,
            teacher: &c.teacher,
            room: &c.room,
            start: epoch_or_raw(&c.start),
            end: epoch_or_raw(&c.end),
            extra: &c.extra,
        })
        .collect();

    serde_json::to_string_pretty(&json_courses).map_err(|e| e.to_string())
}

fn epoch_or_raw(time: &CourseTime) -> Value {
    match time.epoch_local() {
        Some(epoch) => Value::from(epoch),
        None => Value::from(time.to_string()),
    }
}
