//! Core types: courses, time handling, selection logic

pub mod course;
pub mod select;
pub mod time;

pub use course::{Course, sort_chronologically};
pub use select::{Selection, SelectionError, select};
pub use time::{CourseTime, TimeWindow};
