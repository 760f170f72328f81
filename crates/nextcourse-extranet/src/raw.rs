//! Raw calendar records as delivered by the portal.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One record from the calendar endpoint, before normalization.
///
/// Only the three fields the normalizer consumes are named; everything else
/// the server sends is captured in `extra` and passed through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCourse {
    /// Composite subject line: `"<title> - <teacher> - <room>"`.
    pub title: String,
    /// Start date-time string, expected in `YYYY-MM-DDTHH:MM:SS`.
    pub start: String,
    /// End date-time string, same format.
    pub end: String,
    /// Every other field of the record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
