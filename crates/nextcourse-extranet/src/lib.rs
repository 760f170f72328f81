//! Blocking client for the extranet timetable portal.
//!
//! The portal authenticates with cookies: a first GET against the origin
//! yields an ASP.NET session cookie, a login POST upgrades it with an
//! authentication cookie, and only then may the calendar and document
//! endpoints be called. [`ExtranetSession`] models this as an explicit
//! state machine and triggers the missing transitions on demand, so a
//! stateless CLI can call [`ExtranetSession::timetable`] directly.

pub mod documents;
pub mod error;
pub mod normalize;
pub mod raw;
pub mod session;

pub use error::{ExtranetError, ExtranetResult};
pub use raw::RawCourse;
pub use session::{Credentials, ExtranetSession, SessionState};
