//! The authenticated portal session.
//!
//! A session walks through three states:
//!
//! ```text
//! Idle ──connect()──▶ Connected ──login()──▶ Authenticated
//! ```
//!
//! `Idle`: no request has been made. `Connected`: the origin was reached and
//! the ASP.NET session cookie is in the jar. `Authenticated`: the login
//! cookie is present and data endpoints may be called. There are no reverse
//! transitions; a failed transition leaves the prior state untouched.
//!
//! Data operations call `ensure_authenticated` first, so the missing
//! transitions run on demand and a fresh session can serve a fetch in one
//! call.

use std::fmt;
use std::sync::Arc;

use chrono::Local;
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use serde::Serialize;
use tracing::debug;

use nextcourse_core::{Course, TimeWindow};

use crate::error::{ExtranetError, ExtranetResult};
use crate::normalize;
use crate::raw::RawCourse;

/// Default portal origin.
pub const DEFAULT_BASE_URL: &str = "https://extranet.efrei.fr";

/// Fixed identifying user-agent, sent on every request.
const USER_AGENT: &str = "Mozilla/5.0 (nextcourse)";

/// Login endpoint; credentials go in the query string, not the body.
const LOGIN_PATH: &str = "/Users/Account/DoLogin";

/// Calendar endpoint; takes `start`/`end` epoch-second parameters.
const EVENTS_PATH: &str = "/Student/Calendar/GetStudentEvents";

/// Cookie proving the server created a session.
const SESSION_COOKIE: &str = "ASP.NET_SessionId";

/// Cookie proving the login was accepted.
const AUTH_COOKIE: &str = "extranet_db";

/// A resolved username/password pair.
///
/// How these are obtained (config file, secret store, prompt) is the
/// caller's concern; the session treats them as opaque strings.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// The authentication state of a session.
///
/// Ordered so that "ensure state >= X" reads as a plain comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    /// No network session created yet.
    Idle,
    /// Session cookie confirmed present.
    Connected,
    /// Authentication cookie confirmed present.
    Authenticated,
}

/// A cookie-bearing session against a single portal origin.
///
/// Owned by one logical run of the tool; blocking I/O, no internal locking,
/// no retries.
pub struct ExtranetSession {
    http: reqwest::blocking::Client,
    jar: Arc<Jar>,
    base_url: Url,
    credentials: Credentials,
    state: SessionState,
}

impl fmt::Debug for ExtranetSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtranetSession")
            .field("base_url", &self.base_url.as_str())
            .field("state", &self.state)
            .finish()
    }
}

impl ExtranetSession {
    /// Creates an idle session for the given origin and credentials.
    ///
    /// No network traffic happens until the first operation.
    pub fn new(base_url: &str, credentials: Credentials) -> ExtranetResult<Self> {
        let base_url = Url::parse(base_url)?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(ExtranetError::Client)?;

        Ok(Self {
            http,
            jar,
            base_url,
            credentials,
            state: SessionState::Idle,
        })
    }

    /// Returns the current authentication state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Establishes the underlying session: a GET against the origin whose
    /// only purpose is to obtain the session cookie.
    ///
    /// Idempotent; a no-op when already connected.
    ///
    /// # Errors
    ///
    /// [`ExtranetError::Connection`] when the origin is unreachable,
    /// [`ExtranetError::SessionContract`] when it answered without issuing
    /// the session cookie.
    pub fn connect(&mut self) -> ExtranetResult<()> {
        if self.state >= SessionState::Connected {
            return Ok(());
        }

        let response = self
            .http
            .get(self.base_url.clone())
            .send()
            .map_err(ExtranetError::Connection)?;
        debug!(status = %response.status(), "bootstrap GET against the portal origin");

        if !self.has_cookie(SESSION_COOKIE) {
            return Err(ExtranetError::SessionContract);
        }

        self.state = SessionState::Connected;
        debug!("session established");
        Ok(())
    }

    /// Submits credentials to the login endpoint. Exactly one attempt.
    ///
    /// Connects first if needed. On success the session is `Authenticated`;
    /// on [`ExtranetError::Login`] it stays `Connected`.
    pub fn login(&mut self) -> ExtranetResult<()> {
        self.ensure_connected()?;

        let url = self.endpoint(LOGIN_PATH)?;
        let auth_info = [
            ("username", self.credentials.username.as_str()),
            ("password", self.credentials.password.as_str()),
        ];
        let response = self
            .http
            .post(url)
            .query(&auth_info)
            .send()
            .map_err(ExtranetError::Connection)?;
        debug!(status = %response.status(), "login attempt");

        if !self.has_cookie(AUTH_COOKIE) {
            return Err(ExtranetError::Login);
        }

        self.state = SessionState::Authenticated;
        debug!(username = %self.credentials.username, "authenticated");
        Ok(())
    }

    /// Fetches the raw calendar records for a window and normalizes them.
    ///
    /// Logs in first if needed. Records come back in server-delivered
    /// order, which is not guaranteed chronological; callers sort before
    /// selecting.
    pub fn fetch_courses(&mut self, window: &TimeWindow) -> ExtranetResult<Vec<Course>> {
        let query = [
            ("start", window.start_epoch()),
            ("end", window.end_epoch()),
        ];
        let body = self.authenticated_get(EVENTS_PATH, &query)?;

        let raws: Vec<RawCourse> = serde_json::from_str(&body).map_err(|e| {
            ExtranetError::InvalidResponse(format!(
                "calendar endpoint did not return a JSON array of records: {e}"
            ))
        })?;

        let courses = normalize::normalize_courses(&raws)?;
        debug!(count = courses.len(), "fetched timetable window");
        Ok(courses)
    }

    /// Fetches the default rolling-week timetable: a window anchored one
    /// day in the past and spanning seven days.
    pub fn timetable(&mut self) -> ExtranetResult<Vec<Course>> {
        let window = TimeWindow::rolling_week(Local::now().date_naive());
        self.fetch_courses(&window)
    }

    /// Performs an authenticated GET against a portal path and returns the
    /// body, triggering connect/login as needed.
    pub(crate) fn authenticated_get<Q: Serialize + ?Sized>(
        &mut self,
        path: &str,
        query: &Q,
    ) -> ExtranetResult<String> {
        self.ensure_authenticated()?;

        let url = self.endpoint(path)?;
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .map_err(ExtranetError::Connection)?;

        response
            .text()
            .map_err(|e| ExtranetError::InvalidResponse(format!("failed to read response: {e}")))
    }

    fn ensure_connected(&mut self) -> ExtranetResult<()> {
        if self.state < SessionState::Connected {
            self.connect()?;
        }
        Ok(())
    }

    fn ensure_authenticated(&mut self) -> ExtranetResult<()> {
        if self.state < SessionState::Authenticated {
            self.login()?;
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> ExtranetResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Checks the jar for a cookie by name, scoped to the portal origin.
    fn has_cookie(&self, name: &str) -> bool {
        let Some(header) = self.jar.cookies(&self.base_url) else {
            return false;
        };
        let Ok(raw) = header.to_str() else {
            return false;
        };
        raw.split(';')
            .any(|pair| pair.trim().split('=').next() == Some(name))
    }
}
