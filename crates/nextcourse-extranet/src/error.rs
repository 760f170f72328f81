//! Error types for portal operations.
//!
//! The taxonomy distinguishes failures a caller can act on differently:
//! an unreachable server (retry later), a broken session-cookie contract
//! (give up for this run), rejected credentials (ask for new ones), and a
//! malformed record (upstream data format changed). None of these are
//! retried internally.

use thiserror::Error;

/// An error from the extranet portal client.
#[derive(Debug, Error)]
pub enum ExtranetError {
    /// The transport could not reach the portal at all.
    #[error("cannot establish a connection to the portal: {0}")]
    Connection(#[source] reqwest::Error),

    /// The server responded but did not issue the expected session cookie.
    /// The session contract changed; not recoverable within this run.
    #[error("connected but the server did not issue the expected session cookie")]
    SessionContract,

    /// Credentials were rejected, or the server withheld the auth cookie.
    #[error("login failed: the server did not issue the authentication cookie")]
    Login,

    /// A fetched record's title does not match the expected
    /// `"<title> - <teacher> - <room>"` structure.
    #[error("course title does not match the \"<title> - <teacher> - <room>\" pattern: {0:?}")]
    Normalization(String),

    /// The server responded with something other than the expected shape.
    #[error("unexpected response from the portal: {0}")]
    InvalidResponse(String),

    /// The configured base URL (or a path joined onto it) is invalid.
    #[error("invalid portal URL: {0}")]
    Url(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("failed to build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ExtranetError {
    /// Returns true if the operation may succeed when simply retried later.
    ///
    /// Only transport-level failures qualify; the client itself never
    /// retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// A specialized Result type for portal operations.
pub type ExtranetResult<T> = Result<T, ExtranetError>;
