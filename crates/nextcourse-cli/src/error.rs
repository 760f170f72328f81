//! CLI error types.

use std::fmt;

use nextcourse_core::SelectionError;
use nextcourse_extranet::ExtranetError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Configuration or credential error.
    Config(String),
    /// Portal error (connection, session contract, login, data shape).
    Portal(ExtranetError),
    /// Invalid selection token.
    Selection(SelectionError),
    /// Output serialization error.
    Render(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Portal(err) => write!(f, "{}", err),
            Self::Selection(err) => write!(f, "{}", err),
            Self::Render(msg) => write!(f, "failed to render output: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Portal(err) => Some(err),
            Self::Selection(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExtranetError> for CliError {
    fn from(err: ExtranetError) -> Self {
        Self::Portal(err)
    }
}

impl From<SelectionError> for CliError {
    fn from(err: SelectionError) -> Self {
        Self::Selection(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
