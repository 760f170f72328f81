//! Credential acquisition.
//!
//! The session only wants a resolved `(username, password)` pair; where it
//! comes from is pluggable behind [`CredentialProvider`] so that the fetch
//! path does not care about config files or secret stores.

use nextcourse_extranet::Credentials;

use crate::config::CliConfig;
use crate::secret;

/// An opaque source of portal credentials.
pub trait CredentialProvider {
    /// Produces a resolved username/password pair.
    fn provide(&self) -> Result<Credentials, String>;
}

/// Credentials from the config file, with secret references resolved.
pub struct ConfigCredentials<'a> {
    config: &'a CliConfig,
}

impl<'a> ConfigCredentials<'a> {
    pub fn new(config: &'a CliConfig) -> Self {
        Self { config }
    }
}

impl CredentialProvider for ConfigCredentials<'_> {
    fn provide(&self) -> Result<Credentials, String> {
        let username = self
            .config
            .account
            .username
            .clone()
            .ok_or_else(|| "no username configured (set [account] username)".to_string())?;
        let reference = self
            .config
            .account
            .password
            .as_deref()
            .ok_or_else(|| "no password configured (set [account] password)".to_string())?;
        let password = secret::resolve(reference)?;
        Ok(Credentials::new(username, password))
    }
}
