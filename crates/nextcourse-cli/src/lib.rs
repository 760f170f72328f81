//! CLI internals: argument parsing, config, credentials, rendering.

pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod render;
pub mod secret;
