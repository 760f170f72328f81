//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use nextcourse_core::{Selection, SelectionError};

/// nextcourse - Your timetable at a glance
#[derive(Debug, Parser)]
#[command(name = "nextcourse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Which courses to print: "current", "next", "previous", a count of
    /// upcoming courses, a signed day offset, "today" or "tomorrow".
    /// Omit to print the whole week.
    pub period: Option<String>,

    /// Path to configuration file
    #[arg(long, short, env = "NEXTCOURSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Portal base URL (overrides the configured one)
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// Output in JSON format
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Dump,
    /// Print the configuration file path
    Path,
}

/// Parses the PERIOD argument into a selection.
///
/// `today` and `tomorrow` are CLI sugar for day offsets 0 and 1; they cannot
/// be plain tokens because `"0"` already means "the current course".
pub fn parse_period(period: Option<&str>) -> Result<Selection, SelectionError> {
    match period {
        Some("today") => Ok(Selection::DayOffset(0)),
        Some("tomorrow") => Ok(Selection::DayOffset(1)),
        other => Selection::parse(other),
    }
}
