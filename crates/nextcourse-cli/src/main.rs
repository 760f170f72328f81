//! nextcourse CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use nextcourse_cli::cli::{Cli, Command, ConfigAction, parse_period};
use nextcourse_cli::config::CliConfig;
use nextcourse_cli::credentials::{ConfigCredentials, CredentialProvider};
use nextcourse_cli::error::{CliError, CliResult};
use nextcourse_cli::render::{OutputFormat, render};
use nextcourse_extranet::{ExtranetSession, session::DEFAULT_BASE_URL};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = if let Some(ref path) = cli.config {
        CliConfig::load_from(path).map_err(CliError::Config)?
    } else {
        CliConfig::load().map_err(CliError::Config)?
    };

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => {
                print!("{}", config.dump().map_err(CliError::Config)?);
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", CliConfig::default_path().display());
                Ok(())
            }
        },
        None => timetable(&cli, &config),
    }
}

fn timetable(cli: &Cli, config: &CliConfig) -> CliResult<()> {
    // Validate the selection before any network traffic.
    let selection = parse_period(cli.period.as_deref())?;

    let base_url = cli
        .url
        .as_deref()
        .or(config.url.as_deref())
        .unwrap_or(DEFAULT_BASE_URL);
    let credentials = ConfigCredentials::new(config)
        .provide()
        .map_err(CliError::Config)?;

    let mut session = ExtranetSession::new(base_url, credentials)?;
    let mut courses = session.timetable()?;
    nextcourse_core::sort_chronologically(&mut courses);

    // Captured once; every comparison in the selection sees the same "now".
    let now = chrono::Local::now().naive_local();
    let selected = selection.apply(&courses, now);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Tty
    };
    let output = render(&selected, format).map_err(CliError::Render)?;
    if !output.is_empty() {
        print!("{}", output);
        if format == OutputFormat::Json {
            println!();
        }
    }
    Ok(())
}
