//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GADBase - Gender and Development demographics tracker
///
/// Field staff submit per-office demographic headcounts from the command
/// line; administrators view aggregated rollups and can request an
/// AI-generated narrative analysis of the database.
///
/// Examples:
///   gadbase submit --office off_01 --youth 120,135 --adults 300,280
///   gadbase stats
///   gadbase records
///   gadbase report
///   gadbase init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path of the record store file
    ///
    /// Overrides the [store] path from .gadbase.toml.
    #[arg(long, value_name = "FILE", global = true)]
    pub store: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .gadbase.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Top-level subcommands. Submission and analytics are separate commands
/// the way the original portal separated the field-staff and admin roles.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Submit one office's demographic headcounts
    Submit(SubmitArgs),
    /// Show aggregated dashboard statistics
    Stats,
    /// List all submission records, most recent first
    Records,
    /// List the known offices
    Offices,
    /// Generate an AI narrative analysis of the database
    Report(ReportArgs),
    /// Generate a default .gadbase.toml configuration file
    InitConfig,
}

/// Arguments for the `submit` subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Office id the data belongs to (see `gadbase offices`)
    #[arg(short, long, value_name = "ID")]
    pub office: String,

    /// Male,female counts for ages 0-14
    #[arg(long, value_name = "M,F", default_value = "0,0")]
    pub children: String,

    /// Male,female counts for ages 15-24
    #[arg(long, value_name = "M,F", default_value = "0,0")]
    pub youth: String,

    /// Male,female counts for ages 25-59
    #[arg(long, value_name = "M,F", default_value = "0,0")]
    pub adults: String,

    /// Male,female counts for ages 60+
    #[arg(long, value_name = "M,F", default_value = "0,0")]
    pub seniors: String,

    /// Optional free-text notes attached to the record
    #[arg(short, long, value_name = "TEXT")]
    pub notes: Option<String>,
}

/// Arguments for the `report` subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct ReportArgs {
    /// Gemini model to use for the analysis
    ///
    /// Can also be set via the [model] section of .gadbase.toml.
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,

    /// Gemini API base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Gemini API key
    ///
    /// Sourced from the environment; never stored in configuration files.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match self.command {
            Command::Submit(ref submit) => {
                if submit.office.trim().is_empty() {
                    return Err("Office id must not be empty".to_string());
                }
            }
            Command::Report(ref report) => {
                if let Some(ref api_url) = report.api_url {
                    if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
                        return Err(
                            "API URL must start with 'http://' or 'https://'".to_string()
                        );
                    }
                }
                if let Some(timeout) = report.timeout {
                    if timeout == 0 {
                        return Err("Timeout must be at least 1 second".to_string());
                    }
                }
            }
            Command::Stats | Command::Records | Command::Offices | Command::InitConfig => {}
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
