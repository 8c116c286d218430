//! Command-line argument definitions for the transcript processor
//!
//! This module defines the complete CLI interface using the clap derive
//! API: the `process`, `terms` and `trend` subcommands plus their shared
//! logging and configuration flags.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use crate::app::services::term_codes;
use crate::{Error, Result};

/// CLI arguments for the transcript processor
///
/// Extracts structured academic records from plain-text college transcript
/// exports and reports per-term WAM statistics.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "transcript-processor",
    version,
    about = "Extract academic records from transcript text and report WAM statistics",
    long_about = "Processes plain-text transcript exports for residential colleges into \
                  structured student records, computes per-term and overall weighted \
                  average marks, and reports cohort statistics: top WAM, best subject, \
                  honour roll mentions and underperformers."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the transcript processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse transcripts and report term statistics (main command)
    Process(ProcessArgs),
    /// List every academic term found in the input data
    Terms(TermsArgs),
    /// Report the per-college WAM trend across all terms
    Trend(TrendArgs),
}

/// Arguments for the process command (main data processing)
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input path to the directory of transcript text exports
    ///
    /// One `.txt` file per college; the college is derived from the first
    /// whitespace-separated token of the file name. If not specified,
    /// defaults to the configured input directory (./data).
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Input path to transcript export directory"
    )]
    pub input_path: Option<PathBuf>,

    /// Output path for generated reports
    ///
    /// Will be created if it doesn't exist. If not specified, defaults to
    /// the configured output directory (current directory).
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output path for generated reports"
    )]
    pub output_path: Option<PathBuf>,

    /// Terms to report (comma-separated list)
    ///
    /// Accepts compact codes (24T1) or descriptive names (2024 TERM 1),
    /// in any mix. If not specified, every term observed in the input is
    /// reported.
    #[arg(
        short = 't',
        long = "terms",
        value_name = "LIST",
        help = "Comma-separated list of terms to report (e.g. 24T1,24T2)"
    )]
    pub terms: Option<TermList>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/transcript-processor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for reports
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for reports"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the terms command (term inventory listing)
#[derive(Debug, Clone, Parser)]
pub struct TermsArgs {
    /// Input path to the directory of transcript text exports
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Input path to transcript export directory"
    )]
    pub input_path: Option<PathBuf>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Arguments for the trend command (cross-term WAM trend)
#[derive(Debug, Clone, Parser)]
pub struct TrendArgs {
    /// Input path to the directory of transcript text exports
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Input path to transcript export directory"
    )]
    pub input_path: Option<PathBuf>,

    /// Output path for generated trend reports
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output path for generated trend reports"
    )]
    pub output_path: Option<PathBuf>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for the trend report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the trend report"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for reports
#[derive(Debug, Clone, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for spreadsheet import
    Csv,
}

/// Wrapper for parsing comma-separated term lists
///
/// Each item is accepted as a compact code or a descriptive name and
/// stored as its canonical descriptive term key.
#[derive(Debug, Clone, PartialEq)]
pub struct TermList {
    pub terms: Vec<String>,
}

impl FromStr for TermList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let items: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if items.is_empty() {
            return Err(Error::data_validation(
                "Term list cannot be empty".to_string(),
            ));
        }

        let mut terms = Vec::with_capacity(items.len());
        for item in items {
            let canonical = term_codes::canonical_term_key(item).ok_or_else(|| {
                Error::data_validation(format!(
                    "Unknown term '{}'. Expected a compact code like 24T1 or a name like '2024 TERM 1'",
                    item
                ))
            })?;
            terms.push(canonical);
        }

        Ok(TermList { terms })
    }
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input_path(self.input_path.as_deref())?;
        validate_config_file(self.config_file.as_deref())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            verbosity_log_level(self.verbose)
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl TermsArgs {
    /// Validate the terms command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input_path(self.input_path.as_deref())?;
        validate_config_file(self.config_file.as_deref())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        verbosity_log_level(self.verbose)
    }
}

impl TrendArgs {
    /// Validate the trend command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input_path(self.input_path.as_deref())?;
        validate_config_file(self.config_file.as_deref())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        verbosity_log_level(self.verbose)
    }
}

fn verbosity_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn validate_input_path(input_path: Option<&std::path::Path>) -> Result<()> {
    if let Some(path) = input_path {
        if !path.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is not a directory: {}",
                path.display()
            )));
        }
    }
    Ok(())
}

fn validate_config_file(config_file: Option<&std::path::Path>) -> Result<()> {
    if let Some(path) = config_file {
        if !path.exists() {
            return Err(Error::configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_term_list_parsing() {
        // Compact codes
        let result = TermList::from_str("24T1").unwrap();
        assert_eq!(result.terms, vec!["2024 TERM 1"]);

        // Mixed compact and descriptive, with spaces
        let result = TermList::from_str("24T1, 2024 term 2 ,19S0").unwrap();
        assert_eq!(
            result.terms,
            vec!["2024 TERM 1", "2024 TERM 2", "2019 SUMMER SEMESTER"]
        );

        // Invalid term
        assert!(TermList::from_str("24X9").is_err());

        // Empty string
        assert!(TermList::from_str("").is_err());

        // Only commas
        assert!(TermList::from_str(",,,").is_err());
    }

    #[test]
    fn test_process_args_validation() {
        let temp_dir = TempDir::new().unwrap();

        let mut args = ProcessArgs {
            input_path: Some(temp_dir.path().to_path_buf()),
            output_path: None,
            terms: None,
            config_file: None,
            output_format: OutputFormat::Human,
            verbose: 0,
            quiet: false,
        };
        assert!(args.validate().is_ok());

        // Nonexistent input path
        args.input_path = Some(PathBuf::from("/nonexistent/path"));
        assert!(args.validate().is_err());

        // Nonexistent config file
        args.input_path = None;
        args.config_file = Some(PathBuf::from("/nonexistent/config.toml"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = ProcessArgs {
            input_path: None,
            output_path: None,
            terms: None,
            config_file: None,
            output_format: OutputFormat::Human,
            verbose: 0,
            quiet: false,
        };

        assert_eq!(args.get_log_level(), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_args_parse_subcommands() {
        let args = Args::parse_from(["transcript-processor", "process", "-t", "24T1", "-vv"]);
        match args.command {
            Some(Commands::Process(process)) => {
                assert_eq!(
                    process.terms.unwrap().terms,
                    vec!["2024 TERM 1".to_string()]
                );
                assert_eq!(process.verbose, 2);
            }
            _ => panic!("expected process subcommand"),
        }

        let args = Args::parse_from(["transcript-processor", "trend", "--format", "csv"]);
        match args.command {
            Some(Commands::Trend(trend)) => {
                assert_eq!(trend.output_format, OutputFormat::Csv);
            }
            _ => panic!("expected trend subcommand"),
        }
    }
}
