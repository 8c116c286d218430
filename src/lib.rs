//! Transcript Processor Library
//!
//! A Rust library for extracting structured academic records from
//! plain-text college transcript exports and computing weighted-average-mark
//! (WAM) statistics per residential college and academic term.
//!
//! This library provides tools for:
//! - Parsing loosely formatted transcript text with a single-pass line scanner
//! - Reconstructing multi-line, multi-page student records
//! - Translating between compact term codes and descriptive term names
//! - Computing per-term and overall WAMs for every student
//! - Identifying cohort extremes (top WAM, best subject, honour roll,
//!   underperformers) per college and term
//! - Rendering human, CSV and JSON reports

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod report;
        pub mod statistics;
        pub mod term_codes;
        pub mod transcript_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Course, Student};
pub use config::Config;

/// Result type alias for the transcript processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for transcript processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Report rendering or writing error
    #[error("Report writing error: {message}")]
    ReportWriting {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::ReportWriting {
            message: "CSV report writing failed".to_string(),
            source: Box::new(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::ReportWriting {
            message: "JSON report serialization failed".to_string(),
            source: Box::new(error),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(error: regex::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid pattern: {}", error),
        }
    }
}
