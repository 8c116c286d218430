//! Transcript line parser for plain-text academic transcript exports
//!
//! This module provides a single-pass parser for the loosely formatted,
//! line-oriented text produced by transcript exports. The parser
//! reconstructs multi-line, multi-page student records and hands back an
//! identifier-keyed student collection ready for WAM computation.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Core parsing state machine and file handling
//! - [`line_matchers`] - Line classification patterns and field extraction
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use std::io::Cursor;
//! use transcript_processor::app::services::transcript_parser::TranscriptParser;
//!
//! # fn example() -> transcript_processor::Result<()> {
//! let parser = TranscriptParser::new("BASS")?;
//! let mut all_terms = BTreeSet::new();
//! let text = "Jane A Doe (1234567)\nTerm 1 2024\n";
//! let result = parser.parse_lines(Cursor::new(text), &mut all_terms)?;
//!
//! println!("Parsed {} students from {} lines",
//!          result.student_count(),
//!          result.stats.lines_scanned);
//! # Ok(())
//! # }
//! ```

pub mod line_matchers;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::TranscriptParser;
pub use stats::{ParseResult, ParseStats};
