//! Cohort statistics over parsed student records
//!
//! Consumes a college's identifier-keyed student collection (with WAMs
//! already computed) and produces aggregate and extremal statistics for a
//! single term, plus the cross-term cohort WAM trend.
//!
//! ## Architecture
//!
//! - [`engine`] - Per-term aggregate statistics and ranked lists
//! - [`trend`] - Per-term average WAM trend across the whole data set

pub mod engine;
pub mod trend;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use engine::{HonourRollEntry, TermStatistics, TopSubjectEntry, TopWamEntry, term_statistics};
pub use trend::wam_trend;
