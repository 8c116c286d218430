//! Parsing statistics and result structures for the transcript parser

use indexmap::IndexMap;

use crate::app::models::Student;

/// Statistics for one transcript parsing pass
#[derive(Debug, Clone, PartialEq)]
pub struct ParseStats {
    /// Total number of lines scanned
    pub lines_scanned: usize,
    /// Number of distinct students parsed
    pub students_parsed: usize,
    /// Number of page-continuation name lines skipped
    pub continuation_pages: usize,
    /// Number of course lines parsed
    pub courses_parsed: usize,
    /// Number of course lines filed under the unknown-term sentinel
    pub unknown_term_courses: usize,
}

impl ParseStats {
    /// Create new empty parsing statistics
    pub fn new() -> Self {
        Self {
            lines_scanned: 0,
            students_parsed: 0,
            continuation_pages: 0,
            courses_parsed: 0,
            unknown_term_courses: 0,
        }
    }

    /// Get summary of parsing statistics for logging
    pub fn summary(&self) -> String {
        format!(
            "Parse summary: {} lines -> {} students, {} courses | \
             Continuation pages: {} | Courses without a term header: {}",
            self.lines_scanned,
            self.students_parsed,
            self.courses_parsed,
            self.continuation_pages,
            self.unknown_term_courses
        )
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing one transcript source
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Students keyed by identifier, in document order
    pub students: IndexMap<String, Student>,
    /// Parsing statistics
    pub stats: ParseStats,
}

impl ParseResult {
    /// Get the number of parsed students
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Check whether the source contained any student records
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}
