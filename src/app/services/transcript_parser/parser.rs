//! Core transcript parsing state machine
//!
//! A single-pass, forward-only scan over transcript lines. The machine
//! holds at most one in-progress student record at a time; starting a new
//! record finalizes the previous one into the result map. The most recently
//! registered term key persists across record boundaries because course
//! lines on a continuation page belong to the last term header printed,
//! which may sit on an earlier page.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use super::line_matchers::LinePatterns;
use super::stats::{ParseResult, ParseStats};
use crate::app::models::{Course, Student};
use crate::constants::UNKNOWN_TERM_KEY;
use crate::{Error, Result};

/// Parser for plain-text transcript exports of one college
///
/// Line categories are tested in priority order on every line; a line may
/// match more than one category and trigger more than one action. Lines
/// matching no category are skipped without error.
#[derive(Debug)]
pub struct TranscriptParser {
    college: String,
    patterns: LinePatterns,
}

impl TranscriptParser {
    /// Create a parser that stamps records with the given college code
    pub fn new(college: &str) -> Result<Self> {
        Ok(Self {
            college: college.trim().to_string(),
            patterns: LinePatterns::new()?,
        })
    }

    /// Parse a transcript text file
    ///
    /// Term keys encountered are added to `all_terms`, which is shared
    /// across files so that callers accumulate every term observed in a
    /// whole data set.
    pub fn parse_file(&self, file_path: &Path, all_terms: &mut BTreeSet<String>) -> Result<ParseResult> {
        info!("Parsing transcript file: {}", file_path.display());

        let file = File::open(file_path).map_err(|e| {
            Error::io(format!("Failed to open {}", file_path.display()), e)
        })?;
        self.parse_lines(BufReader::new(file), all_terms)
    }

    /// Parse transcript lines from any line-oriented source
    pub fn parse_lines<R: BufRead>(
        &self,
        reader: R,
        all_terms: &mut BTreeSet<String>,
    ) -> Result<ParseResult> {
        let mut students: IndexMap<String, Student> = IndexMap::new();
        let mut stats = ParseStats::new();
        let mut active: Option<Student> = None;
        let mut current_term: Option<String> = None;

        for line in reader.lines() {
            let line = line.map_err(|e| Error::io("Failed to read transcript line", e))?;
            stats.lines_scanned += 1;

            // Name + identifier line
            if let Some((name, zid)) = self.patterns.match_name_zid(&line) {
                if active.as_ref().is_some_and(|s| s.zid == zid) {
                    // Continuation page for the record already in progress
                    stats.continuation_pages += 1;
                    continue;
                }
                if let Some(previous) = active.take() {
                    students.insert(previous.zid.clone(), previous);
                }
                debug!("New student record: {} ({})", name, zid);
                active = Some(Student::new(&name, &zid, &self.college));
            }

            // Enrolment type and program line
            if let Some((enrol_type, program)) = self.patterns.match_type_program(&line) {
                match active.as_mut() {
                    Some(student) => student.set_enrolment(&enrol_type, &program),
                    None => debug!("Enrolment line before any student record: {}", line.trim()),
                }
            }

            // Term header line
            if let Some(term_key) = self.patterns.match_term_header(&line) {
                all_terms.insert(term_key.clone());
                if let Some(student) = active.as_mut() {
                    student.register_term(&term_key);
                }
                current_term = Some(term_key);
            }

            // Course line
            if let Some(fields) = self.patterns.match_course(&line) {
                let Some(student) = active.as_mut() else {
                    debug!("Course line before any student record: {}", line.trim());
                    continue;
                };
                let term_key = match &current_term {
                    Some(term) => term.clone(),
                    None => {
                        warn!(
                            "Course line before any term header, filing under '{}': {}",
                            UNKNOWN_TERM_KEY,
                            line.trim()
                        );
                        stats.unknown_term_courses += 1;
                        UNKNOWN_TERM_KEY.to_string()
                    }
                };
                student.add_course(
                    &term_key,
                    Course::new(
                        &fields.prefix,
                        &fields.number,
                        &fields.name,
                        &fields.mark,
                        &fields.grade_name,
                    ),
                );
                stats.courses_parsed += 1;
            }
        }

        // End of input finalizes the record in progress
        if let Some(last) = active.take() {
            students.insert(last.zid.clone(), last);
        }
        stats.students_parsed = students.len();

        info!(
            "Parsed {} students and {} courses from {} lines",
            stats.students_parsed, stats.courses_parsed, stats.lines_scanned
        );

        Ok(ParseResult { students, stats })
    }
}
