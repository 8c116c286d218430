//! Test utilities and fixtures for transcript parser testing
//!
//! This module provides shared fixture text used across the matcher and
//! parser test modules.

use std::collections::BTreeSet;
use std::io::Cursor;

use super::parser::TranscriptParser;
use super::stats::ParseResult;


/// A small two-student transcript in the export layout
///
/// Student 1234567 spans a page break: the second name line with the same
/// identifier is a continuation marker, and the course after it belongs to
/// the term registered before the break.
pub fn sample_transcript() -> String {
    [
        "Academic Transcript",
        "Jane A Doe (1234567)",
        "UGRD          3778 Bachelor of Science",
        "Term 1 2024",
        "COMP1511   Programming Fundamentals          85   High Distinction",
        "MATH1131   Mathematics 1A                    72   Distinction",
        "Term 2 2024",
        "COMP1521   Computer Systems Fundamentals     68   Credit",
        "Jane A Doe (1234567)",
        "COMP1531   Software Engineering Fundamentals    74   Credit",
        "John Smith (7654321)",
        "UGRD          3707 Bachelor of Engineering",
        "Term 1 2024",
        "ENGG1000   Engineering Design                55   Pass",
        "PHYS1121   Physics 1A                        48   Fail",
        "",
    ]
    .join("\n")
}

/// Parse fixture text with a parser for the given college
pub fn parse_fixture(college: &str, text: &str) -> (ParseResult, BTreeSet<String>) {
    let parser = TranscriptParser::new(college).expect("patterns compile");
    let mut all_terms = BTreeSet::new();
    let result = parser
        .parse_lines(Cursor::new(text.to_string()), &mut all_terms)
        .expect("fixture parses");
    (result, all_terms)
}
