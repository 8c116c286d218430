//! Line classification patterns for transcript text
//!
//! Transcript exports separate fields with irregular runs of whitespace, so
//! course lines are matched in two steps: a cheap prefix check on the raw
//! line, then a stricter field extraction over a copy with every run of 3+
//! spaces collapsed into a single `#` delimiter.

use regex::Regex;

use crate::Result;

/// Raw fields extracted from one course line
#[derive(Debug, Clone, PartialEq)]
pub struct CourseFields {
    pub prefix: String,
    pub number: String,
    pub name: String,
    pub mark: String,
    pub grade_name: String,
}

/// Compiled patterns for the recognized transcript line categories
#[derive(Debug)]
pub struct LinePatterns {
    name_zid: Regex,
    type_program: Regex,
    term_header: Regex,
    course_start: Regex,
    course_fields: Regex,
    wide_gap: Regex,
}

impl LinePatterns {
    /// Compile the line classification patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            name_zid: Regex::new(r"\W?([\w\-.' ]+) \((\d{7})\)")?,
            type_program: Regex::new(r"(?i)^([\w\-]+)\s{5,}(\d{4}\s+\w.*)$")?,
            term_header: Regex::new(r"(?i)^\s*((?:term|semester|summer).+?)\s*(\d{4})\s*$")?,
            course_start: Regex::new(r"(?i)^\s*\w{4} ?\d{4}\s*")?,
            course_fields: Regex::new(
                r"^[#\s]*(\w{4}) ?(\d{4})[#\s]*((?:[\w:.,\-()]+ ?)+)(?:#(\d{2,3}))?(?:#([\w ]+))?",
            )?,
            wide_gap: Regex::new(r"\s{3,}")?,
        })
    }

    /// Match a name + parenthesized 7-digit identifier line
    ///
    /// Returns the trimmed name and the identifier.
    pub fn match_name_zid(&self, line: &str) -> Option<(String, String)> {
        let caps = self.name_zid.captures(line)?;
        Some((caps[1].trim().to_string(), caps[2].to_string()))
    }

    /// Match an enrolment-type / program line
    ///
    /// The enrolment type is a single short token separated from the program
    /// description by a wide gap; the program text starts with a 4-digit
    /// program code.
    pub fn match_type_program(&self, line: &str) -> Option<(String, String)> {
        let caps = self.type_program.captures(line)?;
        Some((caps[1].to_string(), caps[2].to_string()))
    }

    /// Match a term header line and return its canonical term key
    ///
    /// The trailing 4-digit year is moved to the front and the key is
    /// uppercased, e.g. "Term 1 2024" becomes "2024 TERM 1".
    pub fn match_term_header(&self, line: &str) -> Option<String> {
        let caps = self.term_header.captures(line)?;
        let label = caps[1].trim();
        let year = &caps[2];
        Some(format!("{} {}", year, label).to_uppercase())
    }

    /// Match a course line and extract its fields
    ///
    /// Mark and grade name default to empty strings when absent. Lines that
    /// pass the prefix check but defeat field extraction yield `None` and
    /// are skipped by the caller.
    pub fn match_course(&self, line: &str) -> Option<CourseFields> {
        if !self.course_start.is_match(line) {
            return None;
        }

        let collapsed = self.wide_gap.replace_all(line, "#");
        let caps = self.course_fields.captures(&collapsed)?;

        Some(CourseFields {
            prefix: caps[1].to_string(),
            number: caps[2].to_string(),
            name: caps[3].trim().to_string(),
            mark: caps.get(4).map_or(String::new(), |m| m.as_str().trim().to_string()),
            grade_name: caps
                .get(5)
                .map_or(String::new(), |m| m.as_str().trim().to_string()),
        })
    }
}
