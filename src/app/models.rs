//! Data models for transcript processing
//!
//! This module contains the core data structures for representing a student's
//! academic transcript: enrolled courses, term enrollments and the computed
//! weighted-average-mark (WAM) values derived from them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// Course
// =============================================================================

/// One enrolled subject within one academic term
///
/// Courses are constructed once by the parser and never mutated afterwards.
/// A course is owned by exactly one term entry of exactly one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Subject code: 4-character prefix plus 4-digit number (e.g. "COMP1511")
    pub code: String,

    /// Free-text course name as printed in the transcript
    pub name: String,

    /// Numeric mark as a string, or empty when no mark was awarded
    pub grade: String,

    /// Textual grade category (e.g. "High Distinction", "Fail"), or empty
    pub grade_name: String,
}

impl Course {
    /// Create a course from the raw fields extracted off a transcript line
    ///
    /// All fields are trimmed; the subject prefix and number are joined into
    /// the combined course code.
    pub fn new(prefix: &str, number: &str, name: &str, grade: &str, grade_name: &str) -> Self {
        Self {
            code: format!("{}{}", prefix.trim(), number.trim()),
            name: name.trim().to_string(),
            grade: grade.trim().to_string(),
            grade_name: grade_name.trim().to_string(),
        }
    }

    /// Check whether a numeric mark exists for this course
    pub fn has_grade(&self) -> bool {
        !self.grade.is_empty() && self.grade.bytes().all(|b| b.is_ascii_digit())
    }

    /// Get the numeric mark, if one exists
    pub fn mark(&self) -> Option<u32> {
        if self.has_grade() {
            self.grade.parse().ok()
        } else {
            None
        }
    }

    /// Check whether this course was graded High Distinction
    pub fn is_high_distinction(&self) -> bool {
        crate::constants::is_high_distinction(&self.grade_name)
    }

    /// Check whether this course carries a failing-category grade
    pub fn is_failing(&self) -> bool {
        crate::constants::is_failing_grade_name(&self.grade_name)
    }
}

// =============================================================================
// Student
// =============================================================================

/// One person's full transcript
///
/// Created when the parser first encounters a name+identifier line. Later
/// lines accumulate terms and courses onto the same instance; continuation
/// pages for the same identifier never create a second student. WAM fields
/// are populated by [`Student::process_wams`] after parsing completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// All name tokens except the last, title-cased
    pub first_names: String,

    /// Last whitespace-separated name token, as printed
    pub last_name: String,

    /// 7-digit student identifier; unique key within a college's collection
    pub zid: String,

    /// Canonical college short code
    pub college: String,

    /// Enrolment type (e.g. "Ugrd", "Pgrd"), title-cased
    pub enrol_type: String,

    /// Program description as printed in the transcript
    pub program: String,

    /// Term key to enrolled courses, in document order
    pub terms: IndexMap<String, Vec<Course>>,

    /// Term key to computed WAM; `None` for terms with no graded course
    pub wams: IndexMap<String, Option<f64>>,

    /// Mean of all present per-term WAMs
    pub overall_wam: Option<f64>,
}

impl Student {
    /// Create a new student from a raw name line
    pub fn new(name: &str, zid: &str, college: &str) -> Self {
        let (first_names, last_name) = split_name(name);
        Self {
            first_names: title_case(&first_names),
            last_name,
            zid: zid.trim().to_string(),
            college: college.trim().to_string(),
            enrol_type: String::new(),
            program: String::new(),
            terms: IndexMap::new(),
            wams: IndexMap::new(),
            overall_wam: None,
        }
    }

    /// Set enrolment type and program, overwriting any prior values
    pub fn set_enrolment(&mut self, enrol_type: &str, program: &str) {
        self.enrol_type = title_case(enrol_type.trim());
        self.program = program.trim().to_string();
    }

    /// Register a term with an empty course list if not already present
    pub fn register_term(&mut self, term: &str) {
        self.terms.entry(term.to_string()).or_default();
    }

    /// Append a course to the given term, registering the term if needed
    pub fn add_course(&mut self, term: &str, course: Course) {
        self.terms.entry(term.to_string()).or_default().push(course);
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_name)
    }

    /// Compute the WAM for one term
    ///
    /// Averages the numeric marks of every course in the term that has one,
    /// rounded to one decimal place. Returns `None` when the term is unknown
    /// or contains no graded course.
    pub fn calc_wam(&self, term: &str) -> Option<f64> {
        let courses = self.terms.get(term)?;
        let marks: Vec<f64> = courses
            .iter()
            .filter_map(|c| c.mark())
            .map(f64::from)
            .collect();
        if marks.is_empty() {
            return None;
        }
        Some(round1(marks.iter().sum::<f64>() / marks.len() as f64))
    }

    /// Compute WAMs for every enrolled term, then the overall WAM
    ///
    /// The overall WAM is the mean of the present per-term WAMs only; it
    /// stays `None` when no term produced one.
    pub fn process_wams(&mut self) {
        let term_keys: Vec<String> = self.terms.keys().cloned().collect();
        for term in term_keys {
            let wam = self.calc_wam(&term);
            self.wams.insert(term, wam);
        }

        let present: Vec<f64> = self.wams.values().filter_map(|w| *w).collect();
        self.overall_wam = if present.is_empty() {
            None
        } else {
            Some(round1(present.iter().sum::<f64>() / present.len() as f64))
        };
    }
}

/// Split a raw name: last whitespace token is the last name, the rest are
/// the first names
fn split_name(name: &str) -> (String, String) {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.split_last() {
        Some((last, firsts)) => (firsts.join(" "), (*last).to_string()),
        None => (String::new(), String::new()),
    }
}

/// Title-case a string: letters following a non-alphabetic character are
/// uppercased, all other letters lowercased
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Round to one decimal place
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
