//! Per-term aggregate statistics and ranked lists
//!
//! Students are scanned once in document order. The top-WAM list is kept
//! current while course marks are examined, because the best-subject
//! carve-out depends on whether the mark holder is currently the WAM
//! leader: a student already holding the top WAM has their best mark held
//! aside as an honourable second award, so one student does not monopolize
//! both highlighted categories when a runner-up subject performer exists.

use indexmap::IndexMap;
use serde::Serialize;

use crate::app::models::{Course, Student};
use crate::constants::{HONOUR_ROLL_MIN_HDS, UNDERPERFORM_WAM_THRESHOLD};

/// One entry in the top-WAM ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopWamEntry {
    pub zid: String,
    pub wam: f64,
}

/// One entry in the best-subject ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSubjectEntry {
    pub zid: String,
    /// Combined course code and name, e.g. "COMP1511 Programming Fundamentals"
    pub subject: String,
    pub mark: u32,
}

/// One honour roll mention
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HonourRollEntry {
    pub zid: String,
    pub hd_count: usize,
    pub course_count: usize,
}

/// Aggregate and extremal statistics for one college and term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermStatistics {
    /// Term key the statistics were computed for
    pub term: String,

    /// Mean of all present student WAMs; `None` when no student has data
    pub average_wam: Option<f64>,

    /// Students tied for the highest term WAM, all ties retained
    pub top_wam: Vec<TopWamEntry>,

    /// Highest individual course marks; a top-WAM holder's entry is
    /// prepended rather than displacing the runner-up subject leader
    pub top_subjects: Vec<TopSubjectEntry>,

    /// Students with two or more High Distinction grades in the term
    pub honour_roll: Vec<HonourRollEntry>,

    /// Students with a failing-category grade or a WAM below the
    /// underperformance threshold, mapped to their term course list
    pub underperformers: IndexMap<String, Vec<Course>>,
}

impl TermStatistics {
    /// Check whether any student had data for the term
    pub fn has_data(&self) -> bool {
        self.average_wam.is_some()
    }
}

/// Compute statistics for one term over a college's student collection
///
/// Expects [`Student::process_wams`] to have run; students whose WAM entry
/// is absent are treated as having no WAM for the term. Students not
/// enrolled in the term are skipped entirely.
pub fn term_statistics(students: &IndexMap<String, Student>, term: &str) -> TermStatistics {
    let mut average_total = 0.0;
    let mut average_count = 0usize;
    let mut top_wam: Vec<TopWamEntry> = Vec::new();
    let mut top_subjects: Vec<TopSubjectEntry> = Vec::new();
    let mut second_award: Option<TopSubjectEntry> = None;
    let mut honour_roll: Vec<HonourRollEntry> = Vec::new();
    let mut underperformers: IndexMap<String, Vec<Course>> = IndexMap::new();

    for (zid, student) in students {
        let Some(courses) = student.terms.get(term) else {
            continue;
        };

        let wam = student.wams.get(term).copied().flatten();
        if let Some(wam) = wam {
            let current_best = top_wam.first().map(|e| e.wam);
            let entry = TopWamEntry { zid: zid.clone(), wam };
            match current_best {
                None => top_wam.push(entry),
                Some(best) if wam > best => {
                    top_wam.clear();
                    top_wam.push(entry);
                }
                Some(best) if wam == best => top_wam.push(entry),
                Some(_) => {}
            }
            average_total += wam;
            average_count += 1;
        }

        let mut hd_count = 0usize;
        let mut fail_count = 0usize;
        for course in courses {
            if let Some(mark) = course.mark() {
                let current_best = top_subjects.first().map_or(0, |e| e.mark);
                if mark >= current_best {
                    let entry = TopSubjectEntry {
                        zid: zid.clone(),
                        subject: format!("{} {}", course.code, course.name),
                        mark,
                    };
                    if top_wam.iter().any(|e| e.zid == *zid) {
                        // WAM leader: hold the mark aside, keeping the best one
                        if second_award.as_ref().is_none_or(|held| mark > held.mark) {
                            second_award = Some(entry);
                        }
                    } else {
                        if mark > current_best {
                            top_subjects.clear();
                        }
                        top_subjects.push(entry);
                    }
                }
            }

            if course.is_high_distinction() {
                hd_count += 1;
            } else if course.is_failing() {
                fail_count += 1;
            }
        }

        if hd_count >= HONOUR_ROLL_MIN_HDS {
            honour_roll.push(HonourRollEntry {
                zid: zid.clone(),
                hd_count,
                course_count: courses.len(),
            });
        }

        if fail_count > 0 || wam.is_some_and(|w| w < UNDERPERFORM_WAM_THRESHOLD) {
            underperformers.insert(zid.clone(), courses.clone());
        }
    }

    // The held-aside award only applies while its holder still leads on WAM
    if let Some(award) = second_award {
        if top_wam.iter().any(|e| e.zid == award.zid) {
            top_subjects.insert(0, award);
        }
    }

    let average_wam = if average_count > 0 {
        Some(average_total / average_count as f64)
    } else {
        None
    };

    TermStatistics {
        term: term.to_string(),
        average_wam,
        top_wam,
        top_subjects,
        honour_roll,
        underperformers,
    }
}
