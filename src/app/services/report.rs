//! Report rendering for parsed records and term statistics
//!
//! The reporting layer owns the ordered field-to-column mapping in
//! [`REPORT_COLUMNS`]; record types never dictate column layout. Three
//! formats are supported: human-readable console output (failing grades
//! highlighted in red), CSV data sheets, and a JSON statistics bundle.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::app::models::{Student, title_case};
use crate::app::services::statistics::TermStatistics;
use crate::constants::{MISSING_FIELD_PLACEHOLDER, REPORT_COLUMNS, college_display_name};

/// Render an absent value as the report placeholder
fn or_placeholder(value: &str) -> String {
    if value.is_empty() {
        MISSING_FIELD_PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// Format a WAM to one decimal place, or the placeholder when absent
fn format_wam(wam: Option<f64>) -> String {
    match wam {
        Some(w) => format!("{:.1}", w),
        None => MISSING_FIELD_PLACEHOLDER.to_string(),
    }
}

/// Resolve a display name for an identifier, falling back to the identifier
fn display_name(students: &IndexMap<String, Student>, zid: &str) -> String {
    students
        .get(zid)
        .map(|s| s.full_name())
        .unwrap_or_else(|| zid.to_string())
}

/// Build the data rows for one term, in [`REPORT_COLUMNS`] order
///
/// One row per course; a student's first row carries their identity fields,
/// term and WAM, and the following rows repeat only the course columns.
/// Students not enrolled in the term are omitted.
pub fn student_rows(students: &IndexMap<String, Student>, term: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for student in students.values() {
        let Some(courses) = student.terms.get(term) else {
            continue;
        };

        let wam = student.wams.get(term).copied().flatten();
        let identity = [
            student.first_names.clone(),
            student.last_name.clone(),
            student.zid.clone(),
            student.college.clone(),
            or_placeholder(&student.enrol_type),
            or_placeholder(&student.program),
            title_case(term),
        ];

        if courses.is_empty() {
            let mut row: Vec<String> = identity.to_vec();
            row.extend([String::new(), String::new(), String::new(), String::new()]);
            row.push(format_wam(wam));
            rows.push(row);
            continue;
        }

        for (i, course) in courses.iter().enumerate() {
            let mut row: Vec<String> = if i == 0 {
                identity.to_vec()
            } else {
                vec![String::new(); identity.len()]
            };
            row.push(course.code.clone());
            row.push(or_placeholder(&course.name));
            row.push(or_placeholder(&course.grade));
            row.push(or_placeholder(&course.grade_name));
            row.push(if i == 0 {
                format_wam(wam)
            } else {
                String::new()
            });
            rows.push(row);
        }
    }

    rows
}

/// Write the CSV data sheet for one term
pub fn write_csv_report<W: Write>(
    writer: W,
    students: &IndexMap<String, Student>,
    term: &str,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(REPORT_COLUMNS)?;
    for row in student_rows(students, term) {
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the CSV data sheet for one term to a file
pub fn write_csv_file(
    path: &Path,
    students: &IndexMap<String, Student>,
    term: &str,
) -> Result<()> {
    debug!("Writing CSV report: {}", path.display());
    let file = std::fs::File::create(path)?;
    write_csv_report(file, students, term)
}

/// Render the human-readable statistics report for one college and term
pub fn render_term_report<W: Write>(
    out: &mut W,
    college: &str,
    students: &IndexMap<String, Student>,
    term: &str,
    stats: &TermStatistics,
) -> Result<()> {
    let college_name = college_display_name(college).unwrap_or(college);

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("{}: {}", term, college_name.to_uppercase())
            .bold()
            .underline()
    )?;

    let Some(average_wam) = stats.average_wam else {
        writeln!(out, "{}", "No residents in this term".italic())?;
        return Ok(());
    };

    writeln!(out, "{} {:.2}", "Average WAM:".bold(), average_wam)?;
    writeln!(out)?;

    writeln!(out, "{}", "High Performers:".bold())?;
    writeln!(out, "  {}", "Highest Term WAM".italic())?;
    for entry in &stats.top_wam {
        writeln!(
            out,
            "    {:<28} {:.1}",
            display_name(students, &entry.zid),
            entry.wam
        )?;
    }

    writeln!(out, "  {}", "Best Subject".italic())?;
    for entry in &stats.top_subjects {
        writeln!(
            out,
            "    {:<28} {:<4} {}",
            display_name(students, &entry.zid),
            entry.mark,
            entry.subject
        )?;
    }

    writeln!(
        out,
        "  {}",
        "Honorable Mentions (2 or more HDs)".italic()
    )?;
    for entry in &stats.honour_roll {
        writeln!(
            out,
            "    {:<28} {}/{}",
            display_name(students, &entry.zid),
            entry.hd_count,
            entry.course_count
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Underperformers:".bold())?;
    for (zid, courses) in &stats.underperformers {
        let wam = students
            .get(zid)
            .and_then(|s| s.wams.get(term).copied().flatten());
        writeln!(
            out,
            "  {:<28} WAM: {}",
            display_name(students, zid),
            format_wam(wam)
        )?;
        for course in courses {
            let grade_name = if course.is_failing() {
                course.grade_name.red().to_string()
            } else {
                or_placeholder(&course.grade_name)
            };
            writeln!(
                out,
                "    {:<10} {:<40} {:<4} {}",
                course.code,
                or_placeholder(&course.name),
                or_placeholder(&course.grade),
                grade_name
            )?;
        }
    }

    Ok(())
}

/// Statistics bundle for one college and term, serialized for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct CollegeTermReport {
    pub college: String,
    pub college_name: Option<String>,
    #[serde(flatten)]
    pub statistics: TermStatistics,
}

/// Bundle one college's term statistics for JSON output
pub fn college_report(college: &str, statistics: TermStatistics) -> CollegeTermReport {
    CollegeTermReport {
        college: college.to_string(),
        college_name: college_display_name(college).map(String::from),
        statistics,
    }
}

/// Serialize a set of college reports as pretty-printed JSON
pub fn to_json(reports: &[CollegeTermReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}
