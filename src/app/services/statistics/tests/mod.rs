//! Test utilities and fixtures for statistics testing
//!
//! Builders for student collections with pre-computed WAMs, shared by the
//! engine and trend test modules.

use indexmap::IndexMap;

use crate::app::models::{Course, Student};

// Test modules
mod engine_tests;

/// Build a course with a numeric mark and grade name
pub fn course(code: &str, mark: &str, grade_name: &str) -> Course {
    Course::new(&code[..4], &code[4..], "Course", mark, grade_name)
}

/// Build a student with the given courses in one term, WAMs computed
pub fn student_with_courses(zid: &str, term: &str, courses: Vec<Course>) -> Student {
    let mut student = Student::new("Test Student", zid, "BASS");
    for c in courses {
        student.add_course(term, c);
    }
    student.process_wams();
    student
}

/// Assemble students into an identifier-keyed collection, document order
pub fn collect(students: Vec<Student>) -> IndexMap<String, Student> {
    students
        .into_iter()
        .map(|s| (s.zid.clone(), s))
        .collect()
}
