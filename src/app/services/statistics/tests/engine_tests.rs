//! Tests for the per-term statistics engine

use super::super::engine::term_statistics;
use super::{collect, course, student_with_courses};

const TERM: &str = "2024 TERM 1";

#[test]
fn test_average_wam() {
    let students = collect(vec![
        student_with_courses("1000001", TERM, vec![course("COMP1511", "80", "Distinction")]),
        student_with_courses("1000002", TERM, vec![course("COMP1511", "70", "Credit")]),
        student_with_courses("1000003", TERM, vec![course("ARTS1000", "", "Satisfactory")]),
    ]);

    let stats = term_statistics(&students, TERM);

    // Student 1000003 has no WAM and is excluded from the average
    assert_eq!(stats.average_wam, Some(75.0));
    assert!(stats.has_data());
}

#[test]
fn test_no_data_for_term() {
    let students = collect(vec![student_with_courses(
        "1000001",
        "2023 TERM 3",
        vec![course("COMP1511", "80", "Distinction")],
    )]);

    let stats = term_statistics(&students, TERM);

    assert_eq!(stats.average_wam, None);
    assert!(!stats.has_data());
    assert!(stats.top_wam.is_empty());
    assert!(stats.top_subjects.is_empty());
    assert!(stats.honour_roll.is_empty());
    assert!(stats.underperformers.is_empty());
}

#[test]
fn test_top_wam_retains_all_ties() {
    let students = collect(vec![
        student_with_courses("1000001", TERM, vec![course("COMP1511", "80", "Distinction")]),
        student_with_courses("1000002", TERM, vec![course("MATH1131", "80", "Distinction")]),
        student_with_courses("1000003", TERM, vec![course("PHYS1121", "70", "Credit")]),
    ]);

    let stats = term_statistics(&students, TERM);

    let zids: Vec<&str> = stats.top_wam.iter().map(|e| e.zid.as_str()).collect();
    assert_eq!(zids, ["1000001", "1000002"]);
    assert_eq!(stats.top_wam[0].wam, 80.0);
}

#[test]
fn test_second_award_prepended_for_top_wam_holder() {
    // 1000001 holds both the top WAM and the best individual mark;
    // 1000002 holds the next-best mark.
    let students = collect(vec![
        student_with_courses(
            "1000001",
            TERM,
            vec![
                course("COMP1511", "90", "High Distinction"),
                course("MATH1131", "80", "Distinction"),
            ],
        ),
        student_with_courses(
            "1000002",
            TERM,
            vec![
                course("PHYS1121", "75", "Distinction"),
                course("ENGG1000", "77", "Distinction"),
            ],
        ),
    ]);

    let stats = term_statistics(&students, TERM);

    assert_eq!(stats.top_wam.len(), 1);
    assert_eq!(stats.top_wam[0].zid, "1000001");

    // The leader's best mark is prepended, not displacing the runner-up
    assert_eq!(stats.top_subjects.len(), 2);
    assert_eq!(stats.top_subjects[0].zid, "1000001");
    assert_eq!(stats.top_subjects[0].mark, 90);
    assert!(stats.top_subjects[0].subject.starts_with("COMP1511"));
    assert_eq!(stats.top_subjects[1].zid, "1000002");
    assert_eq!(stats.top_subjects[1].mark, 77);
}

#[test]
fn test_second_award_dropped_when_leader_displaced() {
    // 1000001 briefly leads on WAM and has the best mark overall, but
    // 1000002 later takes the WAM lead without beating that mark.
    let students = collect(vec![
        student_with_courses(
            "1000001",
            TERM,
            vec![
                course("COMP1511", "92", "High Distinction"),
                course("MATH1131", "88", "High Distinction"),
            ],
        ),
        student_with_courses(
            "1000002",
            TERM,
            vec![
                course("PHYS1121", "91", "High Distinction"),
                course("ENGG1000", "91", "High Distinction"),
            ],
        ),
        student_with_courses(
            "1000003",
            TERM,
            vec![
                course("ARTS1622", "85", "High Distinction"),
                course("ARTS1631", "75", "Distinction"),
            ],
        ),
    ]);

    let stats = term_statistics(&students, TERM);

    assert_eq!(stats.top_wam.len(), 1);
    assert_eq!(stats.top_wam[0].zid, "1000002");

    // The held-aside 92 belongs to a student no longer leading on WAM
    let marks: Vec<u32> = stats.top_subjects.iter().map(|e| e.mark).collect();
    assert_eq!(marks, [85]);
    assert_eq!(stats.top_subjects[0].zid, "1000003");
}

#[test]
fn test_honour_roll() {
    let students = collect(vec![
        student_with_courses(
            "1000001",
            TERM,
            vec![
                course("COMP1511", "92", "HIGH DISTINCTION"),
                course("MATH1131", "88", "High Distinction"),
                course("PHYS1121", "70", "Credit"),
            ],
        ),
        student_with_courses(
            "1000002",
            TERM,
            vec![
                course("COMP1511", "87", "High Distinction"),
                course("MATH1131", "70", "Credit"),
            ],
        ),
    ]);

    let stats = term_statistics(&students, TERM);

    assert_eq!(stats.honour_roll.len(), 1);
    let entry = &stats.honour_roll[0];
    assert_eq!(entry.zid, "1000001");
    assert_eq!(entry.hd_count, 2);
    assert_eq!(entry.course_count, 3);
}

#[test]
fn test_underperformers() {
    let students = collect(vec![
        // WAM below threshold, no failing grade
        student_with_courses("1000001", TERM, vec![course("COMP1511", "58", "Pass")]),
        // Healthy WAM but one failing-category course
        student_with_courses(
            "1000002",
            TERM,
            vec![
                course("COMP1511", "85", "High Distinction"),
                course("MATH1131", "40", "Fail"),
            ],
        ),
        // Healthy WAM, clean record
        student_with_courses("1000003", TERM, vec![course("PHYS1121", "70", "Credit")]),
        // No numeric marks at all, but a failing category
        student_with_courses(
            "1000004",
            TERM,
            vec![course("ARTS1000", "", "Academic Withdrawal")],
        ),
    ]);

    let stats = term_statistics(&students, TERM);

    let zids: Vec<&String> = stats.underperformers.keys().collect();
    assert_eq!(zids, ["1000001", "1000002", "1000004"]);
    // The full term course list rides along for downstream highlighting
    assert_eq!(stats.underperformers["1000002"].len(), 2);
}

#[test]
fn test_ungraded_courses_excluded_from_mark_comparisons() {
    let students = collect(vec![student_with_courses(
        "1000001",
        TERM,
        vec![
            course("COMP1511", "65", "Credit"),
            course("ARTS1000", "", "Satisfactory"),
        ],
    )]);

    let stats = term_statistics(&students, TERM);

    // Only the graded course can appear in the subject ranking; the sole
    // student is the WAM leader, so their mark is held and then prepended.
    assert_eq!(stats.top_subjects.len(), 1);
    assert_eq!(stats.top_subjects[0].mark, 65);
    assert_eq!(stats.average_wam, Some(65.0));
}
