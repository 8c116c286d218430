//! Application constants for the transcript processor
//!
//! This module contains the domain tables, default values and mappings used
//! throughout the transcript processor application.

// =============================================================================
// College Codes and Names
// =============================================================================

/// Canonical college short codes with their display names
pub const COLLEGE_NAMES: &[(&str, &str)] = &[
    ("BASS", "Basser College"),
    ("BAXT", "Baxter College"),
    ("COLH", "Colombo House"),
    ("FTH", "Fig Tree Hall"),
    ("GOLD", "Goldstein College"),
    ("IH", "International House"),
    ("HALL", "UNSW Hall"),
];

/// Informal labels accepted for each canonical college short code
///
/// Matched case-insensitively. Labels come from the file-naming habits of
/// the people exporting the transcripts, so the table is deliberately loose.
pub const COLLEGE_ALIASES: &[(&str, &[&str])] = &[
    ("IH", &["international", "internationalhouse", "international_house"]),
    ("FTH", &["fth", "fig", "fig_tree", "fig_tree_hall"]),
    ("HALL", &["unsw", "unswhall", "unsw_hall", "hall"]),
    ("BASS", &["basser", "bass"]),
    ("BAXT", &["baxter", "bax"]),
    ("GOLD", &["goldstein", "gold"]),
    ("COLH", &["colombo", "colombo_house", "colombohouse"]),
];

/// Sheet label used for the combined all-colleges data set
pub const ALL_COLLEGES_LABEL: &str = "ALL";

// =============================================================================
// Grade Categories
// =============================================================================

/// Textual grade categories as they appear in transcript exports
pub mod grade_names {
    /// Highest grade category, counted toward the honour roll
    pub const HIGH_DISTINCTION: &str = "HIGH DISTINCTION";

    /// Grade categories treated as failing for underperformer detection
    pub const FAILING: &[&str] = &[
        "FAIL",
        "ABSENT FAIL",
        "UNSATISFACTORY FAIL",
        "ACADEMIC WITHDRAWAL",
    ];
}

// =============================================================================
// Statistics Thresholds
// =============================================================================

/// A present term WAM strictly below this flags a student as underperforming
pub const UNDERPERFORM_WAM_THRESHOLD: f64 = 60.0;

/// Minimum High Distinction count for an honour roll mention
pub const HONOUR_ROLL_MIN_HDS: usize = 2;

/// Minimum number of students with a WAM before a term contributes to the
/// cohort trend (smaller cohorts are statistically noisy and suppressed)
pub const MIN_TREND_COHORT: usize = 10;

// =============================================================================
// Parsing Constants
// =============================================================================

/// Sentinel term key for course lines seen before any term header
pub const UNKNOWN_TERM_KEY: &str = "UNKNOWN TERM";

/// File extension of transcript text exports
pub const TRANSCRIPT_FILE_EXTENSION: &str = "txt";

// =============================================================================
// Report Constants
// =============================================================================

/// Report column headers in output order
///
/// The reporting layer owns this ordering; record types never dictate
/// column layout.
pub const REPORT_COLUMNS: &[&str] = &[
    "First Names",
    "Last Name",
    "zID",
    "College",
    "Type",
    "Program",
    "Term",
    "Code",
    "Course",
    "Mark",
    "Grade",
    "WAM",
];

/// Placeholder rendered for absent values in reports
pub const MISSING_FIELD_PLACEHOLDER: &str = "-";

/// Prefix for generated report file names
pub const REPORT_FILENAME_PREFIX: &str = "College_Academics";

// =============================================================================
// Helper Functions
// =============================================================================

/// Normalize an informal college label to its canonical short code
///
/// Matching is case-insensitive; unrecognized labels pass through unchanged
/// (already-canonical codes fall out of this rule).
pub fn normalize_college(label: &str) -> String {
    let lowered = label.to_lowercase();
    for (code, aliases) in COLLEGE_ALIASES {
        if aliases.contains(&lowered.as_str()) {
            return (*code).to_string();
        }
    }
    label.to_string()
}

/// Get the display name for a canonical college short code
pub fn college_display_name(code: &str) -> Option<&'static str> {
    COLLEGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Check whether a grade name is the High Distinction category
pub fn is_high_distinction(grade_name: &str) -> bool {
    grade_name.to_uppercase() == grade_names::HIGH_DISTINCTION
}

/// Check whether a grade name falls in a failing category
pub fn is_failing_grade_name(grade_name: &str) -> bool {
    grade_names::FAILING.contains(&grade_name.to_uppercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_college_aliases() {
        assert_eq!(normalize_college("basser"), "BASS");
        assert_eq!(normalize_college("Goldstein"), "GOLD");
        assert_eq!(normalize_college("INTERNATIONAL_HOUSE"), "IH");
        assert_eq!(normalize_college("fig_tree"), "FTH");
        assert_eq!(normalize_college("unswhall"), "HALL");
    }

    #[test]
    fn test_normalize_college_passthrough() {
        // Unknown labels are returned unchanged
        assert_eq!(normalize_college("WARR"), "WARR");
        assert_eq!(normalize_college("Shalom"), "Shalom");
    }

    #[test]
    fn test_college_display_name() {
        assert_eq!(college_display_name("BASS"), Some("Basser College"));
        assert_eq!(college_display_name("COLH"), Some("Colombo House"));
        assert_eq!(college_display_name("XXXX"), None);
    }

    #[test]
    fn test_grade_name_categories() {
        assert!(is_high_distinction("High Distinction"));
        assert!(is_high_distinction("HIGH DISTINCTION"));
        assert!(!is_high_distinction("Distinction"));

        assert!(is_failing_grade_name("Fail"));
        assert!(is_failing_grade_name("ABSENT FAIL"));
        assert!(is_failing_grade_name("Academic Withdrawal"));
        assert!(!is_failing_grade_name("Pass"));
        assert!(!is_failing_grade_name("Credit"));
    }
}
