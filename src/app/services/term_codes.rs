//! Term code translation
//!
//! Converts between the compact term codes used in report file names
//! (e.g. "24T1") and the descriptive term keys used throughout parsing and
//! statistics (e.g. "2024 TERM 1"). The mapping is a total bijection over
//! all valid forms; anything else translates to `None`.
//!
//! The term digit "0" always denotes a summer session, which the
//! descriptive form labels with the word "SUMMER" instead of a numeric
//! suffix ("24T0" <-> "2024 SUMMER TERM").

use regex::Regex;

/// Convert a compact term code to its descriptive term key
///
/// Returns `None` when the input is not a valid compact code.
pub fn to_descriptive(code: &str) -> Option<String> {
    let code = code.trim();
    let pattern = Regex::new(r"(?i)^\d\d[ST][0-3]$").ok()?;
    if !pattern.is_match(code) {
        return None;
    }

    let year = format!("20{}", &code[..2]);
    let term_word = if code[2..3].eq_ignore_ascii_case("S") {
        "SEMESTER"
    } else {
        "TERM"
    };
    let digit = &code[3..4];

    if digit == "0" {
        Some(format!("{} SUMMER {}", year, term_word))
    } else {
        Some(format!("{} {} {}", year, term_word, digit))
    }
}

/// Convert a descriptive term key to its compact code
///
/// Returns `None` when the input is not a valid descriptive term key.
pub fn to_compact(name: &str) -> Option<String> {
    let name = name.trim();
    let numbered = Regex::new(r"(?i)^\d{4} (?:TERM|SEMESTER) [0-3]$").ok()?;
    let summer = Regex::new(r"(?i)^\d{4} SUMMER (?:TERM|SEMESTER)$").ok()?;

    let tokens: Vec<&str> = name.split(' ').collect();
    if numbered.is_match(name) {
        let letter = tokens[1][..1].to_uppercase();
        Some(format!("{}{}{}", &tokens[0][2..], letter, tokens[2]))
    } else if summer.is_match(name) {
        let letter = tokens[2][..1].to_uppercase();
        Some(format!("{}{}0", &tokens[0][2..], letter))
    } else {
        None
    }
}

/// Convert a term string in either direction
///
/// Compact codes translate to descriptive term keys and vice versa.
/// Returns `None` for any string that is not a term in either form, which
/// callers use to detect "not a term string".
pub fn convert_term_name(term: &str) -> Option<String> {
    to_descriptive(term).or_else(|| to_compact(term))
}

/// Canonicalize a term given in either form to its descriptive term key
///
/// Accepts a compact code or a descriptive key (any case) and returns the
/// uppercase descriptive key used across parsing and statistics.
pub fn canonical_term_key(term: &str) -> Option<String> {
    to_descriptive(term).or_else(|| {
        let trimmed = term.trim();
        to_compact(trimmed).map(|_| trimmed.to_uppercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_to_descriptive() {
        assert_eq!(to_descriptive("24T1").as_deref(), Some("2024 TERM 1"));
        assert_eq!(to_descriptive("24T3").as_deref(), Some("2024 TERM 3"));
        assert_eq!(to_descriptive("19S2").as_deref(), Some("2019 SEMESTER 2"));
        assert_eq!(to_descriptive("24T0").as_deref(), Some("2024 SUMMER TERM"));
        assert_eq!(to_descriptive("18S0").as_deref(), Some("2018 SUMMER SEMESTER"));
    }

    #[test]
    fn test_descriptive_to_compact() {
        assert_eq!(to_compact("2024 TERM 1").as_deref(), Some("24T1"));
        assert_eq!(to_compact("2019 SEMESTER 2").as_deref(), Some("19S2"));
        assert_eq!(to_compact("2024 SUMMER TERM").as_deref(), Some("24T0"));
        assert_eq!(to_compact("2018 SUMMER SEMESTER").as_deref(), Some("18S0"));
    }

    #[test]
    fn test_round_trip() {
        for code in ["24T0", "24T1", "24T2", "24T3", "19S1", "19S2", "20S0"] {
            let descriptive = to_descriptive(code).unwrap();
            assert_eq!(to_compact(&descriptive).as_deref(), Some(code));
        }
        for name in ["2024 TERM 1", "2019 SEMESTER 2", "2024 SUMMER TERM"] {
            let compact = to_compact(name).unwrap();
            assert_eq!(to_descriptive(&compact).as_deref(), Some(name));
        }
    }

    #[test]
    fn test_case_insensitive_and_trimmed() {
        assert_eq!(to_descriptive(" 24t1 ").as_deref(), Some("2024 TERM 1"));
        assert_eq!(to_compact("2024 Term 1").as_deref(), Some("24T1"));
        assert_eq!(to_compact("2024 summer term").as_deref(), Some("24T0"));
    }

    #[test]
    fn test_non_matching_input() {
        assert_eq!(convert_term_name("hello"), None);
        assert_eq!(convert_term_name("24X1"), None);
        assert_eq!(convert_term_name("24T4"), None);
        assert_eq!(convert_term_name("2024 TERM"), None);
        assert_eq!(convert_term_name("2024 TERM 4"), None);
        assert_eq!(convert_term_name("2024 WINTER TERM"), None);
        assert_eq!(convert_term_name(""), None);
    }

    #[test]
    fn test_convert_dispatches_both_directions() {
        assert_eq!(convert_term_name("24T2").as_deref(), Some("2024 TERM 2"));
        assert_eq!(convert_term_name("2024 TERM 2").as_deref(), Some("24T2"));
    }

    #[test]
    fn test_canonical_term_key() {
        assert_eq!(canonical_term_key("24T1").as_deref(), Some("2024 TERM 1"));
        assert_eq!(
            canonical_term_key("2024 term 1").as_deref(),
            Some("2024 TERM 1")
        );
        assert_eq!(canonical_term_key("not a term"), None);
    }
}
