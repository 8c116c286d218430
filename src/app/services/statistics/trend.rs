//! Cross-term cohort WAM trend
//!
//! Averages every student's term WAM per term across a college's whole
//! data set. Terms where fewer students than the cohort minimum contributed
//! a WAM are suppressed rather than reported as noisy outliers.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::app::models::Student;
use crate::constants::MIN_TREND_COHORT;

/// Compute the per-term average WAM for a college
///
/// Returns term key to average WAM, ordered by term key. Only terms where
/// strictly more than [`MIN_TREND_COHORT`] students had a WAM are included.
pub fn wam_trend(students: &IndexMap<String, Student>) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for student in students.values() {
        for (term, wam) in &student.wams {
            let entry = totals.entry(term.clone()).or_insert((0.0, 0));
            if let Some(wam) = wam {
                entry.0 += wam;
                entry.1 += 1;
            }
        }
    }

    totals
        .into_iter()
        .filter_map(|(term, (total, count))| {
            if count > MIN_TREND_COHORT {
                Some((term, total / count as f64))
            } else {
                debug!("Suppressing term {} with cohort of {}", term, count);
                None
            }
        })
        .collect()
}
