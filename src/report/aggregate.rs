use super::types::TestRecord;
use serde::Serialize;

/// Counts for one report run, derived from the loaded records
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_percentage: u32,
}

pub fn passed(records: &[TestRecord]) -> Vec<&TestRecord> {
    records.iter().filter(|r| r.is_passed()).collect()
}

pub fn failed(records: &[TestRecord]) -> Vec<&TestRecord> {
    records.iter().filter(|r| r.is_failed()).collect()
}

/// Summarize a run. `None` when there are no records, since there is no
/// meaningful pass rate and no report should be produced.
pub fn summary(records: &[TestRecord]) -> Option<Summary> {
    let total = records.len();
    if total == 0 {
        return None;
    }

    let passed = records.iter().filter(|r| r.is_passed()).count();
    Some(Summary {
        total,
        passed,
        failed: total - passed,
        pass_percentage: percentage(passed, total),
    })
}

/// `part / total * 100` computed in f64 and rounded to a whole number.
///
/// Rounds the float product, not the exact fraction, so values such as
/// 23/40 (57.49999...) come out the same as in reports rendered with
/// `%.0f`; exact halves go to the even neighbour.
fn percentage(part: usize, total: usize) -> u32 {
    (part as f64 / total as f64 * 100.0).round_ties_even() as u32
}
