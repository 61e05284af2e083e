//! Scoring module - line clear rewards

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows with a single fix.
///
/// Four or more lines pay the same as four.
pub fn line_clear_score(lines: usize) -> i64 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}
