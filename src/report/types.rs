use std::collections::BTreeMap;

use crate::pr::DiffLocation;

/// The analyzer's judgement on one pull request diff.
///
/// Invariant: `interesting` is true exactly when no disqualifying reason was
/// recorded and at least one word or file-name count is nonzero. Both count
/// maps carry every catalog entry, zeros included, so the report can iterate
/// the full catalog. Verdicts are immutable once built; analyzing the same
/// diff with the same rules twice yields equal Verdicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Pull number as text, parsed back out of the diff URL. Empty when the
    /// URL did not follow the `/pull/{id}.diff` shape.
    pub id: String,
    /// Whether this diff merits human review
    pub interesting: bool,
    /// Catalog word -> number of distinct changed lines containing it
    pub word_hits: BTreeMap<String, usize>,
    /// Catalog file name -> number of distinct header lines containing it
    pub file_hits: BTreeMap<String, usize>,
    /// Disqualifying reasons; any entry forces interesting = false
    pub reasons_not_interesting: Vec<String>,
    /// Title of the matched pull request, when the lookup succeeded
    pub title: Option<String>,
    /// Author of the matched pull request, when the lookup succeeded
    pub author: Option<String>,
    /// Where the diff was fetched from
    pub location: DiffLocation,
}
