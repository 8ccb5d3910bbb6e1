pub mod classify;

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::RuleSet;
use crate::pr::{DiffLocation, PullRequest};
use crate::report::types::Verdict;

/// Any changed file whose path contains this segment disqualifies the diff,
/// regardless of what else it touches.
const SPEC_SEGMENT: &str = "/spec/";
const SPEC_REASON: &str = "Contains a /spec/ file.";

/// Judge one diff against the rule set.
///
/// Pure and synchronous: the same diff text, rules, and origin always produce
/// an equal Verdict. `pull_requests` is only consulted to copy title/author
/// onto the Verdict; a failed lookup is best-effort, not an error.
pub fn analyze(
    diff_text: &str,
    rules: &RuleSet,
    pull_requests: &[PullRequest],
    origin: &DiffLocation,
) -> Verdict {
    let lines = classify::collect(diff_text);

    // Disqualification is decisive: no later match can override it.
    let mut reasons = Vec::new();
    for header in &lines.file_headers {
        if header.contains(SPEC_SEGMENT) {
            reasons.push(SPEC_REASON.to_string());
        }
    }

    let mut has_positive = false;

    let mut word_hits: BTreeMap<String, usize> =
        rules.words.iter().map(|word| (word.clone(), 0)).collect();
    for (word, count) in word_hits.iter_mut() {
        for change in &lines.changes {
            if contains_token(change, word) {
                has_positive = true;
                *count += 1;
            }
        }
    }

    let mut file_hits: BTreeMap<String, usize> = rules
        .file_names
        .iter()
        .map(|name| (name.clone(), 0))
        .collect();
    for (name, count) in file_hits.iter_mut() {
        for header in &lines.file_headers {
            if contains_token(header, name) {
                has_positive = true;
                *count += 1;
            }
        }
    }

    let id = origin.pull_id().unwrap_or_default().to_string();
    let mut title = None;
    let mut author = None;
    // First match wins.
    match pull_requests.iter().find(|pr| pr.number.to_string() == id) {
        Some(pr) => {
            title = Some(pr.title.clone());
            author = Some(pr.author.clone());
        }
        None => debug!(origin = %origin, id, "no listed pull request matches this diff"),
    }

    Verdict {
        interesting: reasons.is_empty() && has_positive,
        id,
        word_hits,
        file_hits,
        reasons_not_interesting: reasons,
        title,
        author,
        location: origin.clone(),
    }
}

/// Whole-token containment: `needle` occurs in `haystack` with no word
/// character (`[A-Za-z0-9_]`) adjacent on either side. Keeps short catalog
/// entries like `exec` or `%x` from matching inside larger identifiers.
fn contains_token(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let hay = haystack.as_bytes();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();
        let bounded_left = start == 0 || !is_word_byte(hay[start - 1]);
        let bounded_right = end == hay.len() || !is_word_byte(hay[end]);
        if bounded_left && bounded_right {
            return true;
        }
        // Step one character so overlapping occurrences are still considered.
        from = start
            + haystack[start..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
    }
    false
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
