use std::collections::BTreeSet;

/// One diff line, reduced to the part the heuristics care about.
#[derive(Debug, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// A `+++ ` / `--- ` file header; payload is the file name part.
    FileHeader(&'a str),
    /// An added or removed content line; payload is the text after the
    /// single `+`/`-` marker.
    Change(&'a str),
}

/// Classify one line of diff text. The file-header check runs first and takes
/// precedence; a single `+`/`-` that opens a `+++`/`---` triple is neither.
/// Lines matching neither shape, and lines with an empty payload, yield None.
pub fn classify(line: &str) -> Option<DiffLine<'_>> {
    if let Some(payload) = line
        .strip_prefix("+++ ")
        .or_else(|| line.strip_prefix("--- "))
    {
        return (!payload.is_empty()).then_some(DiffLine::FileHeader(payload));
    }

    let bytes = line.as_bytes();
    match bytes.first() {
        Some(&marker) if marker == b'+' || marker == b'-' => {
            let opens_triple = bytes.len() >= 3 && bytes[1] == marker && bytes[2] == marker;
            let payload = &line[1..];
            (!opens_triple && !payload.is_empty()).then_some(DiffLine::Change(payload))
        }
        _ => None,
    }
}

/// The classified payloads of a whole diff, deduplicated. Ordered sets so
/// every later pass iterates deterministically.
#[derive(Debug, Default)]
pub struct DiffLines {
    pub file_headers: BTreeSet<String>,
    pub changes: BTreeSet<String>,
}

/// Split a diff into lines and classify each, collapsing duplicate payloads.
pub fn collect(diff_text: &str) -> DiffLines {
    let mut lines = DiffLines::default();
    for line in diff_text.lines() {
        match classify(line) {
            Some(DiffLine::FileHeader(payload)) => {
                lines.file_headers.insert(payload.to_string());
            }
            Some(DiffLine::Change(payload)) => {
                lines.changes.insert(payload.to_string());
            }
            None => {}
        }
    }
    lines
}
