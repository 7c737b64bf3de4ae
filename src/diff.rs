//! Rendering of file diff payloads.
//!
//! A [`DiffInfo`](crate::events::DiffInfo) either carries pre-rendered diff
//! text or a before/after pair; the pair is rendered here as a unified diff.

use similar::{ChangeTag, TextDiff};

use crate::events::DiffInfo;

/// Render a diff payload to text.
///
/// Pre-rendered text takes precedence. With only one of before/after present
/// there is nothing to compare and the result is empty.
pub fn format_diff(diff: &DiffInfo) -> String {
    if let Some(prepared) = &diff.prepared {
        return prepared.clone();
    }

    match (&diff.before, &diff.after) {
        (Some(before), Some(after)) => {
            let before_header = diff.before_header.as_deref().unwrap_or("before");
            let after_header = diff.after_header.as_deref().unwrap_or("after");
            generate_diff(before, after, before_header, after_header)
        }
        _ => String::new(),
    }
}

/// Generate a unified diff between two strings.
pub fn generate_diff(before: &str, after: &str, before_header: &str, after_header: &str) -> String {
    let diff = TextDiff::from_lines(before, after);
    let mut output = String::new();

    output.push_str(&format!("--- {}\n", before_header));
    output.push_str(&format!("+++ {}\n", after_header));

    let unified = diff.unified_diff();
    for hunk in unified.iter_hunks() {
        output.push_str(&format!("{}\n", hunk.header()));
        for change in hunk.iter_changes() {
            let line = change.value();
            let line = line.strip_suffix('\n').unwrap_or(line);
            match change.tag() {
                ChangeTag::Delete => output.push_str(&format!("-{}\n", line)),
                ChangeTag::Insert => output.push_str(&format!("+{}\n", line)),
                ChangeTag::Equal => output.push_str(&format!(" {}\n", line)),
            }
        }
    }

    output
}
