use std::sync::LazyLock;

use regex::Regex;

static HUNK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -\d+(?:,\d+)? \+(\d+)(?:,\d+)? @@").expect("hunk header regex")
});

/// One line added by a diff, located in the post-image of its file.
#[derive(Debug, Clone, PartialEq)]
pub struct AddedLine {
    pub file: String,
    pub line: u32,
    pub content: String,
}

/// Walk a unified diff and collect its added lines with file and
/// post-image line numbers. Context lines advance the counter; removed
/// lines do not.
pub fn added_lines(diff: &str) -> Vec<AddedLine> {
    let mut added = Vec::new();
    let mut current_file = String::new();
    let mut current_line: u32 = 0;

    for raw in diff.lines() {
        if raw.starts_with("diff --git") {
            if let Some((_, new_side)) = raw.rsplit_once(" b/") {
                current_file = new_side.to_string();
            }
        } else if let Some(caps) = HUNK_RE.captures(raw) {
            // capture 1 always present when the header matches
            if let Some(start) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                current_line = start;
            }
        } else if raw.starts_with('+') && !raw.starts_with("+++") {
            if !current_file.is_empty() {
                added.push(AddedLine {
                    file: current_file.clone(),
                    line: current_line,
                    content: raw[1..].to_string(),
                });
            }
            current_line += 1;
        } else if raw.starts_with(' ') {
            current_line += 1;
        }
    }

    added
}
