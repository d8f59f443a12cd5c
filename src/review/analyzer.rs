use serde::Serialize;

use crate::review::diff::{AddedLine, added_lines};
use crate::review::rules::{DEFAULT_RULES, MISSING_KEY_RULE, Rule, Severity};

/// Repeated hits of one rule are capped so a copy-pasted anti-pattern
/// does not drown out the rest of the report.
const MAX_MATCHES_PER_RULE: usize = 3;
const SNIPPET_MAX_CHARS: usize = 100;

/// One detected finding, located in the post-image of the diff.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub issue: &'static str,
    pub severity: Severity,
    pub file: String,
    pub line: u32,
    pub code: String,
    pub impact: &'static str,
}

/// The outcome of analyzing one diff.
#[derive(Debug, Default, Serialize)]
pub struct Review {
    pub issues: Vec<Issue>,
}

impl Review {
    pub fn issues_with(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues_with(severity).count()
    }

    /// Actionable total; informational findings are excluded.
    pub fn total_issues(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity != Severity::Info)
            .count()
    }
}

/// Run the built-in rule set over a unified diff's added lines.
pub fn analyze(diff: &str) -> Review {
    let added = added_lines(diff);
    let mut issues = Vec::new();

    for rule in DEFAULT_RULES.iter() {
        apply_rule(rule, &added, &mut issues);
    }

    // Collection renders that never set a key anywhere in the diff.
    if diff.contains(".map(") && !diff.contains("key=") {
        apply_rule(&MISSING_KEY_RULE, &added, &mut issues);
    }

    Review { issues }
}

fn apply_rule(rule: &Rule, added: &[AddedLine], issues: &mut Vec<Issue>) {
    let mut hits = 0;
    for line in added {
        if hits == MAX_MATCHES_PER_RULE {
            break;
        }
        if !rule.matches(&line.content) {
            continue;
        }
        let code = snippet(&line.content);
        if code.is_empty() {
            continue;
        }
        issues.push(Issue {
            issue: rule.issue,
            severity: rule.severity,
            file: line.file.clone(),
            line: line.line,
            code,
            impact: rule.impact,
        });
        hits += 1;
    }
}

fn snippet(content: &str) -> String {
    content.trim().chars().take(SNIPPET_MAX_CHARS).collect()
}
