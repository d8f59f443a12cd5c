use std::fmt::Write;

use crate::review::analyzer::Review;
use crate::review::rules::Severity;

/// Render a review as a markdown report: one table per severity bucket,
/// a count summary, and a merge verdict.
pub fn render_markdown(review: &Review) -> String {
    let mut out = String::new();

    out.push_str("## Detailed Issue Report\n\n");
    for severity in Severity::ALL {
        let bucket: Vec<_> = review.issues_with(severity).collect();
        if bucket.is_empty() {
            continue;
        }
        let _ = writeln!(out, "### {} ({})\n", severity.label(), bucket.len());
        out.push_str("| Issue | File:Line | Code Snippet | Impact |\n");
        out.push_str("|-------|-----------|--------------|--------|\n");
        for issue in bucket {
            let _ = writeln!(
                out,
                "| {} | `{}:{}` | `{}` | {} |",
                issue.issue,
                issue.file,
                issue.line,
                escape_pipes(&issue.code),
                issue.impact
            );
        }
        out.push('\n');
    }

    out.push_str("---\n\n## Summary\n\n");
    out.push_str("| Priority | Count |\n");
    out.push_str("|----------|-------|\n");
    for severity in Severity::ALL {
        let _ = writeln!(out, "| {} | {} |", severity.title(), review.count(severity));
    }
    let total = review.total_issues();
    let _ = writeln!(out, "| **Total** | **{total}** |");
    out.push('\n');

    let verdict = if total == 0 {
        "> ALL CHECKS PASSED! No issues found."
    } else if review.count(Severity::Critical) > 0 {
        "> CRITICAL: must fix before merge."
    } else if review.count(Severity::High) > 0 {
        "> HIGH PRIORITY: should fix before merge."
    } else {
        "> Review and address issues as needed."
    };
    out.push_str(verdict);
    out.push('\n');

    out
}

fn escape_pipes(code: &str) -> String {
    code.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::analyzer::Issue;

    #[test]
    fn empty_review_renders_all_clear() {
        let report = render_markdown(&Review::default());
        assert!(report.contains("ALL CHECKS PASSED"));
        assert!(report.contains("| **Total** | **0** |"));
        assert!(!report.contains("### "));
    }

    #[test]
    fn pipes_in_snippets_do_not_break_the_table() {
        let review = Review {
            issues: vec![Issue {
                issue: "Console statements",
                severity: Severity::Medium,
                file: "web/App.jsx".to_string(),
                line: 7,
                code: "console.log(a || b);".to_string(),
                impact: "use proper logging",
            }],
        };
        let report = render_markdown(&review);
        assert!(report.contains(r"console.log(a \|\| b);"));
        assert!(report.contains("`web/App.jsx:7`"));
        assert!(report.contains("> Review and address issues as needed."));
    }
}
