use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Finding priority, ordered highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL ISSUES",
            Severity::High => "HIGH PRIORITY ISSUES",
            Severity::Medium => "MEDIUM PRIORITY ISSUES",
            Severity::Low => "LOW PRIORITY ISSUES",
            Severity::Info => "INFORMATIONAL",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        };
        f.write_str(name)
    }
}

/// One pattern-based detection rule.
pub struct Rule {
    pub issue: &'static str,
    pub severity: Severity,
    pub impact: &'static str,
    pattern: Regex,
}

impl Rule {
    fn new(issue: &'static str, severity: Severity, impact: &'static str, pattern: &str) -> Self {
        Self {
            issue,
            severity,
            impact,
            pattern: Regex::new(pattern).expect("rule pattern"),
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

/// The built-in rule set: secrets, injection surfaces, Java and React
/// anti-patterns, logging hygiene, query shape.
pub static DEFAULT_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // secrets
        Rule::new(
            "Hardcoded password",
            Severity::Critical,
            "credential exposure",
            r#"(?i)password\s*=\s*["'][^"']+["']"#,
        ),
        Rule::new(
            "Hardcoded API key",
            Severity::Critical,
            "unauthorized access",
            r#"(?i)api[_-]?key\s*=\s*["'][^"']+["']"#,
        ),
        Rule::new(
            "Hardcoded secret/token",
            Severity::Critical,
            "security breach",
            r#"(?i)(private[_-]?key|secret[_-]?key|token)\s*=\s*["']"#,
        ),
        Rule::new(
            "SQL injection vulnerability",
            Severity::Critical,
            "use a prepared statement",
            r#"(?i)executeQuery\s*\([^)]*\+[^)]*\)|executeSql\s*\([^)]*\+"#,
        ),
        // Java
        Rule::new(
            "NullPointerException risk",
            Severity::Critical,
            "use null-safe equality",
            r#"(?i)\.equals\s*\(\s*null\s*\)|null\s*\.equals"#,
        ),
        Rule::new(
            "Empty catch block",
            Severity::Critical,
            "swallows exceptions silently",
            r#"(?i)catch\s*\([^)]*Exception[^)]*\)\s*\{\s*\}"#,
        ),
        Rule::new(
            "Unmanaged thread creation",
            Severity::High,
            "use a managed executor",
            r#"(?i)new\s+Thread\s*\("#,
        ),
        Rule::new(
            "System command execution",
            Severity::High,
            "command injection risk",
            r#"(?i)(Runtime\.getRuntime|\bexec\(|\bsystem\()"#,
        ),
        Rule::new(
            "System.out usage",
            Severity::Medium,
            "use a structured logger",
            r#"(?i)System\.(out|err)\.println"#,
        ),
        Rule::new(
            "printStackTrace() usage",
            Severity::Medium,
            "log the error instead",
            r#"(?i)\.printStackTrace\s*\("#,
        ),
        Rule::new(
            "Deprecated API usage",
            Severity::Low,
            "use the recommended alternative",
            r#"(?i)@Deprecated"#,
        ),
        // web / React
        Rule::new(
            "XSS vulnerability",
            Severity::High,
            "cross-site scripting risk",
            r#"(?i)dangerouslySetInnerHTML"#,
        ),
        Rule::new(
            "Dangerous eval() usage",
            Severity::High,
            "code injection risk",
            r#"(?i)eval\s*\("#,
        ),
        Rule::new(
            "innerHTML usage",
            Severity::High,
            "potential XSS",
            r#"(?i)innerHTML\s*="#,
        ),
        Rule::new(
            "Direct state mutation",
            Severity::Critical,
            "use the state setter",
            r#"(?i)this\.state\.[a-zA-Z_]+\s*="#,
        ),
        Rule::new(
            "Props mutation",
            Severity::Critical,
            "props are immutable",
            r#"(?i)props\.[a-zA-Z_]+\s*="#,
        ),
        Rule::new(
            "Direct DOM manipulation",
            Severity::High,
            "use refs or state",
            r#"(?i)document\.(getElementById|querySelector|getElementsBy)"#,
        ),
        Rule::new(
            "Deprecated lifecycle method",
            Severity::High,
            "migrate to modern APIs",
            r#"(?i)component(WillMount|WillReceiveProps|WillUpdate)"#,
        ),
        Rule::new(
            "Using 'var' keyword",
            Severity::Low,
            "use const/let instead",
            r#"(?i)\bvar\s+[a-zA-Z_]"#,
        ),
        // quality
        Rule::new(
            "Debugger statement",
            Severity::High,
            "remove before production",
            r#"(?i)debugger;"#,
        ),
        Rule::new(
            "Console statements",
            Severity::Medium,
            "use proper logging",
            r#"(?i)console\.(log|error|warn|debug)"#,
        ),
        Rule::new(
            "TODO/FIXME comment",
            Severity::Medium,
            "address before merge",
            r#"(?i)(TODO|FIXME)"#,
        ),
        // security transport
        Rule::new(
            "Insecure HTTP URL",
            Severity::Medium,
            "use HTTPS instead",
            r#"(?i)http://"#,
        ),
        // performance
        Rule::new(
            "SELECT * query",
            Severity::High,
            "specify needed columns",
            r#"(?i)SELECT\s+\*"#,
        ),
        Rule::new(
            "N+1 query problem",
            Severity::High,
            "use JOIN or batch loading",
            r#"[nN]\+1"#,
        ),
        Rule::new(
            "Nested .map() loops",
            Severity::Medium,
            "quadratic complexity",
            r#"(?i)\.map\([^)]*\.map\("#,
        ),
        Rule::new(
            "Nested for loops",
            Severity::Medium,
            "review algorithm complexity",
            r#"(?i)for\s*\([^)]*\)\s*\{[^}]*for\s*\("#,
        ),
    ]
});

/// Applied only when the diff maps collections without ever setting a
/// key, so isolated `.map(` calls do not flag instrumented code.
pub static MISSING_KEY_RULE: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        "Missing key prop in .map()",
        Severity::High,
        "add a unique key prop",
        r#"(?i)\.map\s*\("#,
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_rule_patterns_compile() {
        assert!(!DEFAULT_RULES.is_empty());
        assert!(MISSING_KEY_RULE.matches("items.map(item => render(item))"));
    }

    #[test]
    fn severity_orders_highest_first() {
        assert!(Severity::Critical < Severity::High);
        assert!(Severity::High < Severity::Medium);
        assert_eq!(Severity::ALL[0], Severity::Critical);
    }

    #[test]
    fn secret_rules_hit_assignment_literals() {
        let password_rule = &DEFAULT_RULES[0];
        assert!(password_rule.matches(r#"private static final String password = "admin123";"#));
        assert!(!password_rule.matches("String password = request.getParameter(\"p\")"));
    }
}
