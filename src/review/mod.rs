//! Diff review module: pattern-based anti-pattern detection over
//! unified diffs with a markdown report.
//!
//! Layout:
//! - `diff.rs`: unified-diff parsing and post-image line mapping
//! - `rules.rs`: severity model and the built-in rule set
//! - `analyzer.rs`: rule application over a diff's added lines
//! - `report.rs`: markdown rendering

pub mod analyzer;
pub mod diff;
pub mod report;
pub mod rules;

pub use analyzer::{Issue, Review, analyze};
pub use report::render_markdown;
pub use rules::Severity;
