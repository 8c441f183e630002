//! Report rendering
//!
//! Renders an [`AuditReport`] either as pretty JSON (the machine-readable
//! schema) or as a Markdown curation report for people.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

mod markdown;

pub use markdown::{render_markdown, MarkdownOptions};

use skillaudit_types::AuditReport;

/// Render the machine-readable report as pretty-printed JSON
pub fn render_json(report: &AuditReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
