//! Markdown curation report
//!
//! Layout:
//! - Summary counts
//! - One section per cluster with every intra-cluster pair
//! - A table of the top-ranked overlap pairs
//! - An inventory table of every loaded skill

use skillaudit_types::{round_score, AuditReport, Cluster, OverlapRecord};

/// Limits applied to the Markdown report
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownOptions {
    /// Threshold shown in the pair table heading
    pub report_threshold: f64,
    /// Rows in the overlap pair table
    pub max_pairs: usize,
    /// Shared keywords listed per intra-cluster pair
    pub max_cluster_keywords: usize,
    /// Characters of the tool declaration shown in the inventory
    pub max_tools_chars: usize,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            report_threshold: 0.15,
            max_pairs: 30,
            max_cluster_keywords: 8,
            max_tools_chars: 50,
        }
    }
}

/// Render the human-readable report
///
/// Scores print with at least one decimal place (`0.0`, `1.0`).
pub fn render_markdown(report: &AuditReport, options: &MarkdownOptions) -> String {
    let mut lines: Vec<String> = vec!["# Skill Curation Report".to_string(), String::new()];

    lines.push(format!("**Total skills scanned:** {}", report.total_skills));
    lines.push(format!("**Overlap pairs found:** {}", report.overlaps.len()));
    lines.push(format!("**Clusters identified:** {}", report.clusters.len()));
    lines.push(String::new());

    if !report.clusters.is_empty() {
        lines.push("## Clusters (Potential Merge Candidates)".to_string());
        lines.push(String::new());
        for (i, cluster) in report.clusters.iter().enumerate() {
            push_cluster(&mut lines, i + 1, cluster, &report.overlaps, options);
        }
    }

    lines.push(format!(
        "## All Overlap Pairs (score > {})",
        options.report_threshold
    ));
    lines.push(String::new());
    lines.push("| Skill A | Skill B | Composite | Keywords | Tools | Triggers |".to_string());
    lines.push("|---------|---------|-----------|----------|-------|----------|".to_string());
    for record in report.overlaps.iter().take(options.max_pairs) {
        lines.push(format!(
            "| {} | {} | {:?} | {:?} | {:?} | {} shared |",
            record.pair.0,
            record.pair.1,
            round_score(record.composite),
            round_score(record.keyword_similarity),
            round_score(record.tool_similarity),
            record.trigger_overlap.len()
        ));
    }
    lines.push(String::new());

    lines.push("## Skill Inventory".to_string());
    lines.push(String::new());
    lines.push("| Skill | Version | Body Lines | Tools |".to_string());
    lines.push("|-------|---------|------------|-------|".to_string());

    for skill in &report.skills {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            skill.name,
            skill.version.as_deref().unwrap_or("-"),
            skill.body_lines,
            truncate_chars(skill.tools.as_deref().unwrap_or("-"), options.max_tools_chars)
        ));
    }

    lines.join("\n")
}

fn push_cluster(
    lines: &mut Vec<String>,
    number: usize,
    cluster: &Cluster,
    overlaps: &[OverlapRecord],
    options: &MarkdownOptions,
) {
    lines.push(format!(
        "### Cluster {}: {}",
        number,
        cluster.members().join(", ")
    ));
    lines.push(String::new());

    let internal = overlaps
        .iter()
        .filter(|r| cluster.contains(&r.pair.0) && cluster.contains(&r.pair.1));

    for record in internal {
        lines.push(format!(
            "- **{}** ↔ **{}**: composite={:?}, kw={:?}, tools={:?}",
            record.pair.0,
            record.pair.1,
            round_score(record.composite),
            round_score(record.keyword_similarity),
            round_score(record.tool_similarity)
        ));
        if !record.trigger_overlap.is_empty() {
            lines.push(format!(
                "  - Shared triggers: {}",
                record.trigger_overlap.join(", ")
            ));
        }
        if !record.shared_keywords.is_empty() {
            let shown: Vec<&str> = record
                .shared_keywords
                .iter()
                .take(options.max_cluster_keywords)
                .map(String::as_str)
                .collect();
            lines.push(format!("  - Shared keywords: {}", shown.join(", ")));
        }
    }
    lines.push(String::new());
}

/// Keep at most `max` characters
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
