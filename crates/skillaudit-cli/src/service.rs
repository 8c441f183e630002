use crate::cli::OutputFormat;
use crate::settings::Config;
use anyhow::{Context, Result};
use skillaudit_analysis::{analyze, AnalysisConfig};
use skillaudit_logging::LogFormat;
use skillaudit_report::{render_json, render_markdown, MarkdownOptions};
use skillaudit_skills::SkillCorpus;
use skillaudit_types::AuditReport;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Audit service - loads the corpus, runs the analysis, prints the report
pub struct AuditService {
    config: Config,
    format: OutputFormat,
}

impl AuditService {
    /// Create a new audit service
    pub fn new(config: Config, format: OutputFormat) -> Self {
        Self { config, format }
    }

    /// Run one audit and write the report to stdout
    pub fn run(self) -> Result<()> {
        skillaudit_logging::init_logging(
            &self.config.logging.level,
            LogFormat::from_name(&self.config.logging.format),
        )?;
        info!("Starting skill audit");

        let root = self.config.skills_dir()?;
        let analysis = AnalysisConfig::default()
            .with_cluster_threshold(self.config.analysis.cluster_threshold);

        let output = audit(&root, &analysis, self.format)?;

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", output)?;
        Ok(())
    }
}

/// Load `root`, analyze it and render the report
pub fn audit(root: &Path, analysis: &AnalysisConfig, format: OutputFormat) -> Result<String> {
    let skills = SkillCorpus::load(root)?.into_skills();
    let report = analyze(&skills, analysis);
    render(&report, analysis, format)
}

fn render(
    report: &AuditReport,
    analysis: &AnalysisConfig,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(report).context("Failed to serialize report"),
        OutputFormat::Markdown => {
            let options = MarkdownOptions {
                report_threshold: analysis.report_threshold,
                ..MarkdownOptions::default()
            };
            Ok(render_markdown(report, &options))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_skill(root: &Path, dir: &str, description: &str, tools: &str) {
        let path = root.join(dir);
        fs::create_dir_all(&path).unwrap();
        fs::write(
            path.join("SKILL.md"),
            format!("---\nname: {dir}\ndescription: {description}\ntools: {tools}\n---\nBody\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_missing_root_fails() {
        let temp = tempfile::tempdir().unwrap();
        let err = audit(
            &temp.path().join("missing"),
            &AnalysisConfig::default(),
            OutputFormat::Json,
        )
        .unwrap_err();
        assert!(err.to_string().ends_with("not found"));
    }

    #[test]
    fn test_json_and_markdown_agree() {
        let temp = tempfile::tempdir().unwrap();
        write_skill(
            temp.path(),
            "k8s-deploy",
            r#"Handles "deploy app" requests for Kubernetes clusters"#,
            "kubectl,helm",
        );
        write_skill(
            temp.path(),
            "container-deploy",
            r#"Handles "deploy app" and rollback for container clusters"#,
            "kubectl,docker",
        );

        let config = AnalysisConfig::default();
        let json = audit(temp.path(), &config, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_skills"], 2);
        assert_eq!(value["skills"][0]["name"], "container-deploy");
        assert_eq!(value["skills"][1]["tools"], "kubectl,helm");
        assert_eq!(
            value["clusters"],
            serde_json::json!([["container-deploy", "k8s-deploy"]])
        );

        let markdown = audit(temp.path(), &config, OutputFormat::Markdown).unwrap();
        assert!(markdown.contains("### Cluster 1: container-deploy, k8s-deploy"));
        assert!(markdown.contains("  - Shared triggers: deploy app"));
    }
}
