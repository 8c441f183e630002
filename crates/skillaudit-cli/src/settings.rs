use anyhow::{anyhow, bail, Result};
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use skillaudit_analysis::config::DEFAULT_CLUSTER_THRESHOLD;
use skillaudit_skills::SkillCorpus;
use std::env;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Annotated config template printed by `--print-config`
pub const DEFAULT_CONFIG: &str = r#"
[corpus]
skills_dir = "~/.claude/skills"  # Or set SKILLAUDIT_SKILLS_DIR

[analysis]
cluster_threshold = 0.25  # Reported pairs at or above this form clusters

[logging]
level = "warn"  # trace, debug, info, warn, error
format = "text"  # text or json
"#;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorpusConfig {
    pub skills_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisSettings {
    pub cluster_threshold: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the global config path: ~/.skillaudit/skillaudit.toml
    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".skillaudit").join("skillaudit.toml"))
    }

    /// Built-in defaults, the lowest layer
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = LoggingConfig::default();
        Ok(config::Config::builder()
            .set_default("analysis.cluster_threshold", DEFAULT_CLUSTER_THRESHOLD)?
            .set_default("logging.level", defaults.level)?
            .set_default("logging.format", defaults.format)?)
    }

    /// Command-line flags, the highest layer
    fn with_cli_overrides(
        builder: ConfigBuilder<DefaultState>,
        cli: &Cli,
    ) -> Result<ConfigBuilder<DefaultState>> {
        let skills_dir = cli
            .skills_dir
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        Ok(builder
            .set_override_option("corpus.skills_dir", skills_dir)?
            .set_override_option("analysis.cluster_threshold", cli.threshold)?
            .set_override_option("logging.level", cli.log_level.clone())?)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with layered approach:
    /// 1. Built-in defaults
    /// 2. Global config: ~/.skillaudit/skillaudit.toml (optional)
    /// 3. Local config: ./skillaudit.toml (optional), or the `--config` file (required)
    /// 4. Environment variables (SKILLAUDIT__SECTION__KEY, SKILLAUDIT_SKILLS_DIR)
    /// 5. Command-line flags (highest priority)
    pub fn load(cli: &Cli) -> Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let mut config_builder = Self::defaults()?;

        if let Some(global) = Self::global_config_path() {
            config_builder = config_builder.add_source(config::File::from(global).required(false));
        }

        config_builder = match &cli.config {
            Some(path) => config_builder.add_source(config::File::from(path.as_path())),
            None => config_builder.add_source(config::File::with_name("skillaudit").required(false)),
        };

        config_builder =
            config_builder.add_source(config::Environment::with_prefix("SKILLAUDIT").separator("__"));

        if let Ok(dir) = env::var("SKILLAUDIT_SKILLS_DIR") {
            config_builder = config_builder.set_override("corpus.skills_dir", dir)?;
        }

        Self::finish(Self::with_cli_overrides(config_builder, cli)?)
    }

    fn validate(&self) -> Result<()> {
        if !self.analysis.cluster_threshold.is_finite() {
            bail!(
                "cluster threshold must be a finite number, got {}",
                self.analysis.cluster_threshold
            );
        }
        Ok(())
    }

    /// Resolve the corpus root, expanding a leading `~`
    pub fn skills_dir(&self) -> Result<PathBuf> {
        match self.corpus.skills_dir.as_deref().filter(|d| !d.is_empty()) {
            Some(dir) => Ok(expand_home(dir)),
            None => SkillCorpus::default_root()
                .ok_or_else(|| anyhow!("Could not find home directory; pass --skills-dir")),
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(Path::new(rest)),
        None => PathBuf::from(path),
    }
}
