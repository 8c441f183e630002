use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "skillaudit")]
#[command(version, about = "Find overlapping and redundant skill definitions", long_about = None)]
pub struct Cli {
    /// Directory containing one subdirectory per skill (default: ~/.claude/skills)
    #[arg(long, value_name = "PATH")]
    pub skills_dir: Option<PathBuf>,

    /// Emit the machine-readable JSON report instead of Markdown
    #[arg(long)]
    pub json: bool,

    /// Minimum composite score for two skills to share a cluster (default: 0.25)
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Config file path (default: ./skillaudit.toml if present)
    #[arg(long, short, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level written to stderr (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print an annotated config file template and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Report format written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Markdown
        }
    }
}
