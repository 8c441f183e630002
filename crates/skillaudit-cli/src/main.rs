mod cli;
mod service;
mod settings;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use service::AuditService;
use settings::{Config, DEFAULT_CONFIG};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", DEFAULT_CONFIG.trim());
        return Ok(());
    }

    // Load configuration
    let config = Config::load(&cli)?;

    // Run the audit and print the report
    AuditService::new(config, cli.output_format()).run()
}
