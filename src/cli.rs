use clap::Parser;
use sbom_pipeline::config::DEFAULT_CONFIG_FILENAME;
use std::path::PathBuf;

/// Clone an application, generate its SBOM, submit it to Dependency-Track
/// and render an HTML report linking to the project
#[derive(Parser, Debug)]
#[command(name = "sbom-pipeline")]
#[command(version)]
#[command(
    about = "Clone an application, generate its SBOM and submit it to Dependency-Track",
    long_about = None
)]
pub struct Args {
    /// Path to the configuration file (YAML, or TOML with a .toml extension)
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Report template overriding the built-in one and the config file's report_template
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Load and summarize the configuration without running the pipeline
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
