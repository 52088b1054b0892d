mod cli;

use cli::Args;
use owo_colors::OwoColorize;
use sbom_pipeline::adapters::outbound::console::StderrProgressReporter;
use sbom_pipeline::adapters::outbound::git::GitSourceFetcher;
use sbom_pipeline::adapters::outbound::network::DependencyTrackClient;
use sbom_pipeline::adapters::outbound::process::CommandSbomGenerator;
use sbom_pipeline::adapters::outbound::report::HtmlReportRenderer;
use sbom_pipeline::application::use_cases::RunPipelineUseCase;
use sbom_pipeline::config::{load_run_configuration, RunConfiguration};
use sbom_pipeline::ports::outbound::ProgressReporter;
use sbom_pipeline::shared::error::ExitCode;
use sbom_pipeline::shared::Result;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\n{} {}", "Caused by:".yellow(), err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::PipelineFailed.as_i32());
    }
}

fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    let progress_reporter = StderrProgressReporter::new();

    progress_reporter.report(&format!(
        "📄 Loading configuration from {}",
        args.config.display()
    ));
    let mut config = load_run_configuration(&args.config, &progress_reporter)?;

    // The flag wins over the config file
    if let Some(template) = args.template {
        config.report_template = Some(template);
    }

    if args.dry_run {
        print_summary(&config);
        return Ok(());
    }

    // Create adapters (Dependency Injection)
    let source_fetcher = GitSourceFetcher::new();
    let sbom_generator = CommandSbomGenerator::new(config.sbom_tool);
    let intelligence_service = DependencyTrackClient::new(
        &config.dependency_track_api_url,
        &config.dependency_track_api_key,
    )?;
    let report_renderer = match &config.report_template {
        Some(template) => HtmlReportRenderer::with_template(template.clone()),
        None => HtmlReportRenderer::new(),
    };

    // Create use case with injected dependencies
    let use_case = RunPipelineUseCase::new(
        source_fetcher,
        sbom_generator,
        intelligence_service,
        report_renderer,
        progress_reporter,
    );

    let response = use_case.execute(&config)?;

    eprintln!(
        "{} {}",
        "🔗 Project page:".green(),
        response.deep_link
    );
    Ok(())
}

/// Prints what a run would do, without the API key
fn print_summary(config: &RunConfiguration) {
    let key_status = if config.dependency_track_api_key.is_empty() {
        "(not set)"
    } else {
        "(set)"
    };
    let template = config
        .report_template
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(built-in)".to_string());

    eprintln!("\n{}", "🔍 Dry run: configuration summary".bold());
    eprintln!("   Repository:        {}", config.repo_url);
    eprintln!("   SBOM file:         {}", config.sbom_file);
    eprintln!("   SBOM tool:         {}", config.sbom_tool);
    eprintln!("   Dependency-Track:  {}", config.dependency_track_api_url);
    eprintln!("   API key:           {}", key_status);
    eprintln!(
        "   Project:           {} {}",
        config.project_name, config.project_version
    );
    eprintln!("   Report file:       {}", config.report_file.display());
    eprintln!("   Report template:   {}", template);
}
