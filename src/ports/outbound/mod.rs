/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces the pipeline uses to reach the outside
/// world: git, the SBOM tool, the intelligence service, the filesystem and
/// the console.
pub mod intelligence_service;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_renderer;
pub mod sbom_generator;
pub mod source_fetcher;

pub use intelligence_service::IntelligenceService;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_renderer::ReportRenderer;
pub use sbom_generator::SbomGenerator;
pub use source_fetcher::SourceFetcher;
