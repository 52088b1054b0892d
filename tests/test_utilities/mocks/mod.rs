/// Mock implementations for testing
mod mock_intelligence_service;
mod mock_progress_reporter;
mod mock_sbom_generator;
mod mock_source_fetcher;

pub use mock_intelligence_service::MockIntelligenceService;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_sbom_generator::{MockSbomGenerator, MOCK_SBOM};
pub use mock_source_fetcher::MockSourceFetcher;
