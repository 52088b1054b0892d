//! sbom-pipeline - Software supply chain pipeline for a single application
//!
//! This library clones an application's source, generates a CycloneDX SBOM for
//! it, submits the SBOM to a Dependency-Track server, resolves the project's
//! identifier, and renders an HTML report linking to the project page. It
//! follows a hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`pipeline`): Run state machine, workspace and value types
//! - **Application Layer** (`application`): The orchestrator and the two-phase uploader
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): git, process, HTTP, report and console implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_pipeline::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! let reporter = StderrProgressReporter::new();
//! let config = load_run_configuration(Path::new("config.yaml"), &reporter)?;
//!
//! // Create adapters
//! let use_case = RunPipelineUseCase::new(
//!     GitSourceFetcher::new(),
//!     CommandSbomGenerator::new(config.sbom_tool),
//!     DependencyTrackClient::new(
//!         &config.dependency_track_api_url,
//!         &config.dependency_track_api_key,
//!     )?,
//!     HtmlReportRenderer::new(),
//!     reporter,
//! );
//!
//! // Execute
//! let response = use_case.execute(&config)?;
//! println!("{}", response.deep_link);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod pipeline;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::FileSystemWriter;
    pub use crate::adapters::outbound::git::GitSourceFetcher;
    pub use crate::adapters::outbound::network::DependencyTrackClient;
    pub use crate::adapters::outbound::process::{CommandSbomGenerator, SbomCommand};
    pub use crate::adapters::outbound::report::HtmlReportRenderer;
    pub use crate::application::dto::PipelineResponse;
    pub use crate::application::use_cases::{RunPipelineUseCase, UploadSbomUseCase};
    pub use crate::config::{load_run_configuration, RunConfiguration, SbomToolchain};
    pub use crate::pipeline::domain::{
        DeepLink, PipelineStep, ProjectCoordinates, ProjectIdentifier, ProjectRecord,
        ReportRecord, RunState, SbomArtifact, Workspace,
    };
    pub use crate::ports::inbound::PipelinePort;
    pub use crate::ports::outbound::{
        IntelligenceService, OutputPresenter, ProgressReporter, ReportRenderer, SbomGenerator,
        SourceFetcher,
    };
    pub use crate::shared::error::{ExitCode, PipelineError};
    pub use crate::shared::Result;
}
