use crate::pipeline::domain::{DeepLink, ProjectIdentifier};
use std::path::PathBuf;

/// PipelineResponse - Result of a successful pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResponse {
    /// Where the HTML report was written
    pub report_path: PathBuf,
    /// Identifier the service assigned to the project
    pub project_identifier: ProjectIdentifier,
    /// Link to the project's page on the service
    pub deep_link: DeepLink,
    /// Size of the uploaded SBOM in bytes
    pub sbom_size: usize,
}

impl PipelineResponse {
    pub fn new(
        report_path: PathBuf,
        project_identifier: ProjectIdentifier,
        deep_link: DeepLink,
        sbom_size: usize,
    ) -> Self {
        Self {
            report_path,
            project_identifier,
            deep_link,
            sbom_size,
        }
    }
}
