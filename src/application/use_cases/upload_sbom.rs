use crate::pipeline::domain::{ProjectCoordinates, ProjectIdentifier, SbomArtifact};
use crate::ports::outbound::IntelligenceService;
use crate::shared::error::PipelineError;
use crate::shared::Result;

/// UploadSbomUseCase - Two-phase submission of an SBOM
///
/// Phase 1 submits the artifact; phase 2 looks the project up to learn the
/// identifier the service assigned. Phase 2 is only attempted after phase 1
/// succeeded, and either phase can be invoked on its own so a caller can
/// repeat the lookup without uploading again.
///
/// # Type Parameters
/// * `S` - IntelligenceService implementation
pub struct UploadSbomUseCase<S: IntelligenceService> {
    service: S,
}

impl<S: IntelligenceService> UploadSbomUseCase<S> {
    /// Creates a new UploadSbomUseCase with injected service
    pub fn new(service: S) -> Self {
        Self { service }
    }

    #[cfg(test)]
    pub(crate) fn service(&self) -> &S {
        &self.service
    }

    /// Submits the SBOM, then resolves the project identifier
    pub fn execute(
        &self,
        project: &ProjectCoordinates,
        sbom: &SbomArtifact,
    ) -> Result<ProjectIdentifier> {
        self.submit(project, sbom)?;
        self.resolve(project)
    }

    /// Phase 1: submission
    ///
    /// # Errors
    /// The service's error, unchanged. Only the caller knows which endpoint
    /// the service was configured with, so untyped errors are left for it
    /// to attribute to the upload step.
    pub fn submit(&self, project: &ProjectCoordinates, sbom: &SbomArtifact) -> Result<()> {
        self.service.submit_bom(project, sbom)
    }

    /// Phase 2: identifier resolution
    ///
    /// The first record in response order wins when several match.
    ///
    /// # Errors
    /// Always a `PipelineError::Resolution`: the lookup failed, returned no
    /// records, or the first record has no identifier
    pub fn resolve(&self, project: &ProjectCoordinates) -> Result<ProjectIdentifier> {
        let resolution_error = |details: String| -> anyhow::Error {
            PipelineError::Resolution {
                project_name: project.name().to_string(),
                project_version: project.version().to_string(),
                details,
            }
            .into()
        };

        let records = self.service.find_projects(project).map_err(|e| {
            if e.downcast_ref::<PipelineError>().is_some() {
                e
            } else {
                resolution_error(format!("{:#}", e))
            }
        })?;

        let first = records
            .into_iter()
            .next()
            .ok_or_else(|| resolution_error("The project lookup returned no records".to_string()))?;

        let uuid = first
            .uuid
            .ok_or_else(|| resolution_error("The first project record has no uuid".to_string()))?;

        ProjectIdentifier::new(uuid)
            .map_err(|_| resolution_error("The first project record has an empty uuid".to_string()))
    }
}
