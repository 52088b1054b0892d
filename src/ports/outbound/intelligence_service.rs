use crate::pipeline::domain::{ProjectCoordinates, ProjectRecord, SbomArtifact};
use crate::shared::Result;

/// IntelligenceService port for the vulnerability-analysis backend
///
/// The service does not return the project identifier when a BOM is
/// ingested, so the contract is split in two calls: submit, then look the
/// project up. Keeping them separate lets either phase fail (or be retried)
/// on its own.
pub trait IntelligenceService {
    /// Submits the SBOM for `project`, asking the service to create the
    /// project if it does not exist yet
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent or the service
    /// answers with a status outside the 2xx range
    fn submit_bom(&self, project: &ProjectCoordinates, sbom: &SbomArtifact) -> Result<()>;

    /// Looks up projects matching `project`, in the order the service
    /// returns them
    ///
    /// # Errors
    /// Returns an error if the request fails or the response is not a list
    /// of project records
    fn find_projects(&self, project: &ProjectCoordinates) -> Result<Vec<ProjectRecord>>;
}
