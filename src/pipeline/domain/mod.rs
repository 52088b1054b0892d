pub mod deep_link;
pub mod project;
pub mod report_record;
pub mod run_state;
pub mod sbom_artifact;
pub mod workspace;

pub use deep_link::{DeepLink, API_PATH_SUFFIX};
pub use project::{ProjectCoordinates, ProjectIdentifier, ProjectRecord};
pub use report_record::ReportRecord;
pub use run_state::{PipelineStep, RunState};
pub use sbom_artifact::SbomArtifact;
pub use workspace::Workspace;
