use crate::application::dto::PipelineResponse;
use crate::config::RunConfiguration;
use crate::shared::Result;

/// PipelinePort - Inbound port for a full pipeline run
///
/// This port defines the interface that external adapters (CLI, CI jobs)
/// use to trigger a run. It represents the application's public API.
pub trait PipelinePort {
    /// Runs fetch, SBOM generation, upload and report rendering for `config`
    ///
    /// # Errors
    /// Returns the first failure as a `PipelineError`; no later step runs
    /// after a failure and the workspace is removed either way.
    fn run(&self, config: &RunConfiguration) -> Result<PipelineResponse>;
}
