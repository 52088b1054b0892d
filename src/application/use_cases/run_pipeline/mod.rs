use crate::application::dto::PipelineResponse;
use crate::application::use_cases::UploadSbomUseCase;
use crate::config::RunConfiguration;
use crate::pipeline::domain::{
    PipelineStep, ProjectCoordinates, ReportRecord, RunState, SbomArtifact, Workspace,
    API_PATH_SUFFIX,
};
use crate::ports::inbound::PipelinePort;
use crate::ports::outbound::{
    IntelligenceService, ProgressReporter, ReportRenderer, SbomGenerator, SourceFetcher,
};
use crate::shared::error::PipelineError;
use crate::shared::Result;
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of steps announced to the operator (fetch, generate, upload, render)
const TOTAL_STEPS: usize = 4;

/// RunPipelineUseCase - The orchestrator
///
/// Sequences fetch → SBOM generation → upload → render inside a fresh
/// workspace. The first failure ends the run; no step is retried. The
/// workspace is released exactly once on the way out, whichever way that is.
///
/// # Type Parameters
/// * `F` - SourceFetcher implementation
/// * `G` - SbomGenerator implementation
/// * `S` - IntelligenceService implementation
/// * `R` - ReportRenderer implementation
/// * `PR` - ProgressReporter implementation
pub struct RunPipelineUseCase<F, G, S, R, PR>
where
    S: IntelligenceService,
{
    source_fetcher: F,
    sbom_generator: G,
    uploader: UploadSbomUseCase<S>,
    report_renderer: R,
    progress_reporter: PR,
    workspace_root: Option<PathBuf>,
    state: Cell<RunState>,
}

impl<F, G, S, R, PR> RunPipelineUseCase<F, G, S, R, PR>
where
    F: SourceFetcher,
    G: SbomGenerator,
    S: IntelligenceService,
    R: ReportRenderer,
    PR: ProgressReporter,
{
    /// Creates a new RunPipelineUseCase with injected dependencies
    pub fn new(
        source_fetcher: F,
        sbom_generator: G,
        intelligence_service: S,
        report_renderer: R,
        progress_reporter: PR,
    ) -> Self {
        Self {
            source_fetcher,
            sbom_generator,
            uploader: UploadSbomUseCase::new(intelligence_service),
            report_renderer,
            progress_reporter,
            workspace_root: None,
            state: Cell::new(RunState::Idle),
        }
    }

    /// Creates workspaces under `root` instead of the system temp dir
    pub fn with_workspace_root(mut self, root: PathBuf) -> Self {
        self.workspace_root = Some(root);
        self
    }

    /// State the most recent run ended in (`Idle` before the first run)
    pub fn state(&self) -> RunState {
        self.state.get()
    }

    /// Executes one pipeline run
    ///
    /// # Returns
    /// The report location and resolved project identifier
    ///
    /// # Errors
    /// The first step failure, as a `PipelineError` inside `anyhow::Error`
    pub fn execute(&self, config: &RunConfiguration) -> Result<PipelineResponse> {
        self.state.set(RunState::Idle);
        self.advance();

        match self.run_with_workspace(config) {
            Ok(response) => {
                self.advance();
                self.progress_reporter.report_completion(&format!(
                    "✅ Done! Report: {}",
                    response.report_path.display()
                ));
                Ok(response)
            }
            Err(e) => {
                let step = e
                    .downcast_ref::<PipelineError>()
                    .map(PipelineError::step)
                    .unwrap_or(PipelineStep::Workspace);
                self.state.set(self.state.get().fail(step));
                self.progress_reporter
                    .report_error(&format!("❌ Pipeline failed during {}", step));
                Err(e)
            }
        }
    }

    fn advance(&self) {
        if let Some(next) = self.state.get().advance() {
            self.state.set(next);
        }
    }

    /// Acquires the workspace, runs the steps, then releases it
    fn run_with_workspace(&self, config: &RunConfiguration) -> Result<PipelineResponse> {
        let workspace = match &self.workspace_root {
            Some(root) => Workspace::create_in(root)?,
            None => Workspace::create()?,
        };

        let outcome = self.run_steps(&workspace, config);

        if let Err(e) = workspace.close() {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: {}", e));
        }

        outcome
    }

    fn run_steps(&self, workspace: &Workspace, config: &RunConfiguration) -> Result<PipelineResponse> {
        let coordinates = ProjectCoordinates::new(
            config.project_name.as_str(),
            config.project_version.as_str(),
        );

        // Step 1: Clone the source
        self.progress_reporter.report_step(
            1,
            TOTAL_STEPS,
            &format!("📥 Cloning {}", config.repo_url),
        );
        self.source_fetcher
            .fetch(&config.repo_url, workspace.path())
            .map_err(|e| classify(e, PipelineStep::Fetch, config))?;
        self.advance();

        // Step 2: Generate the SBOM
        let sbom_path = workspace.join(&config.sbom_file);
        self.progress_reporter.report_step(
            2,
            TOTAL_STEPS,
            &format!("🔧 Generating SBOM with {}", self.sbom_generator.tool_name()),
        );
        let artifact = prepare_parent(&sbom_path)
            .and_then(|()| self.sbom_generator.generate(workspace.path(), &sbom_path))
            .and_then(|()| SbomArtifact::load(&sbom_path))
            .map_err(|e| classify(e, PipelineStep::SbomGeneration, config))?;
        self.progress_reporter.report(&format!(
            "✅ SBOM generated ({} bytes)",
            artifact.contents().len()
        ));
        self.advance();

        // Step 3: Submit and resolve the project identifier
        self.progress_reporter.report_step(
            3,
            TOTAL_STEPS,
            &format!(
                "📤 Uploading SBOM for {} to {}",
                coordinates, config.dependency_track_api_url
            ),
        );
        let identifier = self
            .uploader
            .execute(&coordinates, &artifact)
            .map_err(|e| classify(e, PipelineStep::Upload, config))?;
        self.progress_reporter
            .report(&format!("✅ Project identifier: {}", identifier));
        self.advance();

        // Step 4: Render the report
        self.progress_reporter
            .report_step(4, TOTAL_STEPS, "📝 Rendering HTML report");
        let record = ReportRecord::new(
            &coordinates,
            &config.dependency_track_api_url,
            &identifier,
        );
        if !record.link().is_well_formed() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: '{}' does not end with '{}'; the report link {} is likely wrong.",
                config.dependency_track_api_url,
                API_PATH_SUFFIX,
                record.link()
            ));
        }
        self.report_renderer
            .render(&config.report_file, &record)
            .map_err(|e| classify(e, PipelineStep::Render, config))?;
        self.advance();

        Ok(PipelineResponse::new(
            config.report_file.clone(),
            identifier,
            record.link().clone(),
            artifact.contents().len(),
        ))
    }
}

impl<F, G, S, R, PR> PipelinePort for RunPipelineUseCase<F, G, S, R, PR>
where
    F: SourceFetcher,
    G: SbomGenerator,
    S: IntelligenceService,
    R: ReportRenderer,
    PR: ProgressReporter,
{
    fn run(&self, config: &RunConfiguration) -> Result<PipelineResponse> {
        self.execute(config)
    }
}

/// Creates the directories leading to a workspace-relative output file
fn prepare_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Cannot create {}: {}", parent.display(), e))?;
    }
    Ok(())
}

/// Attributes an untyped error to the step it came from
///
/// Errors that already are a `PipelineError` pass through unchanged.
fn classify(error: anyhow::Error, step: PipelineStep, config: &RunConfiguration) -> anyhow::Error {
    if error.downcast_ref::<PipelineError>().is_some() {
        return error;
    }

    let details = format!("{:#}", error);
    let typed = match step {
        PipelineStep::Configuration => PipelineError::Config {
            path: PathBuf::new(),
            details,
        },
        PipelineStep::Workspace => PipelineError::Workspace { details },
        PipelineStep::Fetch => PipelineError::Fetch {
            url: config.repo_url.clone(),
            details,
        },
        PipelineStep::SbomGeneration => PipelineError::SbomGeneration {
            tool: config.sbom_tool.to_string(),
            details,
        },
        PipelineStep::Upload => PipelineError::Upload {
            endpoint: config.dependency_track_api_url.clone(),
            details,
        },
        PipelineStep::Resolution => PipelineError::Resolution {
            project_name: config.project_name.clone(),
            project_version: config.project_version.clone(),
            details,
        },
        PipelineStep::Render => PipelineError::Render {
            path: config.report_file.clone(),
            details,
        },
    };
    typed.into()
}
