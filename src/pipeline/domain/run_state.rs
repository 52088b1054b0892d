use crate::shared::error::PipelineError;
use std::fmt;

/// A unit of work the orchestrator can fail in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Configuration,
    Workspace,
    Fetch,
    SbomGeneration,
    Upload,
    Resolution,
    Render,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStep::Configuration => "configuration",
            PipelineStep::Workspace => "workspace",
            PipelineStep::Fetch => "source fetch",
            PipelineStep::SbomGeneration => "SBOM generation",
            PipelineStep::Upload => "SBOM upload",
            PipelineStep::Resolution => "project resolution",
            PipelineStep::Render => "report rendering",
        };
        write!(f, "{}", name)
    }
}

impl PipelineError {
    /// The step this error belongs to
    pub fn step(&self) -> PipelineStep {
        match self {
            PipelineError::Config { .. } => PipelineStep::Configuration,
            PipelineError::Workspace { .. } => PipelineStep::Workspace,
            PipelineError::Fetch { .. } => PipelineStep::Fetch,
            PipelineError::SbomGeneration { .. } => PipelineStep::SbomGeneration,
            PipelineError::Upload { .. } => PipelineStep::Upload,
            PipelineError::Resolution { .. } => PipelineStep::Resolution,
            PipelineError::Render { .. } => PipelineStep::Render,
        }
    }
}

/// Orchestrator state machine
///
/// ```text
/// Idle -> Configured -> Fetched -> SbomGenerated -> Uploaded -> Rendered -> Done
///   \________\___________\____________\______________\___________\-> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Configured,
    Fetched,
    SbomGenerated,
    Uploaded,
    Rendered,
    Done,
    Failed(PipelineStep),
}

impl RunState {
    /// The state entered when the current step succeeds
    ///
    /// Returns `None` from a terminal state.
    pub fn advance(self) -> Option<RunState> {
        match self {
            RunState::Idle => Some(RunState::Configured),
            RunState::Configured => Some(RunState::Fetched),
            RunState::Fetched => Some(RunState::SbomGenerated),
            RunState::SbomGenerated => Some(RunState::Uploaded),
            RunState::Uploaded => Some(RunState::Rendered),
            RunState::Rendered => Some(RunState::Done),
            RunState::Done | RunState::Failed(_) => None,
        }
    }

    /// The state entered when the current step fails
    ///
    /// A terminal state is returned unchanged.
    pub fn fail(self, step: PipelineStep) -> RunState {
        if self.is_terminal() {
            self
        } else {
            RunState::Failed(step)
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Failed(_))
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::Configured => write!(f, "Configured"),
            RunState::Fetched => write!(f, "Fetched"),
            RunState::SbomGenerated => write!(f, "SBOMGenerated"),
            RunState::Uploaded => write!(f, "Uploaded"),
            RunState::Rendered => write!(f, "Rendered"),
            RunState::Done => write!(f, "Done"),
            RunState::Failed(step) => write!(f, "Failed ({})", step),
        }
    }
}
