use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// The pipeline is all-or-nothing: there is no partial-success code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every step completed and the report was written
    Success = 0,
    /// Any step failed (configuration, fetch, SBOM, upload, resolution, render)
    PipelineFailed = 1,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PipelineFailed => write!(f, "Pipeline Failed (1)"),
        }
    }
}

/// Pipeline errors, one variant per failure domain.
///
/// Each variant names the step that failed and carries the underlying cause
/// as text, so the message alone is enough to diagnose the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to load configuration: {path}\nDetails: {details}\n\n💡 Hint: Check that the file exists and contains valid YAML or TOML")]
    Config { path: PathBuf, details: String },

    #[error("Failed to prepare workspace\nDetails: {details}\n\n💡 Hint: Check that the system temporary directory is writable")]
    Workspace { details: String },

    #[error("Failed to fetch source repository: {url}\nDetails: {details}\n\n💡 Hint: Verify the repository URL, your network connection and your credentials")]
    Fetch { url: String, details: String },

    #[error("SBOM generation failed using {tool}\nDetails: {details}\n\n💡 Hint: Make sure the SBOM tool is installed and on your PATH")]
    SbomGeneration { tool: String, details: String },

    #[error("Failed to upload SBOM to {endpoint}\nDetails: {details}\n\n💡 Hint: Verify the Dependency-Track URL and API key")]
    Upload { endpoint: String, details: String },

    #[error("Failed to resolve project identifier for {project_name} {project_version}\nDetails: {details}\n\n💡 Hint: The project may not be indexed yet, or the API key may lack the VIEW_PORTFOLIO permission")]
    Resolution {
        project_name: String,
        project_version: String,
        details: String,
    },

    #[error("Failed to render report: {path}\nDetails: {details}\n\n💡 Hint: Check the report template and that the output directory exists and is writable")]
    Render { path: PathBuf, details: String },
}
