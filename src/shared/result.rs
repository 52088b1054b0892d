/// Result alias used throughout the pipeline.
///
/// Typed failures are `PipelineError` values carried inside `anyhow::Error`
/// and recovered with `downcast_ref` where the step matters.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
