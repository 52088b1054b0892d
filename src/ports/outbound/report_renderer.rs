use crate::pipeline::domain::ReportRecord;
use crate::shared::Result;
use std::path::Path;

/// ReportRenderer port for producing the final human-readable artifact
pub trait ReportRenderer {
    /// Renders `record` and writes the result to `destination`
    ///
    /// # Errors
    /// Returns an error if the template cannot be loaded or parsed, or if
    /// the destination cannot be written. Nothing is written on failure.
    fn render(&self, destination: &Path, record: &ReportRecord) -> Result<()>;
}
