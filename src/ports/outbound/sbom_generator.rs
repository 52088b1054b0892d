use crate::shared::Result;
use std::path::Path;

/// SbomGenerator port for producing an SBOM from a source tree
///
/// Implementations treat the underlying tool as a black box: a zero exit
/// status and a file at `output_file` are the only success criteria.
pub trait SbomGenerator {
    /// Human readable tool description used in progress and error messages
    fn tool_name(&self) -> String;

    /// Generates an SBOM for `app_dir` and writes it to `output_file`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The tool cannot be located
    /// - The tool exits with a non-zero status
    /// - No file exists at `output_file` afterwards
    fn generate(&self, app_dir: &Path, output_file: &Path) -> Result<()>;
}
