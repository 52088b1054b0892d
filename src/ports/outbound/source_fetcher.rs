use crate::shared::Result;
use std::path::Path;

/// SourceFetcher port for retrieving the application's source tree
pub trait SourceFetcher {
    /// Clones the default branch of `repository_url` into `target_dir`
    ///
    /// # Arguments
    /// * `repository_url` - Remote repository location
    /// * `target_dir` - Destination; must be absent or empty
    ///
    /// # Errors
    /// Returns an error if:
    /// - `target_dir` already contains files
    /// - The URL is invalid or the remote cannot be reached
    /// - Authentication fails
    fn fetch(&self, repository_url: &str, target_dir: &Path) -> Result<()>;
}
