use crate::shared::Result;

/// OutputPresenter port for writing a finished artifact
///
/// The report renderer hands its fully rendered text to a presenter, so a
/// template failure never leaves a partial file behind.
pub trait OutputPresenter {
    /// Presents the rendered content to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    /// - The destination is a symbolic link
    fn present(&self, content: &str) -> Result<()>;
}
