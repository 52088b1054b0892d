/// ProgressReporter port for operator-facing run output
///
/// All diagnostics of a run go through this port so the application layer
/// never writes to the console directly.
pub trait ProgressReporter {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Announces that step `current` of `total` has started
    ///
    /// # Arguments
    /// * `current` - 1-based index of the step
    /// * `total` - Number of steps in the run
    /// * `message` - What the step does
    fn report_step(&self, current: usize, total: usize, message: &str);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of the run
    fn report_completion(&self, message: &str);
}
