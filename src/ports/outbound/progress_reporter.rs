/// ProgressReporter port for user-facing status messages
///
/// This port abstracts where status goes (stderr in the CLI) so that
/// stdout stays clean for listings.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress through a multi-step operation
    ///
    /// # Arguments
    /// * `current` - Steps completed
    /// * `total` - Total expected steps
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
