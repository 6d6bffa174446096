use crate::scanning::domain::Language;

/// ScanReporter port for diagnostics and progress during an analysis
///
/// Implementations are shared by every concurrently running adapter and
/// therefore must be `Send + Sync`.
pub trait ScanReporter: Send + Sync {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Reports a diagnostic message that is only interesting when debugging
    fn report_debug(&self, message: &str);

    /// Reports adapter progress
    ///
    /// # Arguments
    /// * `current` - Number of adapter runs finished so far
    /// * `total` - Number of adapter runs planned
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports that every adapter of a language has finished
    fn report_language_finished(&self, language: Language);

    /// Reports completion of the analysis
    fn report_completion(&self, message: &str);
}
