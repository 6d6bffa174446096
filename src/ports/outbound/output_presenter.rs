use crate::shared::Result;

/// OutputPresenter port for presenting the finished report
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the serialized analysis is presented.
pub trait OutputPresenter {
    /// Presents the serialized analysis to the output destination
    ///
    /// # Errors
    /// Returns an error if writing to the output destination fails
    fn present(&self, content: &str) -> Result<()>;
}
