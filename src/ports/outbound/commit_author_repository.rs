use crate::scanning::domain::CommitAuthor;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// CommitAuthorRepository port for version-control attribution
///
/// Resolves who last touched a line of a project file.
#[async_trait]
pub trait CommitAuthorRepository: Send + Sync {
    /// Looks up the commit that last modified `line` of `file`
    ///
    /// # Arguments
    /// * `file` - Path relative to the project root
    /// * `line` - 1-indexed line number as text
    ///
    /// # Returns
    /// The attribution, with empty fields when no history exists
    ///
    /// # Errors
    /// Returns an error if the version-control client fails
    async fn commit_author(&self, file: &Path, line: &str) -> Result<CommitAuthor>;
}
