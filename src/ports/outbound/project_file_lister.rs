use crate::shared::Result;
use std::path::{Path, PathBuf};

/// ProjectFileLister port for enumerating the files of a project
pub trait ProjectFileLister: Send + Sync {
    /// Lists project files relative to `project_path`
    ///
    /// # Errors
    /// Returns an error if the project directory cannot be read
    fn list_files(&self, project_path: &Path) -> Result<Vec<PathBuf>>;
}
