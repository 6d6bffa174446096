use crate::ports::outbound::ProjectFileLister;
use crate::shared::error::AppError;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Directories that never contain first-party sources
const SKIPPED_DIRECTORIES: &[&str] = &[".git", "node_modules", "vendor", "target"];

/// FileSystemReader adapter for enumerating project files
///
/// This adapter implements the ProjectFileLister port. Symbolic links are
/// never followed, and dependency or build directories are skipped.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn walk(&self, root: &Path, directory: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        let entries = fs::read_dir(directory).map_err(|e| AppError::FileReadError {
            path: directory.to_path_buf(),
            details: e.to_string(),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| AppError::FileReadError {
                path: directory.to_path_buf(),
                details: e.to_string(),
            })?;
            // file_type() does not follow symlinks
            let file_type = entry.file_type().map_err(|e| AppError::FileReadError {
                path: entry.path(),
                details: e.to_string(),
            })?;

            if file_type.is_symlink() {
                continue;
            }

            let path = entry.path();
            if file_type.is_dir() {
                let skipped = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| SKIPPED_DIRECTORIES.contains(&name));
                if !skipped {
                    self.walk(root, &path, files)?;
                }
            } else if file_type.is_file() {
                if let Ok(relative) = path.strip_prefix(root) {
                    files.push(relative.to_path_buf());
                }
            }
        }
        Ok(())
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectFileLister for FileSystemReader {
    fn list_files(&self, project_path: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.walk(project_path, project_path, &mut files)?;
        files.sort();
        Ok(files)
    }
}
