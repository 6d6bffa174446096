use crate::shared::error::AppError;
use crate::shared::Result;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Maximum size of files polyscan reads itself (config files), 10 MB
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Validates the project directory and returns its canonical form.
///
/// # Security
/// Symbolic links are rejected before canonicalization so the sandbox mount
/// always points at the directory the user actually named.
///
/// # Errors
/// Returns `AppError::InvalidProjectPath` if the path does not exist,
/// is a symbolic link, or is not a directory.
pub fn validate_project_directory(path: &Path) -> Result<PathBuf> {
    let invalid = |reason: String| AppError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(invalid("Directory does not exist".to_string()).into());
    }

    let metadata = fs::symlink_metadata(path)
        .map_err(|e| invalid(format!("Failed to read path metadata: {}", e)))?;

    if metadata.is_symlink() {
        return Err(invalid(
            "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        )
        .into());
    }

    if !metadata.is_dir() {
        return Err(invalid("Not a directory".to_string()).into());
    }

    path.canonicalize()
        .map_err(|e| invalid(format!("Failed to canonicalize path: {}", e)).into())
}

/// Validates that a path is a regular file within the size limit.
///
/// # Errors
/// Returns `AppError::SecurityError` for symbolic links and oversized files,
/// and `AppError::FileReadError` when metadata cannot be read.
pub fn validate_regular_file(path: &Path, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| AppError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if metadata.is_symlink() {
        return Err(AppError::SecurityError {
            path: path.to_path_buf(),
            reason: "File is a symbolic link".to_string(),
            hint: "Point polyscan at the real file instead of a link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(AppError::FileReadError {
            path: path.to_path_buf(),
            details: "Not a regular file".to_string(),
        }
        .into());
    }

    if metadata.len() > max_size {
        return Err(AppError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes",
                metadata.len(),
                max_size
            ),
            hint: "Reduce the file size".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Returns true if `sub_path` stays inside the project root.
///
/// Work directories are handed to the sandbox as `cd <sub_path>`, so absolute
/// paths and parent traversals are refused.
pub fn is_contained_sub_path(sub_path: &str) -> bool {
    Path::new(sub_path)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}
