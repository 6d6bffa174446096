use polyscan::prelude::*;
use std::path::{Path, PathBuf};

/// Mock ProjectFileLister returning a fixed file list
pub struct MockFileLister {
    files: Vec<PathBuf>,
    should_fail: bool,
}

impl MockFileLister {
    pub fn new(files: &[&str]) -> Self {
        Self {
            files: files.iter().map(PathBuf::from).collect(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            files: Vec::new(),
            should_fail: true,
        }
    }
}

impl ProjectFileLister for MockFileLister {
    fn list_files(&self, project_path: &Path) -> Result<Vec<PathBuf>> {
        if self.should_fail {
            anyhow::bail!("Permission denied: {}", project_path.display());
        }
        Ok(self.files.clone())
    }
}
