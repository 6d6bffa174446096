use async_trait::async_trait;
use polyscan::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock CommitAuthorRepository returning the same author for every line
#[derive(Clone, Default)]
pub struct MockCommitAuthorRepository {
    author: CommitAuthor,
    pub calls: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl MockCommitAuthorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_author(mut self, author: &str, email: &str, commit_hash: &str) -> Self {
        self.author = CommitAuthor {
            author: author.to_string(),
            email: email.to_string(),
            commit_hash: commit_hash.to_string(),
            date: "2024-03-01T10:00:00+00:00".to_string(),
            message: "bump dependencies".to_string(),
        };
        self
    }

    pub fn get_calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommitAuthorRepository for MockCommitAuthorRepository {
    async fn commit_author(&self, file: &Path, line: &str) -> Result<CommitAuthor> {
        self.calls
            .lock()
            .unwrap()
            .push((file.to_path_buf(), line.to_string()));
        Ok(self.author.clone())
    }
}
