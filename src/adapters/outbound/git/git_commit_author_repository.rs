use crate::ports::outbound::CommitAuthorRepository;
use crate::scanning::domain::CommitAuthor;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::DateTime;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Author name git reports for lines that are not committed yet
const NOT_COMMITTED_AUTHOR: &str = "Not Committed Yet";

/// GitCommitAuthorRepository adapter attributing lines with `git blame`
pub struct GitCommitAuthorRepository {
    project_path: PathBuf,
}

impl GitCommitAuthorRepository {
    pub fn new(project_path: PathBuf) -> Self {
        Self { project_path }
    }

    /// Parses `git blame --porcelain` output for a single line.
    ///
    /// Uncommitted lines yield an empty author.
    pub fn parse_porcelain(output: &str) -> Result<CommitAuthor> {
        let mut lines = output.lines();
        let header = lines
            .next()
            .ok_or_else(|| anyhow::anyhow!("git blame returned no output"))?;
        let commit_hash = header
            .split_whitespace()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Unexpected git blame header: {}", header))?;

        if commit_hash.chars().all(|c| c == '0') {
            return Ok(CommitAuthor::default());
        }

        let mut author = CommitAuthor {
            commit_hash: commit_hash.to_string(),
            ..CommitAuthor::default()
        };

        for line in lines {
            // content line terminates the header block
            if line.starts_with('\t') {
                break;
            }
            let (key, value) = line.split_once(' ').unwrap_or((line, ""));
            match key {
                "author" => author.author = value.to_string(),
                "author-mail" => {
                    author.email = value.trim_start_matches('<').trim_end_matches('>').to_string()
                }
                "author-time" => {
                    let seconds: i64 = value
                        .parse()
                        .map_err(|e| anyhow::anyhow!("Invalid author-time '{}': {}", value, e))?;
                    author.date = DateTime::from_timestamp(seconds, 0)
                        .map(|date| date.to_rfc3339())
                        .unwrap_or_default();
                }
                "summary" => author.message = value.to_string(),
                _ => {}
            }
        }

        if author.author == NOT_COMMITTED_AUTHOR {
            return Ok(CommitAuthor::default());
        }
        Ok(author)
    }
}

#[async_trait]
impl CommitAuthorRepository for GitCommitAuthorRepository {
    async fn commit_author(&self, file: &Path, line: &str) -> Result<CommitAuthor> {
        let line_number: usize = line
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid line number '{}'", line))?;
        let range = format!("{},{}", line_number, line_number);

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.project_path)
            .args(["blame", "--porcelain", "-L", &range, "--"])
            .arg(file)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run git: {}", e))?;

        if !output.status.success() {
            anyhow::bail!(
                "git blame failed for {}:{}: {}",
                file.display(),
                line,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Self::parse_porcelain(&String::from_utf8_lossy(&output.stdout))
    }
}

/// DisabledCommitAuthorRepository adapter used when attribution is off
pub struct DisabledCommitAuthorRepository;

#[async_trait]
impl CommitAuthorRepository for DisabledCommitAuthorRepository {
    async fn commit_author(&self, _file: &Path, _line: &str) -> Result<CommitAuthor> {
        Ok(CommitAuthor::default())
    }
}
