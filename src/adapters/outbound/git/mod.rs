/// Version-control adapters for commit attribution
mod git_commit_author_repository;

pub use git_commit_author_repository::{DisabledCommitAuthorRepository, GitCommitAuthorRepository};
