use crate::scanning::domain::{Language, ToolImage};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Description of one isolated tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRequest {
    pub image: ToolImage,
    /// Shell script executed inside the sandbox, working directory is the project root
    pub command: String,
    pub language: Language,
    /// Project directory made available (read-only) to the sandbox
    pub project_path: PathBuf,
}

/// Sandbox port for executing a security tool in isolation
///
/// The core only depends on getting the tool's raw output back as text;
/// image lifecycle and timeouts belong to the implementation.
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Runs the request and returns the tool's raw standard output
    ///
    /// # Errors
    /// Returns an error if the sandbox could not run the tool at all
    /// (runtime unavailable, image missing, timeout). A tool that ran and
    /// exited non-zero is not an error; its output is returned as data.
    async fn execute(&self, request: &SandboxRequest) -> Result<String>;
}
