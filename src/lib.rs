//! polyscan - sandboxed multi-tool security analysis
//!
//! This library runs third-party security analyzers in isolated containers,
//! normalizes their findings into one vulnerability record format and
//! aggregates them into a single analysis, following hexagonal architecture
//! and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scanning`): Analysis aggregate, vulnerability records and pure services
//! - **Application Layer** (`application`): Use cases, orchestration services and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use polyscan::prelude::*;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let use_case = RunAnalysisUseCase::new(
//!     Arc::new(FileSystemReader::new()),
//!     Arc::new(DockerSandbox::default()),
//!     Arc::new(DisabledCommitAuthorRepository),
//!     Arc::new(StderrScanReporter::new(false)),
//! );
//!
//! // Execute
//! let request = AnalysisRequest::new(PathBuf::from("."), AnalysisScope::new());
//! let response = use_case.execute(request).await?;
//!
//! println!("{}", serde_json::to_string_pretty(&response.analysis)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod scanning;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrScanReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{NpmAuditFormatter, YarnAuditFormatter};
    pub use crate::adapters::outbound::git::{
        DisabledCommitAuthorRepository, GitCommitAuthorRepository,
    };
    pub use crate::adapters::outbound::sandbox::DockerSandbox;
    pub use crate::application::dto::{AnalysisRequest, AnalysisResponse, ScanSettings};
    pub use crate::application::use_cases::RunAnalysisUseCase;
    pub use crate::ports::inbound::AnalysisPort;
    pub use crate::ports::outbound::{
        CommitAuthorRepository, Formatter, OutputPresenter, ProjectFileLister, Sandbox,
        SandboxRequest, ScanReporter,
    };
    pub use crate::scanning::domain::{
        Analysis, AnalysisScope, AnalysisStatus, CommitAuthor, Language, ScanError, Severity,
        Tool, ToolImage, Vulnerability,
    };
    pub use crate::shared::Result;
}
