/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (sandbox runtime, version control,
/// file system, console).
pub mod commit_author_repository;
pub mod formatter;
pub mod output_presenter;
pub mod project_file_lister;
pub mod sandbox;
pub mod scan_reporter;

pub use commit_author_repository::CommitAuthorRepository;
pub use formatter::Formatter;
pub use output_presenter::OutputPresenter;
pub use project_file_lister::ProjectFileLister;
pub use sandbox::{Sandbox, SandboxRequest};
pub use scan_reporter::ScanReporter;
