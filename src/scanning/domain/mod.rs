pub mod analysis;
pub mod commit_author;
pub mod language;
pub mod scan_error;
pub mod severity;
pub mod status;
pub mod tool;
pub mod vulnerability;

pub use analysis::{Analysis, AnalysisScope};
pub use commit_author::CommitAuthor;
pub use language::Language;
pub use scan_error::{ScanError, ScanErrorKind};
pub use severity::Severity;
pub use status::AnalysisStatus;
pub use tool::{Tool, ToolImage};
pub use vulnerability::Vulnerability;
