use super::Tool;
use thiserror::Error;

/// Failures an analyzer run can produce.
///
/// Every variant except `ProvenanceUnavailable` is accumulated on the
/// analysis; provenance failures only degrade a record's location fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("{tool} requires {manifest}, but it was not found in the project")]
    PreconditionMissing { tool: Tool, manifest: String },

    #[error("{tool} failed while running: {output}")]
    ToolExecutionFailed { tool: Tool, output: String },

    #[error("{tool} returned output that could not be parsed ({details}); raw output: {output}")]
    MalformedOutput {
        tool: Tool,
        details: String,
        output: String,
    },

    #[error("provenance unavailable for {file}: {details}")]
    ProvenanceUnavailable { file: String, details: String },

    #[error("analysis did not finish within {seconds}s; unfinished tools: {tools}")]
    AnalysisTimeout { seconds: u64, tools: String },
}

/// Discriminant of `ScanError`, retained on the analysis next to the
/// accumulated error text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanErrorKind {
    PreconditionMissing,
    ToolExecutionFailed,
    MalformedOutput,
    ProvenanceUnavailable,
    AnalysisTimeout,
}

impl ScanError {
    pub fn kind(&self) -> ScanErrorKind {
        match self {
            ScanError::PreconditionMissing { .. } => ScanErrorKind::PreconditionMissing,
            ScanError::ToolExecutionFailed { .. } => ScanErrorKind::ToolExecutionFailed,
            ScanError::MalformedOutput { .. } => ScanErrorKind::MalformedOutput,
            ScanError::ProvenanceUnavailable { .. } => ScanErrorKind::ProvenanceUnavailable,
            ScanError::AnalysisTimeout { .. } => ScanErrorKind::AnalysisTimeout,
        }
    }

    /// Whether this error belongs in the analysis' `errors` text
    pub fn is_accumulated(&self) -> bool {
        !matches!(self, ScanError::ProvenanceUnavailable { .. })
    }
}
