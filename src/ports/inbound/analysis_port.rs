use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// AnalysisPort - Inbound port for running a vulnerability analysis
///
/// This port defines the interface that external adapters (CLI, API, etc.)
/// use to trigger an analysis. Analyzer failures do not surface here; they
/// are part of the returned analysis.
#[async_trait]
pub trait AnalysisPort {
    /// Runs every applicable analyzer against the project and returns the
    /// finalized, sorted analysis
    ///
    /// # Errors
    /// Returns an error only if the analysis could not be set up or collected
    /// (e.g. the project files cannot be listed)
    async fn run_analysis(&self, request: AnalysisRequest) -> Result<AnalysisResponse>;
}
