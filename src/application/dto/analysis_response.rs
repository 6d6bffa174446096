use crate::scanning::domain::{Analysis, Language};

/// AnalysisResponse - Result of the analysis use case
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    /// Finalized analysis, records sorted by criticality
    pub analysis: Analysis,
    /// Languages found in the project, whether or not an adapter exists for them
    pub detected_languages: Vec<Language>,
}

impl AnalysisResponse {
    pub fn new(analysis: Analysis, detected_languages: Vec<Language>) -> Self {
        Self {
            analysis,
            detected_languages,
        }
    }
}
