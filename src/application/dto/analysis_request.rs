use crate::scanning::domain::{AnalysisScope, Language, Tool, ToolImage};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Default upper bound for a whole analysis
pub const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(1200);

/// Knobs that decide which adapters run and where
#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Tools that must not run even if their language is detected
    pub disabled_tools: Vec<Tool>,
    /// Project sub paths to scan per language; a missing entry means the project root
    pub work_dirs: HashMap<Language, Vec<String>>,
    /// Image overrides per tool
    pub images: HashMap<Tool, ToolImage>,
    /// Upper bound for the whole analysis
    pub analysis_timeout: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            disabled_tools: Vec::new(),
            work_dirs: HashMap::new(),
            images: HashMap::new(),
            analysis_timeout: DEFAULT_ANALYSIS_TIMEOUT,
        }
    }
}

impl ScanSettings {
    pub fn is_enabled(&self, tool: Tool) -> bool {
        !self.disabled_tools.contains(&tool)
    }

    /// Sub paths to scan for `language`, defaulting to the project root
    pub fn work_dirs_for(&self, language: Language) -> Vec<String> {
        match self.work_dirs.get(&language) {
            Some(dirs) if !dirs.is_empty() => dirs.clone(),
            _ => vec![String::new()],
        }
    }

    pub fn image_for(&self, tool: Tool) -> ToolImage {
        self.images
            .get(&tool)
            .cloned()
            .unwrap_or_else(|| tool.default_image())
    }
}

/// AnalysisRequest - Internal request DTO for the analysis use case
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Canonical path of the project directory
    pub project_path: PathBuf,
    /// Repository/company the analysis is recorded for
    pub scope: AnalysisScope,
    pub settings: ScanSettings,
}

impl AnalysisRequest {
    pub fn new(project_path: PathBuf, scope: AnalysisScope) -> Self {
        Self {
            project_path,
            scope,
            settings: ScanSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ScanSettings) -> Self {
        self.settings = settings;
        self
    }
}
