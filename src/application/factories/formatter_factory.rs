use crate::adapters::outbound::formatters::{NpmAuditFormatter, YarnAuditFormatter};
use crate::application::dto::ScanSettings;
use crate::application::services::FormatterService;
use crate::ports::outbound::Formatter;
use crate::scanning::domain::{Language, Tool, ToolImage};
use std::sync::Arc;

/// One formatter scheduled against one project sub path
#[derive(Clone)]
pub struct PlannedRun {
    pub formatter: Arc<dyn Formatter>,
    pub project_sub_path: String,
}

impl PlannedRun {
    pub fn language(&self) -> Language {
        self.formatter.language()
    }

    pub fn tool(&self) -> Tool {
        self.formatter.tool()
    }
}

/// Factory for creating formatter adapters
///
/// This factory encapsulates which adapter drives which tool, following the
/// Factory Pattern. It belongs in the application layer as it selects
/// infrastructure adapters based on the detected languages and settings.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates the formatter adapter for a tool
    ///
    /// # Arguments
    /// * `tool` - The tool to drive
    /// * `service` - Shared pipeline the adapter delegates to
    /// * `image` - Container image the tool runs in
    pub fn create(tool: Tool, service: FormatterService, image: ToolImage) -> Arc<dyn Formatter> {
        match tool {
            Tool::YarnAudit => Arc::new(YarnAuditFormatter::new(service, image)),
            Tool::NpmAudit => Arc::new(NpmAuditFormatter::new(service, image)),
        }
    }

    /// Builds the scan plan: every enabled tool of every language, once per
    /// configured sub path
    ///
    /// # Returns
    /// Planned runs grouped by language, in language then tool order
    pub fn plan(
        languages: &[Language],
        settings: &ScanSettings,
        service: &FormatterService,
    ) -> Vec<PlannedRun> {
        let mut runs = Vec::new();
        for &language in languages {
            let tools: Vec<Tool> = Tool::for_language(language)
                .into_iter()
                .filter(|tool| settings.is_enabled(*tool))
                .collect();
            if tools.is_empty() {
                continue;
            }

            let work_dirs = settings.work_dirs_for(language);
            for tool in tools {
                let formatter = Self::create(tool, service.clone(), settings.image_for(tool));
                for project_sub_path in &work_dirs {
                    runs.push(PlannedRun {
                        formatter: Arc::clone(&formatter),
                        project_sub_path: project_sub_path.clone(),
                    });
                }
            }
        }
        runs
    }

    /// Languages that have at least one registered adapter
    pub fn supports(language: Language) -> bool {
        !Tool::for_language(language).is_empty()
    }
}
