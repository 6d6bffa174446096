use super::{AnalysisSink, ProvenanceEnricher};
use crate::ports::outbound::{Formatter, Sandbox, SandboxRequest, ScanReporter};
use crate::scanning::domain::{ScanError, Vulnerability};
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;

/// Placeholder in command templates replaced by the change into the sub path
pub const WORK_DIR_PLACEHOLDER: &str = "{{WORK_DIR}}";

/// Capabilities shared by every formatter: sandbox execution, provenance
/// lookups and the sink towards the running analysis.
///
/// Cheap to clone; each formatter adapter owns one copy.
#[derive(Clone)]
pub struct FormatterService {
    project_path: PathBuf,
    sandbox: Arc<dyn Sandbox>,
    enricher: ProvenanceEnricher,
    reporter: Arc<dyn ScanReporter>,
    sink: AnalysisSink,
}

impl FormatterService {
    pub fn new(
        project_path: PathBuf,
        sandbox: Arc<dyn Sandbox>,
        enricher: ProvenanceEnricher,
        reporter: Arc<dyn ScanReporter>,
        sink: AnalysisSink,
    ) -> Self {
        Self {
            project_path,
            sandbox,
            enricher,
            reporter,
            sink,
        }
    }

    /// Runs one formatter against one project sub path.
    ///
    /// Errors go to the analysis; completion of `(language, tool)` is
    /// signalled exactly once whatever the outcome.
    pub async fn execute<F>(&self, formatter: &F, project_sub_path: &str)
    where
        F: Formatter + ?Sized,
    {
        let tool = formatter.tool();
        self.reporter.report_debug(&format!(
            "{} starting in '{}'",
            tool,
            display_sub_path(project_sub_path)
        ));

        match self.analyze(formatter, project_sub_path).await {
            Ok(vulnerabilities) => {
                self.reporter.report_debug(&format!(
                    "{} found {} vulnerabilities in '{}'",
                    tool,
                    vulnerabilities.len(),
                    display_sub_path(project_sub_path)
                ));
                self.sink.append_vulnerabilities(vulnerabilities);
            }
            Err(error) => {
                self.reporter.report_error(&error.to_string());
                self.sink.record_error(error);
            }
        }

        self.sink.finish(formatter.language(), tool);
    }

    async fn analyze<F>(
        &self,
        formatter: &F,
        project_sub_path: &str,
    ) -> Result<Vec<Vulnerability>, ScanError>
    where
        F: Formatter + ?Sized,
    {
        let request = SandboxRequest {
            image: formatter.image().clone(),
            command: add_work_dir_in_cmd(formatter.command_template(), project_sub_path),
            language: formatter.language(),
            project_path: self.project_path.clone(),
        };

        let output = self
            .sandbox
            .execute(&request)
            .await
            .map_err(|e| ScanError::ToolExecutionFailed {
                tool: formatter.tool(),
                output: format!("{:#}", e),
            })?;

        if output.trim().is_empty() {
            self.reporter
                .report_debug(&format!("{} returned empty output", formatter.tool()));
        }

        let mut vulnerabilities = formatter.parse(&output)?;
        let manifest = manifest_path(project_sub_path, formatter.manifest_file());
        for vulnerability in &mut vulnerabilities {
            vulnerability.file = manifest.clone();
        }

        let notation = formatter.lockfile_notation();
        Ok(join_all(
            vulnerabilities
                .into_iter()
                .map(|vulnerability| self.enricher.enrich(vulnerability, notation)),
        )
        .await)
    }
}

/// Substitutes the work dir placeholder with `cd <sub path>` (or nothing
/// for the project root)
pub fn add_work_dir_in_cmd(template: &str, project_sub_path: &str) -> String {
    let sub_path = project_sub_path.trim_matches('/');
    let change_dir = if sub_path.is_empty() {
        String::new()
    } else {
        format!("cd {}", sub_path)
    };
    template.replace(WORK_DIR_PLACEHOLDER, &change_dir)
}

/// Manifest path relative to the project root
pub fn manifest_path(project_sub_path: &str, manifest: &str) -> String {
    let sub_path = project_sub_path.trim_matches('/');
    if sub_path.is_empty() {
        manifest.to_string()
    } else {
        format!("{}/{}", sub_path, manifest)
    }
}

fn display_sub_path(project_sub_path: &str) -> &str {
    if project_sub_path.is_empty() {
        "."
    } else {
        project_sub_path
    }
}
