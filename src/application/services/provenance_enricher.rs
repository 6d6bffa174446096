use crate::ports::outbound::{CommitAuthorRepository, ScanReporter};
use crate::scanning::domain::{CommitAuthor, ScanError, Vulnerability};
use crate::scanning::services::{DependencyLocator, LockfileNotation};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolves where a vulnerable dependency is declared and who declared it.
///
/// Both lookups are best effort: failures are reported at debug level as
/// provenance problems and leave the record's fields empty.
#[derive(Clone)]
pub struct ProvenanceEnricher {
    project_path: PathBuf,
    commit_authors: Arc<dyn CommitAuthorRepository>,
    reporter: Arc<dyn ScanReporter>,
}

impl ProvenanceEnricher {
    pub fn new(
        project_path: PathBuf,
        commit_authors: Arc<dyn CommitAuthorRepository>,
        reporter: Arc<dyn ScanReporter>,
    ) -> Self {
        Self {
            project_path,
            commit_authors,
            reporter,
        }
    }

    /// Fills `line` and the commit attribution of a freshly parsed record,
    /// reading its manifest with the given notation
    pub async fn enrich(&self, mut vulnerability: Vulnerability, notation: LockfileNotation) -> Vulnerability {
        vulnerability.line = self
            .find_dependency_line(
                Path::new(&vulnerability.file),
                notation,
                &vulnerability.code,
                &vulnerability.version,
            )
            .await;

        if vulnerability.has_location() {
            let author = self
                .commit_author(Path::new(&vulnerability.file), &vulnerability.line)
                .await;
            vulnerability.set_commit_author(author);
        }
        vulnerability
    }

    /// Returns the 1-indexed line declaring `module@version` in `manifest`
    /// (relative to the project root), or an empty string.
    ///
    /// Invalid UTF-8 is replaced rather than ending the scan.
    pub async fn find_dependency_line(
        &self,
        manifest: &Path,
        notation: LockfileNotation,
        module: &str,
        version: &str,
    ) -> String {
        if module.is_empty() {
            return String::new();
        }

        let content = match tokio::fs::read(self.project_path.join(manifest)).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.report_unavailable(manifest, &format!("cannot read manifest: {}", e));
                return String::new();
            }
        };

        let locator = DependencyLocator::new(notation, module, version);
        if let Some(number) = locator.find_line(String::from_utf8_lossy(&content).lines()) {
            return number.to_string();
        }

        self.reporter.report_debug(&format!(
            "{}@{} not found in {}",
            module,
            version,
            manifest.display()
        ));
        String::new()
    }

    /// Attribution for `(file, line)`; empty when the line is unknown or the
    /// lookup fails
    pub async fn commit_author(&self, file: &Path, line: &str) -> CommitAuthor {
        if line.is_empty() || file.as_os_str().is_empty() {
            return CommitAuthor::default();
        }

        match self.commit_authors.commit_author(file, line).await {
            Ok(author) => author,
            Err(e) => {
                self.report_unavailable(file, &format!("{:#}", e));
                CommitAuthor::default()
            }
        }
    }

    fn report_unavailable(&self, file: &Path, details: &str) {
        let error = ScanError::ProvenanceUnavailable {
            file: file.display().to_string(),
            details: details.to_string(),
        };
        self.reporter.report_debug(&error.to_string());
    }
}
