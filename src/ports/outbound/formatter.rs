use crate::scanning::domain::{Language, ScanError, Tool, ToolImage, Vulnerability};
use crate::scanning::services::LockfileNotation;
use async_trait::async_trait;

/// Formatter port implemented once per security tool
///
/// A formatter drives one sandboxed tool run and normalizes its output
/// into canonical vulnerability records:
/// `Idle -> Executing -> Parsing -> {Done, Failed}`.
#[async_trait]
pub trait Formatter: Send + Sync {
    /// Tool this formatter drives
    fn tool(&self) -> Tool;

    /// Language context of the records it produces
    fn language(&self) -> Language {
        self.tool().language()
    }

    /// Fixed manifest name the tool audits (e.g. `yarn.lock`)
    fn manifest_file(&self) -> &'static str;

    /// How the manifest declares a pinned dependency, used to locate findings
    fn lockfile_notation(&self) -> LockfileNotation;

    /// Container image the tool runs in
    fn image(&self) -> &ToolImage;

    /// Shell script template run in the sandbox; `{{WORK_DIR}}` is replaced
    /// with the change into the project sub path
    fn command_template(&self) -> &'static str;

    /// Converts raw tool output into records.
    ///
    /// Pure: no I/O and no side effects. Empty output yields no records.
    ///
    /// # Errors
    /// * `ScanError::PreconditionMissing` - the tool reported its manifest is absent
    /// * `ScanError::ToolExecutionFailed` - the tool reported it failed to run
    /// * `ScanError::MalformedOutput` - the output is not in the expected format
    fn parse(&self, raw_output: &str) -> Result<Vec<Vulnerability>, ScanError>;

    /// Runs the full pipeline for one project sub path.
    ///
    /// Never fails outward: errors are recorded on the analysis and
    /// completion is always signalled.
    async fn run(&self, project_sub_path: &str);
}
