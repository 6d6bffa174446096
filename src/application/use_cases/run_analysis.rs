use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::application::factories::{FormatterFactory, PlannedRun};
use crate::application::services::{
    analysis_channel, AnalysisSink, CompletionTracker, FormatterService, ProvenanceEnricher,
};
use crate::ports::inbound::AnalysisPort;
use crate::ports::outbound::{CommitAuthorRepository, ProjectFileLister, Sandbox, ScanReporter};
use crate::scanning::domain::{Analysis, Language, ScanError, Tool};
use crate::scanning::services::LanguageDetector;
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A spawned adapter run and what it was running
type RunHandle = (Language, Tool, JoinHandle<()>);

/// RunAnalysisUseCase - Core use case for a security analysis
///
/// Detects the project's languages, runs every applicable formatter
/// concurrently, and finalizes the analysis once all of them completed or
/// the analysis timeout expired. Adapter failures never stop siblings; they
/// end up in the analysis' error text.
pub struct RunAnalysisUseCase {
    file_lister: Arc<dyn ProjectFileLister>,
    sandbox: Arc<dyn Sandbox>,
    commit_authors: Arc<dyn CommitAuthorRepository>,
    reporter: Arc<dyn ScanReporter>,
}

impl RunAnalysisUseCase {
    /// Creates a new RunAnalysisUseCase with injected dependencies
    pub fn new(
        file_lister: Arc<dyn ProjectFileLister>,
        sandbox: Arc<dyn Sandbox>,
        commit_authors: Arc<dyn CommitAuthorRepository>,
        reporter: Arc<dyn ScanReporter>,
    ) -> Self {
        Self {
            file_lister,
            sandbox,
            commit_authors,
            reporter,
        }
    }

    /// Executes the analysis
    ///
    /// # Errors
    /// Only when the project cannot be listed or the collector task dies;
    /// tool failures are recorded on the returned analysis instead.
    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        // Step 1: Detect languages
        let languages = self.detect_languages(&request)?;

        // Step 2: Plan one run per (tool, sub path)
        let tracker = Arc::new(CompletionTracker::new());
        let (sink, collector) = analysis_channel(Arc::clone(&tracker), Arc::clone(&self.reporter));
        let service = FormatterService::new(
            request.project_path.clone(),
            Arc::clone(&self.sandbox),
            ProvenanceEnricher::new(
                request.project_path.clone(),
                Arc::clone(&self.commit_authors),
                Arc::clone(&self.reporter),
            ),
            Arc::clone(&self.reporter),
            sink.clone(),
        );
        let runs = FormatterFactory::plan(&languages, &request.settings, &service);
        for run in &runs {
            tracker.expect(run.language());
        }

        let mut analysis = Analysis::new(request.scope);
        analysis.mark_running();
        self.reporter.report(&format!(
            "🚀 Starting analysis {} with {} tool run(s)",
            analysis.id(),
            runs.len()
        ));

        // Step 3: Run adapters concurrently, one collector owns the analysis
        let collecting = tokio::spawn(collector.with_planned_runs(runs.len()).collect(analysis));
        let handles = Self::spawn_runs(runs);
        self.join_runs(handles, &sink, request.settings.analysis_timeout)
            .await;
        sink.close();

        let mut analysis = collecting
            .await
            .map_err(|e| anyhow::anyhow!("Analysis collector stopped unexpectedly: {}", e))?;

        // Step 4: Finalize exactly once, every language having finished
        if !tracker.all_finished() {
            for language in tracker.unfinished_languages() {
                self.reporter
                    .report_debug(&format!("{} did not report completion", language));
            }
        }
        analysis.stamp_identities();
        analysis.finalize().sort_by_criticality();
        self.reporter.report_completion(&format!(
            "✅ Analysis {} finished with status '{}': {} vulnerabilit{} found",
            analysis.id(),
            analysis.status(),
            analysis.total_vulnerabilities(),
            if analysis.total_vulnerabilities() == 1 { "y" } else { "ies" }
        ));

        Ok(AnalysisResponse::new(analysis, languages))
    }

    fn detect_languages(&self, request: &AnalysisRequest) -> Result<Vec<Language>> {
        self.reporter.report(&format!(
            "🔍 Detecting languages in: {}",
            request.project_path.display()
        ));

        let files = self.file_lister.list_files(&request.project_path)?;
        let languages = LanguageDetector::detect(&files);

        if languages.is_empty() {
            self.reporter.report("ℹ️  No supported language detected");
        } else {
            self.reporter.report(&format!(
                "✅ Detected language(s): {}",
                languages
                    .iter()
                    .map(|language| language.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        for language in languages
            .iter()
            .filter(|language| !FormatterFactory::supports(**language))
        {
            self.reporter
                .report_debug(&format!("No analyzer registered for {}, skipping", language));
        }

        Ok(languages)
    }

    fn spawn_runs(runs: Vec<PlannedRun>) -> Vec<RunHandle> {
        runs.into_iter()
            .map(|run| {
                let language = run.language();
                let tool = run.tool();
                let handle = tokio::spawn(async move {
                    run.formatter.run(&run.project_sub_path).await;
                });
                (language, tool, handle)
            })
            .collect()
    }

    /// Waits for every run against a shared deadline.
    ///
    /// A panicked run is recorded as a tool failure. A run still going at
    /// the deadline is aborted and awaited; completion is signalled on behalf
    /// of runs that never signalled it, so every run finishes exactly once.
    async fn join_runs(&self, handles: Vec<RunHandle>, sink: &AnalysisSink, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        let mut timed_out = BTreeSet::new();

        for (language, tool, mut handle) in handles {
            let outcome = match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    handle.abort();
                    // A run finishing before the abort lands has already
                    // reported itself
                    match handle.await {
                        Err(join_error) if join_error.is_cancelled() => {
                            sink.finish(language, tool);
                            timed_out.insert(tool);
                            continue;
                        }
                        outcome => outcome,
                    }
                }
            };

            if let Err(join_error) = outcome {
                let error = ScanError::ToolExecutionFailed {
                    tool,
                    output: join_error.to_string(),
                };
                self.reporter.report_error(&error.to_string());
                sink.record_error(error);
                sink.finish(language, tool);
            }
        }

        if !timed_out.is_empty() {
            let error = ScanError::AnalysisTimeout {
                seconds: timeout.as_secs(),
                tools: timed_out
                    .iter()
                    .map(|tool| tool.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            };
            self.reporter.report_error(&error.to_string());
            sink.record_error(error);
        }
    }
}

#[async_trait]
impl AnalysisPort for RunAnalysisUseCase {
    async fn run_analysis(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        self.execute(request).await
    }
}
