use super::CompletionTracker;
use crate::ports::outbound::ScanReporter;
use crate::scanning::domain::{Analysis, Language, ScanError, Tool, Vulnerability};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Messages adapters send towards the analysis
#[derive(Debug)]
pub enum AnalysisEvent {
    Vulnerabilities(Vec<Vulnerability>),
    Error(ScanError),
    Finished { language: Language, tool: Tool },
    /// Sent once by the orchestrator after every adapter task has been joined
    Close,
}

/// Cloneable handle adapters use to contribute to the analysis.
///
/// Sends never block; if the collector is gone the event is dropped.
#[derive(Debug, Clone)]
pub struct AnalysisSink {
    sender: mpsc::UnboundedSender<AnalysisEvent>,
}

impl AnalysisSink {
    pub fn append_vulnerabilities(&self, vulnerabilities: Vec<Vulnerability>) {
        if vulnerabilities.is_empty() {
            return;
        }
        let _ = self
            .sender
            .send(AnalysisEvent::Vulnerabilities(vulnerabilities));
    }

    pub fn record_error(&self, error: ScanError) {
        let _ = self.sender.send(AnalysisEvent::Error(error));
    }

    pub fn finish(&self, language: Language, tool: Tool) {
        let _ = self.sender.send(AnalysisEvent::Finished { language, tool });
    }

    pub fn close(&self) {
        let _ = self.sender.send(AnalysisEvent::Close);
    }
}

/// Single consumer that owns the analysis while adapters run.
///
/// All mutations are applied here, one event at a time, so concurrent
/// adapters never share `&mut Analysis`.
pub struct AnalysisCollector {
    receiver: mpsc::UnboundedReceiver<AnalysisEvent>,
    tracker: Arc<CompletionTracker>,
    reporter: Arc<dyn ScanReporter>,
    completed_runs: usize,
    planned_runs: usize,
}

/// Creates a connected sink/collector pair
pub fn analysis_channel(
    tracker: Arc<CompletionTracker>,
    reporter: Arc<dyn ScanReporter>,
) -> (AnalysisSink, AnalysisCollector) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        AnalysisSink { sender },
        AnalysisCollector {
            receiver,
            tracker,
            reporter,
            completed_runs: 0,
            planned_runs: 0,
        },
    )
}

impl AnalysisCollector {
    /// Number of runs used for progress reporting
    pub fn with_planned_runs(mut self, planned_runs: usize) -> Self {
        self.planned_runs = planned_runs;
        self
    }

    /// Applies events until `Close` arrives or every sink is dropped,
    /// then hands the analysis back
    pub async fn collect(mut self, mut analysis: Analysis) -> Analysis {
        while let Some(event) = self.receiver.recv().await {
            if matches!(event, AnalysisEvent::Close) {
                break;
            }
            self.apply(&mut analysis, event);
        }
        analysis
    }

    fn apply(&mut self, analysis: &mut Analysis, event: AnalysisEvent) {
        match event {
            AnalysisEvent::Vulnerabilities(vulnerabilities) => {
                analysis.append_vulnerabilities(vulnerabilities);
            }
            AnalysisEvent::Error(error) => analysis.record_scan_error(&error),
            AnalysisEvent::Finished { language, tool } => {
                self.completed_runs += 1;
                self.reporter.report_progress(
                    self.completed_runs,
                    self.planned_runs.max(self.completed_runs),
                    Some(&format!("{} finished", tool)),
                );
                if self.tracker.mark_done(language) {
                    self.reporter.report_language_finished(language);
                }
            }
            AnalysisEvent::Close => {}
        }
    }
}
