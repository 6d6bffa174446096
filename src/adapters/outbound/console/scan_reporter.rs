use crate::ports::outbound::ScanReporter;
use crate::scanning::domain::Language;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::sync::Mutex;

/// StderrScanReporter adapter for reporting analysis progress to stderr
///
/// This adapter implements the ScanReporter port, writing diagnostics to
/// stderr so they never mix with the JSON report on stdout. Adapter progress
/// is rendered with an indicatif progress bar shared by all running tasks.
pub struct StderrScanReporter {
    verbose: bool,
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl StderrScanReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            progress_bar: Mutex::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> Option<ProgressBar> {
        let mut pb_option = self.progress_bar.lock().ok()?;
        if let Some(pb) = pb_option.as_ref() {
            pb.set_length(total as u64);
            return Some(pb.clone());
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} tools - {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        *pb_option = Some(pb.clone());
        Some(pb)
    }

    /// Prints a line without tearing an active progress bar
    fn print(&self, line: &str) {
        let current = self
            .progress_bar
            .lock()
            .ok()
            .and_then(|pb_option| pb_option.clone());
        match current {
            Some(pb) if !pb.is_finished() => pb.suspend(|| eprintln!("{}", line)),
            _ => eprintln!("{}", line),
        }
    }

    fn finish_progress_bar(&self) {
        if let Ok(mut pb_option) = self.progress_bar.lock() {
            if let Some(pb) = pb_option.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl Default for StderrScanReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ScanReporter for StderrScanReporter {
    fn report(&self, message: &str) {
        self.print(message);
    }

    fn report_debug(&self, message: &str) {
        if self.verbose {
            self.print(&format!("{} {}", "[debug]".dimmed(), message.dimmed()));
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        if let Some(pb) = self.get_or_create_progress_bar(total) {
            pb.set_position(current as u64);
            if let Some(msg) = message {
                pb.set_message(msg.to_string());
            }
        }
    }

    fn report_error(&self, message: &str) {
        self.print(&format!("{} {}", "⚠️".yellow(), message.yellow()));
    }

    fn report_language_finished(&self, language: Language) {
        self.print(&format!(
            "   {} {} analysis finished",
            "✓".green(),
            language
        ));
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!();
        eprintln!("{}", message.green());
    }
}
