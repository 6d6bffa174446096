use polyscan::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ScanReporter for testing that captures messages
#[derive(Default, Clone)]
pub struct MockScanReporter {
    pub messages: Arc<Mutex<Vec<String>>>,
    pub finished_languages: Arc<Mutex<Vec<Language>>>,
}

impl MockScanReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.get_messages()
            .into_iter()
            .filter_map(|m| m.strip_prefix("Error: ").map(str::to_string))
            .collect()
    }

    pub fn get_finished_languages(&self) -> Vec<Language> {
        self.finished_languages.lock().unwrap().clone()
    }

    fn push(&self, message: String) {
        self.messages.lock().unwrap().push(message);
    }
}

impl ScanReporter for MockScanReporter {
    fn report(&self, message: &str) {
        self.push(message.to_string());
    }

    fn report_debug(&self, message: &str) {
        self.push(format!("Debug: {}", message));
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let msg = if let Some(m) = message {
            format!("Progress: {}/{} - {}", current, total, m)
        } else {
            format!("Progress: {}/{}", current, total)
        };
        self.push(msg);
    }

    fn report_error(&self, message: &str) {
        self.push(format!("Error: {}", message));
    }

    fn report_language_finished(&self, language: Language) {
        self.finished_languages.lock().unwrap().push(language);
    }

    fn report_completion(&self, message: &str) {
        self.push(format!("Completed: {}", message));
    }
}
