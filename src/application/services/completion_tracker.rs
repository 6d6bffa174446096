use crate::scanning::domain::Language;
use dashmap::DashMap;

/// Per-language count of adapter runs still in flight.
///
/// Written by the analysis collector and readable from any task while the
/// analysis is running. A language is finished once its counter is zero.
#[derive(Debug, Default)]
pub struct CompletionTracker {
    pending: DashMap<Language, usize>,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one more planned run for `language`
    pub fn expect(&self, language: Language) {
        *self.pending.entry(language).or_insert(0) += 1;
    }

    /// Checks off one run of `language`.
    ///
    /// # Returns
    /// `true` only for the call that brings the language to zero. Extra
    /// completions for an already finished language are ignored.
    pub fn mark_done(&self, language: Language) -> bool {
        match self.pending.get_mut(&language) {
            Some(mut remaining) if *remaining > 0 => {
                *remaining -= 1;
                *remaining == 0
            }
            _ => false,
        }
    }

    /// True once every planned run checked off; languages with no planned
    /// runs count as finished
    pub fn all_finished(&self) -> bool {
        self.pending.iter().all(|entry| *entry.value() == 0)
    }

    pub fn unfinished_languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self
            .pending
            .iter()
            .filter(|entry| *entry.value() > 0)
            .map(|entry| *entry.key())
            .collect();
        languages.sort();
        languages
    }
}
