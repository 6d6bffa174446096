use crate::scanning::domain::Language;
use std::collections::BTreeSet;
use std::path::Path;

/// Manifest files that identify a language even without source files
const MANIFEST_LANGUAGES: &[(&str, Language)] = &[
    ("package.json", Language::Javascript),
    ("package-lock.json", Language::Javascript),
    ("yarn.lock", Language::Javascript),
    ("go.mod", Language::Go),
    ("Gemfile.lock", Language::Ruby),
    ("requirements.txt", Language::Python),
    ("Pipfile.lock", Language::Python),
    ("pom.xml", Language::Java),
    ("build.gradle.kts", Language::Kotlin),
];

/// LanguageDetector maps project files to the languages they belong to
pub struct LanguageDetector;

impl LanguageDetector {
    /// Detects languages from a list of project files.
    ///
    /// # Returns
    /// Languages sorted in declaration order, without duplicates
    pub fn detect<P: AsRef<Path>>(files: &[P]) -> Vec<Language> {
        files
            .iter()
            .filter_map(|file| Self::language_of(file.as_ref()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn language_of(path: &Path) -> Option<Language> {
        let file_name = path.file_name()?.to_str()?;
        if let Some((_, language)) = MANIFEST_LANGUAGES
            .iter()
            .find(|(manifest, _)| *manifest == file_name)
        {
            return Some(*language);
        }

        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" => Some(Language::Javascript),
            "go" => Some(Language::Go),
            "cs" => Some(Language::CSharp),
            "rb" => Some(Language::Ruby),
            "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            "kt" | "kts" => Some(Language::Kotlin),
            "tf" | "hcl" => Some(Language::Hcl),
            _ => None,
        }
    }
}
