mod dependency_locator;
mod language_detector;

pub use dependency_locator::{DependencyLocator, LockfileNotation};
pub use language_detector::LanguageDetector;
