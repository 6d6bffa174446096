/// Application services - shared machinery used while an analysis runs
pub mod analysis_collector;
pub mod completion_tracker;
pub mod formatter_service;
pub mod provenance_enricher;

pub use analysis_collector::{analysis_channel, AnalysisCollector, AnalysisEvent, AnalysisSink};
pub use completion_tracker::CompletionTracker;
pub use formatter_service::{add_work_dir_in_cmd, manifest_path, FormatterService};
pub use provenance_enricher::ProvenanceEnricher;
