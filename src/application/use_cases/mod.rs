/// Use cases module containing application business logic orchestration
mod run_analysis;

pub use run_analysis::RunAnalysisUseCase;
