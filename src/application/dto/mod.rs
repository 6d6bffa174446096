/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod analysis_request;
mod analysis_response;

pub use analysis_request::{AnalysisRequest, ScanSettings};
pub use analysis_response::AnalysisResponse;
