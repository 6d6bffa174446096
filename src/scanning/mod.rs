/// Scanning domain: the analysis aggregate, its records and taxonomy,
/// plus pure domain services
pub mod domain;
pub mod services;
