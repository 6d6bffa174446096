/// Console adapters for diagnostics on stderr
mod scan_reporter;

pub use scan_reporter::StderrScanReporter;
