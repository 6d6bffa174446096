/// Mock implementations for testing
mod mock_commit_author_repository;
mod mock_file_lister;
mod mock_sandbox;
mod mock_scan_reporter;

#[allow(unused_imports)]
pub use mock_commit_author_repository::MockCommitAuthorRepository;
#[allow(unused_imports)]
pub use mock_file_lister::MockFileLister;
#[allow(unused_imports)]
pub use mock_sandbox::MockSandbox;
#[allow(unused_imports)]
pub use mock_scan_reporter::MockScanReporter;
