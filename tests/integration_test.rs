/// Integration tests for the application layer
mod test_utilities;

use polyscan::prelude::*;
use polyscan::scanning::domain::ScanErrorKind;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use test_utilities::mocks::*;

const YARN_LOCK: &str = "# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.\n\
\n\
lodash@^4.17.15:\n  version \"4.17.15\"\n\
\n\
minimist@1.2.5:\n  version \"1.2.5\"\n";

const PACKAGE_LOCK: &str = r#"{
  "name": "shop",
  "lockfileVersion": 1,
  "dependencies": {
    "lodash": {
      "version": "4.17.15",
      "resolved": "https://registry.npmjs.org/lodash/-/lodash-4.17.15.tgz"
    }
  }
}
"#;

const LODASH_NPM_ADVISORY: &str = r#"{"advisories":{"1523":{"module_name":"lodash","severity":"low","vulnerable_versions":"<4.17.19","overview":"Prototype pollution","findings":[{"version":"4.17.15"}]}}}"#;

const LODASH_ADVISORY: &str = r#"{"advisories":[{"module_name":"lodash","severity":"high","vulnerable_versions":"<4.17.19","overview":"desc","findings":[{"version":"4.17.15"}]}]}"#;

struct Harness {
    sandbox: MockSandbox,
    authors: MockCommitAuthorRepository,
    reporter: MockScanReporter,
    use_case: RunAnalysisUseCase,
}

fn harness(files: &[&str], sandbox: MockSandbox) -> Harness {
    let authors = MockCommitAuthorRepository::new().with_author("Ana Souza", "ana@example.com", "9f3c2e1");
    let reporter = MockScanReporter::new();
    let use_case = RunAnalysisUseCase::new(
        Arc::new(MockFileLister::new(files)),
        Arc::new(sandbox.clone()),
        Arc::new(authors.clone()),
        Arc::new(reporter.clone()),
    );
    Harness {
        sandbox,
        authors,
        reporter,
        use_case,
    }
}

fn yarn_only() -> ScanSettings {
    ScanSettings {
        disabled_tools: vec![Tool::NpmAudit],
        ..ScanSettings::default()
    }
}

fn request(project_path: &Path, settings: ScanSettings) -> AnalysisRequest {
    AnalysisRequest::new(
        project_path.to_path_buf(),
        AnalysisScope::new().with_repository(uuid::Uuid::new_v4(), "shop"),
    )
    .with_settings(settings)
}

fn project_with_yarn_lock() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("yarn.lock"), YARN_LOCK).unwrap();
    dir
}

#[tokio::test]
async fn test_empty_tool_output_yields_successful_empty_analysis() {
    let dir = TempDir::new().unwrap();
    let h = harness(&["package.json", "index.js"], MockSandbox::new());

    let response = h.use_case.execute(request(dir.path(), ScanSettings::default())).await.unwrap();
    let analysis = response.analysis;

    assert_eq!(response.detected_languages, vec![Language::Javascript]);
    assert_eq!(analysis.status(), AnalysisStatus::Success);
    assert_eq!(analysis.total_vulnerabilities(), 0);
    assert_eq!(analysis.errors(), "");
    assert!(analysis.finished_at().unwrap() >= analysis.created_at());
    assert_eq!(h.sandbox.get_requests().len(), 2);
    assert_eq!(h.reporter.get_finished_languages(), vec![Language::Javascript]);
}

#[tokio::test]
async fn test_missing_lock_file_records_precondition_error() {
    let dir = TempDir::new().unwrap();
    let sandbox = MockSandbox::new().with_output("yarn audit", "ERROR_YARN_LOCK_NOT_FOUND\n");
    let h = harness(&["package.json"], sandbox);

    let analysis = h.use_case.execute(request(dir.path(), yarn_only())).await.unwrap().analysis;

    assert_eq!(analysis.status(), AnalysisStatus::Error);
    assert_eq!(
        analysis.errors(),
        "YarnAudit requires yarn.lock, but it was not found in the project"
    );
    assert_eq!(analysis.error_kinds(), &[ScanErrorKind::PreconditionMissing]);
    assert_eq!(analysis.total_vulnerabilities(), 0);
    assert_eq!(h.reporter.get_finished_languages(), vec![Language::Javascript]);
}

#[tokio::test]
async fn test_finding_is_located_attributed_and_stamped() {
    let dir = project_with_yarn_lock();
    let sandbox = MockSandbox::new().with_output("yarn audit", LODASH_ADVISORY);
    let h = harness(&["yarn.lock"], sandbox);

    let analysis = h.use_case.execute(request(dir.path(), yarn_only())).await.unwrap().analysis;

    assert_eq!(analysis.status(), AnalysisStatus::Success);
    assert_eq!(analysis.total_vulnerabilities(), 1);

    let record = &analysis.vulnerabilities()[0];
    assert_eq!(record.code, "lodash");
    assert_eq!(record.version, "4.17.15");
    assert_eq!(record.severity, Severity::High);
    assert_eq!(record.details, "desc");
    assert_eq!(record.file, "yarn.lock");
    assert_eq!(record.line, "3");
    assert_eq!(record.security_tool, Tool::YarnAudit);
    assert_eq!(record.language, Language::Javascript);
    assert_eq!(record.commit_author, "Ana Souza");
    assert_eq!(record.commit_email, "ana@example.com");
    assert_eq!(record.commit_hash, "9f3c2e1");
    assert_eq!(record.analysis_id, analysis.id());
    assert!(!record.vulnerability_id.is_nil());

    assert_eq!(
        h.authors.get_calls(),
        vec![(PathBuf::from("yarn.lock"), "3".to_string())]
    );
}

#[tokio::test]
async fn test_npm_finding_is_located_in_package_lock() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package-lock.json"), PACKAGE_LOCK).unwrap();
    let sandbox = MockSandbox::new().with_output("npm audit", LODASH_NPM_ADVISORY);
    let h = harness(&["package-lock.json"], sandbox);
    let settings = ScanSettings {
        disabled_tools: vec![Tool::YarnAudit],
        ..ScanSettings::default()
    };

    let analysis = h.use_case.execute(request(dir.path(), settings)).await.unwrap().analysis;

    assert_eq!(analysis.total_vulnerabilities(), 1);
    let record = &analysis.vulnerabilities()[0];
    assert_eq!(record.security_tool, Tool::NpmAudit);
    assert_eq!(record.file, "package-lock.json");
    assert_eq!(record.line, "5");
    assert_eq!(record.severity, Severity::Low);
    assert_eq!(record.commit_author, "Ana Souza");
    assert_eq!(
        h.authors.get_calls(),
        vec![(PathBuf::from("package-lock.json"), "5".to_string())]
    );
}

#[tokio::test]
async fn test_unlocatable_finding_is_not_attributed() {
    let dir = TempDir::new().unwrap();
    let sandbox = MockSandbox::new().with_output("yarn audit", LODASH_ADVISORY);
    let h = harness(&["yarn.lock"], sandbox);

    let analysis = h.use_case.execute(request(dir.path(), yarn_only())).await.unwrap().analysis;

    let record = &analysis.vulnerabilities()[0];
    assert_eq!(record.line, "");
    assert_eq!(record.commit_author, "");
    assert!(h.authors.get_calls().is_empty());
    // provenance problems never reach the analysis errors
    assert_eq!(analysis.errors(), "");
}

#[tokio::test]
async fn test_no_detected_language_runs_nothing() {
    let dir = TempDir::new().unwrap();
    let h = harness(&["README.md", "Makefile"], MockSandbox::new());

    let response = h.use_case.execute(request(dir.path(), ScanSettings::default())).await.unwrap();

    assert!(response.detected_languages.is_empty());
    assert_eq!(response.analysis.status(), AnalysisStatus::Success);
    assert!(h.sandbox.get_requests().is_empty());
}

#[tokio::test]
async fn test_language_without_analyzer_is_skipped() {
    let dir = TempDir::new().unwrap();
    let h = harness(&["main.go", "go.mod"], MockSandbox::new());

    let response = h.use_case.execute(request(dir.path(), ScanSettings::default())).await.unwrap();

    assert_eq!(response.detected_languages, vec![Language::Go]);
    assert!(h.sandbox.get_requests().is_empty());
    assert!(h
        .reporter
        .get_messages()
        .iter()
        .any(|m| m.contains("No analyzer registered for Go")));
}

#[tokio::test]
async fn test_sandbox_failure_does_not_stop_siblings() {
    let dir = project_with_yarn_lock();
    let sandbox = MockSandbox::new()
        .with_failure("npm audit", "Cannot connect to the Docker daemon")
        .with_output("yarn audit", LODASH_ADVISORY);
    let h = harness(&["yarn.lock"], sandbox);

    let analysis = h
        .use_case
        .execute(request(dir.path(), ScanSettings::default()))
        .await
        .unwrap()
        .analysis;

    assert_eq!(analysis.status(), AnalysisStatus::Error);
    assert_eq!(analysis.total_vulnerabilities(), 1);
    assert_eq!(analysis.error_kinds(), &[ScanErrorKind::ToolExecutionFailed]);
    assert!(analysis.errors().contains("NpmAudit failed while running"));
    assert!(analysis.errors().contains("Cannot connect to the Docker daemon"));
    assert_eq!(h.reporter.errors().len(), 1);
}

#[tokio::test]
async fn test_malformed_output_keeps_raw_text() {
    let dir = TempDir::new().unwrap();
    let sandbox = MockSandbox::new().with_output("yarn audit", "<html>502 Bad Gateway</html>");
    let h = harness(&["yarn.lock"], sandbox);

    let analysis = h.use_case.execute(request(dir.path(), yarn_only())).await.unwrap().analysis;

    assert_eq!(analysis.error_kinds(), &[ScanErrorKind::MalformedOutput]);
    assert!(analysis.errors().contains("<html>502 Bad Gateway</html>"));
}

#[tokio::test]
async fn test_errors_of_several_tools_are_joined() {
    let dir = TempDir::new().unwrap();
    let sandbox = MockSandbox::new()
        .with_output("npm audit", "ERROR_PACKAGE_LOCK_NOT_FOUND")
        .with_output("yarn audit", "ERROR_YARN_LOCK_NOT_FOUND");
    let h = harness(&["package.json"], sandbox);

    let analysis = h
        .use_case
        .execute(request(dir.path(), ScanSettings::default()))
        .await
        .unwrap()
        .analysis;

    let messages: HashSet<&str> = analysis.errors().split(", ").collect();
    assert_eq!(
        messages,
        HashSet::from([
            "NpmAudit requires package-lock.json, but it was not found in the project",
            "YarnAudit requires yarn.lock, but it was not found in the project",
        ])
    );
    assert_eq!(analysis.error_kinds().len(), 2);
}

#[tokio::test]
async fn test_disabled_tool_is_not_run() {
    let dir = TempDir::new().unwrap();
    let h = harness(&["yarn.lock"], MockSandbox::new());

    h.use_case.execute(request(dir.path(), yarn_only())).await.unwrap();

    let commands = h.sandbox.commands();
    assert_eq!(commands.len(), 1);
    assert!(commands[0].contains("yarn audit"));
}

#[tokio::test]
async fn test_work_dirs_scope_commands_and_manifests() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("web")).unwrap();
    fs::write(dir.path().join("web/yarn.lock"), YARN_LOCK).unwrap();

    let sandbox = MockSandbox::new().with_output("cd web", LODASH_ADVISORY);
    let h = harness(&["web/yarn.lock"], sandbox);
    let settings = ScanSettings {
        work_dirs: HashMap::from([(
            Language::Javascript,
            vec!["web".to_string(), "api".to_string()],
        )]),
        ..yarn_only()
    };

    let analysis = h.use_case.execute(request(dir.path(), settings)).await.unwrap().analysis;

    let mut commands = h.sandbox.commands();
    commands.sort();
    assert_eq!(commands.len(), 2);
    assert!(commands[0].starts_with("cd api\n"));
    assert!(commands[1].starts_with("cd web\n"));
    assert!(h
        .sandbox
        .get_requests()
        .iter()
        .all(|r| r.project_path == dir.path()));

    assert_eq!(analysis.total_vulnerabilities(), 1);
    let record = &analysis.vulnerabilities()[0];
    assert_eq!(record.file, "web/yarn.lock");
    assert_eq!(record.line, "3");
    assert_eq!(
        h.authors.get_calls(),
        vec![(PathBuf::from("web/yarn.lock"), "3".to_string())]
    );
    assert_eq!(h.reporter.get_finished_languages(), vec![Language::Javascript]);
}

#[tokio::test]
async fn test_image_override_reaches_sandbox() {
    let dir = TempDir::new().unwrap();
    let h = harness(&["yarn.lock"], MockSandbox::new());
    let settings = ScanSettings {
        images: HashMap::from([(Tool::YarnAudit, ToolImage::new("registry.local/yarn", "2"))]),
        ..yarn_only()
    };

    h.use_case.execute(request(dir.path(), settings)).await.unwrap();

    assert_eq!(
        h.sandbox.get_requests()[0].image,
        ToolImage::new("registry.local/yarn", "2")
    );
}

#[tokio::test]
async fn test_vulnerabilities_sorted_by_criticality() {
    let dir = TempDir::new().unwrap();
    let output = r#"{"advisories":[
        {"module_name":"a","severity":"low"},
        {"module_name":"b","severity":"critical"},
        {"module_name":"c","severity":"moderate"},
        {"module_name":"d","severity":"high"}
    ]}"#;
    let sandbox = MockSandbox::new().with_output("yarn audit", output);
    let h = harness(&["yarn.lock"], sandbox);

    let analysis = h.use_case.execute(request(dir.path(), yarn_only())).await.unwrap().analysis;

    let order: Vec<(&str, Severity)> = analysis
        .vulnerabilities()
        .iter()
        .map(|v| (v.code.as_str(), v.severity))
        .collect();
    assert_eq!(
        order,
        vec![
            ("b", Severity::High),
            ("d", Severity::High),
            ("c", Severity::Medium),
            ("a", Severity::Low),
        ]
    );

    let counts = analysis.count_by_severity();
    assert_eq!(counts[&Severity::High], 2);
    assert_eq!(counts[&Severity::NoSec], 0);
    assert_eq!(counts.values().sum::<usize>(), 4);
}

#[tokio::test]
async fn test_analysis_timeout_aborts_slow_tools() {
    let dir = TempDir::new().unwrap();
    let sandbox = MockSandbox::new().with_delay(Duration::from_secs(30));
    let h = harness(&["yarn.lock"], sandbox);
    let settings = ScanSettings {
        analysis_timeout: Duration::from_millis(100),
        ..ScanSettings::default()
    };

    let started = std::time::Instant::now();
    let analysis = h.use_case.execute(request(dir.path(), settings)).await.unwrap().analysis;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(analysis.status(), AnalysisStatus::Error);
    assert_eq!(analysis.error_kinds(), &[ScanErrorKind::AnalysisTimeout]);
    assert!(analysis.errors().contains("NpmAudit, YarnAudit"));
    assert_eq!(h.reporter.get_finished_languages(), vec![Language::Javascript]);
}

#[tokio::test]
async fn test_timeout_only_blames_unfinished_tools() {
    let dir = TempDir::new().unwrap();
    let sandbox = MockSandbox::new()
        .with_slow_command("npm audit", Duration::from_secs(30))
        .with_output("yarn audit", LODASH_ADVISORY);
    let h = harness(&["yarn.lock"], sandbox);
    let settings = ScanSettings {
        analysis_timeout: Duration::from_millis(500),
        ..ScanSettings::default()
    };

    let analysis = h.use_case.execute(request(dir.path(), settings)).await.unwrap().analysis;

    assert_eq!(analysis.error_kinds(), &[ScanErrorKind::AnalysisTimeout]);
    assert!(analysis.errors().ends_with("unfinished tools: NpmAudit"));
    assert_eq!(analysis.total_vulnerabilities(), 1);

    // one completion per run, whoever signalled it
    let progress = h
        .reporter
        .get_messages()
        .into_iter()
        .filter(|m| m.starts_with("Progress: "))
        .count();
    assert_eq!(progress, 2);
    assert_eq!(h.reporter.get_finished_languages(), vec![Language::Javascript]);
    assert!(!h
        .reporter
        .get_messages()
        .iter()
        .any(|m| m.contains("did not report completion")));
}

#[tokio::test]
async fn test_panicking_tool_is_recorded_and_completed() {
    let dir = TempDir::new().unwrap();
    let sandbox = MockSandbox::new()
        .with_panic("npm audit")
        .with_output("yarn audit", LODASH_ADVISORY);
    let h = harness(&["yarn.lock"], sandbox);

    let analysis = h
        .use_case
        .execute(request(dir.path(), ScanSettings::default()))
        .await
        .unwrap()
        .analysis;

    assert_eq!(analysis.status(), AnalysisStatus::Error);
    assert_eq!(analysis.error_kinds(), &[ScanErrorKind::ToolExecutionFailed]);
    assert!(analysis.errors().contains("NpmAudit"));
    assert_eq!(analysis.total_vulnerabilities(), 1);
    assert_eq!(h.reporter.get_finished_languages(), vec![Language::Javascript]);
}

#[tokio::test]
async fn test_file_listing_failure_is_an_application_error() {
    let dir = TempDir::new().unwrap();
    let use_case = RunAnalysisUseCase::new(
        Arc::new(MockFileLister::with_failure()),
        Arc::new(MockSandbox::new()),
        Arc::new(MockCommitAuthorRepository::new()),
        Arc::new(MockScanReporter::new()),
    );

    let result = use_case.run_analysis(request(dir.path(), ScanSettings::default())).await;
    assert!(result.unwrap_err().to_string().contains("Permission denied"));
}

#[tokio::test]
async fn test_report_serialization() {
    let dir = project_with_yarn_lock();
    let sandbox = MockSandbox::new().with_output("yarn audit", LODASH_ADVISORY);
    let h = harness(&["yarn.lock"], sandbox);

    let analysis = h.use_case.execute(request(dir.path(), yarn_only())).await.unwrap().analysis;
    let report: serde_json::Value = serde_json::to_value(&analysis).unwrap();

    assert_eq!(report["status"], "success");
    assert_eq!(report["repositoryName"], "shop");
    assert_eq!(report["errors"], "");
    assert_eq!(report["vulnerabilities"][0]["securityTool"], "YarnAudit");
    assert_eq!(report["vulnerabilities"][0]["severity"], "HIGH");
    assert_eq!(report["vulnerabilities"][0]["line"], "3");
    assert_eq!(
        report["vulnerabilities"][0]["analysisID"],
        analysis.id().to_string()
    );
}
