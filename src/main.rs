mod cli;

use cli::Args;
use polyscan::adapters::outbound::console::StderrScanReporter;
use polyscan::adapters::outbound::filesystem::FileSystemReader;
use polyscan::adapters::outbound::git::{DisabledCommitAuthorRepository, GitCommitAuthorRepository};
use polyscan::adapters::outbound::sandbox::{DockerSandbox, DEFAULT_SANDBOX_TIMEOUT};
use polyscan::application::dto::{AnalysisRequest, ScanSettings};
use polyscan::application::factories::{PresenterFactory, PresenterType};
use polyscan::application::use_cases::RunAnalysisUseCase;
use polyscan::config::{discover_config, load_config_from_path, ConfigFile};
use polyscan::ports::inbound::AnalysisPort;
use polyscan::ports::outbound::{CommitAuthorRepository, ScanReporter};
use polyscan::scanning::domain::{Analysis, AnalysisScope};
use polyscan::shared::error::ExitCode;
use polyscan::shared::security::validate_project_directory;
use polyscan::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };
    process::exit(exit_code.as_i32());
}

async fn run() -> Result<ExitCode> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate project directory
    let project_path = validate_project_directory(Path::new(args.path.as_deref().unwrap_or(".")))?;

    // Load configuration (explicit file, or discovered in the project)
    let config = match args.config.as_deref() {
        Some(path) => Some(load_config_from_path(Path::new(path))?),
        None => discover_config(&project_path)?,
    };
    let options = resolve_options(&args, config.unwrap_or_default())?;

    // Create adapters (Dependency Injection)
    let reporter: Arc<dyn ScanReporter> = Arc::new(StderrScanReporter::new(args.verbose));
    let commit_authors: Arc<dyn CommitAuthorRepository> = if options.enable_commit_author {
        Arc::new(GitCommitAuthorRepository::new(project_path.clone()))
    } else {
        Arc::new(DisabledCommitAuthorRepository)
    };
    let use_case = RunAnalysisUseCase::new(
        Arc::new(FileSystemReader::new()),
        Arc::new(DockerSandbox::new(options.sandbox_timeout)),
        commit_authors,
        reporter,
    );

    // Execute use case
    let request = AnalysisRequest::new(project_path, build_scope(&args)).with_settings(options.settings);
    let response = use_case.run_analysis(request).await?;
    let analysis = response.analysis;

    // Present output
    let report = serde_json::to_string_pretty(&analysis)
        .map_err(|e| anyhow::anyhow!("Failed to serialize analysis: {}", e))?;
    let presenter = PresenterFactory::create(PresenterType::from_output(args.output.map(PathBuf::from)));
    presenter.present(&report)?;

    print_summary(&analysis);

    if options.return_error && analysis.total_vulnerabilities() > 0 {
        return Ok(ExitCode::VulnerabilitiesDetected);
    }
    Ok(ExitCode::Success)
}

/// Effective options after merging the config file with CLI flags
struct Options {
    settings: ScanSettings,
    sandbox_timeout: Duration,
    enable_commit_author: bool,
    return_error: bool,
}

/// CLI flags take precedence over config file values; disabled tools are merged
fn resolve_options(args: &Args, config: ConfigFile) -> Result<Options> {
    let mut disabled_tools = config.parsed_disabled_tools()?;
    for tool in &args.disable_tool {
        if !disabled_tools.contains(tool) {
            disabled_tools.push(*tool);
        }
    }

    let mut settings = ScanSettings {
        disabled_tools,
        work_dirs: config.parsed_work_dirs()?,
        images: config.parsed_images()?,
        ..ScanSettings::default()
    };
    if let Some(timeout) = args
        .analysis_timeout
        .map(Duration::from_secs)
        .or(config.analysis_timeout())
    {
        settings.analysis_timeout = timeout;
    }

    Ok(Options {
        settings,
        sandbox_timeout: args
            .sandbox_timeout
            .map(Duration::from_secs)
            .or(config.sandbox_timeout())
            .unwrap_or(DEFAULT_SANDBOX_TIMEOUT),
        enable_commit_author: args.enable_commit_author
            || config.enable_commit_author.unwrap_or(false),
        return_error: args.return_error || config.return_error.unwrap_or(false),
    })
}

fn build_scope(args: &Args) -> AnalysisScope {
    let mut scope = AnalysisScope::new();
    if let Some(name) = args.repository_name.as_deref() {
        scope = scope.with_repository(Uuid::nil(), name);
    }
    if let Some(name) = args.company_name.as_deref() {
        scope = scope.with_company(Uuid::nil(), name);
    }
    scope
}

fn print_summary(analysis: &Analysis) {
    eprintln!("\n📊 Vulnerabilities by severity:");
    for (severity, count) in analysis.count_by_severity() {
        eprintln!("   {:<6} {}", severity.as_str(), count);
    }
    if analysis.has_errors() {
        eprintln!("\n⚠️  Analysis finished with errors: {}", analysis.errors());
    }
}
