use clap::Parser;

use polyscan::scanning::domain::Tool;

/// Run sandboxed security analyzers over a project and report one normalized analysis
#[derive(Parser, Debug)]
#[command(name = "polyscan")]
#[command(version)]
#[command(
    about = "Run sandboxed security analyzers over a project and report one normalized analysis",
    long_about = None
)]
pub struct Args {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Configuration file (defaults to polyscan.config.yml in the project directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Repository name recorded on the analysis
    #[arg(long)]
    pub repository_name: Option<String>,

    /// Company name recorded on the analysis
    #[arg(long)]
    pub company_name: Option<String>,

    /// Attribute findings to the commit that introduced them (uses git blame)
    #[arg(long)]
    pub enable_commit_author: bool,

    /// Exit with code 1 when vulnerabilities are found
    #[arg(short = 'e', long)]
    pub return_error: bool,

    /// Skip a tool even if its language is detected.
    /// Can be specified multiple times: --disable-tool npm-audit --disable-tool yarn-audit
    #[arg(long = "disable-tool", value_name = "TOOL")]
    pub disable_tool: Vec<Tool>,

    /// Maximum duration of a single tool run, in seconds
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub sandbox_timeout: Option<u64>,

    /// Maximum duration of the whole analysis, in seconds
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub analysis_timeout: Option<u64>,

    /// Print debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
