use super::audit_output::AuditParser;
use crate::application::services::FormatterService;
use crate::ports::outbound::Formatter;
use crate::scanning::domain::{ScanError, Tool, ToolImage, Vulnerability};
use crate::scanning::services::LockfileNotation;
use async_trait::async_trait;

const MANIFEST: &str = "package-lock.json";

/// Runs `npm audit` and keeps only its id-keyed `advisories` map
const COMMAND_TEMPLATE: &str = r#"{{WORK_DIR}}
if [ -f package-lock.json ]; then
  npm audit --only=prod --json > /tmp/results-npm.json 2> /tmp/errors-npm.txt
  if [ ! -s /tmp/results-npm.json ]; then
    echo 'ERROR_RUNNING_NPM_AUDIT'
    cat /tmp/errors-npm.txt
  else
    jq -c '{advisories: (.advisories // {})}' /tmp/results-npm.json
  fi
else
  echo 'ERROR_PACKAGE_LOCK_NOT_FOUND'
fi
"#;

const PARSER: AuditParser = AuditParser {
    tool: Tool::NpmAudit,
    manifest: MANIFEST,
    not_found_signal: "ERROR_PACKAGE_LOCK_NOT_FOUND",
    running_error_signal: "ERROR_RUNNING_NPM_AUDIT",
};

/// NpmAuditFormatter adapter for dependency advisories of `package-lock.json` projects
pub struct NpmAuditFormatter {
    service: FormatterService,
    image: ToolImage,
}

impl NpmAuditFormatter {
    pub fn new(service: FormatterService, image: ToolImage) -> Self {
        Self { service, image }
    }
}

#[async_trait]
impl Formatter for NpmAuditFormatter {
    fn tool(&self) -> Tool {
        Tool::NpmAudit
    }

    fn manifest_file(&self) -> &'static str {
        MANIFEST
    }

    fn lockfile_notation(&self) -> LockfileNotation {
        LockfileNotation::JsonEntry
    }

    fn image(&self) -> &ToolImage {
        &self.image
    }

    fn command_template(&self) -> &'static str {
        COMMAND_TEMPLATE
    }

    fn parse(&self, raw_output: &str) -> Result<Vec<Vulnerability>, ScanError> {
        PARSER.parse(raw_output)
    }

    async fn run(&self, project_sub_path: &str) {
        self.service.execute(self, project_sub_path).await;
    }
}
