use super::audit_output::AuditParser;
use crate::application::services::FormatterService;
use crate::ports::outbound::Formatter;
use crate::scanning::domain::{ScanError, Tool, ToolImage, Vulnerability};
use crate::scanning::services::LockfileNotation;
use async_trait::async_trait;

const MANIFEST: &str = "yarn.lock";

/// Runs `yarn audit` and folds its line-delimited events into one
/// `{"advisories": [...]}` document.
const COMMAND_TEMPLATE: &str = r#"{{WORK_DIR}}
if [ -f yarn.lock ]; then
  yarn audit --groups dependencies --json > /tmp/results-yarn.json 2> /tmp/errors-yarn.txt
  if [ ! -s /tmp/results-yarn.json ]; then
    echo 'ERROR_RUNNING_YARN_AUDIT'
    cat /tmp/errors-yarn.txt
  else
    jq -c -s '{advisories: [.[] | select(.type == "auditAdvisory") | .data.advisory]}' /tmp/results-yarn.json
  fi
else
  echo 'ERROR_YARN_LOCK_NOT_FOUND'
fi
"#;

const PARSER: AuditParser = AuditParser {
    tool: Tool::YarnAudit,
    manifest: MANIFEST,
    not_found_signal: "ERROR_YARN_LOCK_NOT_FOUND",
    running_error_signal: "ERROR_RUNNING_YARN_AUDIT",
};

/// YarnAuditFormatter adapter for dependency advisories of `yarn.lock` projects
pub struct YarnAuditFormatter {
    service: FormatterService,
    image: ToolImage,
}

impl YarnAuditFormatter {
    pub fn new(service: FormatterService, image: ToolImage) -> Self {
        Self { service, image }
    }
}

#[async_trait]
impl Formatter for YarnAuditFormatter {
    fn tool(&self) -> Tool {
        Tool::YarnAudit
    }

    fn manifest_file(&self) -> &'static str {
        MANIFEST
    }

    fn lockfile_notation(&self) -> LockfileNotation {
        LockfileNotation::AtVersion
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
