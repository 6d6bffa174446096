use crate::scanning::domain::{Language, ScanError, Severity, Tool, Vulnerability};
use serde::Deserialize;
use serde_json::Value;

/// Top-level document produced by the audit command templates
#[derive(Debug, Deserialize)]
struct AuditOutput {
    #[serde(default)]
    advisories: Value,
}

/// One advisory as reported by `yarn audit` / `npm audit`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuditAdvisory {
    pub module_name: String,
    pub severity: String,
    pub vulnerable_versions: String,
    pub overview: String,
    pub findings: Vec<AuditFinding>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuditFinding {
    pub version: String,
}

impl AuditAdvisory {
    /// Version of the first finding, or empty
    pub fn version(&self) -> &str {
        self.findings
            .first()
            .map(|finding| finding.version.as_str())
            .unwrap_or_default()
    }
}

/// Maps an audit severity label onto the canonical scale.
///
/// Unknown labels become `Info`.
pub fn map_severity(label: &str) -> Severity {
    match label.trim().to_lowercase().as_str() {
        "critical" | "high" => Severity::High,
        "moderate" | "medium" => Severity::Medium,
        "low" => Severity::Low,
        _ => Severity::Info,
    }
}

/// Output classifier shared by the JavaScript audit tools.
///
/// The command templates print a marker instead of JSON when the tool
/// cannot run; everything else is expected to be an advisory document.
#[derive(Debug, Clone, Copy)]
pub struct AuditParser {
    pub tool: Tool,
    pub manifest: &'static str,
    pub not_found_signal: &'static str,
    pub running_error_signal: &'static str,
}

impl AuditParser {
    pub fn parse(&self, raw_output: &str) -> Result<Vec<Vulnerability>, ScanError> {
        if raw_output.contains(self.not_found_signal) {
            return Err(ScanError::PreconditionMissing {
                tool: self.tool,
                manifest: self.manifest.to_string(),
            });
        }

        if raw_output.contains(self.running_error_signal) {
            return Err(ScanError::ToolExecutionFailed {
                tool: self.tool,
                output: raw_output.trim().to_string(),
            });
        }

        let trimmed = raw_output.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let output: AuditOutput =
            serde_json::from_str(trimmed).map_err(|e| self.malformed(e.to_string(), raw_output))?;

        Ok(self
            .advisories(output.advisories, raw_output)?
            .iter()
            .map(|advisory| self.to_vulnerability(advisory))
            .collect())
    }

    /// Accepts advisories as a list or as an id-keyed map, in document order
    fn advisories(&self, value: Value, raw_output: &str) -> Result<Vec<AuditAdvisory>, ScanError> {
        let entries: Vec<Value> = match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items,
            Value::Object(map) => map.into_iter().map(|(_, advisory)| advisory).collect(),
            other => {
                return Err(self.malformed(
                    format!("advisories must be a list or a map, got {}", json_kind(&other)),
                    raw_output,
                ))
            }
        };

        entries
            .into_iter()
            .map(|entry| {
                serde_json::from_value(entry).map_err(|e| self.malformed(e.to_string(), raw_output))
            })
            .collect()
    }

    fn to_vulnerability(&self, advisory: &AuditAdvisory) -> Vulnerability {
        let mut vulnerability = Vulnerability::new(
            self.tool,
            Language::Javascript,
            self.manifest,
            map_severity(&advisory.severity),
        );
        vulnerability.code = advisory.module_name.clone();
        vulnerability.version = advisory.version().to_string();
        vulnerability.details = advisory.overview.clone();
        vulnerability.vulnerable_below = advisory.vulnerable_versions.clone();
        vulnerability
    }

    fn malformed(&self, details: String, raw_output: &str) -> ScanError {
        ScanError::MalformedOutput {
            tool: self.tool,
            details,
            output: raw_output.to_string(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
