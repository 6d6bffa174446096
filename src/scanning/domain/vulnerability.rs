use super::{CommitAuthor, Language, Severity, Tool};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical, tool-agnostic representation of one finding.
///
/// `vulnerability_id` and `analysis_id` stay nil until the owning analysis
/// stamps identities; `line` is empty when the location is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    #[serde(rename = "vulnerabilityID")]
    pub vulnerability_id: Uuid,
    #[serde(rename = "analysisID")]
    pub analysis_id: Uuid,
    pub severity: Severity,
    pub security_tool: Tool,
    pub language: Language,
    pub file: String,
    pub line: String,
    pub code: String,
    pub details: String,
    pub version: String,
    pub vulnerable_below: String,
    pub commit_author: String,
    pub commit_hash: String,
    pub commit_date: String,
    pub commit_email: String,
    pub commit_message: String,
}

impl Vulnerability {
    /// Creates a record with the fields every adapter must populate
    pub fn new(
        security_tool: Tool,
        language: Language,
        file: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            vulnerability_id: Uuid::nil(),
            analysis_id: Uuid::nil(),
            severity,
            security_tool,
            language,
            file: file.into(),
            line: String::new(),
            code: String::new(),
            details: String::new(),
            version: String::new(),
            vulnerable_below: String::new(),
            commit_author: String::new(),
            commit_hash: String::new(),
            commit_date: String::new(),
            commit_email: String::new(),
            commit_message: String::new(),
        }
    }

    pub fn set_commit_author(&mut self, author: CommitAuthor) {
        self.commit_author = author.author;
        self.commit_email = author.email;
        self.commit_hash = author.commit_hash;
        self.commit_date = author.date;
        self.commit_message = author.message;
    }

    pub fn has_location(&self) -> bool {
        !self.line.is_empty()
    }
}
