use serde::{Deserialize, Serialize};
use std::fmt;

/// Criticality of a finding.
///
/// Variants are declared in descending criticality, so the derived `Ord`
/// sorts the most critical findings first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Medium,
    Low,
    Info,
    Audit,
    NoSec,
}

impl Severity {
    /// Every severity in report order (most critical first)
    pub const ALL: [Severity; 6] = [
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
        Severity::Audit,
        Severity::NoSec,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Info => "INFO",
            Severity::Audit => "AUDIT",
            Severity::NoSec => "NOSEC",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
