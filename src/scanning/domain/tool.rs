use super::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default container image shared by the JavaScript audit tools, built from
/// `docker/js-audit/Dockerfile`
const JS_AUDIT_IMAGE: &str = "polyscan/js-audit";
const JS_AUDIT_TAG: &str = "v1.2.0";

/// Security tools polyscan knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tool {
    NpmAudit,
    YarnAudit,
}

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::NpmAudit, Tool::YarnAudit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::NpmAudit => "NpmAudit",
            Tool::YarnAudit => "YarnAudit",
        }
    }

    /// Language context the tool reports findings in
    pub fn language(&self) -> Language {
        match self {
            Tool::NpmAudit | Tool::YarnAudit => Language::Javascript,
        }
    }

    /// Tools applicable to a language, in a stable order
    pub fn for_language(language: Language) -> Vec<Tool> {
        Tool::ALL
            .into_iter()
            .filter(|tool| tool.language() == language)
            .collect()
    }

    pub fn default_image(&self) -> ToolImage {
        match self {
            Tool::NpmAudit | Tool::YarnAudit => ToolImage::new(JS_AUDIT_IMAGE, JS_AUDIT_TAG),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    /// Accepts `NpmAudit`, `npm-audit`, `npm_audit` and similar spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str().to_lowercase() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown tool: {}. Expected one of: {}",
                    s,
                    Tool::ALL
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// Container image reference used to run a tool in the sandbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolImage {
    pub image: String,
    pub tag: String,
}

impl ToolImage {
    pub fn new(image: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            tag: tag.into(),
        }
    }

    pub fn reference(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }
}
