use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language context a finding was produced in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "Go")]
    Go,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "Ruby")]
    Ruby,
    #[serde(rename = "Python")]
    Python,
    #[serde(rename = "Java")]
    Java,
    #[serde(rename = "Kotlin")]
    Kotlin,
    #[serde(rename = "JavaScript")]
    Javascript,
    #[serde(rename = "HCL")]
    Hcl,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::Go,
        Language::CSharp,
        Language::Ruby,
        Language::Python,
        Language::Java,
        Language::Kotlin,
        Language::Javascript,
        Language::Hcl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Go => "Go",
            Language::CSharp => "C#",
            Language::Ruby => "Ruby",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Kotlin => "Kotlin",
            Language::Javascript => "JavaScript",
            Language::Hcl => "HCL",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "go" | "golang" => Ok(Language::Go),
            "c#" | "csharp" => Ok(Language::CSharp),
            "ruby" => Ok(Language::Ruby),
            "python" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "kotlin" => Ok(Language::Kotlin),
            "javascript" | "js" => Ok(Language::Javascript),
            "hcl" | "terraform" => Ok(Language::Hcl),
            _ => Err(format!(
                "Unknown language: {}. Expected one of: {}",
                s,
                Language::ALL
                    .iter()
                    .map(|l| l.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}
