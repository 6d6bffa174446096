//! Configuration file support for polyscan.
//!
//! Provides YAML-based configuration through `polyscan.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::scanning::domain::{Language, Tool, ToolImage};
use crate::shared::error::AppError;
use crate::shared::security::{is_contained_sub_path, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "polyscan.config.yml";

/// Tag used when an image override omits one
const DEFAULT_IMAGE_TAG: &str = "latest";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub sandbox_timeout_secs: Option<u64>,
    pub analysis_timeout_secs: Option<u64>,
    pub enable_commit_author: Option<bool>,
    pub return_error: Option<bool>,
    pub disabled_tools: Option<Vec<String>>,
    /// Project sub paths per language, e.g. `javascript: ["", "web"]`
    pub work_dirs: Option<HashMap<String, Vec<String>>>,
    pub images: Option<HashMap<String, ImageOverride>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Replacement container image for a tool.
#[derive(Debug, Deserialize)]
pub struct ImageOverride {
    pub image: String,
    pub tag: Option<String>,
}

impl ConfigFile {
    pub fn sandbox_timeout(&self) -> Option<Duration> {
        self.sandbox_timeout_secs.map(Duration::from_secs)
    }

    pub fn analysis_timeout(&self) -> Option<Duration> {
        self.analysis_timeout_secs.map(Duration::from_secs)
    }

    /// `disabled_tools` parsed into tools
    pub fn parsed_disabled_tools(&self) -> Result<Vec<Tool>> {
        self.disabled_tools
            .iter()
            .flatten()
            .map(|name| {
                Tool::from_str(name).map_err(|e| invalid(
                    format!("disabled_tools: {}", e),
                    "Use tool names such as YarnAudit or NpmAudit",
                ))
            })
            .collect()
    }

    /// `work_dirs` keyed by language, every sub path checked to stay inside the project
    pub fn parsed_work_dirs(&self) -> Result<HashMap<Language, Vec<String>>> {
        let mut work_dirs = HashMap::new();
        for (name, dirs) in self.work_dirs.iter().flatten() {
            let language = Language::from_str(name).map_err(|e| invalid(
                format!("work_dirs: {}", e),
                "Use language names such as javascript or go as keys",
            ))?;

            for dir in dirs {
                if !is_contained_sub_path(dir) {
                    return Err(invalid(
                        format!("work_dirs.{}: '{}' leaves the project directory", name, dir),
                        "Work directories must be relative paths inside the project (no '..' or leading '/')",
                    ));
                }
            }
            work_dirs.insert(language, dirs.clone());
        }
        Ok(work_dirs)
    }

    /// `images` keyed by tool
    pub fn parsed_images(&self) -> Result<HashMap<Tool, ToolImage>> {
        let mut images = HashMap::new();
        for (name, image) in self.images.iter().flatten() {
            let tool = Tool::from_str(name).map_err(|e| invalid(
                format!("images: {}", e),
                "Use tool names such as YarnAudit or NpmAudit as keys",
            ))?;

            if image.image.trim().is_empty() {
                return Err(invalid(
                    format!("images.{}.image must not be empty", name),
                    "Each image override needs an 'image' field (e.g., \"registry.local/js-audit\")",
                ));
            }
            let tag = image.tag.as_deref().unwrap_or(DEFAULT_IMAGE_TAG);
            images.insert(tool, ToolImage::new(image.image.trim(), tag));
        }
        Ok(images)
    }
}

fn invalid(message: String, hint: &str) -> anyhow::Error {
    AppError::InvalidConfig {
        message,
        hint: hint.to_string(),
    }
    .into()
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_regular_file(path, MAX_FILE_SIZE).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for (field, value) in [
        ("sandbox_timeout_secs", config.sandbox_timeout_secs),
        ("analysis_timeout_secs", config.analysis_timeout_secs),
    ] {
        if value == Some(0) {
            return Err(invalid(
                format!("{} must be greater than 0", field),
                "Timeouts are given in seconds (e.g., 600)",
            ));
        }
    }

    config.parsed_disabled_tools()?;
    config.parsed_work_dirs()?;
    config.parsed_images()?;
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}
