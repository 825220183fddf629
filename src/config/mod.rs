//! Settings loading and merging
//!
//! Handles loading from config files and environment variables with proper
//! precedence (Env > File > Defaults). The API credential is environment-only
//! and never read from a config file.

use crate::domain::IngestLimits;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_API_KEY: &str = "REPO_PILOT_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "DEEPSEEK_API_KEY";
pub const ENV_API_BASE: &str = "REPO_PILOT_API_BASE";
pub const ENV_MODEL: &str = "REPO_PILOT_MODEL";

/// Session settings. Everything has a workable default; a config file and
/// environment variables refine it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the OpenAI-compatible API.
    pub api_base: String,
    /// Model identifier sent with each completion request.
    pub model: String,
    /// Ingestion size ceiling in bytes.
    pub max_file_bytes: u64,
    /// Ingestion accepted-file ceiling per directory walk.
    pub max_files: usize,
    /// Extra exclusion globs applied on top of the fixed denylist.
    pub exclude_globs: Vec<String>,
    /// HTTP timeout for model calls, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let limits = IngestLimits::default();
        Self {
            api_base: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            max_file_bytes: limits.max_file_bytes,
            max_files: limits.max_files,
            exclude_globs: Vec::new(),
            request_timeout_secs: 120,
        }
    }
}

impl Settings {
    pub fn limits(&self) -> IngestLimits {
        IngestLimits { max_file_bytes: self.max_file_bytes, max_files: self.max_files }
    }

    /// Compile the configured exclusion globs. `None` when there are none.
    pub fn exclude_globset(&self) -> Result<Option<GlobSet>> {
        if self.exclude_globs.is_empty() {
            return Ok(None);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_globs {
            let glob = Glob::new(pattern)
                .with_context(|| format!("Invalid exclusion glob: {pattern}"))?;
            builder.add(glob);
        }
        Ok(Some(builder.build()?))
    }
}

/// The API credential, from `REPO_PILOT_API_KEY` with `DEEPSEEK_API_KEY` as
/// fallback.
pub fn api_key() -> Option<String> {
    std::env::var(ENV_API_KEY).ok().or_else(|| std::env::var(ENV_API_KEY_FALLBACK).ok())
}

/// Load settings: discover or read a config file, then apply environment
/// overrides.
///
/// A parse failure in an auto-discovered file warns and falls back to
/// defaults; a failure in an explicitly provided file is a hard error.
pub fn load_settings(start_dir: &Path, config_path: Option<&Path>) -> Result<Settings> {
    let mut settings = load_file_settings(start_dir, config_path)?;
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn load_file_settings(start_dir: &Path, config_path: Option<&Path>) -> Result<Settings> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(start_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Settings::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_settings(&content, &config_file),
        "yaml" | "yml" => parse_yaml_settings(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(settings) => Ok(settings),
        Err(e) => {
            if config_path_provided {
                return Err(e);
            }
            // Auto-discovered: warn and fall back to defaults.
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {}",
                config_file.display(),
                e
            );
            Ok(Settings::default())
        }
    }
}

/// Parse TOML settings, supporting a nested [repo-pilot] section.
fn parse_toml_settings(content: &str, config_file: &Path) -> Result<Settings> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let settings_val = match raw.get("repo-pilot") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    settings_val
        .try_into()
        .with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML settings, supporting a nested repo-pilot section.
fn parse_yaml_settings(content: &str, config_file: &Path) -> Result<Settings> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let settings_val = match raw.get("repo-pilot") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(settings_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(start_dir: &Path) -> Option<PathBuf> {
    let candidates =
        ["repo-pilot.toml", ".repo-pilot.toml", "repo-pilot.yaml", ".repo-pilot.yaml"];
    candidates.iter().map(|name| start_dir.join(name)).find(|path| path.is_file())
}

/// Apply environment overrides from a lookup function. Separated from the
/// process environment so precedence is testable.
fn apply_env_overrides(settings: &mut Settings, get: impl Fn(&str) -> Option<String>) {
    if let Some(base) = get(ENV_API_BASE) {
        settings.api_base = base;
    }
    if let Some(model) = get(ENV_MODEL) {
        settings.model = model;
    }
}
