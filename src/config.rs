use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::ImportArgs;
use crate::importer::ImportOptions;
use crate::providers::pivotal::DEFAULT_BASE_URL;
use crate::source::DEFAULT_CSV_PATH;
use crate::transform::TransformOptions;

pub const PROJECT_ID_VAR: &str = "PROJECT_ID";
pub const TOKEN_VAR: &str = "TRACKER_TOKEN";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub tracker: Option<TrackerConfig>,
    pub import: Option<ImportConfig>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TrackerConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ImportConfig {
    pub file: Option<PathBuf>,
    pub mode: Option<crate::transform::ImportMode>,
    pub categories: Option<Vec<String>>,
    pub name_template: Option<String>,
    #[serde(default)]
    pub activity_log: bool,
}

impl AppConfig {
    pub fn base_url(&self) -> &str {
        self.tracker
            .as_ref()
            .and_then(|t| t.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn activity_log(&self) -> bool {
        self.import.as_ref().is_some_and(|i| i.activity_log)
    }
}

fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".storyload")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let mut config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;

    if let Some(categories) = config.import.as_mut().and_then(|i| i.categories.as_mut()) {
        categories.retain(|c| !c.trim().is_empty());
        if categories.is_empty() {
            bail!(
                "Invalid config.toml at {}: [import] categories needs at least one category",
                path.display()
            );
        }
    }
    Ok(config)
}

/// Non-empty value of an environment variable.
pub fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Merge command line over config file over defaults.
pub fn resolve_options(config: &AppConfig, args: &ImportArgs) -> ImportOptions {
    let import = config.import.as_ref();

    let mode = args
        .mode
        .or_else(|| import.and_then(|i| i.mode))
        .unwrap_or_default();

    let mut transform = TransformOptions::for_mode(mode);
    if let Some(template) = args
        .name_template
        .clone()
        .or_else(|| import.and_then(|i| i.name_template.clone()))
    {
        transform.name_template = template;
    }
    if let Some(categories) = args
        .categories
        .clone()
        .or_else(|| import.and_then(|i| i.categories.clone()))
    {
        transform.categories = categories;
    }

    let csv_path = args
        .file
        .clone()
        .or_else(|| import.and_then(|i| i.file.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH));

    ImportOptions {
        csv_path,
        transform,
        dry_run: args.dry_run,
    }
}
