//! # DexQA Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for DexQA, handling loading,
//! merging, validation, and access to configuration data. It combines defaults,
//! user settings, project-specific overrides, and finally command-line flags.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags and `DEXQA_*` environment variables (`Overrides`)
//! 2. An explicit file given with `--config` / `DEXQA_CONFIG`
//! 3. Project-specific `.dexqa.toml` in current directory or ancestors
//! 4. User-specific `<config dir>/dexqa/config.toml`
//! 5. Default values defined in the code
//!
//! When an explicit file is given, project and user files are not consulted.
//!
//! ## Examples
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//! ask_path = "/api/v1/ask"
//! timeout_secs = 30
//!
//! [display]
//! compact = false
//! ```
//!
//! ```rust
//! let cfg = config::load_config(cli.config.as_deref(), &overrides)?;
//! let client = QaClient::new(&cfg.api)?;
//! ```
//!
use crate::core::error::{DexError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use reqwest::Url;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where and how to reach the question-answering service.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Scheme, host and port of the service (e.g. `http://localhost:8000`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the ask endpoint, joined onto `base_url`.
    #[serde(default = "default_ask_path")]
    pub ask_path: String,
    /// Request timeout in seconds. `None` leaves the transport default in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Terminal presentation settings.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Use the short labels meant for narrow terminals.
    #[serde(default)]
    pub compact: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ask_path: default_ask_path(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_ask_path() -> String {
    "/api/v1/ask".to_string()
}

/// Settings supplied on the command line. `None`/`false` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub compact: bool,
}

const PROJECT_CONFIG_FILENAME: &str = ".dexqa.toml";

/// # Load Configuration (`load_config`)
///
/// Resolves the effective configuration from all sources, applies the command-line
/// overrides and validates the result.
///
/// ## Arguments
///
/// * `explicit`: Path given with `--config`. When present the file must exist.
/// * `overrides`: Values taken from command-line flags.
///
/// ## Returns
///
/// * `Result<Config>`: The validated configuration, or a `DexError::Config` wrapped
///   with context if a file cannot be read, parsed, or fails validation.
pub fn load_config(explicit: Option<&Path>, overrides: &Overrides) -> Result<Config> {
    let file_config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    let merged_config = apply_overrides(file_config, overrides);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "DexQA", "dexqa") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.dexqa.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for `.dexqa.toml`.
/// Stops at the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.api.base_url = if project_cfg.api.base_url != default_base_url() {
        project_cfg.api.base_url
    } else {
        user.api.base_url
    };
    merged.api.ask_path = if project_cfg.api.ask_path != default_ask_path() {
        project_cfg.api.ask_path
    } else {
        user.api.ask_path
    };
    merged.api.timeout_secs = project_cfg.api.timeout_secs.or(user.api.timeout_secs);
    merged.display.compact = project_cfg.display.compact || user.display.compact;
    merged
}

fn apply_overrides(mut config: Config, overrides: &Overrides) -> Config {
    if let Some(base_url) = &overrides.base_url {
        debug!("Overriding base_url from command line: {}", base_url);
        config.api.base_url = base_url.clone();
    }
    if let Some(timeout) = overrides.timeout_secs {
        config.api.timeout_secs = Some(timeout);
    }
    if overrides.compact {
        config.display.compact = true;
    }
    config
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    let url = Url::parse(&config.api.base_url).map_err(|e| {
        anyhow!(DexError::Config(format!(
            "Invalid base_url '{}': {}",
            config.api.base_url, e
        )))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!(DexError::Config(format!(
            "Unsupported scheme '{}' in base_url. Expected http or https.",
            url.scheme()
        ))));
    }
    if !config.api.ask_path.starts_with('/') {
        return Err(anyhow!(DexError::Config(format!(
            "Invalid ask_path '{}'. It must start with '/'.",
            config.api.ask_path
        ))));
    }
    if config.api.timeout_secs == Some(0) {
        return Err(anyhow!(DexError::Config(
            "timeout_secs must be greater than zero.".to_string()
        )));
    }
    Ok(())
}
