//! Configuration management for smartctl-collector.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats. The defaults
//! reproduce the original hard-wired deployment, so a run with no flags and no
//! config file queries the fixed by-id device through sudo.

use crate::cli::{Args, ConfigFormat, LogLevel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_DEVICE: &str =
    "/dev/disk/by-id/ata-Samsung_SSD_860_EVO_M.2_250GB_S5GFNJ0N903632M";
pub const DEFAULT_SMARTCTL_PATH: &str = "/usr/sbin/smartctl";
pub const DEFAULT_SUDO_PATH: &str = "/usr/bin/sudo";
pub const DEFAULT_DEVICE_TYPE: &str = "sat";
pub const DEFAULT_TYPE_TAG: &str = "sntrealtek";

/// Measurement name of the emitted record. Not configurable: downstream
/// dashboards key on it.
pub const MEASUREMENT: &str = "smartctl";

/// Field key of the emitted record.
pub const FIELD_KEY: &str = "temperature";

/// Collector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Device selection
    pub device: Option<String>,
    #[serde(alias = "device-type")]
    pub device_type: Option<String>,

    // External binaries
    #[serde(alias = "smartctl-path")]
    pub smartctl_path: Option<String>,
    #[serde(alias = "sudo-path")]
    pub sudo_path: Option<String>,
    #[serde(alias = "enable-sudo")]
    pub enable_sudo: Option<bool>,

    // Output
    #[serde(alias = "type-tag")]
    pub type_tag: Option<String>,

    // Logging
    pub log_level: Option<String>,

    /// Path to a JSON report file (reads the report from the file instead of invoking smartctl)
    #[serde(alias = "test-data-file")]
    pub test_data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: Some(DEFAULT_DEVICE.to_string()),
            device_type: Some(DEFAULT_DEVICE_TYPE.to_string()),
            smartctl_path: Some(DEFAULT_SMARTCTL_PATH.to_string()),
            sudo_path: Some(DEFAULT_SUDO_PATH.to_string()),
            enable_sudo: Some(true),
            type_tag: Some(DEFAULT_TYPE_TAG.to_string()),
            log_level: Some("off".into()),
            test_data_file: None,
        }
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let device = cfg.device.as_deref().unwrap_or(DEFAULT_DEVICE);
    if device.is_empty() {
        return Err("device must not be empty".into());
    }

    let device_type = cfg.device_type.as_deref().unwrap_or(DEFAULT_DEVICE_TYPE);
    if device_type.is_empty() {
        return Err("device_type must not be empty".into());
    }

    let smartctl = cfg.smartctl_path.as_deref().unwrap_or(DEFAULT_SMARTCTL_PATH);
    if smartctl.is_empty() {
        return Err("smartctl_path must not be empty".into());
    }
    if !Path::new(smartctl).is_absolute() {
        return Err(format!("smartctl_path must be absolute, got '{}'", smartctl).into());
    }

    // The sudo wrapper only matters when escalation is enabled
    if cfg.enable_sudo.unwrap_or(true) {
        let sudo = cfg.sudo_path.as_deref().unwrap_or(DEFAULT_SUDO_PATH);
        if sudo.is_empty() {
            return Err("sudo_path must not be empty while enable_sudo is true".into());
        }
        if !Path::new(sudo).is_absolute() {
            return Err(format!("sudo_path must be absolute, got '{}'", sudo).into());
        }
    }

    if let Some(level) = cfg.log_level.as_deref() {
        match level {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => {}
            other => {
                return Err(format!(
                    "Invalid log_level '{}', expected one of off/error/warn/info/debug/trace",
                    other
                )
                .into());
            }
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref().and_then(|p| p.to_str()))?
    };

    // Override with CLI args
    if let Some(device) = &args.device {
        config.device = Some(device.clone());
    }
    if let Some(device_type) = &args.device_type {
        config.device_type = Some(device_type.clone());
    }
    if let Some(smartctl_path) = &args.smartctl_path {
        config.smartctl_path = Some(smartctl_path.to_string_lossy().to_string());
    }
    if let Some(sudo_path) = &args.sudo_path {
        config.sudo_path = Some(sudo_path.to_string_lossy().to_string());
    }
    if args.no_sudo {
        config.enable_sudo = Some(false);
    }
    if let Some(type_tag) = &args.type_tag {
        config.type_tag = Some(type_tag.clone());
    }

    // Log level: CLI wins if provided
    if let Some(level) = &args.log_level {
        let level = match level {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        config.log_level = Some(level.to_string());
    }

    // Test data file: CLI wins if provided
    if let Some(test_file) = &args.test_data_file {
        config.test_data_file = Some(test_file.clone());
    }

    Ok(config)
}

/// Enhanced configuration loading with multiple format support
pub fn load_config(path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = if let Some(p) = path {
        PathBuf::from(p)
    } else {
        // Try default locations
        let defaults = [
            "/etc/smartctl-collector/collector.yaml",
            "/etc/smartctl-collector/collector.yml",
            "/etc/smartctl-collector/collector.json",
            "./smartctl-collector.yaml",
            "./smartctl-collector.yml",
            "./smartctl-collector.json",
        ];

        defaults
            .iter()
            .find(|p| Path::new(p).exists())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(""))
    };

    if !path.exists() || path.to_string_lossy().is_empty() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)?;

    let mut config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let config: Config = serde_json::from_str(&content)?;
            info!("Loaded JSON configuration from: {}", path.display());
            config
        }
        Some("toml") => {
            let config: Config = toml::from_str(&content)?;
            info!("Loaded TOML configuration from: {}", path.display());
            config
        }
        _ => {
            // Default to YAML
            let config: Config = serde_yaml::from_str(&content)?;
            info!("Loaded YAML configuration from: {}", path.display());
            config
        }
    };

    fill_defaults(&mut config);
    Ok(config)
}

/// Fills fields a partial config file left unset with the built-in defaults.
fn fill_defaults(config: &mut Config) {
    config.device.get_or_insert_with(|| DEFAULT_DEVICE.to_string());
    config
        .device_type
        .get_or_insert_with(|| DEFAULT_DEVICE_TYPE.to_string());
    config
        .smartctl_path
        .get_or_insert_with(|| DEFAULT_SMARTCTL_PATH.to_string());
    config
        .sudo_path
        .get_or_insert_with(|| DEFAULT_SUDO_PATH.to_string());
    config.enable_sudo.get_or_insert(true);
    config
        .type_tag
        .get_or_insert_with(|| DEFAULT_TYPE_TAG.to_string());
    config.log_level.get_or_insert_with(|| "off".to_string());
}

/// Shows configuration in requested format
pub fn show_config(
    config: &Config,
    format: ConfigFormat,
    user_config: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    if user_config {
        println!("User configuration (effective values):");
    }
    println!("{output}");
    Ok(())
}
