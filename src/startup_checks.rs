//! Startup requirement validation for smartctl-collector.
//!
//! This module validates that the collector can reach the external pieces it
//! depends on: the escalation helper, the smartctl binary, and the device
//! path. The collection run itself never calls this (failures there stay
//! silent); it backs the `check-requirements` subcommand.

use nix::unistd::geteuid;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{Config, DEFAULT_DEVICE, DEFAULT_SMARTCTL_PATH, DEFAULT_SUDO_PATH};

/// Validate all runtime requirements
pub fn validate_requirements(config: &Config) -> Result<(), ValidationError> {
    info!("🔍 Validating runtime requirements...");

    check_escalation_helper(config)?;
    check_smartctl_binary(config)?;
    check_device(config)?;

    info!("✅ All runtime requirements validated");
    Ok(())
}

/// Check the non-interactive escalation helper
fn check_escalation_helper(config: &Config) -> Result<(), ValidationError> {
    if !config.enable_sudo.unwrap_or(true) {
        debug!("Sudo wrapper disabled, skipping escalation helper check");
        return Ok(());
    }

    if geteuid().is_root() {
        info!("✅ Running as root (uid=0) - escalation will pass without a sudoers entry");
    } else {
        warn!("⚠️  Not running as root - sudo -n requires a NOPASSWD sudoers entry for smartctl");
    }

    let sudo = config.sudo_path.as_deref().unwrap_or(DEFAULT_SUDO_PATH);
    if !Path::new(sudo).exists() {
        return Err(ValidationError::MissingBinary(sudo.to_string()));
    }
    info!("✅ Escalation helper found: {}", sudo);
    Ok(())
}

/// Check the smartctl binary
fn check_smartctl_binary(config: &Config) -> Result<(), ValidationError> {
    let smartctl = config
        .smartctl_path
        .as_deref()
        .unwrap_or(DEFAULT_SMARTCTL_PATH);
    if !Path::new(smartctl).exists() {
        return Err(ValidationError::MissingBinary(smartctl.to_string()));
    }
    info!("✅ smartctl found: {}", smartctl);
    Ok(())
}

/// Check the device path
fn check_device(config: &Config) -> Result<(), ValidationError> {
    let device = config.device.as_deref().unwrap_or(DEFAULT_DEVICE);
    let path = Path::new(device);

    if !path.exists() {
        return Err(ValidationError::DeviceNotFound(device.to_string()));
    }

    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            info!("✅ Device path is a symlink: {}", device);
        }
        Ok(_) => {
            warn!(
                "⚠️  Device path is not a symlink: {} - the name tag will equal the device path",
                device
            );
        }
        Err(e) => {
            warn!("⚠️  Could not inspect device path {}: {}", device, e);
        }
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Required binary not found: {0}")]
    MissingBinary(String),

    #[error("Device path not found: {0}")]
    DeviceNotFound(String),
}
