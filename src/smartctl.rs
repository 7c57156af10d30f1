//! smartctl invocation.
//!
//! Runs smartctl against the configured device, requesting JSON output for
//! all attributes, wrapped by non-interactive sudo unless escalation is
//! disabled. The invocation carries no internal timeout; a device that hangs
//! blocks the run until the invoking scheduler kills it.

use std::io;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::config::{
    Config, DEFAULT_DEVICE, DEFAULT_DEVICE_TYPE, DEFAULT_SMARTCTL_PATH, DEFAULT_SUDO_PATH,
};

/// Errors from the smartctl invocation.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("smartctl exited with {status}: {stderr}")]
    NonZeroExit { status: ExitStatus, stderr: String },
}

/// Invokes smartctl and returns its captured stdout.
///
/// The sudo wrapper runs with `-n` so that a missing sudoers entry fails the
/// run immediately instead of hanging on a password prompt. A non-zero exit
/// status from either sudo or smartctl is reported as an error together with
/// the captured stderr.
pub fn run_smartctl(config: &Config) -> Result<String, InvokeError> {
    let smartctl = config
        .smartctl_path
        .as_deref()
        .unwrap_or(DEFAULT_SMARTCTL_PATH);
    let device = config.device.as_deref().unwrap_or(DEFAULT_DEVICE);
    let device_type = config.device_type.as_deref().unwrap_or(DEFAULT_DEVICE_TYPE);

    let mut command = if config.enable_sudo.unwrap_or(true) {
        let sudo = config.sudo_path.as_deref().unwrap_or(DEFAULT_SUDO_PATH);
        let mut command = Command::new(sudo);
        command.arg("-n").arg(smartctl);
        command
    } else {
        Command::new(smartctl)
    };
    command
        .args(["--json", "--all", "-d"])
        .arg(device_type)
        .arg(device);

    debug!("Invoking {:?}", command);

    let output = command.output().map_err(|e| InvokeError::Spawn {
        command: command.get_program().to_string_lossy().to_string(),
        source: e,
    })?;

    if !output.status.success() {
        return Err(InvokeError::NonZeroExit {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
