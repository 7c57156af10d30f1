//! Config command implementation.
//!
//! Generates configuration files in various formats.

use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::Config;

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: ConfigFormat,
    commented: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let output = match output {
        Some(path) => path,
        None => PathBuf::from("smartctl-collector.yaml"),
    };

    let content = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
        ConfigFormat::Toml => toml::to_string_pretty(&config)?,
        ConfigFormat::Yaml => {
            let mut content = serde_yaml::to_string(&config)?;
            if commented {
                content = add_config_comments(content);
            }
            content
        }
    };

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# smartctl-collector Configuration
# ==================================
#
# Device Selection
# ----------------
# device: "/dev/disk/by-id/..."  # Device to query; a stable by-id symlink is
#                                # recommended, the emitted name tag carries
#                                # its resolved target
# device_type: "sat"             # Transport type passed to smartctl via -d
#
# External Binaries
# -----------------
# smartctl_path: "/usr/sbin/smartctl"  # Absolute path to smartctl
# sudo_path: "/usr/bin/sudo"           # Absolute path to sudo
# enable_sudo: true                    # Wrap smartctl in 'sudo -n'; requires a
#                                      # NOPASSWD sudoers entry when not root
#
# Output
# ------
# type_tag: "sntrealtek"         # Value of the fixed "type" tag
#
# Logging
# -------
# log_level: "off"               # off, error, warn, info, debug, trace
#                                # Logs go to stderr; stdout carries only the
#                                # metric line
#
# Testing
# -------
# test_data_file: null           # Read the JSON report from this file instead
#                                # of invoking smartctl
"#;

    format!("{comments}\n{yaml}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_yaml_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated.yaml");
        command_config(Some(path.clone()), ConfigFormat::Yaml, true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Config = serde_yaml::from_str(&content).unwrap();
        assert_eq!(parsed.device_type.as_deref(), Some("sat"));
    }

    #[test]
    fn test_generated_toml_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated.toml");
        command_config(Some(path.clone()), ConfigFormat::Toml, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.type_tag.as_deref(), Some("sntrealtek"));
    }
}
