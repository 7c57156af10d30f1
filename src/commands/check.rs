//! Check command implementation.
//!
//! Validates system requirements and configuration.

use std::fs;
use std::path::Path;

use crate::collector::canonical_device_name;
use crate::config::{
    validate_effective_config, Config, DEFAULT_DEVICE, DEFAULT_SMARTCTL_PATH, DEFAULT_SUDO_PATH,
};

/// Validates system requirements and configuration.
pub fn command_check(
    binaries: bool,
    device: bool,
    all: bool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 smartctl-collector - System Check");
    println!("====================================");

    let mut all_ok = true;

    // Check external binaries
    if binaries || all {
        println!("\n🔧 Checking external binaries...");

        let smartctl = config
            .smartctl_path
            .as_deref()
            .unwrap_or(DEFAULT_SMARTCTL_PATH);
        if Path::new(smartctl).exists() {
            println!("   ✅ smartctl found: {}", smartctl);
        } else {
            println!("   ❌ smartctl not found: {}", smartctl);
            all_ok = false;
        }

        if config.enable_sudo.unwrap_or(true) {
            let sudo = config.sudo_path.as_deref().unwrap_or(DEFAULT_SUDO_PATH);
            if Path::new(sudo).exists() {
                println!("   ✅ sudo found: {}", sudo);
            } else {
                println!("   ❌ sudo not found: {}", sudo);
                all_ok = false;
            }
        } else {
            println!("   ℹ️  sudo wrapper disabled");
        }
    }

    // Check the device path
    if device || all {
        println!("\n💽 Checking device path...");

        let device_path = config.device.as_deref().unwrap_or(DEFAULT_DEVICE);
        if Path::new(device_path).exists() {
            println!("   ✅ Device path exists: {}", device_path);

            let resolved = canonical_device_name(device_path);
            if resolved != device_path {
                println!("   ✅ Resolves to: {}", resolved);
            } else {
                println!("   ℹ️  Path is not a symlink; name tag will equal the device path");
            }
        } else {
            println!("   ❌ Device path not found: {}", device_path);
            all_ok = false;
        }

        if let Some(test_file) = &config.test_data_file {
            match fs::metadata(test_file) {
                Ok(_) => println!("   ℹ️  Test data file configured: {}", test_file.display()),
                Err(e) => {
                    println!(
                        "   ❌ Test data file not readable: {} ({})",
                        test_file.display(),
                        e
                    );
                    all_ok = false;
                }
            }
        }
    }

    // Check configuration
    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => {
            println!("   ✅ Configuration is valid");
        }
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed - collector is ready");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review warnings");
        std::process::exit(1);
    }
}
