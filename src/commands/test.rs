//! Test command implementation.
//!
//! Runs the collection pipeline and displays results.

use std::time::Instant;

use crate::collector::{acquire_report, build_line, canonical_device_name};
use crate::config::{Config, DEFAULT_DEVICE};

/// Tests the collection pipeline.
pub fn command_test(
    iterations: usize,
    verbose: bool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🧪 smartctl-collector - Test Mode");
    println!("==================================");

    let mut error_count = 0;

    for iteration in 1..=iterations {
        println!("\n🔄 Iteration {}/{}:", iteration, iterations);

        let start = Instant::now();
        let report = match acquire_report(config) {
            Ok(report) => report,
            Err(e) => {
                error_count += 1;
                println!("   ❌ Report acquisition failed: {}", e);
                continue;
            }
        };
        let duration = start.elapsed();

        if verbose {
            let device = config.device.as_deref().unwrap_or(DEFAULT_DEVICE);
            println!("   ├─ Device: {}", device);
            println!("   ├─ Resolves to: {}", canonical_device_name(device));
            println!("   ├─ Model: {}", display_or_absent(report.model()));
            println!("   └─ Serial: {}", display_or_absent(report.serial()));
        }

        match report.resolve_temperature() {
            Some(temperature) => println!("   🌡️  Temperature: {}°C", temperature),
            None => {
                error_count += 1;
                println!("   ❌ No temperature reading in report");
                continue;
            }
        }

        match build_line(config, &report) {
            Ok(line) => println!("   📝 Line: {}", line.render()),
            Err(e) => {
                error_count += 1;
                println!("   ❌ Line construction failed: {}", e);
                continue;
            }
        }

        println!(
            "   ⏱️  Acquisition duration: {:.2}ms",
            duration.as_secs_f64() * 1000.0
        );
    }

    if error_count == 0 {
        println!("\n✅ Test completed successfully");
        Ok(())
    } else {
        println!("\n❌ Test completed with {} failed iterations", error_count);
        std::process::exit(1);
    }
}

fn display_or_absent(value: &str) -> &str {
    if value.is_empty() {
        "(absent)"
    } else {
        value
    }
}
