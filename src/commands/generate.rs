//! Generate testdata command implementation.
//!
//! Generates a synthetic smartctl JSON report usable via `--test-data-file`,
//! shaped like real `smartctl --json --all` output for an ATA device behind
//! a SAT bridge.

use anyhow::Context;
use once_cell::sync::Lazy;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::info;

// Temperature range for generated reports (Celsius)
const MIN_TEMPERATURE: i64 = 25;
const MAX_TEMPERATURE: i64 = 55;

/// Attribute rows every generated report carries.
struct AttributeTemplate {
    id: u16,
    name: &'static str,
}

static TEMPERATURE_ATTRIBUTES: Lazy<Vec<AttributeTemplate>> = Lazy::new(|| {
    vec![
        AttributeTemplate {
            id: 190,
            name: "Airflow_Temperature_Cel",
        },
        AttributeTemplate {
            id: 194,
            name: "Temperature_Celsius",
        },
    ]
});

/// Generates a synthetic smartctl JSON report file.
pub fn command_generate_testdata(
    output: PathBuf,
    temperature: Option<i64>,
) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    let temperature =
        temperature.unwrap_or_else(|| rng.gen_range(MIN_TEMPERATURE..=MAX_TEMPERATURE));
    let serial: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(15)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();

    let table: Vec<serde_json::Value> = TEMPERATURE_ATTRIBUTES
        .iter()
        .map(|attr| {
            json!({
                "id": attr.id,
                "name": attr.name,
                "value": 100 - temperature,
                "worst": 100 - temperature,
                "thresh": 0,
                "raw": {
                    "value": temperature,
                    "string": temperature.to_string(),
                },
            })
        })
        .collect();

    let report = json!({
        "json_format_version": [1, 0],
        "device": {
            "name": "/dev/sda",
            "type": "sat",
            "protocol": "ATA",
        },
        "model_name": "Synthetic SSD 860 EVO M.2 250GB",
        "serial_number": serial,
        "temperature": {
            "current": temperature,
        },
        "ata_smart_attributes": {
            "table": table,
        },
    });

    let content = serde_json::to_string_pretty(&report)?;
    fs::write(&output, content)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!("Generated synthetic report with temperature {}°C", temperature);
    println!("✅ Test data written to: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartctl_collector::report::SmartReport;

    #[test]
    fn test_generated_report_resolves_temperature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testdata.json");
        command_generate_testdata(path.clone(), Some(41)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let report = SmartReport::from_json(&content).unwrap();
        assert_eq!(report.resolve_temperature(), Some(41));
        assert_eq!(report.serial().len(), 15);
        assert!(!report.model().is_empty());
    }

    #[test]
    fn test_random_temperature_stays_in_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testdata.json");
        command_generate_testdata(path.clone(), None).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let report = SmartReport::from_json(&content).unwrap();
        let temperature = report.resolve_temperature().unwrap();
        assert!((MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature));
    }
}
