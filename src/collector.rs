//! Single-shot collection pipeline.
//!
//! Wires the pieces together: acquire the smartctl report (external command
//! or test data file), resolve the temperature and identity tags, and render
//! one line protocol record. The caller decides what to do with failures;
//! the binary logs and swallows them so the scheduler contract (at most one
//! stdout line, always exit 0) holds.

use std::fs;

use smartctl_collector::lineprotocol::MetricLine;
use smartctl_collector::report::SmartReport;
use tracing::debug;

use crate::config::{Config, DEFAULT_DEVICE, DEFAULT_TYPE_TAG, FIELD_KEY, MEASUREMENT};
use crate::smartctl::{self, InvokeError};

/// Errors from the collection pipeline. Each variant maps to one "no metric
/// this cycle" cause.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error(transparent)]
    Invoke(#[from] InvokeError),

    #[error("failed to read report file: {0}")]
    ReadReport(#[from] std::io::Error),

    #[error("report is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no temperature reading in report")]
    NoTemperature,

    #[error("all identity tags resolved empty")]
    NoTags,
}

/// Acquires and parses the raw report.
///
/// When a test data file is configured the report is read from it instead of
/// invoking smartctl; the rest of the pipeline is identical.
pub fn acquire_report(config: &Config) -> Result<SmartReport, CollectError> {
    let raw = match &config.test_data_file {
        Some(path) => {
            debug!("Reading report from test data file: {}", path.display());
            fs::read_to_string(path)?
        }
        None => smartctl::run_smartctl(config)?,
    };
    Ok(SmartReport::from_json(&raw)?)
}

/// Resolves the device path to its canonical target for the `name` tag.
///
/// The configured path is typically a stable by-id symlink; the canonical
/// path reflects whatever physical device it currently points to. When
/// resolution fails the configured path is used as-is, matching realpath
/// semantics.
pub fn canonical_device_name(device: &str) -> String {
    fs::canonicalize(device)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| device.to_string())
}

/// Builds the metric record from a parsed report.
///
/// Tags resolving empty are dropped; a record left with no tags at all is
/// rejected, a metric without identity is useless downstream.
pub fn build_line(config: &Config, report: &SmartReport) -> Result<MetricLine, CollectError> {
    let temperature = report
        .resolve_temperature()
        .ok_or(CollectError::NoTemperature)?;

    let device = config.device.as_deref().unwrap_or(DEFAULT_DEVICE);

    let mut line = MetricLine::new(MEASUREMENT, FIELD_KEY, temperature);
    line.add_tag("model", report.model());
    line.add_tag("name", &canonical_device_name(device));
    line.add_tag("serial", report.serial());
    line.add_tag(
        "type",
        config.type_tag.as_deref().unwrap_or(DEFAULT_TYPE_TAG),
    );

    if line.tag_count() == 0 {
        return Err(CollectError::NoTags);
    }

    Ok(line)
}

/// Runs the full pipeline and returns the rendered line.
pub fn collect_line(config: &Config) -> Result<String, CollectError> {
    let report = acquire_report(config)?;
    Ok(build_line(config, &report)?.render())
}
