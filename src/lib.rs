//! smartctl-collector core library
//!
//! This library provides the framework-agnostic pieces of the collector: the
//! smartctl JSON report model with its ordered temperature fallback, and the
//! InfluxDB line protocol writer. It carries no process-invocation or CLI
//! code, allowing downstream projects to reuse the parsing and serialization
//! on reports they obtained some other way.
//!
//! # Usage
//!
//! ```rust
//! use smartctl_collector::lineprotocol::MetricLine;
//! use smartctl_collector::report::SmartReport;
//!
//! let report = SmartReport::from_json(
//!     r#"{"temperature": {"current": 42}, "model_name": "Example SSD"}"#,
//! )
//! .unwrap();
//!
//! let temperature = report.resolve_temperature().unwrap();
//! let mut line = MetricLine::new("smartctl", "temperature", temperature);
//! line.add_tag("model", report.model());
//! line.add_tag("serial", report.serial());
//!
//! assert_eq!(line.render(), "smartctl,model=Example\\ SSD temperature=42i");
//! ```

pub mod lineprotocol;
pub mod report;

// Re-export main types for convenience
pub use lineprotocol::{escape_tag_value, unescape_tag_value, MetricLine};
pub use report::SmartReport;
