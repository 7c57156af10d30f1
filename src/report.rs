//! Data model for smartctl JSON reports.
//!
//! This module deserializes the subset of `smartctl --json --all` output the
//! collector consumes and resolves a temperature reading from it. The schema
//! is externally defined and only partially trusted: every field is optional
//! and unknown fields are ignored.

use serde::Deserialize;

/// Parsed smartctl report, reduced to the fields the collector reads.
#[derive(Debug, Clone, Deserialize)]
pub struct SmartReport {
    #[serde(default)]
    pub temperature: Option<Temperature>,
    #[serde(default)]
    pub ata_smart_attributes: Option<AtaSmartAttributes>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
}

/// The `temperature` field as smartctl emits it.
///
/// Newer smartctl versions report an object with a `current` member, older
/// ones a bare number. Anything else (seen in the wild with broken bridge
/// chips) is captured as `Other` and treated as absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    Celsius(f64),
    Detail(TemperatureDetail),
    Other(serde_json::Value),
}

/// Object form of the `temperature` field.
#[derive(Debug, Clone, Deserialize)]
pub struct TemperatureDetail {
    #[serde(default)]
    pub current: Option<f64>,
}

/// The `ata_smart_attributes` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AtaSmartAttributes {
    #[serde(default)]
    pub table: Vec<SmartAttribute>,
}

/// One row of the SMART attribute table.
#[derive(Debug, Clone, Deserialize)]
pub struct SmartAttribute {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub raw: Option<RawValue>,
}

/// Raw value of a SMART attribute.
#[derive(Debug, Clone, Deserialize)]
pub struct RawValue {
    #[serde(default)]
    pub value: Option<f64>,
}

impl SmartReport {
    /// Parses a smartctl JSON document.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Resolves the temperature in Celsius, truncated to an integer.
    ///
    /// Fallback order, first success wins:
    /// 1. `temperature.current` when the field is an object
    /// 2. `temperature` itself when it is a numeric scalar
    /// 3. the first attribute-table row whose name contains "Temperature"
    ///    and which carries a raw value
    pub fn resolve_temperature(&self) -> Option<i64> {
        self.reported_temperature()
            .or_else(|| self.attribute_table_temperature())
            .map(|celsius| celsius as i64)
    }

    /// Temperature taken directly from the `temperature` field, if usable.
    fn reported_temperature(&self) -> Option<f64> {
        match self.temperature.as_ref()? {
            Temperature::Celsius(value) => Some(*value),
            Temperature::Detail(detail) => detail.current,
            Temperature::Other(_) => None,
        }
    }

    /// Scans the attribute table in document order for a temperature row.
    fn attribute_table_temperature(&self) -> Option<f64> {
        self.ata_smart_attributes
            .as_ref()?
            .table
            .iter()
            .filter(|attr| attr.name.contains("Temperature"))
            .find_map(|attr| attr.raw.as_ref().and_then(|raw| raw.value))
    }

    /// Model name, empty string when the report omits it.
    pub fn model(&self) -> &str {
        self.model_name.as_deref().unwrap_or("")
    }

    /// Serial number, empty string when the report omits it.
    pub fn serial(&self) -> &str {
        self.serial_number.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_temperature() {
        let report = SmartReport::from_json(r#"{"temperature": {"current": 55}}"#).unwrap();
        assert_eq!(report.resolve_temperature(), Some(55));
    }

    #[test]
    fn test_parse_scalar_temperature() {
        let report = SmartReport::from_json(r#"{"temperature": 37}"#).unwrap();
        assert_eq!(report.resolve_temperature(), Some(37));
    }

    #[test]
    fn test_scalar_temperature_is_truncated() {
        let report = SmartReport::from_json(r#"{"temperature": 42.9}"#).unwrap();
        assert_eq!(report.resolve_temperature(), Some(42));
    }

    #[test]
    fn test_object_without_current_falls_through_to_table() {
        let report = SmartReport::from_json(
            r#"{
                "temperature": {"power_cycle_min": 20},
                "ata_smart_attributes": {"table": [
                    {"name": "Temperature_Celsius", "raw": {"value": 31}}
                ]}
            }"#,
        )
        .unwrap();
        assert_eq!(report.resolve_temperature(), Some(31));
    }

    #[test]
    fn test_direct_temperature_wins_over_table() {
        let report = SmartReport::from_json(
            r#"{
                "temperature": {"current": 55},
                "ata_smart_attributes": {"table": [
                    {"name": "Temperature_Celsius", "raw": {"value": 99}}
                ]}
            }"#,
        )
        .unwrap();
        assert_eq!(report.resolve_temperature(), Some(55));
    }

    #[test]
    fn test_table_first_match_wins() {
        let report = SmartReport::from_json(
            r#"{
                "ata_smart_attributes": {"table": [
                    {"name": "Raw_Read_Error_Rate", "raw": {"value": 0}},
                    {"name": "Airflow_Temperature_Cel", "raw": {"value": 28}},
                    {"name": "Temperature_Celsius", "raw": {"value": 33}}
                ]}
            }"#,
        )
        .unwrap();
        assert_eq!(report.resolve_temperature(), Some(28));
    }

    #[test]
    fn test_table_match_without_raw_value_is_skipped() {
        let report = SmartReport::from_json(
            r#"{
                "ata_smart_attributes": {"table": [
                    {"name": "Airflow_Temperature_Cel"},
                    {"name": "Temperature_Celsius", "raw": {"value": 33}}
                ]}
            }"#,
        )
        .unwrap();
        assert_eq!(report.resolve_temperature(), Some(33));
    }

    #[test]
    fn test_non_numeric_temperature_is_ignored() {
        let report = SmartReport::from_json(r#"{"temperature": "hot"}"#).unwrap();
        assert_eq!(report.resolve_temperature(), None);
    }

    #[test]
    fn test_no_temperature_anywhere() {
        let report =
            SmartReport::from_json(r#"{"model_name": "X", "serial_number": "Y"}"#).unwrap();
        assert_eq!(report.resolve_temperature(), None);
    }

    #[test]
    fn test_identity_fields_default_to_empty() {
        let report = SmartReport::from_json("{}").unwrap();
        assert_eq!(report.model(), "");
        assert_eq!(report.serial(), "");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let report = SmartReport::from_json(
            r#"{"json_format_version": [1, 0], "smartctl": {"version": [7, 4]}, "temperature": 40}"#,
        )
        .unwrap();
        assert_eq!(report.resolve_temperature(), Some(40));
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(SmartReport::from_json("not json").is_err());
    }
}
