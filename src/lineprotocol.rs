//! InfluxDB line protocol serialization.
//!
//! This module renders a single measurement with tags and one integer field as
//! a line protocol record without a timestamp:
//! `measurement,tag1=v1,tag2=v2 field=123i`
//! Timestamping is left to the receiver or the ingestion pipeline.

/// Escapes a tag value for line protocol output.
///
/// Replacement order matters: backslashes are doubled first so that the
/// escape characters introduced for space, comma and equals are not
/// re-escaped afterwards.
pub fn escape_tag_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(' ', "\\ ")
        .replace(',', "\\,")
        .replace('=', "\\=")
}

/// Reverses [`escape_tag_value`].
///
/// Every backslash is treated as an escape for the character that follows it.
/// A trailing lone backslash is kept as-is.
pub fn unescape_tag_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// A single line protocol record: measurement, ordered tags, one integer field.
#[derive(Debug, Clone)]
pub struct MetricLine {
    measurement: String,
    tags: Vec<(String, String)>,
    field_key: String,
    field_value: i64,
}

impl MetricLine {
    /// Creates a record with no tags yet.
    pub fn new(measurement: &str, field_key: &str, field_value: i64) -> Self {
        Self {
            measurement: measurement.to_string(),
            tags: Vec::new(),
            field_key: field_key.to_string(),
            field_value,
        }
    }

    /// Appends a tag, preserving insertion order.
    ///
    /// Tags with an empty value are dropped entirely rather than emitted as
    /// `key=`. Keys are fixed literals chosen by the caller and are not
    /// escaped; values are escaped at render time.
    pub fn add_tag(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.tags.push((key.to_string(), value.to_string()));
    }

    /// Number of tags that survived empty-value dropping.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Renders the record as one line, without a trailing newline.
    ///
    /// The `i` suffix marks the field as integer-typed in line protocol.
    pub fn render(&self) -> String {
        let mut line = String::from(&self.measurement);
        for (key, value) in &self.tags {
            line.push(',');
            line.push_str(key);
            line.push('=');
            line.push_str(&escape_tag_value(value));
        }
        line.push(' ');
        line.push_str(&self.field_key);
        line.push('=');
        line.push_str(&self.field_value.to_string());
        line.push('i');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_value_unchanged() {
        assert_eq!(escape_tag_value("S5GFNJ0N903632M"), "S5GFNJ0N903632M");
        assert_eq!(escape_tag_value("/dev/sda"), "/dev/sda");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_tag_value("A B"), "A\\ B");
        assert_eq!(escape_tag_value("a,b"), "a\\,b");
        assert_eq!(escape_tag_value("a=b"), "a\\=b");
        assert_eq!(escape_tag_value("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_escape_backslash_before_space() {
        // The backslash rule must run first, otherwise the escape introduced
        // for the space would be doubled as well.
        assert_eq!(escape_tag_value("a\\ b"), "a\\\\\\ b");
    }

    #[test]
    fn test_escape_unescape_round_trip() {
        let values = [
            "Samsung SSD 860 EVO M.2 250GB",
            "a,b=c d",
            "back\\slash",
            "\\ leading",
            "",
            "no_specials",
        ];
        for value in values {
            assert_eq!(unescape_tag_value(&escape_tag_value(value)), value);
        }
    }

    #[test]
    fn test_render_orders_tags_and_suffixes_field() {
        let mut line = MetricLine::new("smartctl", "temperature", 42);
        line.add_tag("model", "X");
        line.add_tag("name", "/dev/sda");
        line.add_tag("serial", "Y");
        line.add_tag("type", "sntrealtek");
        assert_eq!(
            line.render(),
            "smartctl,model=X,name=/dev/sda,serial=Y,type=sntrealtek temperature=42i"
        );
    }

    #[test]
    fn test_render_escapes_tag_values() {
        let mut line = MetricLine::new("smartctl", "temperature", 55);
        line.add_tag("model", "A B");
        assert_eq!(line.render(), "smartctl,model=A\\ B temperature=55i");
    }

    #[test]
    fn test_add_tag_drops_empty_values() {
        let mut line = MetricLine::new("smartctl", "temperature", 37);
        line.add_tag("model", "X");
        line.add_tag("serial", "");
        assert_eq!(line.tag_count(), 1);
        assert_eq!(line.render(), "smartctl,model=X temperature=37i");
    }

    #[test]
    fn test_render_without_tags_has_no_leading_comma() {
        let line = MetricLine::new("smartctl", "temperature", 1);
        assert_eq!(line.tag_count(), 0);
        assert_eq!(line.render(), "smartctl temperature=1i");
    }

    #[test]
    fn test_negative_field_value() {
        let line = MetricLine::new("smartctl", "temperature", -3);
        assert_eq!(line.render(), "smartctl temperature=-3i");
    }
}
