//! Shared utility functions for VWI crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// ISO date format used by HTML date inputs and the index backend.
    pub const ISO_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(ISO_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)?)
    }

    /// Parse an optional date input. Blank input is `Ok(None)`.
    pub fn parse_optional_date(s: &str) -> anyhow::Result<Option<NaiveDate>> {
        if s.trim().is_empty() {
            return Ok(None);
        }
        parse_date(s).map(Some)
    }

}

/// Display formatting for index values and coordinates
pub mod format {
    /// Format an index value for the point popup (two decimal places).
    pub fn format_value(value: f64) -> String {
        format!("{:.2}", value)
    }

    /// Format a coordinate for the read-only bounding box fields.
    pub fn format_coordinate(value: Option<f64>) -> String {
        value.map(|v| format!("{:.6}", v)).unwrap_or_default()
    }

}
