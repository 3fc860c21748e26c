//! JSON report written to stdout for the calling process
//!
//! ```json
//! {
//!     "startTime": "2022-11-23 00:30:00+00:00",
//!     "endTime": "2022-11-23 04:30:00+00:00",
//!     "contiguous": true,
//!     "parsed": "09:14:44 23Nov"
//! }
//! ```

use crate::config::OutputConfig;
use crate::error::{EvschedError, Result};
use crate::schedule::{ChargeSummary, Timestamp};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Zone the `parsed` breadcrumb is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportZone {
    Local,
    Named(Tz),
}

/// Resolve `local` or an IANA timezone name
pub fn resolve_timezone(name: &str) -> Result<ReportZone> {
    let name = name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case("local") {
        return Ok(ReportZone::Local);
    }
    name.parse::<Tz>()
        .map(ReportZone::Named)
        .map_err(|_| EvschedError::validation("output.timezone", format!("Unknown timezone: {}", name)))
}

pub fn validate_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(EvschedError::validation(
            "output.parsed_format",
            format!("Invalid time format: {}", format),
        ));
    }
    Ok(())
}

/// Render the generation instant for the `parsed` field
pub fn format_parsed(at: DateTime<Utc>, zone: ReportZone, format: &str) -> Result<String> {
    validate_format(format)?;
    Ok(match zone {
        ReportZone::Local => at.with_timezone(&Local).format(format).to_string(),
        ReportZone::Named(tz) => at.with_timezone(&tz).format(format).to_string(),
    })
}

/// Output record of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub contiguous: bool,
    /// Human-readable generation time, not a domain value
    pub parsed: String,
}

impl SummaryReport {
    pub fn from_summary(summary: &ChargeSummary, output: &OutputConfig) -> Result<Self> {
        let zone = resolve_timezone(&output.timezone)?;
        Ok(Self {
            start_time: summary.start_time,
            end_time: summary.end_time,
            contiguous: summary.contiguous,
            parsed: format_parsed(summary.parsed_at, zone, &output.parsed_format)?,
        })
    }

    /// Serialize with 4-space indentation, or compact when `pretty` is false
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        if !pretty {
            return Ok(serde_json::to_string(self)?);
        }
        let mut buf = Vec::with_capacity(160);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| EvschedError::serialization(e.to_string()))
    }
}
