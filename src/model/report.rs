use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::attendance::AttendanceStatus;
use crate::error::ReportError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
    Csv,
    Excel,
    Pdf,
    Text,
}

impl ReportFormat {
    /// Parse user input, surfacing unknown values as `UnsupportedFormat`.
    pub fn parse(value: &str) -> Result<Self, ReportError> {
        value
            .parse()
            .map_err(|_| ReportError::UnsupportedFormat(value.to_string()))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Excel => "xlsx",
            ReportFormat::Pdf => "pdf",
            ReportFormat::Text => "txt",
        }
    }

    /// Media type of the export artifact. The excel and pdf types describe
    /// the file name handed to the download mechanism, not the bytes: both
    /// formats degrade to CSV/plain-text content (see `AttendanceReportEngine`).
    pub fn media_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv",
            ReportFormat::Excel => "application/vnd.ms-excel",
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Text => "text/plain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    pub include_location: bool,
    pub include_distance: bool,
    pub format: ReportFormat,
    pub date_range: DateRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ReportFilters>,
}

/// Aggregates over one report run. Recomputed from scratch on every call,
/// never mutated incrementally or cached across input sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_records: usize,
    pub present_count: usize,
    pub absent_count: usize,
    pub late_count: usize,
    pub half_day_count: usize,
    pub on_leave_count: usize,
    pub avg_working_hours: f64,
    pub total_overtime: f64,
    pub location_tracked_count: usize,
}

/// A rendered export: the byte blob plus the filename and media type the
/// platform's save/download mechanism needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub media_type: &'static str,
}
