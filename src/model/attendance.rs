use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::location::LocationFix;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    #[strum(serialize = "Half Day")]
    HalfDay,
    #[strum(serialize = "On Leave")]
    OnLeave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeIdentity {
    pub employee_id: u64,
    pub name: String,
    pub department: String,
}

/// One day of attendance for one employee. Supplied whole by the caller
/// and consumed read-only; the report engine never mutates records.
///
/// Invariant: `check_out` is only present alongside `check_in`, and
/// `check_out >= check_in`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub employee: EmployeeIdentity,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDateTime>,
    pub working_hours: f64,
    pub overtime: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_location: Option<LocationFix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_location: Option<LocationFix>,
}

impl AttendanceRecord {
    /// Whether either end of the day carries a position fix.
    pub fn location_tracked(&self) -> bool {
        self.check_in_location.is_some() || self.check_out_location.is_some()
    }
}
