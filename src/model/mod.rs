pub mod attendance;
pub mod location;
pub mod report;

pub use attendance::{AttendanceRecord, AttendanceStatus, EmployeeIdentity};
pub use location::{GeolocationRequestOptions, LocationFix};
pub use report::{
    DateRange, ReportArtifact, ReportFilters, ReportFormat, ReportOptions, ReportSummary,
};
