pub mod config;
pub mod error;
pub mod geo;
pub mod model;
pub mod position;
pub mod report;
pub mod session;

pub use config::Config;
pub use error::{GeolocationError, ReportError};
pub use model::{
    AttendanceRecord, AttendanceStatus, DateRange, EmployeeIdentity, GeolocationRequestOptions,
    LocationFix, ReportArtifact, ReportFilters, ReportFormat, ReportOptions, ReportSummary,
};
pub use position::PositionService;
pub use report::AttendanceReportEngine;
pub use session::{AttendanceSession, SessionState};
