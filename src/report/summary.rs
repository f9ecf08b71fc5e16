use crate::model::{AttendanceRecord, AttendanceStatus, ReportSummary};

/// Single linear pass. Each record lands in exactly one status bucket.
pub(crate) fn summarize_rows(rows: &[&AttendanceRecord]) -> ReportSummary {
    let mut summary = ReportSummary::default();
    let mut total_hours = 0.0;

    for record in rows {
        summary.total_records += 1;
        match record.status {
            AttendanceStatus::Present => summary.present_count += 1,
            AttendanceStatus::Absent => summary.absent_count += 1,
            AttendanceStatus::Late => summary.late_count += 1,
            AttendanceStatus::HalfDay => summary.half_day_count += 1,
            AttendanceStatus::OnLeave => summary.on_leave_count += 1,
        }
        total_hours += record.working_hours;
        summary.total_overtime += record.overtime;
        if record.location_tracked() {
            summary.location_tracked_count += 1;
        }
    }

    if summary.total_records > 0 {
        summary.avg_working_hours = total_hours / summary.total_records as f64;
    }

    summary
}
