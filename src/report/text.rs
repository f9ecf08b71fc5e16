use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::model::{AttendanceRecord, LocationFix, ReportOptions, ReportSummary};

const BANNER: &str = "==============================================";

pub(crate) fn render(
    rows: &[&AttendanceRecord],
    summary: &ReportSummary,
    options: &ReportOptions,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    out.push_str(BANNER);
    out.push('\n');
    out.push_str("              ATTENDANCE REPORT\n");
    out.push_str(BANNER);
    out.push('\n');
    let _ = writeln!(
        out,
        "Period: {} to {}",
        options.date_range.start, options.date_range.end
    );
    let _ = writeln!(
        out,
        "Generated: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out.push('\n');

    out.push_str("Summary\n-------\n");
    let _ = writeln!(out, "Total Records: {}", summary.total_records);
    let _ = writeln!(out, "Present: {}", summary.present_count);
    let _ = writeln!(out, "Absent: {}", summary.absent_count);
    let _ = writeln!(out, "Late: {}", summary.late_count);
    let _ = writeln!(out, "Half Day: {}", summary.half_day_count);
    let _ = writeln!(out, "On Leave: {}", summary.on_leave_count);
    let _ = writeln!(out, "Average Working Hours: {:.2}", summary.avg_working_hours);
    let _ = writeln!(out, "Total Overtime Hours: {:.2}", summary.total_overtime);
    let _ = writeln!(
        out,
        "Location Tracked: {}",
        summary.location_tracked_count
    );
    out.push('\n');

    out.push_str("Records\n-------\n");
    for (index, record) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} [{}]",
            index + 1,
            record.employee.name,
            record.employee.employee_id
        );
        let _ = writeln!(
            out,
            "   Date: {}  Status: {}",
            record.date, record.status
        );
        let _ = writeln!(
            out,
            "   Check-in: {}  Check-out: {}",
            record
                .check_in
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            record
                .check_out
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        );
        let _ = writeln!(
            out,
            "   Working Hours: {:.2}  Overtime: {:.2}",
            record.working_hours, record.overtime
        );
        if options.include_location {
            if let Some(fix) = &record.check_in_location {
                let _ = writeln!(out, "   Check-in Location: {}", describe_fix(fix));
            }
            if let Some(fix) = &record.check_out_location {
                let _ = writeln!(out, "   Check-out Location: {}", describe_fix(fix));
            }
        }
    }

    out
}

fn describe_fix(fix: &LocationFix) -> String {
    match &fix.address {
        Some(address) => format!(
            "{} ({:.6}, {:.6})",
            address, fix.latitude, fix.longitude
        ),
        None => format!("{:.6}, {:.6}", fix.latitude, fix.longitude),
    }
}
