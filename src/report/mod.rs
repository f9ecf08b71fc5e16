mod csv;
mod summary;
mod text;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::model::{AttendanceRecord, ReportArtifact, ReportFormat, ReportOptions, ReportSummary};

/// Turns an immutable batch of attendance records into summary statistics
/// and a rendered export artifact. Pure given its inputs: repeated calls
/// over the same records and options produce byte-identical output (the
/// text formats take the generation timestamp as an explicit input via
/// `render_at` / `render_text_at`).
#[derive(Debug, Default)]
pub struct AttendanceReportEngine;

impl AttendanceReportEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, records: &[AttendanceRecord]) -> ReportSummary {
        let rows: Vec<&AttendanceRecord> = records.iter().collect();
        summary::summarize_rows(&rows)
    }

    /// Date range (inclusive) first, then the optional department, status
    /// and employee filters. Department matching is case-insensitive.
    pub fn filter_records<'a>(
        &self,
        records: &'a [AttendanceRecord],
        options: &ReportOptions,
    ) -> Vec<&'a AttendanceRecord> {
        records
            .iter()
            .filter(|r| options.date_range.contains(r.date))
            .filter(|r| {
                let Some(filters) = &options.filters else {
                    return true;
                };
                if let Some(department) = &filters.department {
                    if !r.employee.department.eq_ignore_ascii_case(department) {
                        return false;
                    }
                }
                if let Some(status) = filters.status {
                    if r.status != status {
                        return false;
                    }
                }
                if let Some(employee_id) = filters.employee_id {
                    if r.employee.employee_id != employee_id {
                        return false;
                    }
                }
                true
            })
            .collect()
    }

    pub fn render_csv(&self, records: &[AttendanceRecord], options: &ReportOptions) -> String {
        let rows = self.filter_records(records, options);
        csv::render(&rows, options)
    }

    pub fn render_text(&self, records: &[AttendanceRecord], options: &ReportOptions) -> String {
        self.render_text_at(records, options, Utc::now())
    }

    pub fn render_text_at(
        &self,
        records: &[AttendanceRecord],
        options: &ReportOptions,
        generated_at: DateTime<Utc>,
    ) -> String {
        let rows = self.filter_records(records, options);
        let summary = summary::summarize_rows(&rows);
        text::render(&rows, &summary, options, generated_at)
    }

    /// Renders the export artifact for `options.format`.
    ///
    /// Known limitation carried over from the system this replaces: the
    /// excel artifact is CSV bytes under an .xlsx name and the pdf artifact
    /// is the plain-text report under a .pdf name. Neither is a genuine
    /// binary encoding; do not silently "fix" this without changing callers.
    pub fn render(&self, records: &[AttendanceRecord], options: &ReportOptions) -> ReportArtifact {
        self.render_at(records, options, Utc::now())
    }

    pub fn render_at(
        &self,
        records: &[AttendanceRecord],
        options: &ReportOptions,
        generated_at: DateTime<Utc>,
    ) -> ReportArtifact {
        let bytes = match options.format {
            ReportFormat::Csv | ReportFormat::Excel => {
                self.render_csv(records, options).into_bytes()
            }
            ReportFormat::Pdf | ReportFormat::Text => self
                .render_text_at(records, options, generated_at)
                .into_bytes(),
        };

        debug!(
            format = %options.format,
            bytes = bytes.len(),
            "Rendered report artifact"
        );

        ReportArtifact {
            bytes,
            filename: self.suggested_filename(options),
            media_type: options.format.media_type(),
        }
    }

    /// `attendance_report_{start}_{end}.{ext}`.
    pub fn suggested_filename(&self, options: &ReportOptions) -> String {
        format!(
            "attendance_report_{}_{}.{}",
            options.date_range.start.format("%Y-%m-%d"),
            options.date_range.end.format("%Y-%m-%d"),
            options.format.extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::geo;
    use crate::model::{
        AttendanceStatus, DateRange, EmployeeIdentity, LocationFix, ReportFilters,
    };

    fn employee(id: u64, name: &str, department: &str) -> EmployeeIdentity {
        EmployeeIdentity {
            employee_id: id,
            name: name.to_string(),
            department: department.to_string(),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    fn record(day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            date: date(day),
            employee: employee(1001, "Jane Roe", "Engineering"),
            status,
            check_in: date(day).and_hms_opt(9, 0, 0),
            check_out: date(day).and_hms_opt(18, 0, 0),
            working_hours: 8.0,
            overtime: 0.0,
            check_in_location: None,
            check_out_location: None,
        }
    }

    fn tracked_record() -> AttendanceRecord {
        let mut r = record(15, AttendanceStatus::Present);
        r.working_hours = 8.5;
        r.overtime = 0.5;
        r.check_in_location = Some(
            LocationFix::new(12.9, 77.6).with_address("12 MG Road, Bengaluru"),
        );
        r.check_out_location = Some(LocationFix::new(12.91, 77.61));
        r
    }

    fn options(format: ReportFormat) -> ReportOptions {
        ReportOptions {
            include_location: false,
            include_distance: false,
            format,
            date_range: DateRange {
                start: date(1),
                end: date(31),
            },
            filters: None,
        }
    }

    fn engine() -> AttendanceReportEngine {
        AttendanceReportEngine::new()
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = engine().summarize(&[]);
        assert_eq!(summary, ReportSummary::default());
        assert_eq!(summary.avg_working_hours, 0.0);
    }

    #[test]
    fn status_buckets_partition_the_records() {
        let records = vec![
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::Present),
            record(3, AttendanceStatus::Absent),
            record(4, AttendanceStatus::Late),
            record(5, AttendanceStatus::HalfDay),
            record(6, AttendanceStatus::OnLeave),
        ];
        let summary = engine().summarize(&records);
        assert_eq!(summary.total_records, 6);
        assert_eq!(
            summary.present_count
                + summary.absent_count
                + summary.late_count
                + summary.half_day_count
                + summary.on_leave_count,
            summary.total_records
        );
        assert_eq!(summary.present_count, 2);
        assert_eq!(summary.on_leave_count, 1);
    }

    #[test]
    fn single_present_record_scenario() {
        let records = vec![tracked_record()];
        let summary = engine().summarize(&records);
        assert_eq!(summary.total_records, 1);
        assert_eq!(summary.present_count, 1);
        assert_eq!(summary.avg_working_hours, 8.5);
        assert_eq!(summary.total_overtime, 0.5);
        assert_eq!(summary.location_tracked_count, 1);
    }

    #[test]
    fn one_sided_location_still_counts_as_tracked() {
        let mut r = record(10, AttendanceStatus::Late);
        r.check_out_location = Some(LocationFix::new(12.9, 77.6));
        let summary = engine().summarize(&[r]);
        assert_eq!(summary.location_tracked_count, 1);
    }

    #[test]
    fn csv_header_column_counts() {
        let e = engine();
        let records = vec![tracked_record()];

        let base = e.render_csv(&records, &options(ReportFormat::Csv));
        assert_eq!(base.lines().next().unwrap().split(',').count(), 9);

        let mut with_location = options(ReportFormat::Csv);
        with_location.include_location = true;
        let out = e.render_csv(&records, &with_location);
        // Quoted coordinate pairs contain commas, so count the header only.
        assert_eq!(out.lines().next().unwrap().split(',').count(), 14);

        let mut with_both = with_location.clone();
        with_both.include_distance = true;
        let out = e.render_csv(&records, &with_both);
        assert_eq!(out.lines().next().unwrap().split(',').count(), 15);

        let mut distance_only = options(ReportFormat::Csv);
        distance_only.include_distance = true;
        let out = e.render_csv(&records, &distance_only);
        assert_eq!(out.lines().next().unwrap().split(',').count(), 10);
    }

    #[test]
    fn csv_distance_column_matches_geo_math() {
        let mut opts = options(ReportFormat::Csv);
        opts.include_distance = true;
        let out = engine().render_csv(&[tracked_record()], &opts);
        let row = out.lines().nth(1).unwrap();

        let expected = format!(
            "{:.2} km",
            geo::distance_meters(12.9, 77.6, 12.91, 77.61) / 1000.0
        );
        assert!(row.ends_with(&expected), "row: {row}");
        assert!(!row.ends_with("N/A"));
    }

    #[test]
    fn csv_missing_location_renders_not_available() {
        let mut opts = options(ReportFormat::Csv);
        opts.include_location = true;
        opts.include_distance = true;
        let out = engine().render_csv(&[record(1, AttendanceStatus::Present)], &opts);
        let row = out.lines().nth(1).unwrap();
        assert!(row.ends_with("N/A,N/A,N/A,N/A,N/A,N/A"), "row: {row}");
    }

    #[test]
    fn csv_quotes_free_text_fields() {
        let mut r = tracked_record();
        r.employee.name = "Roe, Jane \"JR\"".to_string();
        let out = engine().render_csv(&[r], &options(ReportFormat::Csv));
        assert!(out.contains("\"Roe, Jane \"\"JR\"\"\""));
        assert!(out.contains("\"Engineering\""));
    }

    #[test]
    fn filters_apply_range_department_status_and_id() {
        let e = engine();
        let mut other_department = record(10, AttendanceStatus::Present);
        other_department.employee = employee(2002, "Sam Poe", "Sales");
        let out_of_range = record(1, AttendanceStatus::Present);
        let records = vec![
            tracked_record(),
            other_department,
            record(20, AttendanceStatus::Absent),
            out_of_range,
        ];

        let mut opts = options(ReportFormat::Csv);
        opts.date_range = DateRange {
            start: date(5),
            end: date(25),
        };
        opts.filters = Some(ReportFilters {
            department: Some("engineering".to_string()),
            status: None,
            employee_id: None,
        });
        let rows = e.filter_records(&records, &opts);
        assert_eq!(rows.len(), 2);

        opts.filters = Some(ReportFilters {
            department: None,
            status: Some(AttendanceStatus::Absent),
            employee_id: None,
        });
        assert_eq!(e.filter_records(&records, &opts).len(), 1);

        opts.filters = Some(ReportFilters {
            department: None,
            status: None,
            employee_id: Some(2002),
        });
        assert_eq!(e.filter_records(&records, &opts).len(), 1);
    }

    #[test]
    fn render_is_idempotent() {
        let e = engine();
        let records = vec![tracked_record(), record(2, AttendanceStatus::Late)];
        let generated_at = Utc.with_ymd_and_hms(2026, 8, 31, 10, 0, 0).unwrap();

        for format in [
            ReportFormat::Csv,
            ReportFormat::Excel,
            ReportFormat::Pdf,
            ReportFormat::Text,
        ] {
            let mut opts = options(format);
            opts.include_location = true;
            opts.include_distance = true;
            let first = e.render_at(&records, &opts, generated_at);
            let second = e.render_at(&records, &opts, generated_at);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn excel_artifact_is_csv_bytes_under_xlsx_name() {
        let e = engine();
        let records = vec![tracked_record()];
        let csv_artifact = e.render(&records, &options(ReportFormat::Csv));
        let excel_artifact = e.render(&records, &options(ReportFormat::Excel));

        assert_eq!(csv_artifact.bytes, excel_artifact.bytes);
        assert_eq!(csv_artifact.media_type, "text/csv");
        assert_eq!(excel_artifact.media_type, "application/vnd.ms-excel");
        assert!(excel_artifact.filename.ends_with(".xlsx"));
    }

    #[test]
    fn pdf_artifact_is_the_text_report() {
        let e = engine();
        let records = vec![tracked_record()];
        let generated_at = Utc.with_ymd_and_hms(2026, 8, 31, 10, 0, 0).unwrap();

        let pdf = e.render_at(&records, &options(ReportFormat::Pdf), generated_at);
        let text = e.render_text_at(&records, &options(ReportFormat::Pdf), generated_at);
        assert_eq!(pdf.bytes, text.into_bytes());
        assert!(pdf.filename.ends_with(".pdf"));
    }

    #[test]
    fn text_report_carries_summary_and_items() {
        let mut opts = options(ReportFormat::Text);
        opts.include_location = true;
        let generated_at = Utc.with_ymd_and_hms(2026, 8, 31, 10, 0, 0).unwrap();
        let out = engine().render_text_at(&[tracked_record()], &opts, generated_at);

        assert!(out.contains("ATTENDANCE REPORT"));
        assert!(out.contains("Period: 2026-08-01 to 2026-08-31"));
        assert!(out.contains("Generated: 2026-08-31 10:00:00 UTC"));
        assert!(out.contains("Total Records: 1"));
        assert!(out.contains("Average Working Hours: 8.50"));
        assert!(out.contains("1. Jane Roe [1001]"));
        assert!(out.contains("Check-in Location: 12 MG Road, Bengaluru (12.900000, 77.600000)"));
    }

    #[test]
    fn suggested_filenames_map_extensions() {
        let e = engine();
        let expectations = [
            (ReportFormat::Csv, "attendance_report_2026-08-01_2026-08-31.csv"),
            (
                ReportFormat::Excel,
                "attendance_report_2026-08-01_2026-08-31.xlsx",
            ),
            (ReportFormat::Pdf, "attendance_report_2026-08-01_2026-08-31.pdf"),
            (
                ReportFormat::Text,
                "attendance_report_2026-08-01_2026-08-31.txt",
            ),
        ];
        for (format, expected) in expectations {
            assert_eq!(e.suggested_filename(&options(format)), expected);
        }
    }

    #[test]
    fn unknown_format_string_is_unsupported() {
        let err = ReportFormat::parse("docx").unwrap_err();
        assert_eq!(
            err,
            crate::error::ReportError::UnsupportedFormat("docx".to_string())
        );
        assert_eq!(ReportFormat::parse("CSV").unwrap(), ReportFormat::Csv);
    }
}
