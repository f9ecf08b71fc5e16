use chrono::NaiveDateTime;

use crate::geo;
use crate::model::{AttendanceRecord, LocationFix, ReportOptions};

pub(crate) const BASE_COLUMNS: [&str; 9] = [
    "Date",
    "Employee Name",
    "Employee ID",
    "Department",
    "Status",
    "Check-in Time",
    "Check-out Time",
    "Working Hours",
    "Overtime Hours",
];

pub(crate) const LOCATION_COLUMNS: [&str; 5] = [
    "Check-in Location",
    "Check-in Coordinates",
    "Check-out Location",
    "Check-out Coordinates",
    "Location Accuracy",
];

pub(crate) const DISTANCE_COLUMN: &str = "Distance Traveled";

const NOT_AVAILABLE: &str = "N/A";

pub(crate) fn render(rows: &[&AttendanceRecord], options: &ReportOptions) -> String {
    let mut columns: Vec<&str> = BASE_COLUMNS.to_vec();
    if options.include_location {
        columns.extend(LOCATION_COLUMNS);
    }
    if options.include_distance {
        columns.push(DISTANCE_COLUMN);
    }

    let mut out = String::new();
    out.push_str(&columns.join(","));
    out.push('\n');

    for record in rows {
        let mut fields: Vec<String> = vec![
            record.date.format("%Y-%m-%d").to_string(),
            quote(&record.employee.name),
            record.employee.employee_id.to_string(),
            quote(&record.employee.department),
            record.status.to_string(),
            time_field(record.check_in),
            time_field(record.check_out),
            format!("{:.2}", record.working_hours),
            format!("{:.2}", record.overtime),
        ];

        if options.include_location {
            fields.push(address_field(record.check_in_location.as_ref()));
            fields.push(coordinates_field(record.check_in_location.as_ref()));
            fields.push(address_field(record.check_out_location.as_ref()));
            fields.push(coordinates_field(record.check_out_location.as_ref()));
            fields.push(accuracy_field(record));
        }
        if options.include_distance {
            fields.push(distance_field(record));
        }

        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Free-text fields are double-quoted; embedded quotes are doubled.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn time_field(timestamp: Option<NaiveDateTime>) -> String {
    match timestamp {
        Some(t) => t.format("%H:%M:%S").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn address_field(fix: Option<&LocationFix>) -> String {
    match fix.and_then(|f| f.address.as_deref()) {
        Some(address) => quote(address),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn coordinates_field(fix: Option<&LocationFix>) -> String {
    match fix {
        Some(f) => quote(&format!("{:.6}, {:.6}", f.latitude, f.longitude)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Check-in accuracy when present, otherwise check-out.
fn accuracy_field(record: &AttendanceRecord) -> String {
    let accuracy = record
        .check_in_location
        .as_ref()
        .and_then(|f| f.accuracy_meters)
        .or_else(|| {
            record
                .check_out_location
                .as_ref()
                .and_then(|f| f.accuracy_meters)
        });
    match accuracy {
        Some(meters) => format!("{meters:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn distance_field(record: &AttendanceRecord) -> String {
    match (&record.check_in_location, &record.check_out_location) {
        (Some(start), Some(end)) => {
            let meters =
                geo::distance_meters(start.latitude, start.longitude, end.latitude, end.longitude);
            format!("{:.2} km", meters / 1000.0)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}
