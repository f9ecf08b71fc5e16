use std::env;
use std::fs;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use dotenvy::dotenv;
use tracing::info;
use tracing_appender::rolling;

use geoattend::config::Config;
use geoattend::model::{AttendanceRecord, DateRange, ReportFormat, ReportOptions};
use geoattend::position::{FixedPositionSensor, NominatimClient, PositionService};
use geoattend::report::AttendanceReportEngine;

const USAGE: &str = "usage: geoattend report <records.json> <format> <start> <end> [output]\n       geoattend locate";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "geoattend.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("report") => run_report(&args[2..]),
        Some("locate") => run_locate(&config).await,
        _ => bail!("{USAGE}"),
    }
}

fn run_report(args: &[String]) -> Result<()> {
    let [records_path, format, start, end, rest @ ..] = args else {
        bail!("{USAGE}");
    };

    let format = ReportFormat::parse(format)?;
    let start: NaiveDate = start.parse().context("invalid start date (YYYY-MM-DD)")?;
    let end: NaiveDate = end.parse().context("invalid end date (YYYY-MM-DD)")?;

    let data = fs::read_to_string(records_path)
        .with_context(|| format!("failed to read {records_path}"))?;
    let records: Vec<AttendanceRecord> =
        serde_json::from_str(&data).context("invalid attendance records file")?;

    let options = ReportOptions {
        include_location: true,
        include_distance: true,
        format,
        date_range: DateRange { start, end },
        filters: None,
    };

    let engine = AttendanceReportEngine::new();
    let artifact = engine.render(&records, &options);
    let output = rest
        .first()
        .cloned()
        .unwrap_or_else(|| artifact.filename.clone());
    fs::write(&output, &artifact.bytes)
        .with_context(|| format!("failed to write {output}"))?;

    info!(
        records = records.len(),
        output = %output,
        media_type = artifact.media_type,
        "Report written"
    );

    let rows = engine.filter_records(&records, &options);
    let summary = engine.summarize(&records);
    println!("Wrote {} ({} of {} records in range)", output, rows.len(), records.len());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn run_locate(config: &Config) -> Result<()> {
    let sensor = FixedPositionSensor::new(
        config.sensor_latitude,
        config.sensor_longitude,
        config.sensor_accuracy_m,
    );
    let geocoder = NominatimClient::from_config(config).context("geocoder setup failed")?;
    let service = PositionService::new(sensor, geocoder);

    let fix = service
        .acquire_fix_with_address(&config.geolocation_options())
        .await?;

    info!(latitude = fix.latitude, longitude = fix.longitude, "Fix acquired");
    println!("{}", serde_json::to_string_pretty(&fix)?);
    Ok(())
}
