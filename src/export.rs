//! Report export
//!
//! Renders the flight listing and the statistics to CSV, to a spreadsheet
//! [`SheetWriter`] (an Excel workbook with the `xlsx` feature) or to JSON. Reports are rendered completely in memory and
//! written to disk in one step, so a failed run never leaves a half written
//! report behind.

use crate::conversion::*;
use crate::error::FlightStatError;
use crate::sheet::{Cell, Sheet, SheetWriter};
use crate::stats::{FlightStat, StatOptions};
use crate::types::{Flight, ReportRow, RowKind};
use crate::Result;
use anyhow::Context;
use log::info;
use std::path::{Path, PathBuf};

/// Output format of the report file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Export options for controlling the report output
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Report file; defaults to `flightstat.<ext>` in the working directory
    pub output: Option<PathBuf>,
    pub stat: StatOptions,
}

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub output_path: PathBuf,
    pub flights: usize,
    pub rows: usize,
}

/// Path the report will be written to
pub fn compute_output_path(options: &ExportOptions) -> PathBuf {
    options
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("flightstat.{}", options.format.extension())))
}

/// Build the statistics, render the report and write it to disk
pub fn export_report(flights: &[Flight], options: &ExportOptions) -> Result<ExportReport> {
    let stat = FlightStat::build(flights, options.stat.clone());
    let output_path = compute_output_path(options);

    let content = match options.format {
        ExportFormat::Csv => render_csv_report(flights, &stat)?,
        ExportFormat::Json => render_json_report(&stat)?.into_bytes(),
        ExportFormat::Xlsx => render_xlsx_report(flights, &stat)?,
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {parent:?}"))?;
        }
    }
    write_report_file(&output_path, &content)?;

    let rows = stat.render().len();
    info!(
        "Exported {} flights ({} statistic rows) to {}",
        flights.len(),
        rows,
        output_path.display()
    );

    Ok(ExportReport {
        output_path,
        flights: flights.len(),
        rows,
    })
}

fn write_report_file(path: &Path, content: &[u8]) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write report: {path:?}"))
}

#[cfg(feature = "csv")]
fn render_csv_report(flights: &[Flight], stat: &FlightStat) -> Result<Vec<u8>> {
    render_csv(flights, stat)
}

#[cfg(not(feature = "csv"))]
fn render_csv_report(_flights: &[Flight], _stat: &FlightStat) -> Result<Vec<u8>> {
    Err(FlightStatError::Export("CSV support not compiled in (enable the `csv` feature)".into()).into())
}

#[cfg(feature = "json")]
fn render_json_report(stat: &FlightStat) -> Result<String> {
    render_json(stat)
}

#[cfg(not(feature = "json"))]
fn render_json_report(_stat: &FlightStat) -> Result<String> {
    Err(FlightStatError::Export("JSON support not compiled in (enable the `json` feature)".into()).into())
}

#[cfg(feature = "xlsx")]
fn render_xlsx_report(flights: &[Flight], stat: &FlightStat) -> Result<Vec<u8>> {
    render_xlsx(flights, stat)
}

#[cfg(not(feature = "xlsx"))]
fn render_xlsx_report(_flights: &[Flight], _stat: &FlightStat) -> Result<Vec<u8>> {
    Err(FlightStatError::Export("Excel support not compiled in (enable the `xlsx` feature)".into()).into())
}

/// Worksheet name used for spreadsheet reports
pub const SHEET_NAME: &str = "Flight Statistics";

/// Flight listing column titles
pub const FLIGHT_COLUMNS: [&str; 10] = [
    "Date",
    "Takeoff",
    "Takeoff Site",
    "Takeoff Coord",
    "Landing",
    "Landing Site",
    "Landing Coord",
    "Airtime",
    "Glider",
    "Filename",
];

/// Statistics column titles
pub const STAT_COLUMNS: [&str; 3] = ["Period", "Flights", "Airtime"];

/// Glider section column titles
pub const GLIDER_COLUMNS: [&str; 3] = ["Glider", "Flights", "Airtime"];

/// Render the flight listing followed by the statistics as CSV
#[cfg(feature = "csv")]
pub fn render_csv(flights: &[Flight], stat: &FlightStat) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    write_flights_csv(flights, &mut writer)?;
    write_stats_csv(stat, &mut writer)?;
    writer
        .into_inner()
        .map_err(|e| FlightStatError::Export(format!("failed to flush CSV: {}", e.error())).into())
}

/// Write one CSV row per flight
#[cfg(feature = "csv")]
pub fn write_flights_csv<W: std::io::Write>(
    flights: &[Flight],
    writer: &mut csv::Writer<W>,
) -> Result<()> {
    writer.write_record(FLIGHT_COLUMNS)?;
    for flight in flights {
        writer.write_record([
            format_date(flight.date),
            format_time(&flight.takeoff.time),
            flight.takeoff_site.clone(),
            flight.takeoff.coord(),
            format_time(&flight.landing.time),
            flight.landing_site.clone(),
            flight.landing.coord(),
            format_minutes(flight.duration),
            flight.glider.clone(),
            flight.filename.clone(),
        ])?;
    }
    Ok(())
}

/// Write the statistics rows as CSV
#[cfg(feature = "csv")]
pub fn write_stats_csv<W: std::io::Write>(
    stat: &FlightStat,
    writer: &mut csv::Writer<W>,
) -> Result<()> {
    writer.write_record(STAT_COLUMNS)?;
    for row in stat.render() {
        if row.kind == RowKind::GliderHeader {
            writer.write_record(GLIDER_COLUMNS)?;
            continue;
        }
        writer.write_record([
            row.label.clone(),
            row.flights.to_string(),
            format_minutes(row.airtime),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the flight listing and the statistics into an in-memory sheet
pub fn render_sheet(flights: &[Flight], stat: &FlightStat, name: &str) -> Result<Sheet> {
    let mut sheet = Sheet::new(name);
    write_report_sheet(flights, stat, &mut sheet)?;
    Ok(sheet)
}

/// Write the flight listing, an empty row and the statistics
pub fn write_report_sheet<S: SheetWriter + ?Sized>(
    flights: &[Flight],
    stat: &FlightStat,
    sheet: &mut S,
) -> Result<()> {
    write_flights_sheet(flights, sheet)?;
    sheet.write_empty_row()?;
    write_stats_sheet(stat, sheet)
}

/// Render the report into an encoded Excel workbook
#[cfg(feature = "xlsx")]
pub fn render_xlsx(flights: &[Flight], stat: &FlightStat) -> Result<Vec<u8>> {
    let mut sheet = crate::xlsx::XlsxSheet::new(SHEET_NAME)?;
    write_report_sheet(flights, stat, &mut sheet)?;
    sheet.into_bytes()
}

/// Write the flight listing with its grouped two-line header
pub fn write_flights_sheet<S: SheetWriter + ?Sized>(flights: &[Flight], sheet: &mut S) -> Result<()> {
    sheet.write_row(vec![Cell::text("Flights").merged(9)])?;
    sheet.write_row(vec![
        Cell::text("Date"),
        Cell::text("Takeoff").merged(2),
        Cell::empty(),
        Cell::empty(),
        Cell::text("Landing").merged(2),
        Cell::empty(),
        Cell::empty(),
        Cell::text("Airtime"),
        Cell::text("Glider"),
        Cell::text("Filename"),
    ])?;
    sheet.write_row(vec![
        Cell::empty(),
        Cell::text("Time"),
        Cell::text("Site"),
        Cell::text("Coord"),
        Cell::text("Time"),
        Cell::text("Site"),
        Cell::text("Coord"),
    ])?;

    for flight in flights {
        let label = match &flight.comment {
            Some(comment) if !comment.is_empty() => comment.clone(),
            _ => flight.filename.clone(),
        };
        sheet.write_row(vec![
            Cell::date(flight.date, DATE_FORMAT),
            Cell::date_time(flight.takeoff.time.naive_local(), TIME_FORMAT),
            Cell::text(flight.takeoff_site.clone()),
            Cell::text(flight.takeoff.coord()),
            Cell::date_time(flight.landing.time.naive_local(), TIME_FORMAT),
            Cell::text(flight.landing_site.clone()),
            Cell::text(flight.landing.coord()),
            Cell::float(flight.minutes(), AIRTIME_FORMAT),
            Cell::text(flight.glider.clone()),
            Cell::text(label),
        ])?;
    }
    Ok(())
}

/// Write the statistics rows
///
/// Day rows carry a real date cell; totals and gliders a text label.
pub fn write_stats_sheet<S: SheetWriter + ?Sized>(stat: &FlightStat, sheet: &mut S) -> Result<()> {
    sheet.write_row(vec![Cell::text("Statistics").merged(2)])?;
    sheet.write_row(STAT_COLUMNS.iter().map(|c| Cell::text(*c)).collect())?;

    for row in stat.render() {
        match row.kind {
            RowKind::GliderHeader => {
                sheet.write_empty_row()?;
                sheet.write_row(GLIDER_COLUMNS.iter().map(|c| Cell::text(*c)).collect())?;
            }
            RowKind::Day(date) => sheet.write_row(stat_cells(Cell::date(date, DATE_FORMAT), &row))?,
            _ => sheet.write_row(stat_cells(Cell::text(row.label.clone()), &row))?,
        }
    }
    Ok(())
}

fn stat_cells(first: Cell, row: &ReportRow) -> Vec<Cell> {
    vec![
        first,
        Cell::int(row.flights as i64),
        Cell::float(row.airtime_minutes(), AIRTIME_FORMAT),
    ]
}

/// Serialize the report rows as pretty-printed JSON
#[cfg(feature = "json")]
pub fn render_json(stat: &FlightStat) -> Result<String> {
    let rows = stat.render();
    serde_json::to_string_pretty(&rows).context("Failed to serialize report rows")
}
