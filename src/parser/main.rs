use crate::error::FlightStatError;
use crate::parser::fix::{parse_b_record, RawFix};
use crate::parser::header::parse_headers_from_text;
use crate::types::{Fix, Flight};
use crate::Result;
use anyhow::Context;
use chrono::{Duration, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use log::debug;
use std::path::Path;

/// Parse IGC files in order and return their flights sorted by takeoff
///
/// The first file that fails to parse aborts the whole run.
pub fn parse_igc_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Flight>> {
    let mut flights = Vec::with_capacity(paths.len());
    for path in paths {
        flights.push(parse_igc_file(path.as_ref())?);
    }
    flights.sort_by_key(|f| f.takeoff.time);
    Ok(flights)
}

/// Parse a single IGC file
pub fn parse_igc_file(file_path: &Path) -> Result<Flight> {
    debug!("Parsing IGC file {}", file_path.display());

    let data = std::fs::read(file_path)
        .with_context(|| format!("Failed to read IGC file: {:?}", file_path))?;
    let filename = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    parse_igc_bytes(&data, filename)
        .with_context(|| format!("Failed to parse IGC file: {:?}", file_path))
}

/// Parse IGC data from memory
pub fn parse_igc_bytes(data: &[u8], filename: &str) -> Result<Flight> {
    let text = std::str::from_utf8(data).map_err(FlightStatError::from)?;
    parse_igc_str(text, filename)
}

/// Parse IGC text into a flight
///
/// The first B record is the takeoff and the last one the landing. Fix
/// times are UTC; they are shifted to the `HFTZN` offset when present.
pub fn parse_igc_str(text: &str, filename: &str) -> Result<Flight> {
    let header = parse_headers_from_text(text)?;
    let date = header
        .date
        .ok_or_else(|| FlightStatError::MissingDate(filename.to_string()))?;
    let offset = header.timezone.unwrap_or_else(|| Utc.fix());

    let mut fixes = Vec::new();
    for line in text.lines().filter(|l| l.starts_with('B')) {
        match parse_b_record(line) {
            Ok(fix) => fixes.push(fix),
            Err(e) => debug!("{}: skipping fix: {}", filename, e),
        }
    }

    let (first, last) = match (fixes.first(), fixes.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(FlightStatError::NoFixes(filename.to_string()).into()),
    };

    let takeoff = place_fix(first, date, offset);
    // a fix more than 12h earlier than its predecessor crossed midnight;
    // smaller backward steps are logger jitter
    let rollovers = fixes
        .windows(2)
        .filter(|pair| is_midnight_rollover(&pair[0], &pair[1]))
        .count() as i64;
    let landing_date = date + Duration::days(rollovers);
    let landing = place_fix(last, landing_date, offset);

    let mut flight = Flight::new(takeoff, landing);
    flight.glider = header.glider;
    flight.takeoff_site = header.site;
    flight.filename = filename.to_string();

    debug!(
        "{}: {} fixes, takeoff {}, {:.2} min, glider '{}'",
        filename,
        fixes.len(),
        flight.takeoff.time,
        flight.minutes(),
        flight.glider
    );

    Ok(flight)
}

fn is_midnight_rollover(previous: &RawFix, next: &RawFix) -> bool {
    previous.time.signed_duration_since(next.time) > Duration::hours(12)
}

fn place_fix(fix: &RawFix, date: NaiveDate, offset: FixedOffset) -> Fix {
    let time = Utc
        .from_utc_datetime(&date.and_time(fix.time))
        .with_timezone(&offset);
    Fix::new(time, fix.latitude, fix.longitude, fix.altitude())
}
