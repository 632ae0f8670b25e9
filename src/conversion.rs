//! Formatting and unit conversion utilities
//!
//! Contains the conversions shared by the report renderers: airtime to
//! minutes, the date and label formats used in report rows, and the
//! coordinate notation of the flight listing.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};

/// Spreadsheet number format for airtime cells
pub const AIRTIME_FORMAT: &str = "0.00";
/// Spreadsheet number format for date cells
pub const DATE_FORMAT: &str = "dd.mm.yyyy";
/// Spreadsheet number format for time-of-day cells
pub const TIME_FORMAT: &str = "hh:mm";

/// Convert a duration to fractional minutes
pub fn duration_minutes(duration: Duration) -> f64 {
    // whole seconds plus the sub-second part, so negative spans stay exact
    let seconds = duration.num_seconds() as f64;
    let nanos = (duration - Duration::seconds(duration.num_seconds()))
        .num_nanoseconds()
        .unwrap_or(0) as f64;
    (seconds + nanos / 1_000_000_000.0) / 60.0
}

/// Airtime as printed in text output (minutes, two decimals)
pub fn format_minutes(duration: Duration) -> String {
    format!("{:.2}", duration_minutes(duration))
}

/// Short numeric date used for day rows, e.g. `01.10.2016`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Time of day in `HH:MM`, in the offset the time was recorded with
pub fn format_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%H:%M").to_string()
}

/// English month name, `None` outside 1..=12
pub fn month_name(month: u32) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// Label of a month total row, e.g. `Total October 2016`
pub fn format_month_label(date: NaiveDate) -> String {
    format!(
        "Total {} {}",
        month_name(date.month()).unwrap_or_default(),
        date.year()
    )
}

/// Label of a year total row, e.g. `Total 2016`
pub fn format_year_label(year: i32) -> String {
    format!("Total {year}")
}

/// Format a coordinate pair in degrees and decimal minutes
///
/// `46.7587, 7.6272` becomes `46°45.522'N 007°37.632'E`.
pub fn format_coord(latitude: f64, longitude: f64) -> String {
    let (lat_deg, lat_min) = split_degrees(latitude);
    let (lon_deg, lon_min) = split_degrees(longitude);
    format!(
        "{:02}°{:06.3}'{} {:03}°{:06.3}'{}",
        lat_deg,
        lat_min,
        if latitude < 0.0 { 'S' } else { 'N' },
        lon_deg,
        lon_min,
        if longitude < 0.0 { 'W' } else { 'E' },
    )
}

fn split_degrees(value: f64) -> (u32, f64) {
    let abs = value.abs();
    let mut degrees = abs.trunc() as u32;
    let mut minutes = ((abs - abs.trunc()) * 60.0 * 1000.0).round() / 1000.0;
    if minutes >= 60.0 {
        degrees += 1;
        minutes -= 60.0;
    }
    (degrees, minutes)
}

/// Convert an IGC `DDMMmmm` / `DDDMMmmm` angle to decimal degrees
pub fn convert_igc_angle(degrees: u32, milli_minutes: u32, negative: bool) -> f64 {
    let value = degrees as f64 + milli_minutes as f64 / 60_000.0;
    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_duration_minutes() {
        assert_eq!(duration_minutes(Duration::minutes(81)), 81.0);
        assert_eq!(duration_minutes(Duration::seconds(90)), 1.5);
        assert_eq!(duration_minutes(Duration::zero()), 0.0);
        assert_eq!(duration_minutes(Duration::seconds(-90)), -1.5);
        assert!((duration_minutes(Duration::milliseconds(1500)) - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(Duration::minutes(11)), "11.00");
        assert_eq!(format_minutes(Duration::seconds(61)), "1.02");
    }

    #[test]
    fn test_date_and_labels() {
        let date = NaiveDate::from_ymd_opt(2016, 10, 1).unwrap();
        assert_eq!(format_date(date), "01.10.2016");
        assert_eq!(format_month_label(date), "Total October 2016");
        assert_eq!(format_year_label(2016), "Total 2016");
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_format_time_keeps_offset() {
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let time = cest.with_ymd_and_hms(2016, 10, 1, 13, 5, 0).unwrap();
        assert_eq!(format_time(&time), "13:05");
        assert_eq!(format_time(&time.with_timezone(&Utc)), "11:05");
    }

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(46.7587, 7.6272), "46°45.522'N 007°37.632'E");
        assert_eq!(format_coord(-33.5, -70.25), "33°30.000'S 070°15.000'W");
    }

    #[test]
    fn test_convert_igc_angle() {
        // 4645522N -> 46° 45.522'
        assert!((convert_igc_angle(46, 45_522, false) - 46.7587).abs() < 1e-9);
        assert!((convert_igc_angle(7, 37_632, true) + 7.6272).abs() < 1e-9);
    }
}
