use crate::error::FlightStatError;
use crate::types::IgcHeader;
use crate::Result;
use chrono::{FixedOffset, NaiveDate};
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

/// `H<source><TLC>[<long name>:]<value>`
fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^H([FOP])([A-Z]{3})([^:]*:)?(.*)$").expect("valid regex"))
}

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{2})(\d{2})(\d{2})").expect("valid regex"))
}

/// Parse IGC header records from text
///
/// Non-header lines are ignored, so the whole file can be passed in.
pub fn parse_headers_from_text(text: &str) -> Result<IgcHeader> {
    let mut header = IgcHeader::default();

    for line in text.lines() {
        let line = line.trim();
        if !line.starts_with('H') {
            continue;
        }

        let Some(caps) = header_regex().captures(line) else {
            debug!("Skipping unrecognised header: {}", line);
            continue;
        };
        let value = caps.get(4).map_or("", |m| m.as_str()).trim();

        match &caps[2] {
            "DTE" => header.date = Some(parse_header_date(value)?),
            "GTY" => header.glider = value.to_string(),
            "SIT" => header.site = value.to_string(),
            "TZN" => header.timezone = parse_timezone(value),
            _ => {}
        }
    }

    Ok(header)
}

/// Parse the `ddmmyy` date of an `HFDTE` record
///
/// Two digit years are taken as 20yy.
pub fn parse_header_date(value: &str) -> Result<NaiveDate> {
    let caps = date_regex().captures(value).ok_or_else(|| {
        FlightStatError::InvalidRecord(format!("malformed HFDTE value '{}'", value))
    })?;

    // all three groups are two ASCII digits
    let day: u32 = caps[1].parse()?;
    let month: u32 = caps[2].parse()?;
    let year: i32 = 2000 + caps[3].parse::<i32>()?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        FlightStatError::InvalidRecord(format!("invalid flight date '{}'", value)).into()
    })
}

/// Parse an `HFTZN` offset in hours, fractional offsets allowed
pub fn parse_timezone(value: &str) -> Option<FixedOffset> {
    let hours: f64 = value.trim_start_matches('+').parse().ok()?;
    FixedOffset::east_opt((hours * 3600.0).round() as i32)
}
