//! B record (position fix) parsing
//!
//! Layout: `B HHMMSS DDMMmmm N DDDMMmmm E V PPPPP GGGGG`, 35 characters
//! without the optional extensions declared in the I record.

use crate::conversion::convert_igc_angle;
use crate::error::FlightStatError;
use crate::Result;
use chrono::NaiveTime;

/// Minimum length of a B record
pub const B_RECORD_LEN: usize = 35;

/// A fix as stored in the file, before it is placed on a date
#[derive(Debug, Clone, PartialEq)]
pub struct RawFix {
    pub time: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
    pub valid: bool,
    pub pressure_altitude: i32,
    pub gps_altitude: i32,
}

impl RawFix {
    /// Pressure altitude, or the GPS altitude if the logger has no baro
    pub fn altitude(&self) -> i32 {
        if self.pressure_altitude != 0 {
            self.pressure_altitude
        } else {
            self.gps_altitude
        }
    }
}

/// Parse one B record line
pub fn parse_b_record(line: &str) -> Result<RawFix> {
    let line = line.trim_end();
    if !line.starts_with('B') || line.len() < B_RECORD_LEN || !line.is_ascii() {
        return Err(FlightStatError::InvalidRecord(format!("not a B record: '{}'", line)).into());
    }

    let time = NaiveTime::from_hms_opt(
        number(line, 1..3)?,
        number(line, 3..5)?,
        number(line, 5..7)?,
    )
    .ok_or_else(|| FlightStatError::InvalidRecord(format!("invalid fix time in '{}'", line)))?;

    let latitude = convert_igc_angle(
        number(line, 7..9)?,
        number(line, 9..14)?,
        hemisphere(line, 14, 'N', 'S')?,
    );
    let longitude = convert_igc_angle(
        number(line, 15..18)?,
        number(line, 18..23)?,
        hemisphere(line, 23, 'E', 'W')?,
    );

    Ok(RawFix {
        time,
        latitude,
        longitude,
        valid: &line[24..25] == "A",
        pressure_altitude: signed(line, 25..30)?,
        gps_altitude: signed(line, 30..35)?,
    })
}

fn number(line: &str, range: std::ops::Range<usize>) -> Result<u32> {
    line[range.clone()].parse().map_err(|_| {
        FlightStatError::InvalidRecord(format!(
            "expected digits at {}..{} in '{}'",
            range.start, range.end, line
        ))
        .into()
    })
}

fn signed(line: &str, range: std::ops::Range<usize>) -> Result<i32> {
    line[range.clone()].parse().map_err(|_| {
        FlightStatError::InvalidRecord(format!(
            "expected altitude at {}..{} in '{}'",
            range.start, range.end, line
        ))
        .into()
    })
}

fn hemisphere(line: &str, index: usize, positive: char, negative: char) -> Result<bool> {
    match line.as_bytes()[index] as char {
        c if c == positive => Ok(false),
        c if c == negative => Ok(true),
        c => Err(FlightStatError::InvalidRecord(format!(
            "invalid hemisphere '{}' in '{}'",
            c, line
        ))
        .into()),
    }
}
