use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position fix taken from a B record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fix {
    pub time: DateTime<FixedOffset>,
    /// Decimal degrees, negative south of the equator
    pub latitude: f64,
    /// Decimal degrees, negative west of Greenwich
    pub longitude: f64,
    /// Pressure altitude in meters
    pub altitude: i32,
}

impl Fix {
    pub fn new(time: DateTime<FixedOffset>, latitude: f64, longitude: f64, altitude: i32) -> Self {
        Self {
            time,
            latitude,
            longitude,
            altitude,
        }
    }

    /// Coordinate as printed in the flight listing
    pub fn coord(&self) -> String {
        crate::conversion::format_coord(self.latitude, self.longitude)
    }
}

/// One flight as produced by the IGC reader
///
/// Only `takeoff.time`, `duration` and `glider` feed the statistics; the
/// remaining fields are carried through to the flight listing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Flight {
    pub date: NaiveDate,
    pub takeoff: Fix,
    pub landing: Fix,
    #[cfg_attr(feature = "serde", serde(with = "crate::types::serde_duration"))]
    pub duration: Duration,
    pub glider: String,
    pub takeoff_site: String,
    pub landing_site: String,
    pub filename: String,
    pub comment: Option<String>,
}

impl Flight {
    /// Build a flight from its takeoff and landing fixes
    pub fn new(takeoff: Fix, landing: Fix) -> Self {
        let duration = landing.time.signed_duration_since(takeoff.time);
        Self {
            date: takeoff.time.date_naive(),
            takeoff,
            landing,
            duration,
            glider: String::new(),
            takeoff_site: String::new(),
            landing_site: String::new(),
            filename: String::new(),
            comment: None,
        }
    }

    /// Minimal flight carrying only what the statistics need
    pub fn at(takeoff: DateTime<FixedOffset>, duration: Duration) -> Self {
        let takeoff = Fix::new(takeoff, 0.0, 0.0, 0);
        let landing = Fix {
            time: takeoff.time + duration,
            ..takeoff.clone()
        };
        let mut flight = Self::new(takeoff, landing);
        flight.duration = duration;
        flight
    }

    pub fn with_glider(mut self, glider: impl Into<String>) -> Self {
        self.glider = glider.into();
        self
    }

    /// Calendar date of the takeoff in the takeoff's own offset
    pub fn takeoff_date(&self) -> NaiveDate {
        self.takeoff.time.date_naive()
    }

    /// Airtime in minutes
    pub fn minutes(&self) -> f64 {
        crate::conversion::duration_minutes(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_flight_duration_from_fixes() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let takeoff = Fix::new(
            utc.with_ymd_and_hms(2016, 10, 1, 11, 0, 0).unwrap(),
            46.7,
            7.6,
            1800,
        );
        let landing = Fix::new(
            utc.with_ymd_and_hms(2016, 10, 1, 11, 42, 30).unwrap(),
            46.68,
            7.86,
            570,
        );
        let flight = Flight::new(takeoff, landing);
        assert_eq!(flight.duration, Duration::seconds(42 * 60 + 30));
        assert_eq!(flight.date, NaiveDate::from_ymd_opt(2016, 10, 1).unwrap());
        assert!((flight.minutes() - 42.5).abs() < 1e-9);
        assert!(flight.glider.is_empty());
    }

    #[test]
    fn test_takeoff_date_uses_own_offset() {
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let flight = Flight::at(
            cest.with_ymd_and_hms(2016, 10, 1, 0, 30, 0).unwrap(),
            Duration::minutes(10),
        );
        // 22:30 UTC the day before, but the flight belongs to October 1st locally
        assert_eq!(flight.takeoff_date(), NaiveDate::from_ymd_opt(2016, 10, 1).unwrap());
    }
}
