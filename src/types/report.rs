use chrono::{Duration, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of a row within the statistics report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RowKind {
    Day(NaiveDate),
    MonthTotal { year: i32, month: u32 },
    YearTotal(i32),
    Total,
    GliderHeader,
    Glider,
}

/// One line of the flattened statistics
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReportRow {
    pub kind: RowKind,
    pub label: String,
    pub flights: usize,
    #[cfg_attr(feature = "serde", serde(with = "crate::types::serde_duration"))]
    pub airtime: Duration,
    /// Airtime in minutes, kept alongside `airtime` for serialized output
    pub minutes: f64,
}

impl ReportRow {
    pub fn new(kind: RowKind, label: impl Into<String>, flights: usize, airtime: Duration) -> Self {
        Self {
            kind,
            label: label.into(),
            flights,
            airtime,
            minutes: crate::conversion::duration_minutes(airtime),
        }
    }

    pub fn airtime_minutes(&self) -> f64 {
        self.minutes
    }

    /// `(label, flights, minutes)` view used by plain-text renderers
    pub fn as_tuple(&self) -> (&str, usize, f64) {
        (&self.label, self.flights, self.minutes)
    }
}
