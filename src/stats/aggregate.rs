//! The root statistics aggregate
//!
//! `FlightStat` routes every flight down the year → month → day hierarchy
//! and into the glider map, then flattens both into report rows.

use crate::conversion::{format_date, format_month_label, format_year_label};
use crate::stats::{GliderStat, YearStat};
use crate::types::{Flight, ReportRow, RowKind};
use chrono::{Datelike, Duration};
use log::debug;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling how flights are grouped and reported
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatOptions {
    /// Glider name used for flights without a glider type
    pub default_glider: String,
    /// Append the per-glider breakdown to the report
    pub include_gliders: bool,
}

impl Default for StatOptions {
    fn default() -> Self {
        Self {
            default_glider: "Unknown".to_string(),
            include_gliders: true,
        }
    }
}

impl StatOptions {
    pub fn with_default_glider(default_glider: impl Into<String>) -> Self {
        Self {
            default_glider: default_glider.into(),
            ..Self::default()
        }
    }
}

/// Flight statistics for a collection of flights
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightStat {
    flights: usize,
    #[cfg_attr(feature = "serde", serde(with = "crate::types::serde_duration"))]
    airtime: Duration,
    years: BTreeMap<i32, YearStat>,
    gliders: BTreeMap<String, GliderStat>,
    options: StatOptions,
}

impl Default for FlightStat {
    fn default() -> Self {
        Self::new(StatOptions::default())
    }
}

impl FlightStat {
    pub fn new(options: StatOptions) -> Self {
        Self {
            flights: 0,
            airtime: Duration::zero(),
            years: BTreeMap::new(),
            gliders: BTreeMap::new(),
            options,
        }
    }

    /// Build the statistics for a collection of flights
    pub fn build<'a, I>(flights: I, options: StatOptions) -> Self
    where
        I: IntoIterator<Item = &'a Flight>,
    {
        let mut stat = Self::new(options);
        for flight in flights {
            stat.add(flight);
        }
        debug!(
            "Built statistics: {} flights in {} year(s), {} glider(s)",
            stat.flights,
            stat.years.len(),
            stat.gliders.len()
        );
        stat
    }

    /// Add a flight to the statistics
    pub fn add(&mut self, flight: &Flight) {
        self.flights += 1;
        self.airtime = self.airtime + flight.duration;

        let glider = self.resolve_glider(&flight.glider).to_string();
        self.gliders
            .entry(glider)
            .or_insert_with_key(|name| GliderStat::new(name.clone()))
            .add(flight.duration);

        let date = flight.takeoff_date();
        self.years
            .entry(date.year())
            .or_insert_with(|| YearStat::new(date))
            .add(flight);
    }

    /// Fold another aggregate into this one
    ///
    /// The result equals building from both inputs at once. The default
    /// glider and options of `self` are kept.
    pub fn merge(&mut self, other: FlightStat) {
        self.flights += other.flights;
        self.airtime = self.airtime + other.airtime;
        for (year, stat) in other.years {
            match self.years.entry(year) {
                Entry::Occupied(mut entry) => entry.get_mut().merge(stat),
                Entry::Vacant(entry) => {
                    entry.insert(stat);
                }
            }
        }
        for (name, stat) in other.gliders {
            match self.gliders.entry(name) {
                Entry::Occupied(mut entry) => entry.get_mut().merge(stat),
                Entry::Vacant(entry) => {
                    entry.insert(stat);
                }
            }
        }
    }

    /// Glider name a flight is counted under
    pub fn resolve_glider<'a>(&'a self, glider: &'a str) -> &'a str {
        if glider.is_empty() {
            self.default_glider()
        } else {
            glider
        }
    }

    pub fn flights(&self) -> usize {
        self.flights
    }

    pub fn airtime(&self) -> Duration {
        self.airtime
    }

    pub fn default_glider(&self) -> &str {
        &self.options.default_glider
    }

    pub fn include_gliders(&self) -> bool {
        self.options.include_gliders
    }

    pub fn year(&self, year: i32) -> Option<&YearStat> {
        self.years.get(&year)
    }

    /// Years in ascending order
    pub fn years(&self) -> impl Iterator<Item = &YearStat> {
        self.years.values()
    }

    pub fn glider(&self, name: &str) -> Option<&GliderStat> {
        self.gliders.get(name)
    }

    /// Gliders sorted by name
    pub fn gliders(&self) -> impl Iterator<Item = &GliderStat> {
        self.gliders.values()
    }

    /// Flatten the statistics into report rows
    ///
    /// Days come before their month total, months before their year total,
    /// years before the grand total, all in ascending calendar order. The
    /// glider section follows when enabled.
    pub fn render(&self) -> Vec<ReportRow> {
        let mut rows = Vec::new();

        for year in self.years() {
            for month in year.months() {
                for day in month.days() {
                    rows.push(ReportRow::new(
                        RowKind::Day(day.date),
                        format_date(day.date),
                        day.flights,
                        day.airtime,
                    ));
                }
                rows.push(ReportRow::new(
                    RowKind::MonthTotal {
                        year: month.year(),
                        month: month.month(),
                    },
                    format_month_label(month.date),
                    month.flights,
                    month.airtime,
                ));
            }
            rows.push(ReportRow::new(
                RowKind::YearTotal(year.year()),
                format_year_label(year.year()),
                year.flights,
                year.airtime,
            ));
        }
        rows.push(ReportRow::new(
            RowKind::Total,
            "Total",
            self.flights,
            self.airtime,
        ));

        if self.include_gliders() {
            rows.push(ReportRow::new(
                RowKind::GliderHeader,
                "Glider",
                0,
                Duration::zero(),
            ));
            for glider in self.gliders() {
                rows.push(ReportRow::new(
                    RowKind::Glider,
                    glider.name.clone(),
                    glider.flights,
                    glider.airtime,
                ));
            }
        }

        rows
    }
}
