//! Calendar accumulators: day, month and year
//!
//! Each level owns its children in an ordered map keyed by the calendar
//! number, so iterating a level always walks it in ascending order.

use crate::types::Flight;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Flights of one calendar day
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayStat {
    pub date: NaiveDate,
    pub flights: usize,
    #[cfg_attr(feature = "serde", serde(with = "crate::types::serde_duration"))]
    pub airtime: Duration,
}

impl DayStat {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            flights: 0,
            airtime: Duration::zero(),
        }
    }

    pub fn add(&mut self, flight: &Flight) {
        self.date = flight.takeoff_date();
        self.flights += 1;
        self.airtime = self.airtime + flight.duration;
    }

    pub fn merge(&mut self, other: DayStat) {
        self.date = other.date;
        self.flights += other.flights;
        self.airtime = self.airtime + other.airtime;
    }
}

/// Flights of one month, broken down by day of month
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonthStat {
    /// Date of the last added flight; only month and year are meaningful
    pub date: NaiveDate,
    pub flights: usize,
    #[cfg_attr(feature = "serde", serde(with = "crate::types::serde_duration"))]
    pub airtime: Duration,
    days: BTreeMap<u32, DayStat>,
}

impl MonthStat {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            flights: 0,
            airtime: Duration::zero(),
            days: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, flight: &Flight) {
        let date = flight.takeoff_date();
        self.date = date;
        self.flights += 1;
        self.airtime = self.airtime + flight.duration;
        self.days
            .entry(date.day())
            .or_insert_with(|| DayStat::new(date))
            .add(flight);
    }

    pub fn merge(&mut self, other: MonthStat) {
        self.date = other.date;
        self.flights += other.flights;
        self.airtime = self.airtime + other.airtime;
        for (day, stat) in other.days {
            match self.days.entry(day) {
                Entry::Occupied(mut entry) => entry.get_mut().merge(stat),
                Entry::Vacant(entry) => {
                    entry.insert(stat);
                }
            }
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self, day: u32) -> Option<&DayStat> {
        self.days.get(&day)
    }

    /// Days in ascending order
    pub fn days(&self) -> impl Iterator<Item = &DayStat> {
        self.days.values()
    }
}

/// Flights of one year, broken down by month
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct YearStat {
    pub date: NaiveDate,
    pub flights: usize,
    #[cfg_attr(feature = "serde", serde(with = "crate::types::serde_duration"))]
    pub airtime: Duration,
    months: BTreeMap<u32, MonthStat>,
}

impl YearStat {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            flights: 0,
            airtime: Duration::zero(),
            months: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, flight: &Flight) {
        let date = flight.takeoff_date();
        self.date = date;
        self.flights += 1;
        self.airtime = self.airtime + flight.duration;
        self.months
            .entry(date.month())
            .or_insert_with(|| MonthStat::new(date))
            .add(flight);
    }

    pub fn merge(&mut self, other: YearStat) {
        self.date = other.date;
        self.flights += other.flights;
        self.airtime = self.airtime + other.airtime;
        for (month, stat) in other.months {
            match self.months.entry(month) {
                Entry::Occupied(mut entry) => entry.get_mut().merge(stat),
                Entry::Vacant(entry) => {
                    entry.insert(stat);
                }
            }
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self, month: u32) -> Option<&MonthStat> {
        self.months.get(&month)
    }

    /// Months in calendar order
    pub fn months(&self) -> impl Iterator<Item = &MonthStat> {
        self.months.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn flight(y: i32, m: u32, d: u32, minutes: i64) -> Flight {
        let utc = FixedOffset::east_opt(0).unwrap();
        Flight::at(
            utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            Duration::minutes(minutes),
        )
    }

    #[test]
    fn test_day_stat_add() {
        let mut day = DayStat::new(NaiveDate::from_ymd_opt(2016, 10, 1).unwrap());
        day.add(&flight(2016, 10, 1, 11));
        day.add(&flight(2016, 10, 1, 4));
        assert_eq!(day.flights, 2);
        assert_eq!(day.airtime, Duration::minutes(15));
    }

    #[test]
    fn test_month_stat_routes_days() {
        let mut month = MonthStat::new(NaiveDate::from_ymd_opt(2016, 10, 1).unwrap());
        month.add(&flight(2016, 10, 5, 12));
        month.add(&flight(2016, 10, 1, 11));
        month.add(&flight(2016, 10, 5, 3));

        assert_eq!(month.flights, 3);
        assert_eq!(month.airtime, Duration::minutes(26));
        assert_eq!(month.day(5).unwrap().flights, 2);
        assert_eq!(month.day(1).unwrap().airtime, Duration::minutes(11));
        assert!(month.day(2).is_none());

        let order: Vec<u32> = month.days().map(|d| d.date.day()).collect();
        assert_eq!(order, vec![1, 5]);
    }

    #[test]
    fn test_year_stat_sums_months() {
        let mut year = YearStat::new(NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        year.add(&flight(2016, 12, 3, 15));
        year.add(&flight(2016, 10, 1, 11));
        year.add(&flight(2016, 11, 2, 13));

        assert_eq!(year.year(), 2016);
        let months: Vec<u32> = year.months().map(|m| m.month()).collect();
        assert_eq!(months, vec![10, 11, 12]);

        let flights: usize = year.months().map(|m| m.flights).sum();
        let airtime = year
            .months()
            .fold(Duration::zero(), |acc, m| acc + m.airtime);
        assert_eq!(flights, year.flights);
        assert_eq!(airtime, year.airtime);
    }

    #[test]
    fn test_negative_duration_propagates() {
        let mut day = DayStat::new(NaiveDate::from_ymd_opt(2016, 10, 1).unwrap());
        day.add(&flight(2016, 10, 1, 10));
        day.add(&flight(2016, 10, 1, -4));
        assert_eq!(day.flights, 2);
        assert_eq!(day.airtime, Duration::minutes(6));
    }

    #[test]
    fn test_month_merge() {
        let mut a = MonthStat::new(NaiveDate::from_ymd_opt(2016, 10, 1).unwrap());
        a.add(&flight(2016, 10, 1, 11));
        let mut b = MonthStat::new(NaiveDate::from_ymd_opt(2016, 10, 1).unwrap());
        b.add(&flight(2016, 10, 1, 2));
        b.add(&flight(2016, 10, 5, 12));

        a.merge(b);
        assert_eq!(a.flights, 3);
        assert_eq!(a.airtime, Duration::minutes(25));
        assert_eq!(a.day(1).unwrap().flights, 2);
        assert_eq!(a.day(5).unwrap().airtime, Duration::minutes(12));
    }
}
