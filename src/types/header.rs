use chrono::{FixedOffset, NaiveDate};

/// Header records of an IGC file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IgcHeader {
    /// Flight date from `HFDTE`
    pub date: Option<NaiveDate>,
    /// Glider type from `HFGTY`, empty when not recorded
    pub glider: String,
    /// Takeoff site from `HFSIT`
    pub site: String,
    /// Local offset from `HFTZN`; fixes are recorded in UTC
    pub timezone: Option<FixedOffset>,
}
