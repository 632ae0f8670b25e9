use chrono::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Flights and airtime per glider
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GliderStat {
    pub name: String,
    pub flights: usize,
    #[cfg_attr(feature = "serde", serde(with = "crate::types::serde_duration"))]
    pub airtime: Duration,
}

impl GliderStat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flights: 0,
            airtime: Duration::zero(),
        }
    }

    pub fn add(&mut self, duration: Duration) {
        self.flights += 1;
        self.airtime = self.airtime + duration;
    }

    pub fn merge(&mut self, other: GliderStat) {
        self.flights += other.flights;
        self.airtime = self.airtime + other.airtime;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_merge() {
        let mut alpha = GliderStat::new("Advance Alpha 6");
        alpha.add(Duration::minutes(11));
        alpha.add(Duration::minutes(-2));
        assert_eq!(alpha.flights, 2);
        assert_eq!(alpha.airtime, Duration::minutes(9));

        let mut shard = GliderStat::new("Advance Alpha 6");
        shard.add(Duration::minutes(30));
        alpha.merge(shard);
        assert_eq!(alpha.flights, 3);
        assert_eq!(alpha.airtime, Duration::minutes(39));
    }
}
