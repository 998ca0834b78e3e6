use chrono::{DateTime, Duration, Utc};

/// A half-open interval `[start, end)`.
///
/// Every overlap decision in the crate goes through [`TimeRange::overlaps`],
/// and the Postgres store mirrors the same predicate in SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn starting_at(start: DateTime<Utc>, length: Duration) -> Self {
        Self {
            start,
            end: start + length,
        }
    }

    // 隣接（a.end == b.start）は重複とみなさない
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 24, hour, minute, 0).unwrap()
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let morning = TimeRange::new(at(9, 0), at(10, 0));
        let next = TimeRange::new(at(10, 0), at(11, 0));
        assert!(!morning.overlaps(&next));
        assert!(!next.overlaps(&morning));
    }

    #[test]
    fn partial_and_nested_ranges_overlap() {
        let hour = TimeRange::new(at(9, 0), at(10, 0));
        assert!(hour.overlaps(&TimeRange::new(at(9, 30), at(10, 30))));
        assert!(hour.overlaps(&TimeRange::new(at(8, 30), at(9, 1))));
        assert!(hour.overlaps(&TimeRange::new(at(9, 15), at(9, 45))));
        assert!(hour.overlaps(&TimeRange::new(at(8, 0), at(11, 0))));
    }

    #[test]
    fn starting_at_adds_length() {
        let r = TimeRange::starting_at(at(12, 0), Duration::minutes(30));
        assert_eq!(r.end, at(12, 30));
    }
}
