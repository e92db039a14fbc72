use crate::error::{ProcessingError, Result};
use crate::models::TimeCategory;
use std::ops::Range;

/// Half-open hour ranges; together they cover 0..24 exactly once.
const BUCKETS: [(Range<u8>, TimeCategory); 4] = [
    (0..6, TimeCategory::Night),
    (6..12, TimeCategory::Morning),
    (12..18, TimeCategory::Afternoon),
    (18..24, TimeCategory::Evening),
];

pub struct TimeBucketer;

impl TimeBucketer {
    pub fn category(hour: u8) -> Option<TimeCategory> {
        BUCKETS
            .iter()
            .find(|(range, _)| range.contains(&hour))
            .map(|(_, category)| *category)
    }

    /// Bucket the hour of the record on `line`, rejecting hours outside 0-23.
    /// Returns the hour of day with its category.
    pub fn bucket(hour: i64, line: usize) -> Result<(u8, TimeCategory)> {
        u8::try_from(hour)
            .ok()
            .and_then(|h| Self::category(h).map(|category| (h, category)))
            .ok_or(ProcessingError::HourOutOfRange { line, hour })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(TimeBucketer::category(0), Some(TimeCategory::Night));
        assert_eq!(TimeBucketer::category(5), Some(TimeCategory::Night));
        assert_eq!(TimeBucketer::category(6), Some(TimeCategory::Morning));
        assert_eq!(TimeBucketer::category(11), Some(TimeCategory::Morning));
        assert_eq!(TimeBucketer::category(12), Some(TimeCategory::Afternoon));
        assert_eq!(TimeBucketer::category(17), Some(TimeCategory::Afternoon));
        assert_eq!(TimeBucketer::category(18), Some(TimeCategory::Evening));
        assert_eq!(TimeBucketer::category(23), Some(TimeCategory::Evening));
    }

    #[test]
    fn test_every_hour_has_one_category() {
        let mut counts = [0usize; 4];
        for hour in 0..24i64 {
            let (h, category) = TimeBucketer::bucket(hour, 1).unwrap();
            assert_eq!(i64::from(h), hour);
            counts[category.rank()] += 1;
        }
        assert_eq!(counts, [6, 6, 6, 6]);
    }

    #[test]
    fn test_out_of_range_hour() {
        let err = TimeBucketer::bucket(24, 17).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::HourOutOfRange { line: 17, hour: 24 }
        ));
    }

    #[test]
    fn test_negative_and_wide_hours_are_out_of_range() {
        for hour in [-1, 255, 256, 1000] {
            let err = TimeBucketer::bucket(hour, 3).unwrap_err();
            assert!(matches!(err, ProcessingError::HourOutOfRange { line: 3, hour: h } if h == hour));
        }
    }
}
