use crate::model::id::AvailabilityId;
use chrono::{Duration, NaiveDate};

pub mod event;

pub const DEFAULT_SLOT_DURATION_MINUTES: i32 = 60;

/// Working hours configured for one calendar date.
///
/// `start` and `end` are kept as stored (`HH:MM`); they are parsed when slots
/// are generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityWindow {
    pub id: AvailabilityId,
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
    pub slot_duration: i32,
    pub blocked: bool,
}

impl AvailabilityWindow {
    pub fn is_bookable(&self) -> bool {
        !self.blocked
    }

    /// Spacing between candidate slots; non-positive durations fall back to an hour.
    pub fn slot_step(&self) -> Duration {
        let minutes = if self.slot_duration > 0 {
            self.slot_duration
        } else {
            DEFAULT_SLOT_DURATION_MINUTES
        };
        Duration::minutes(minutes.into())
    }
}
