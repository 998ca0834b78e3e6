//! Derivation of bookable start times from a day's working window.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use shared::error::{AppError, AppResult};

use crate::model::{
    appointment::Appointment,
    availability::AvailabilityWindow,
    time_range::TimeRange,
};

const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Lists the free slot start times of `date`.
///
/// Candidates run from `start` to `end` inclusive: a slot that starts exactly at
/// `end` is still offered even though it ends after the window. A candidate is
/// dropped when `[slot, slot + step)` overlaps a non-cancelled appointment.
/// A missing or blocked window yields no slots, as does `start > end`.
pub fn generate_slots(
    window: Option<&AvailabilityWindow>,
    appointments: &[Appointment],
    date: NaiveDate,
) -> AppResult<Vec<DateTime<Utc>>> {
    let Some(window) = window.filter(|w| w.is_bookable()) else {
        return Ok(Vec::new());
    };

    let start = parse_time_of_day(&window.start, "start")?;
    let end = parse_time_of_day(&window.end, "end")?;
    let step = window.slot_step();

    let mut current = date.and_time(start).and_utc();
    let last = date.and_time(end).and_utc();

    let mut slots = Vec::new();
    while current <= last {
        let candidate = TimeRange::starting_at(current, step);
        if !appointments.iter().any(|a| a.blocks(&candidate)) {
            slots.push(current);
        }
        current += step;
    }

    Ok(slots)
}

fn parse_time_of_day(value: &str, field: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_OF_DAY_FORMAT).map_err(|e| {
        AppError::ConfigurationError(format!("{field} time {value:?} is not HH:MM ({e})"))
    })
}
