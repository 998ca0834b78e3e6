use chrono::NaiveDate;
use kernel::model::{availability::AvailabilityWindow, id::AvailabilityId};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct AvailabilityRow {
    pub availability_id: AvailabilityId,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub slot_duration: i32,
    pub is_blocked: bool,
}

impl From<AvailabilityRow> for AvailabilityWindow {
    fn from(value: AvailabilityRow) -> Self {
        let AvailabilityRow {
            availability_id,
            date,
            start_time,
            end_time,
            slot_duration,
            is_blocked,
        } = value;
        AvailabilityWindow {
            id: availability_id,
            date,
            start: start_time,
            end: end_time,
            slot_duration,
            blocked: is_blocked,
        }
    }
}
