use chrono::NaiveDate;
use derive_new::new;

use super::DEFAULT_SLOT_DURATION_MINUTES;

// 同じ日付で保存した場合は上書き（id は維持）
#[derive(new, Debug, Clone)]
pub struct SaveAvailability {
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
    pub slot_duration: i32,
    pub blocked: bool,
}

impl SaveAvailability {
    pub fn working_hours(date: NaiveDate, start: String, end: String, slot_duration: i32) -> Self {
        let slot_duration = if slot_duration > 0 {
            slot_duration
        } else {
            DEFAULT_SLOT_DURATION_MINUTES
        };
        Self::new(date, start, end, slot_duration, false)
    }
}
