use chrono::{DateTime, NaiveDate, Utc};
use garde::Validate;
use kernel::model::{
    availability::{AvailabilityWindow, DEFAULT_SLOT_DURATION_MINUTES},
    id::AvailabilityId,
};
use serde::{Deserialize, Serialize};

fn default_slot_duration() -> i32 {
    DEFAULT_SLOT_DURATION_MINUTES
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetAvailabilityRequest {
    #[garde(skip)]
    pub date: NaiveDate,
    // HH:MM の形式チェックはサービス側で行う
    #[garde(length(min = 1))]
    pub start: String,
    #[garde(length(min = 1))]
    pub end: String,
    #[garde(skip)]
    #[serde(default = "default_slot_duration")]
    pub slot_duration: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub id: AvailabilityId,
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
    pub slot_duration: i32,
    pub blocked: bool,
}

impl From<AvailabilityWindow> for AvailabilityResponse {
    fn from(value: AvailabilityWindow) -> Self {
        let AvailabilityWindow {
            id,
            date,
            start,
            end,
            slot_duration,
            blocked,
        } = value;
        Self {
            id,
            date,
            start,
            end,
            slot_duration,
            blocked,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityListResponse {
    pub items: Vec<AvailabilityResponse>,
}

impl From<Vec<AvailabilityWindow>> for AvailabilityListResponse {
    fn from(value: Vec<AvailabilityWindow>) -> Self {
        Self {
            items: value.into_iter().map(AvailabilityResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<DateTime<Utc>>,
}
