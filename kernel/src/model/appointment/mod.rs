use crate::model::{
    id::{AppointmentId, ClientId},
    time_range::TimeRange,
};
use chrono::{DateTime, Duration, Utc};
use strum::{AsRefStr, EnumString};

pub mod event;

/// Every appointment lasts one hour, whatever the window's slot granularity.
pub fn appointment_length() -> Duration {
    Duration::hours(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    /// Whether the appointment still holds its interval.
    pub fn is_active(self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }

    // Pending -> Confirmed / Cancelled, Confirmed -> Cancelled
    // 同じ状態への遷移は冪等として許可する（Cancelled -> Cancelled を含む）
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        match (self, next) {
            (a, b) if a == b => true,
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Appointment {
    pub appointment_id: AppointmentId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub calendar_event_id: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client: AppointmentClient,
}

impl Appointment {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    pub fn blocks(&self, range: &TimeRange) -> bool {
        self.status.is_active() && self.time_range().overlaps(range)
    }
}

#[derive(Debug, Clone)]
pub struct AppointmentClient {
    pub client_id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
}
