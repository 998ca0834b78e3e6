use crate::model::{
    appointment::{event::CreateAppointment, Appointment, AppointmentStatus},
    id::AppointmentId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Inserts a pending appointment.
    ///
    /// The overlap check against non-cancelled appointments and the insert
    /// must be one atomic step; an overlap fails with `AppError::Conflict`.
    async fn create(&self, event: CreateAppointment) -> AppResult<AppointmentId>;
    async fn find_by_id(&self, appointment_id: AppointmentId) -> AppResult<Appointment>;
    /// Moves a non-cancelled appointment to `status` in one conditional write
    /// and returns the calendar event id it holds at that moment.
    ///
    /// A cancelled appointment is left untouched and fails with
    /// `AppError::Conflict`.
    async fn update_status(
        &self,
        appointment_id: AppointmentId,
        status: AppointmentStatus,
    ) -> AppResult<Option<String>>;
    // Cancelled の予約には紐付けず AppError::Conflict を返す
    async fn attach_calendar_event(
        &self,
        appointment_id: AppointmentId,
        event_id: String,
    ) -> AppResult<()>;
    // start <= start_time < end
    async fn find_by_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>>;
    async fn count_by_month(&self, year: i32, month: u32) -> AppResult<i64>;
    async fn count_completed_by_month(&self, year: i32, month: u32) -> AppResult<i64>;
    async fn count_by_status(&self, status: AppointmentStatus) -> AppResult<i64>;
}
