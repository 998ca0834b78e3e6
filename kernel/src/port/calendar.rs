use crate::model::appointment::Appointment;
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait CalendarPort: Send + Sync {
    /// Returns the external event id; an empty string means no event was created.
    async fn create_event(&self, appointment: &Appointment) -> AppResult<String>;
    async fn delete_event(&self, event_id: &str) -> AppResult<()>;
}
