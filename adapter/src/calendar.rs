use async_trait::async_trait;
use kernel::model::appointment::Appointment;
use kernel::port::calendar::CalendarPort;
use shared::error::AppResult;

/// Calendar adapter used when no external calendar is configured.
///
/// Never creates an event, so appointments keep an empty event id.
#[derive(Default)]
pub struct LoggingCalendar;

#[async_trait]
impl CalendarPort for LoggingCalendar {
    async fn create_event(&self, appointment: &Appointment) -> AppResult<String> {
        tracing::info!(
            appointment_id = %appointment.appointment_id,
            start_time = %appointment.start_time,
            client = %appointment.client.name,
            "calendar is not configured; skipping event creation"
        );
        Ok(String::new())
    }

    async fn delete_event(&self, event_id: &str) -> AppResult<()> {
        tracing::info!(event_id, "calendar is not configured; skipping event deletion");
        Ok(())
    }
}
