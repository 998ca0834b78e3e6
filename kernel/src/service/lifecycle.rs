use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        appointment::{Appointment, AppointmentStatus},
        client::phone::normalize_phone,
        id::AppointmentId,
    },
    port::{calendar::CalendarPort, notification::NotificationPort},
    repository::appointment::AppointmentRepository,
    service::task::TaskRunner,
};

/// Moves appointments through Pending -> Confirmed -> Cancelled.
#[derive(new)]
pub struct LifecycleService {
    appointment_repository: Arc<dyn AppointmentRepository>,
    calendar: Arc<dyn CalendarPort>,
    notification: Arc<dyn NotificationPort>,
    tasks: Arc<dyn TaskRunner>,
}

impl LifecycleService {
    pub async fn find(&self, appointment_id: AppointmentId) -> AppResult<Appointment> {
        self.appointment_repository.find_by_id(appointment_id).await
    }

    /// Confirms the appointment, then notifies the client over WhatsApp.
    ///
    /// A cancelled appointment cannot be confirmed again.
    pub async fn confirm(&self, appointment_id: AppointmentId) -> AppResult<()> {
        let appointment = self.appointment_repository.find_by_id(appointment_id).await?;
        if !appointment
            .status
            .can_transition_to(AppointmentStatus::Confirmed)
        {
            return Err(AppError::Conflict(format!(
                "appointment ({appointment_id}) is cancelled and cannot be confirmed"
            )));
        }

        // 読み取り後に取り消された場合はストア側の条件付き更新が Conflict を返す
        self.appointment_repository
            .update_status(appointment_id, AppointmentStatus::Confirmed)
            .await?;
        tracing::info!(%appointment_id, "appointment confirmed");

        self.notify_confirmation(&appointment);
        Ok(())
    }

    /// Cancels the appointment and drops its calendar event, if any.
    ///
    /// Cancelling twice is a no-op.
    pub async fn cancel(&self, appointment_id: AppointmentId) -> AppResult<()> {
        let appointment = self.appointment_repository.find_by_id(appointment_id).await?;
        if appointment.status == AppointmentStatus::Cancelled {
            return Ok(());
        }

        // イベント ID は更新時点の値を使う。並行する取り消しに負けた場合は何もしない
        let event_id = match self
            .appointment_repository
            .update_status(appointment_id, AppointmentStatus::Cancelled)
            .await
        {
            Ok(event_id) => event_id,
            Err(AppError::Conflict(_)) => return Ok(()),
            Err(e) => return Err(e),
        };
        tracing::info!(%appointment_id, "appointment cancelled");

        if let Some(event_id) = event_id.filter(|id| !id.is_empty()) {
            let calendar = self.calendar.clone();
            self.tasks.submit(
                "calendar.delete_event",
                Box::pin(async move { calendar.delete_event(&event_id).await }),
            );
        }
        Ok(())
    }

    fn notify_confirmation(&self, appointment: &Appointment) {
        let Some(phone) = normalize_phone(&appointment.client.phone) else {
            tracing::warn!(
                appointment_id = %appointment.appointment_id,
                client_id = %appointment.client.client_id,
                "client has no usable phone number, skipping confirmation message"
            );
            return;
        };

        let message = confirmation_message(appointment);
        let notification = self.notification.clone();
        self.tasks.submit(
            "notification.send",
            Box::pin(async move { notification.send(&phone, &message).await }),
        );
    }
}

fn confirmation_message(appointment: &Appointment) -> String {
    format!(
        "Tu turno ha sido confirmado para {}. ¡Te esperamos!",
        appointment.start_time.format("%Y-%m-%d %H:%M")
    )
}
