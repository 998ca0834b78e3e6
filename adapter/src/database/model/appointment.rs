use std::str::FromStr;

use chrono::{DateTime, Utc};
use kernel::model::{
    appointment::{Appointment, AppointmentClient, AppointmentStatus},
    id::{AppointmentId, ClientId},
};
use shared::error::AppError;
use sqlx::FromRow;

// appointments と clients を JOIN した行
#[derive(FromRow)]
pub struct AppointmentRow {
    pub appointment_id: AppointmentId,
    pub client_id: ClientId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub calendar_event_id: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = AppError;

    fn try_from(value: AppointmentRow) -> Result<Self, Self::Error> {
        let AppointmentRow {
            appointment_id,
            client_id,
            start_time,
            end_time,
            status,
            calendar_event_id,
            notes,
            created_at,
            updated_at,
            client_name,
            client_email,
            client_phone,
        } = value;
        let status = AppointmentStatus::from_str(&status).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown appointment status: {status}"))
        })?;
        Ok(Appointment {
            appointment_id,
            start_time,
            end_time,
            status,
            calendar_event_id,
            notes,
            created_at,
            updated_at,
            client: AppointmentClient {
                client_id,
                name: client_name,
                email: client_email,
                phone: client_phone,
            },
        })
    }
}
