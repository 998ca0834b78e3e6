use chrono::{DateTime, FixedOffset, Utc};
use garde::Validate;
use kernel::model::{
    appointment::{
        event::{BookAppointment, BookAppointmentForClient},
        Appointment, AppointmentClient,
    },
    id::{AppointmentId, ClientId},
};
use serde::{Deserialize, Serialize};

// 開始時刻はオフセット付きで受け取り UTC に揃える
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub phone: String,
    #[garde(skip)]
    pub start_time: DateTime<FixedOffset>,
    #[garde(skip)]
    #[serde(default)]
    pub notes: String,
}

impl From<CreateAppointmentRequest> for BookAppointment {
    fn from(value: CreateAppointmentRequest) -> Self {
        let CreateAppointmentRequest {
            name,
            email,
            phone,
            start_time,
            notes,
        } = value;
        BookAppointment::new(name, email, phone, start_time.with_timezone(&Utc), notes)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientAppointmentRequest {
    #[garde(skip)]
    pub start_time: DateTime<FixedOffset>,
    #[garde(skip)]
    #[serde(default)]
    pub notes: String,
}

impl CreateClientAppointmentRequest {
    pub fn into_event(self, client_id: ClientId) -> BookAppointmentForClient {
        BookAppointmentForClient::new(client_id, self.start_time.with_timezone(&Utc), self.notes)
    }
}

#[derive(Debug, Deserialize)]
pub struct AppointmentListQuery {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub appointment_id: AppointmentId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub calendar_event_id: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client: AppointmentClientResponse,
}

impl From<Appointment> for AppointmentResponse {
    fn from(value: Appointment) -> Self {
        let Appointment {
            appointment_id,
            start_time,
            end_time,
            status,
            calendar_event_id,
            notes,
            created_at,
            updated_at,
            client,
        } = value;
        Self {
            appointment_id,
            start_time,
            end_time,
            status: status.as_ref().to_owned(),
            calendar_event_id,
            notes,
            created_at,
            updated_at,
            client: client.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentClientResponse {
    pub client_id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<AppointmentClient> for AppointmentClientResponse {
    fn from(value: AppointmentClient) -> Self {
        let AppointmentClient {
            client_id,
            name,
            email,
            phone,
        } = value;
        Self {
            client_id,
            name,
            email,
            phone,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentsResponse {
    pub items: Vec<AppointmentResponse>,
}

impl From<Vec<Appointment>> for AppointmentsResponse {
    fn from(value: Vec<Appointment>) -> Self {
        Self {
            items: value.into_iter().map(AppointmentResponse::from).collect(),
        }
    }
}
