use crate::model::id::ClientId;
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new, Debug, Clone)]
pub struct CreateAppointment {
    pub client_id: ClientId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub notes: String,
}

// 名前・メール・電話番号での予約（該当クライアントが無ければ作成する）
#[derive(new, Debug, Clone)]
pub struct BookAppointment {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub start_time: DateTime<Utc>,
    pub notes: String,
}

#[derive(new, Debug, Clone)]
pub struct BookAppointmentForClient {
    pub client_id: ClientId,
    pub start_time: DateTime<Utc>,
    pub notes: String,
}
