use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::id::{AppointmentId, ClientId};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::appointment::{
    AppointmentListQuery, AppointmentResponse, AppointmentsResponse, CreateAppointmentRequest,
    CreateClientAppointmentRequest,
};

pub async fn create_appointment(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateAppointmentRequest>,
) -> AppResult<(StatusCode, Json<AppointmentResponse>)> {
    req.validate(&())?;

    registry
        .booking_service()
        .create_appointment(req.into())
        .await
        .map(|appointment| (StatusCode::CREATED, Json(appointment.into())))
}

pub async fn create_appointment_for_client(
    Path(client_id): Path<ClientId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateClientAppointmentRequest>,
) -> AppResult<(StatusCode, Json<AppointmentResponse>)> {
    req.validate(&())?;

    registry
        .booking_service()
        .create_appointment_for_client(req.into_event(client_id))
        .await
        .map(|appointment| (StatusCode::CREATED, Json(appointment.into())))
}

pub async fn show_appointment_list(
    Query(query): Query<AppointmentListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AppointmentsResponse>> {
    registry
        .booking_service()
        .list_appointments(
            query.start.with_timezone(&Utc),
            query.end.with_timezone(&Utc),
        )
        .await
        .map(AppointmentsResponse::from)
        .map(Json)
}

pub async fn show_appointment(
    Path(appointment_id): Path<AppointmentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AppointmentResponse>> {
    registry
        .lifecycle_service()
        .find(appointment_id)
        .await
        .map(AppointmentResponse::from)
        .map(Json)
}

pub async fn confirm_appointment(
    Path(appointment_id): Path<AppointmentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .lifecycle_service()
        .confirm(appointment_id)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn cancel_appointment(
    Path(appointment_id): Path<AppointmentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .lifecycle_service()
        .cancel(appointment_id)
        .await
        .map(|_| StatusCode::OK)
}
