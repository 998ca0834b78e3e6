use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use garde::Validate;
use kernel::model::id::AvailabilityId;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::availability::{
    AvailabilityListResponse, AvailabilityResponse, SetAvailabilityRequest, SlotsResponse,
};

pub async fn set_availability(
    State(registry): State<AppRegistry>,
    Json(req): Json<SetAvailabilityRequest>,
) -> AppResult<(StatusCode, Json<AvailabilityResponse>)> {
    req.validate(&())?;

    let SetAvailabilityRequest {
        date,
        start,
        end,
        slot_duration,
    } = req;
    registry
        .availability_service()
        .set_availability(date, start, end, slot_duration)
        .await
        .map(|window| (StatusCode::CREATED, Json(window.into())))
}

pub async fn block_date(
    Path(date): Path<NaiveDate>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityResponse>> {
    registry
        .availability_service()
        .block_date(date)
        .await
        .map(AvailabilityResponse::from)
        .map(Json)
}

pub async fn show_availability_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityListResponse>> {
    registry
        .availability_service()
        .list_availability()
        .await
        .map(AvailabilityListResponse::from)
        .map(Json)
}

pub async fn delete_availability(
    Path(availability_id): Path<AvailabilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .availability_service()
        .delete_availability(availability_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

pub async fn show_slots(
    Path(date): Path<NaiveDate>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SlotsResponse>> {
    registry
        .availability_service()
        .available_slots(date)
        .await
        .map(|slots| Json(SlotsResponse { date, slots }))
}
