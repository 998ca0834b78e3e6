use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::stats::MonthlyStatsResponse;

pub async fn show_monthly_stats(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MonthlyStatsResponse>> {
    registry
        .stats_service()
        .monthly_stats()
        .await
        .map(MonthlyStatsResponse::from)
        .map(Json)
}
