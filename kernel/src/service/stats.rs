use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use derive_new::new;
use shared::error::AppResult;

use crate::{
    model::{appointment::AppointmentStatus, stats::MonthlyStats},
    repository::appointment::AppointmentRepository,
};

#[derive(new)]
pub struct StatsService {
    appointment_repository: Arc<dyn AppointmentRepository>,
}

impl StatsService {
    pub async fn monthly_stats(&self) -> AppResult<MonthlyStats> {
        self.monthly_stats_at(Utc::now()).await
    }

    pub async fn monthly_stats_at(&self, now: DateTime<Utc>) -> AppResult<MonthlyStats> {
        let (year, month) = (now.year(), now.month());

        let total_this_month = self.appointment_repository.count_by_month(year, month).await?;
        let completed_this_month = self
            .appointment_repository
            .count_completed_by_month(year, month)
            .await?;
        let pending_all_time = self
            .appointment_repository
            .count_by_status(AppointmentStatus::Pending)
            .await?;

        Ok(MonthlyStats {
            total_this_month,
            completed_this_month,
            pending_all_time,
            month: now.format("%B").to_string(),
            year,
        })
    }
}
