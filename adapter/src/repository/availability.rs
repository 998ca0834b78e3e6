use crate::database::{model::availability::AvailabilityRow, ConnectionPool};
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::{
    availability::{event::SaveAvailability, AvailabilityWindow},
    id::AvailabilityId,
};
use kernel::repository::availability::AvailabilityRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct AvailabilityRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AvailabilityRepository for AvailabilityRepositoryImpl {
    async fn save(&self, event: SaveAvailability) -> AppResult<AvailabilityWindow> {
        // date の一意制約で upsert する。既存行の availability_id はそのまま残る
        sqlx::query_as::<_, AvailabilityRow>(
            r#"
                INSERT INTO availabilities
                (availability_id, date, start_time, end_time, slot_duration, is_blocked)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (date) DO UPDATE SET
                    start_time = EXCLUDED.start_time,
                    end_time = EXCLUDED.end_time,
                    slot_duration = EXCLUDED.slot_duration,
                    is_blocked = EXCLUDED.is_blocked,
                    updated_at = CURRENT_TIMESTAMP
                RETURNING availability_id, date, start_time, end_time, slot_duration, is_blocked
            "#,
        )
        .bind(AvailabilityId::new())
        .bind(event.date)
        .bind(event.start)
        .bind(event.end)
        .bind(event.slot_duration)
        .bind(event.blocked)
        .fetch_one(self.db.inner_ref())
        .await
        .map(AvailabilityWindow::from)
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Option<AvailabilityWindow>> {
        sqlx::query_as::<_, AvailabilityRow>(
            r#"
                SELECT availability_id, date, start_time, end_time, slot_duration, is_blocked
                FROM availabilities
                WHERE date = $1
            "#,
        )
        .bind(date)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(AvailabilityWindow::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_all(&self) -> AppResult<Vec<AvailabilityWindow>> {
        sqlx::query_as::<_, AvailabilityRow>(
            r#"
                SELECT availability_id, date, start_time, end_time, slot_duration, is_blocked
                FROM availabilities
                ORDER BY date ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(AvailabilityWindow::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn delete(&self, availability_id: AvailabilityId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM availabilities WHERE availability_id = $1")
            .bind(availability_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "availability ({availability_id}) was not found"
            )));
        }

        Ok(())
    }
}
