use crate::database::{is_booking_conflict, model::appointment::AppointmentRow, ConnectionPool};
use async_trait::async_trait;
use chrono::{DateTime, Months, NaiveDate, Utc};
use derive_new::new;
use kernel::model::{
    appointment::{event::CreateAppointment, Appointment, AppointmentStatus},
    id::AppointmentId,
};
use kernel::repository::appointment::AppointmentRepository;
use shared::error::{AppError, AppResult};

const SELECT_APPOINTMENT: &str = r#"
    SELECT
        a.appointment_id,
        a.client_id,
        a.start_time,
        a.end_time,
        a.status,
        a.calendar_event_id,
        a.notes,
        a.created_at,
        a.updated_at,
        c.name AS client_name,
        c.email AS client_email,
        c.phone AS client_phone
    FROM appointments AS a
    INNER JOIN clients AS c USING(client_id)
"#;

#[derive(new)]
pub struct AppointmentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AppointmentRepository for AppointmentRepositoryImpl {
    async fn create(&self, event: CreateAppointment) -> AppResult<AppointmentId> {
        let appointment_id = AppointmentId::new();
        match self.insert_without_overlap(appointment_id, &event).await {
            Err(AppError::SpecificOperationError(e)) | Err(AppError::TransactionError(e))
                if is_booking_conflict(&e) =>
            {
                Err(AppError::Conflict(
                    "the requested time overlaps an existing appointment".into(),
                ))
            }
            other => other.map(|_| appointment_id),
        }
    }

    async fn find_by_id(&self, appointment_id: AppointmentId) -> AppResult<Appointment> {
        let sql = format!("{SELECT_APPOINTMENT} WHERE a.appointment_id = $1");
        let row = sqlx::query_as::<_, AppointmentRow>(&sql)
            .bind(appointment_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        match row {
            Some(row) => Appointment::try_from(row),
            None => Err(AppError::EntityNotFound(format!(
                "appointment ({appointment_id}) was not found"
            ))),
        }
    }

    async fn update_status(
        &self,
        appointment_id: AppointmentId,
        status: AppointmentStatus,
    ) -> AppResult<Option<String>> {
        // 行ロック取得後に WHERE が再評価されるため、並行する取り消しを追い越さない
        let updated = sqlx::query_scalar::<_, Option<String>>(
            r#"
                UPDATE appointments
                SET status = $1, updated_at = CURRENT_TIMESTAMP
                WHERE appointment_id = $2 AND status <> $3
                RETURNING calendar_event_id
            "#,
        )
        .bind(status.as_ref())
        .bind(appointment_id)
        .bind(AppointmentStatus::Cancelled.as_ref())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        match updated {
            Some(event_id) => Ok(event_id),
            None => Err(self.cancelled_or_missing(appointment_id).await),
        }
    }

    async fn attach_calendar_event(
        &self,
        appointment_id: AppointmentId,
        event_id: String,
    ) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE appointments
                SET calendar_event_id = $1, updated_at = CURRENT_TIMESTAMP
                WHERE appointment_id = $2 AND status <> $3
            "#,
        )
        .bind(event_id)
        .bind(appointment_id)
        .bind(AppointmentStatus::Cancelled.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(self.cancelled_or_missing(appointment_id).await);
        }
        Ok(())
    }

    async fn find_by_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>> {
        let sql = format!(
            "{SELECT_APPOINTMENT} WHERE a.start_time >= $1 AND a.start_time < $2 ORDER BY a.start_time ASC"
        );
        let rows = sqlx::query_as::<_, AppointmentRow>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Appointment::try_from).collect()
    }

    async fn count_by_month(&self, year: i32, month: u32) -> AppResult<i64> {
        let (start, end) = month_bounds(year, month)?;
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM appointments WHERE start_time >= $1 AND start_time < $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn count_completed_by_month(&self, year: i32, month: u32) -> AppResult<i64> {
        let (start, end) = month_bounds(year, month)?;
        sqlx::query_scalar::<_, i64>(
            r#"
                SELECT COUNT(*) FROM appointments
                WHERE start_time >= $1 AND start_time < $2 AND status = $3
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(AppointmentStatus::Confirmed.as_ref())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn count_by_status(&self, status: AppointmentStatus) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments WHERE status = $1")
            .bind(status.as_ref())
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }
}

impl AppointmentRepositoryImpl {
    // 事前の重複確認は分かりやすいエラーを返すためのもの。
    // 並行する挿入同士は appointments_no_overlap 制約 (23P01) で弾かれる
    async fn insert_without_overlap(
        &self,
        appointment_id: AppointmentId,
        event: &CreateAppointment,
    ) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let overlap = sqlx::query_scalar::<_, AppointmentId>(
            r#"
                SELECT appointment_id
                FROM appointments
                WHERE status <> $1
                  AND start_time < $3
                  AND $2 < end_time
                LIMIT 1
            "#,
        )
        .bind(AppointmentStatus::Cancelled.as_ref())
        .bind(event.start_time)
        .bind(event.end_time)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if let Some(existing) = overlap {
            return Err(AppError::Conflict(format!(
                "the requested time overlaps appointment ({existing})"
            )));
        }

        sqlx::query(
            r#"
                INSERT INTO appointments
                (appointment_id, client_id, start_time, end_time, status, notes)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(appointment_id)
        .bind(event.client_id)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(AppointmentStatus::Pending.as_ref())
        .bind(&event.notes)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::EntityNotFound(format!("client ({}) was not found", event.client_id))
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    // 条件付き更新が 0 件だった理由を返す
    async fn cancelled_or_missing(&self, appointment_id: AppointmentId) -> AppError {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM appointments WHERE appointment_id = $1)",
        )
        .bind(appointment_id)
        .fetch_one(self.db.inner_ref())
        .await;

        match exists {
            Ok(true) => AppError::Conflict(format!("appointment ({appointment_id}) is cancelled")),
            Ok(false) => {
                AppError::EntityNotFound(format!("appointment ({appointment_id}) was not found"))
            }
            Err(e) => AppError::SpecificOperationError(e),
        }
    }
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23503")
}

// [その月の1日 0:00 UTC, 翌月1日 0:00 UTC)
fn month_bounds(year: i32, month: u32) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::UnprocessableEntity(format!("invalid month: {year}-{month}")))?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| AppError::UnprocessableEntity(format!("invalid month: {year}-{month}")))?;
    Ok((
        first.and_time(chrono::NaiveTime::MIN).and_utc(),
        next.and_time(chrono::NaiveTime::MIN).and_utc(),
    ))
}
