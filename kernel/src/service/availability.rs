use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        appointment::appointment_length,
        availability::{event::SaveAvailability, AvailabilityWindow, DEFAULT_SLOT_DURATION_MINUTES},
        id::AvailabilityId,
        slot::generate_slots,
    },
    repository::{appointment::AppointmentRepository, availability::AvailabilityRepository},
};

#[derive(new)]
pub struct AvailabilityService {
    availability_repository: Arc<dyn AvailabilityRepository>,
    appointment_repository: Arc<dyn AppointmentRepository>,
}

impl AvailabilityService {
    /// Opens `date` for bookings between `start` and `end` (`HH:MM`).
    pub async fn set_availability(
        &self,
        date: NaiveDate,
        start: String,
        end: String,
        slot_duration: i32,
    ) -> AppResult<AvailabilityWindow> {
        validate_time_of_day(&start)?;
        validate_time_of_day(&end)?;

        let window = self
            .availability_repository
            .save(SaveAvailability::working_hours(date, start, end, slot_duration))
            .await?;
        tracing::info!(%date, start = %window.start, end = %window.end, "availability saved");
        Ok(window)
    }

    /// Marks `date` as not bookable, keeping any hours already configured.
    pub async fn block_date(&self, date: NaiveDate) -> AppResult<AvailabilityWindow> {
        let event = match self.availability_repository.find_by_date(date).await? {
            Some(w) => SaveAvailability::new(date, w.start, w.end, w.slot_duration, true),
            None => SaveAvailability::new(
                date,
                "00:00".into(),
                "00:00".into(),
                DEFAULT_SLOT_DURATION_MINUTES,
                true,
            ),
        };
        let window = self.availability_repository.save(event).await?;
        tracing::info!(%date, "date blocked");
        Ok(window)
    }

    pub async fn list_availability(&self) -> AppResult<Vec<AvailabilityWindow>> {
        self.availability_repository.find_all().await
    }

    pub async fn delete_availability(&self, availability_id: AvailabilityId) -> AppResult<()> {
        self.availability_repository.delete(availability_id).await
    }

    pub async fn available_slots(&self, date: NaiveDate) -> AppResult<Vec<DateTime<Utc>>> {
        let Some(window) = self
            .availability_repository
            .find_by_date(date)
            .await?
            .filter(AvailabilityWindow::is_bookable)
        else {
            return Ok(Vec::new());
        };

        // 前日から日付をまたぐ予約と、最後の枠が翌日にはみ出す分も含めて取得する
        let day_start = date.and_time(NaiveTime::MIN).and_utc();
        let appointments = self
            .appointment_repository
            .find_by_range(
                day_start - appointment_length(),
                day_start + Duration::days(1) + window.slot_step(),
            )
            .await?;

        generate_slots(Some(&window), &appointments, date)
    }
}

fn validate_time_of_day(value: &str) -> AppResult<()> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| AppError::UnprocessableEntity(format!("{value:?} is not a HH:MM time")))
}
