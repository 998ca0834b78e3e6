use std::sync::Arc;

use chrono::{DateTime, Utc};
use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        appointment::{
            appointment_length,
            event::{BookAppointment, BookAppointmentForClient, CreateAppointment},
            Appointment,
        },
        client::{event::CreateClient, Client},
        role::Role,
    },
    port::calendar::CalendarPort,
    repository::{
        appointment::AppointmentRepository, availability::AvailabilityRepository,
        client::ClientRepository,
    },
    service::task::TaskRunner,
};

/// Creates appointments after resolving the client and checking the day's window.
#[derive(new)]
pub struct BookingService {
    client_repository: Arc<dyn ClientRepository>,
    availability_repository: Arc<dyn AvailabilityRepository>,
    appointment_repository: Arc<dyn AppointmentRepository>,
    calendar: Arc<dyn CalendarPort>,
    tasks: Arc<dyn TaskRunner>,
}

impl BookingService {
    /// Books for whoever owns `email`, registering a new client when nobody does.
    pub async fn create_appointment(&self, event: BookAppointment) -> AppResult<Appointment> {
        let BookAppointment {
            name,
            email,
            phone,
            start_time,
            notes,
        } = event;
        let email = email.trim().to_lowercase();

        let client = match self.client_repository.find_by_email(&email).await? {
            Some(client) => client,
            None => {
                let client = self
                    .client_repository
                    .create(CreateClient::new(name, email, phone, Role::Client))
                    .await?;
                tracing::info!(client_id = %client.client_id, "registered client from booking");
                client
            }
        };

        self.book(client, start_time, notes).await
    }

    pub async fn create_appointment_for_client(
        &self,
        event: BookAppointmentForClient,
    ) -> AppResult<Appointment> {
        let client = self
            .client_repository
            .find_by_id(event.client_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("client ({}) was not found", event.client_id))
            })?;

        self.book(client, event.start_time, event.notes).await
    }

    pub async fn list_appointments(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>> {
        self.appointment_repository.find_by_range(start, end).await
    }

    async fn book(
        &self,
        client: Client,
        start_time: DateTime<Utc>,
        notes: String,
    ) -> AppResult<Appointment> {
        let date = start_time.date_naive();
        match self.availability_repository.find_by_date(date).await? {
            Some(window) if window.is_bookable() => {}
            Some(_) => {
                return Err(AppError::Unavailable(format!(
                    "the barber is not available on {date} (blocked)"
                )))
            }
            None => {
                return Err(AppError::Unavailable(format!(
                    "the barber has no working hours on {date}"
                )))
            }
        }

        // 予約の長さは枠の間隔に関係なく常に 1 時間
        let end_time = start_time + appointment_length();
        let appointment_id = self
            .appointment_repository
            .create(CreateAppointment::new(
                client.client_id,
                start_time,
                end_time,
                notes,
            ))
            .await?;
        let appointment = self.appointment_repository.find_by_id(appointment_id).await?;

        tracing::info!(
            appointment_id = %appointment.appointment_id,
            client_id = %client.client_id,
            start_time = %appointment.start_time,
            "appointment created"
        );

        // 通知は確定時にのみ送る。ここではカレンダー連携だけ行う
        self.sync_calendar(&appointment);

        Ok(appointment)
    }

    fn sync_calendar(&self, appointment: &Appointment) {
        let calendar = self.calendar.clone();
        let repository = self.appointment_repository.clone();
        let appointment = appointment.clone();
        self.tasks.submit(
            "calendar.create_event",
            Box::pin(async move {
                let event_id = calendar.create_event(&appointment).await?;
                if event_id.is_empty() {
                    return Ok(());
                }
                match repository
                    .attach_calendar_event(appointment.appointment_id, event_id.clone())
                    .await
                {
                    // 作成中に取り消された予約のイベントは残さない
                    Err(AppError::Conflict(_)) => calendar.delete_event(&event_id).await,
                    other => other,
                }
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{
            appointment::AppointmentStatus, availability::event::SaveAvailability,
            id::ClientId,
        },
        service::test_support::{InMemoryStore, QueuedTasks, RecordingCalendar},
    };
    use chrono::{Duration, NaiveDate, TimeZone};

    struct Fixture {
        store: Arc<InMemoryStore>,
        calendar: Arc<RecordingCalendar>,
        tasks: Arc<QueuedTasks>,
        service: Arc<BookingService>,
    }

    fn fixture(calendar: RecordingCalendar) -> Fixture {
        let store = Arc::new(InMemoryStore::default());
        let calendar = Arc::new(calendar);
        let tasks = Arc::new(QueuedTasks::default());
        let service = Arc::new(BookingService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            calendar.clone(),
            tasks.clone(),
        ));
        Fixture {
            store,
            calendar,
            tasks,
            service,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 24).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 24, hour, minute, 0).unwrap()
    }

    async fn open_day(store: &InMemoryStore, blocked: bool) {
        AvailabilityRepository::save(
            store,
            SaveAvailability::new(day(), "09:00".into(), "13:00".into(), 60, blocked),
        )
        .await
        .unwrap();
    }

    fn booking(email: &str, start_time: DateTime<Utc>) -> BookAppointment {
        BookAppointment::new(
            "Juan Perez".into(),
            email.into(),
            "03492-640018".into(),
            start_time,
            "corte y barba".into(),
        )
    }

    #[tokio::test]
    async fn books_one_hour_pending_appointment_and_registers_client() {
        let f = fixture(RecordingCalendar::default());
        open_day(&f.store, false).await;

        let appt = f
            .service
            .create_appointment(booking("Juan@Example.com ", at(10, 0)))
            .await
            .unwrap();

        assert_eq!(appt.status, AppointmentStatus::Pending);
        assert_eq!(appt.end_time - appt.start_time, Duration::hours(1));
        assert_eq!(appt.client.email, "juan@example.com");
        assert_eq!(appt.notes, "corte y barba");

        let clients = f.store.clients();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].role, Role::Client);
        assert!(!clients[0].verified);
    }

    #[tokio::test]
    async fn existing_client_is_reused_by_email() {
        let f = fixture(RecordingCalendar::default());
        open_day(&f.store, false).await;

        let first = f
            .service
            .create_appointment(booking("juan@example.com", at(9, 0)))
            .await
            .unwrap();
        let second = f
            .service
            .create_appointment(booking("juan@example.com", at(11, 0)))
            .await
            .unwrap();

        assert_eq!(first.client.client_id, second.client.client_id);
        assert_eq!(f.store.clients().len(), 1);
    }

    #[tokio::test]
    async fn blocked_or_unconfigured_day_is_unavailable() {
        let f = fixture(RecordingCalendar::default());

        let err = f
            .service
            .create_appointment(booking("juan@example.com", at(10, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));

        open_day(&f.store, true).await;
        let err = f
            .service
            .create_appointment(booking("juan@example.com", at(10, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));
        assert!(f.store.appointments().is_empty());
    }

    #[tokio::test]
    async fn overlapping_booking_is_a_conflict() {
        let f = fixture(RecordingCalendar::default());
        open_day(&f.store, false).await;

        f.service
            .create_appointment(booking("a@example.com", at(10, 0)))
            .await
            .unwrap();
        let err = f
            .service
            .create_appointment(booking("b@example.com", at(10, 30)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // 終了時刻ちょうどに始まる予約は重複しない
        f.service
            .create_appointment(booking("b@example.com", at(11, 0)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cancelled_appointment_frees_its_interval() {
        let f = fixture(RecordingCalendar::default());
        open_day(&f.store, false).await;

        let first = f
            .service
            .create_appointment(booking("a@example.com", at(10, 0)))
            .await
            .unwrap();
        AppointmentRepository::update_status(
            f.store.as_ref(),
            first.appointment_id,
            AppointmentStatus::Cancelled,
        )
        .await
        .unwrap();

        let again = f
            .service
            .create_appointment(booking("b@example.com", at(10, 0)))
            .await;
        assert!(again.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_requests_for_one_slot_admit_exactly_one() {
        let f = fixture(RecordingCalendar::default());
        open_day(&f.store, false).await;

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = f.service.clone();
                tokio::spawn(async move {
                    service
                        .create_appointment(booking(&format!("c{i}@example.com"), at(12, 0)))
                        .await
                })
            })
            .collect();

        let mut ok = 0;
        let mut conflicts = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(AppError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(conflicts, 7);

        let active: Vec<_> = f
            .store
            .appointments()
            .into_iter()
            .filter(|a| a.status.is_active())
            .collect();
        for a in &active {
            for b in &active {
                if a.appointment_id != b.appointment_id {
                    assert!(a.start_time >= b.end_time || b.start_time >= a.end_time);
                }
            }
        }
    }

    #[tokio::test]
    async fn unknown_client_id_is_not_found() {
        let f = fixture(RecordingCalendar::default());
        open_day(&f.store, false).await;

        let err = f
            .service
            .create_appointment_for_client(BookAppointmentForClient::new(
                ClientId::new(),
                at(10, 0),
                String::new(),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
    }

    #[tokio::test]
    async fn books_for_existing_client_id() {
        let f = fixture(RecordingCalendar::default());
        open_day(&f.store, false).await;
        let client = ClientRepository::create(
            f.store.as_ref(),
            CreateClient::new(
                "Ana".into(),
                "ana@example.com".into(),
                "0341-555".into(),
                Role::Client,
            ),
        )
        .await
        .unwrap();

        let appt = f
            .service
            .create_appointment_for_client(BookAppointmentForClient::new(
                client.client_id,
                at(9, 0),
                String::new(),
            ))
            .await
            .unwrap();
        assert_eq!(appt.client.client_id, client.client_id);
        assert_eq!(appt.client.name, "Ana");
    }

    #[tokio::test]
    async fn calendar_event_id_is_attached_in_background() {
        let f = fixture(RecordingCalendar::returning("evt-1"));
        open_day(&f.store, false).await;

        let appt = f
            .service
            .create_appointment(booking("a@example.com", at(10, 0)))
            .await
            .unwrap();
        assert_eq!(appt.calendar_event_id, None);
        assert_eq!(f.tasks.pending(), 1);

        f.tasks.run_all().await;
        let stored = AppointmentRepository::find_by_id(f.store.as_ref(), appt.appointment_id)
            .await
            .unwrap();
        assert_eq!(stored.calendar_event_id.as_deref(), Some("evt-1"));
    }

    #[tokio::test]
    async fn event_created_after_cancellation_is_deleted() {
        let f = fixture(RecordingCalendar::returning("evt-1"));
        open_day(&f.store, false).await;

        let appt = f
            .service
            .create_appointment(booking("a@example.com", at(10, 0)))
            .await
            .unwrap();
        AppointmentRepository::update_status(
            f.store.as_ref(),
            appt.appointment_id,
            AppointmentStatus::Cancelled,
        )
        .await
        .unwrap();

        f.tasks.run_all().await;
        assert_eq!(*f.calendar.deleted.lock().unwrap(), ["evt-1"]);
        let stored = AppointmentRepository::find_by_id(f.store.as_ref(), appt.appointment_id)
            .await
            .unwrap();
        assert_eq!(stored.calendar_event_id, None);
    }

    #[tokio::test]
    async fn empty_or_failed_calendar_event_leaves_booking_intact() {
        for calendar in [RecordingCalendar::default(), RecordingCalendar::failing()] {
            let f = fixture(calendar);
            open_day(&f.store, false).await;

            let appt = f
                .service
                .create_appointment(booking("a@example.com", at(10, 0)))
                .await
                .unwrap();
            f.tasks.run_all().await;

            assert_eq!(f.calendar.created.lock().unwrap().len(), 1);
            let stored =
                AppointmentRepository::find_by_id(f.store.as_ref(), appt.appointment_id)
                    .await
                    .unwrap();
            assert_eq!(stored.calendar_event_id, None);
            assert_eq!(stored.status, AppointmentStatus::Pending);
        }
    }

    #[tokio::test]
    async fn lists_appointments_in_half_open_range() {
        let f = fixture(RecordingCalendar::default());
        open_day(&f.store, false).await;
        for hour in [9, 11, 13] {
            f.service
                .create_appointment(booking("a@example.com", at(hour, 0)))
                .await
                .unwrap();
        }

        let found = f
            .service
            .list_appointments(at(9, 0), at(13, 0))
            .await
            .unwrap();
        let hours: Vec<_> = found.iter().map(|a| a.start_time).collect();
        assert_eq!(hours, [at(9, 0), at(11, 0)]);
    }
}
