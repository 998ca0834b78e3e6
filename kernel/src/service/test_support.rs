// サービス層テスト用のインメモリ実装
use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        appointment::{
            event::CreateAppointment, Appointment, AppointmentClient, AppointmentStatus,
        },
        availability::{event::SaveAvailability, AvailabilityWindow},
        client::{event::CreateClient, Client},
        id::{AppointmentId, AvailabilityId, ClientId},
        time_range::TimeRange,
    },
    port::{calendar::CalendarPort, notification::NotificationPort},
    repository::{
        appointment::AppointmentRepository, availability::AvailabilityRepository,
        client::ClientRepository,
    },
    service::task::{run_logged, SideEffect, TaskRunner},
};

#[derive(Default)]
struct State {
    clients: Vec<Client>,
    windows: Vec<AvailabilityWindow>,
    appointments: Vec<Appointment>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn appointments(&self) -> Vec<Appointment> {
        self.state.lock().unwrap().appointments.clone()
    }

    pub fn clients(&self) -> Vec<Client> {
        self.state.lock().unwrap().clients.clone()
    }
}

#[async_trait]
impl ClientRepository for InMemoryStore {
    async fn create(&self, event: CreateClient) -> AppResult<Client> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.clients.iter().find(|c| c.email == event.email) {
            return Ok(existing.clone());
        }
        let client = Client {
            client_id: ClientId::new(),
            name: event.name,
            email: event.email,
            phone: event.phone,
            role: event.role,
            verified: false,
        };
        state.clients.push(client.clone());
        Ok(client)
    }

    async fn find_by_id(&self, client_id: ClientId) -> AppResult<Option<Client>> {
        let state = self.state.lock().unwrap();
        Ok(state.clients.iter().find(|c| c.client_id == client_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>> {
        let state = self.state.lock().unwrap();
        Ok(state.clients.iter().find(|c| c.email == email).cloned())
    }

    async fn find_clients(&self, limit: i64, offset: i64) -> AppResult<Vec<Client>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .clients
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AvailabilityRepository for InMemoryStore {
    async fn save(&self, event: SaveAvailability) -> AppResult<AvailabilityWindow> {
        let mut state = self.state.lock().unwrap();
        if let Some(w) = state.windows.iter_mut().find(|w| w.date == event.date) {
            w.start = event.start;
            w.end = event.end;
            w.slot_duration = event.slot_duration;
            w.blocked = event.blocked;
            return Ok(w.clone());
        }
        let window = AvailabilityWindow {
            id: AvailabilityId::new(),
            date: event.date,
            start: event.start,
            end: event.end,
            slot_duration: event.slot_duration,
            blocked: event.blocked,
        };
        state.windows.push(window.clone());
        Ok(window)
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Option<AvailabilityWindow>> {
        let state = self.state.lock().unwrap();
        Ok(state.windows.iter().find(|w| w.date == date).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<AvailabilityWindow>> {
        Ok(self.state.lock().unwrap().windows.clone())
    }

    async fn delete(&self, availability_id: AvailabilityId) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.windows.len();
        state.windows.retain(|w| w.id != availability_id);
        if state.windows.len() == before {
            return Err(AppError::EntityNotFound("availability not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryStore {
    async fn create(&self, event: CreateAppointment) -> AppResult<AppointmentId> {
        // ロックを握ったまま重複確認と追加を行う
        let mut state = self.state.lock().unwrap();
        let requested = TimeRange::new(event.start_time, event.end_time);
        if state.appointments.iter().any(|a| a.blocks(&requested)) {
            return Err(AppError::Conflict("the requested slot is already taken".into()));
        }
        let client = state
            .clients
            .iter()
            .find(|c| c.client_id == event.client_id)
            .ok_or_else(|| AppError::EntityNotFound("client not found".into()))?;
        let now = Utc::now();
        let appointment = Appointment {
            appointment_id: AppointmentId::new(),
            start_time: event.start_time,
            end_time: event.end_time,
            status: AppointmentStatus::Pending,
            calendar_event_id: None,
            notes: event.notes,
            created_at: now,
            updated_at: now,
            client: AppointmentClient {
                client_id: client.client_id,
                name: client.name.clone(),
                email: client.email.clone(),
                phone: client.phone.clone(),
            },
        };
        let id = appointment.appointment_id;
        state.appointments.push(appointment);
        Ok(id)
    }

    async fn find_by_id(&self, appointment_id: AppointmentId) -> AppResult<Appointment> {
        let state = self.state.lock().unwrap();
        state
            .appointments
            .iter()
            .find(|a| a.appointment_id == appointment_id)
            .cloned()
            .ok_or_else(|| AppError::EntityNotFound("appointment not found".into()))
    }

    async fn update_status(
        &self,
        appointment_id: AppointmentId,
        status: AppointmentStatus,
    ) -> AppResult<Option<String>> {
        let mut state = self.state.lock().unwrap();
        let appt = state
            .appointments
            .iter_mut()
            .find(|a| a.appointment_id == appointment_id)
            .ok_or_else(|| AppError::EntityNotFound("appointment not found".into()))?;
        if appt.status == AppointmentStatus::Cancelled {
            return Err(AppError::Conflict("appointment is cancelled".into()));
        }
        appt.status = status;
        Ok(appt.calendar_event_id.clone())
    }

    async fn attach_calendar_event(
        &self,
        appointment_id: AppointmentId,
        event_id: String,
    ) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let appt = state
            .appointments
            .iter_mut()
            .find(|a| a.appointment_id == appointment_id)
            .ok_or_else(|| AppError::EntityNotFound("appointment not found".into()))?;
        if appt.status == AppointmentStatus::Cancelled {
            return Err(AppError::Conflict("appointment is cancelled".into()));
        }
        appt.calendar_event_id = Some(event_id);
        Ok(())
    }

    async fn find_by_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>> {
        let state = self.state.lock().unwrap();
        let mut found: Vec<_> = state
            .appointments
            .iter()
            .filter(|a| a.start_time >= start && a.start_time < end)
            .cloned()
            .collect();
        found.sort_by_key(|a| a.start_time);
        Ok(found)
    }

    async fn count_by_month(&self, year: i32, month: u32) -> AppResult<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .appointments
            .iter()
            .filter(|a| a.start_time.year() == year && a.start_time.month() == month)
            .count() as i64)
    }

    async fn count_completed_by_month(&self, year: i32, month: u32) -> AppResult<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Confirmed)
            .filter(|a| a.start_time.year() == year && a.start_time.month() == month)
            .count() as i64)
    }

    async fn count_by_status(&self, status: AppointmentStatus) -> AppResult<i64> {
        let state = self.state.lock().unwrap();
        Ok(state.appointments.iter().filter(|a| a.status == status).count() as i64)
    }
}

/// Calendar double that records calls and can be told to fail.
#[derive(Default)]
pub struct RecordingCalendar {
    pub event_id: String,
    pub fail: bool,
    pub created: Mutex<Vec<AppointmentId>>,
    pub deleted: Mutex<Vec<String>>,
}

impl RecordingCalendar {
    pub fn returning(event_id: &str) -> Self {
        Self {
            event_id: event_id.into(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl CalendarPort for RecordingCalendar {
    async fn create_event(&self, appointment: &Appointment) -> AppResult<String> {
        self.created.lock().unwrap().push(appointment.appointment_id);
        if self.fail {
            return Err(AppError::ExternalServiceError("calendar is down".into()));
        }
        Ok(self.event_id.clone())
    }

    async fn delete_event(&self, event_id: &str) -> AppResult<()> {
        self.deleted.lock().unwrap().push(event_id.to_string());
        if self.fail {
            return Err(AppError::ExternalServiceError("calendar is down".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl NotificationPort for RecordingNotifier {
    async fn send(&self, phone: &str, message: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), message.to_string()));
        if self.fail {
            return Err(AppError::ExternalServiceError("whatsapp is down".into()));
        }
        Ok(())
    }
}

/// Holds submitted side effects until the test drains them.
#[derive(Default)]
pub struct QueuedTasks {
    queue: Mutex<Vec<(&'static str, SideEffect)>>,
}

impl QueuedTasks {
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    pub async fn run_all(&self) {
        let tasks: Vec<_> = std::mem::take(&mut *self.queue.lock().unwrap());
        for (label, task) in tasks {
            run_logged(label, Duration::from_secs(1), task).await;
        }
    }
}

impl TaskRunner for QueuedTasks {
    fn submit(&self, label: &'static str, task: SideEffect) {
        self.queue.lock().unwrap().push((label, task));
    }
}
