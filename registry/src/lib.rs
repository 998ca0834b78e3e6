use std::sync::Arc;

use adapter::calendar::LoggingCalendar;
use adapter::database::ConnectionPool;
use adapter::messaging::{LoggingWhatsApp, WebhookWhatsApp};
use adapter::repository::{
    appointment::AppointmentRepositoryImpl, availability::AvailabilityRepositoryImpl,
    client::ClientRepositoryImpl, health::HealthCheckRepositoryImpl,
};
use kernel::port::{calendar::CalendarPort, notification::NotificationPort};
use kernel::repository::{
    appointment::AppointmentRepository, availability::AvailabilityRepository,
    client::ClientRepository, health::HealthCheckRepository,
};
use kernel::service::{
    availability::AvailabilityService,
    booking::BookingService,
    lifecycle::LifecycleService,
    stats::StatsService,
    task::{TaskRunner, TokioTaskRunner},
};
use shared::config::{AppConfig, NotificationConfig};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    client_repository: Arc<dyn ClientRepository>,
    availability_service: Arc<AvailabilityService>,
    booking_service: Arc<BookingService>,
    lifecycle_service: Arc<LifecycleService>,
    stats_service: Arc<StatsService>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: &AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let client_repository: Arc<dyn ClientRepository> =
            Arc::new(ClientRepositoryImpl::new(pool.clone()));
        let availability_repository: Arc<dyn AvailabilityRepository> =
            Arc::new(AvailabilityRepositoryImpl::new(pool.clone()));
        let appointment_repository: Arc<dyn AppointmentRepository> =
            Arc::new(AppointmentRepositoryImpl::new(pool.clone()));

        let calendar: Arc<dyn CalendarPort> = Arc::new(LoggingCalendar);
        let notification = notification_port(&app_config.notification);
        let tasks: Arc<dyn TaskRunner> =
            Arc::new(TokioTaskRunner::new(app_config.side_effect.timeout));

        let availability_service = Arc::new(AvailabilityService::new(
            availability_repository.clone(),
            appointment_repository.clone(),
        ));
        let booking_service = Arc::new(BookingService::new(
            client_repository.clone(),
            availability_repository,
            appointment_repository.clone(),
            calendar.clone(),
            tasks.clone(),
        ));
        let lifecycle_service = Arc::new(LifecycleService::new(
            appointment_repository.clone(),
            calendar,
            notification,
            tasks,
        ));
        let stats_service = Arc::new(StatsService::new(appointment_repository));

        Self {
            health_check_repository,
            client_repository,
            availability_service,
            booking_service,
            lifecycle_service,
            stats_service,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn client_repository(&self) -> Arc<dyn ClientRepository> {
        self.client_repository.clone()
    }

    pub fn availability_service(&self) -> Arc<AvailabilityService> {
        self.availability_service.clone()
    }

    pub fn booking_service(&self) -> Arc<BookingService> {
        self.booking_service.clone()
    }

    pub fn lifecycle_service(&self) -> Arc<LifecycleService> {
        self.lifecycle_service.clone()
    }

    pub fn stats_service(&self) -> Arc<StatsService> {
        self.stats_service.clone()
    }
}

// Webhook URL が設定されていれば実際に送信する
fn notification_port(cfg: &NotificationConfig) -> Arc<dyn NotificationPort> {
    match &cfg.webhook_url {
        Some(url) => Arc::new(WebhookWhatsApp::new(
            reqwest::Client::new(),
            url.clone(),
            cfg.webhook_token.clone(),
        )),
        None => Arc::new(LoggingWhatsApp),
    }
}
