use std::time::Duration;

use anyhow::{Context, Result};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub side_effect: SideEffectConfig,
    pub notification: NotificationConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST").context("DATABASE_HOST must be set")?,
            port: std::env::var("DATABASE_PORT")
                .context("DATABASE_PORT must be set")?
                .parse::<u16>()
                .context("Failed to parse DATABASE_PORT")?,
            username: std::env::var("DATABASE_USERNAME")
                .context("DATABASE_USERNAME must be set")?,
            password: std::env::var("DATABASE_PASSWORD")
                .context("DATABASE_PASSWORD must be set")?,
            database: std::env::var("DATABASE_NAME").context("DATABASE_NAME must be set")?,
        };

        let timeout_secs = match std::env::var("SIDE_EFFECT_TIMEOUT_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .context("Failed to parse SIDE_EFFECT_TIMEOUT_SECS")?,
            Err(_) => DEFAULT_SIDE_EFFECT_TIMEOUT_SECS,
        };
        let side_effect = SideEffectConfig {
            timeout: Duration::from_secs(timeout_secs),
        };

        // Webhook URL が無ければログ出力のみの送信アダプタを使う
        let notification = NotificationConfig {
            webhook_url: std::env::var("NOTIFICATION_WEBHOOK_URL").ok(),
            webhook_token: std::env::var("NOTIFICATION_WEBHOOK_TOKEN").ok(),
        };

        let port = match std::env::var("PORT") {
            Ok(v) => v.parse::<u16>().context("Failed to parse PORT")?,
            Err(_) => 8080,
        };

        Ok(Self {
            database,
            side_effect,
            notification,
            server: ServerConfig { port },
        })
    }
}

const DEFAULT_SIDE_EFFECT_TIMEOUT_SECS: u64 = 10;

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

/// Bounds for best-effort calendar and messaging calls.
#[derive(Debug, Clone, Copy)]
pub struct SideEffectConfig {
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub webhook_url: Option<String>,
    pub webhook_token: Option<String>,
}

pub struct ServerConfig {
    pub port: u16,
}
