use async_trait::async_trait;
use derive_new::new;
use kernel::port::notification::NotificationPort;
use serde::Serialize;
use shared::error::{AppError, AppResult};

/// Prints outgoing WhatsApp messages instead of sending them.
#[derive(Default)]
pub struct LoggingWhatsApp;

#[async_trait]
impl NotificationPort for LoggingWhatsApp {
    async fn send(&self, phone: &str, message: &str) -> AppResult<()> {
        tracing::info!(phone, message, "whatsapp webhook is not configured; message logged only");
        Ok(())
    }
}

#[derive(Serialize)]
struct WebhookMessage<'a> {
    phone: &'a str,
    message: &'a str,
}

// POST {"phone": ..., "message": ...} をゲートウェイへ送る
#[derive(new)]
pub struct WebhookWhatsApp {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

#[async_trait]
impl NotificationPort for WebhookWhatsApp {
    async fn send(&self, phone: &str, message: &str) -> AppResult<()> {
        let mut req = self
            .client
            .post(&self.url)
            .json(&WebhookMessage { phone, message });
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let res = req
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("whatsapp webhook: {e}")))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "whatsapp webhook responded {status}: {body}"
            )));
        }

        tracing::info!(phone, "whatsapp message sent");
        Ok(())
    }
}
