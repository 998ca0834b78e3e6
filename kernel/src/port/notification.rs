use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait NotificationPort: Send + Sync {
    // phone は normalize_phone 済みの番号
    async fn send(&self, phone: &str, message: &str) -> AppResult<()>;
}
