use crate::model::{
    availability::{event::SaveAvailability, AvailabilityWindow},
    id::AvailabilityId,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    // 日付単位の upsert。既存の日付なら id を維持したまま上書きする
    async fn save(&self, event: SaveAvailability) -> AppResult<AvailabilityWindow>;
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Option<AvailabilityWindow>>;
    async fn find_all(&self) -> AppResult<Vec<AvailabilityWindow>>;
    async fn delete(&self, availability_id: AvailabilityId) -> AppResult<()>;
}
