use crate::model::{
    client::{event::CreateClient, Client},
    id::ClientId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, event: CreateClient) -> AppResult<Client>;
    async fn find_by_id(&self, client_id: ClientId) -> AppResult<Option<Client>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>>;
    async fn find_clients(&self, limit: i64, offset: i64) -> AppResult<Vec<Client>>;
}
