use crate::model::{id::ClientId, role::Role};

pub mod event;
pub mod phone;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub client_id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub verified: bool,
}
