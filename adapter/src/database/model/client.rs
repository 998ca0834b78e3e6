use std::str::FromStr;

use kernel::model::{client::Client, id::ClientId, role::Role};
use shared::error::AppError;
use sqlx::FromRow;

#[derive(FromRow)]
pub struct ClientRow {
    pub client_id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub verified: bool,
}

impl TryFrom<ClientRow> for Client {
    type Error = AppError;

    fn try_from(value: ClientRow) -> Result<Self, Self::Error> {
        let ClientRow {
            client_id,
            name,
            email,
            phone,
            role,
            verified,
        } = value;
        let role = Role::from_str(&role)
            .map_err(|_| AppError::ConversionEntityError(format!("unknown role: {role}")))?;
        Ok(Client {
            client_id,
            name,
            email,
            phone,
            role,
            verified,
        })
    }
}
