use garde::Validate;
use kernel::model::{client::Client, id::ClientId};
use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: i64 = 20;

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Debug, Deserialize, Validate)]
pub struct ClientListQuery {
    #[garde(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub client_id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub verified: bool,
}

impl From<Client> for ClientResponse {
    fn from(value: Client) -> Self {
        let Client {
            client_id,
            name,
            email,
            phone,
            role,
            verified,
        } = value;
        Self {
            client_id,
            name,
            email,
            phone,
            role: role.as_ref().to_owned(),
            verified,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientsResponse {
    pub items: Vec<ClientResponse>,
}

impl From<Vec<Client>> for ClientsResponse {
    fn from(value: Vec<Client>) -> Self {
        Self {
            items: value.into_iter().map(ClientResponse::from).collect(),
        }
    }
}
