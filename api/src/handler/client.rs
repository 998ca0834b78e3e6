use axum::{
    extract::{Path, Query, State},
    Json,
};
use garde::Validate;
use kernel::model::id::ClientId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::client::{ClientListQuery, ClientResponse, ClientsResponse};

pub async fn show_client_list(
    Query(query): Query<ClientListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ClientsResponse>> {
    query.validate(&())?;

    registry
        .client_repository()
        .find_clients(query.limit, query.offset)
        .await
        .map(ClientsResponse::from)
        .map(Json)
}

pub async fn show_client(
    Path(client_id): Path<ClientId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ClientResponse>> {
    registry
        .client_repository()
        .find_by_id(client_id)
        .await
        .and_then(|client| match client {
            Some(client) => Ok(Json(client.into())),
            None => Err(AppError::EntityNotFound(format!(
                "client ({client_id}) was not found"
            ))),
        })
}
