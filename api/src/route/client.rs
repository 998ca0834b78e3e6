use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    appointment::create_appointment_for_client,
    client::{show_client, show_client_list},
};

pub fn build_client_routers() -> Router<AppRegistry> {
    let client_routers = Router::new()
        .route("/", get(show_client_list))
        .route("/:client_id", get(show_client))
        .route("/:client_id/appointments", post(create_appointment_for_client));

    Router::new().nest("/clients", client_routers)
}
